use chrono::NaiveDate;

use cricket_terminal::state::{MatchStatRecord, Player, parse_match_day};
use cricket_terminal::stats::{
    derive_all_player_stats, derive_leaders, derive_player_stats, mvp_leaderboard, team_results,
};

fn player(id: i64, first: &str, last: &str, team: &str) -> Player {
    Player {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        role: "Batsman".to_string(),
        team: team.to_string(),
        image_url: None,
    }
}

fn batting(player_id: i64, date: &str, runs: u32, balls: u32, fours: u32, sixes: u32) -> MatchStatRecord {
    MatchStatRecord {
        player_id: Some(player_id),
        match_date: date.to_string(),
        opposition: "Australia".to_string(),
        venue: "Mumbai".to_string(),
        match_result: "Won".to_string(),
        runs,
        balls,
        fours,
        sixes,
        ..MatchStatRecord::default()
    }
}

fn bowling(player_id: i64, date: &str, wickets: u32, overs: f64, runs_conceded: u32) -> MatchStatRecord {
    MatchStatRecord {
        player_id: Some(player_id),
        match_date: date.to_string(),
        opposition: "Australia".to_string(),
        venue: "Mumbai".to_string(),
        match_result: "Won".to_string(),
        wickets,
        overs,
        runs_conceded,
        ..MatchStatRecord::default()
    }
}

#[test]
fn batting_averages_and_strike_rate() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let stats = vec![
        batting(1, "2024-03-01", 50, 40, 4, 2),
        batting(1, "2024-03-05", 30, 30, 2, 0),
    ];

    let derived = derive_player_stats(1i64, &players, &stats).expect("player exists");
    assert_eq!(derived.matches, 2);
    assert_eq!(derived.runs, 80);
    assert_eq!(derived.balls, 70);
    assert_eq!(derived.avg, 40.0);
    assert_eq!(derived.sr, 114.3);
    assert_eq!(derived.economy, 0.0);
    assert_eq!(derived.mvp_score, 80);
    assert_eq!(derived.scoring.sixes, 12);
    assert_eq!(derived.scoring.fours, 24);
    assert_eq!(derived.scoring.others, 44);
}

#[test]
fn bowling_only_record() {
    let players = vec![player(2, "Jasprit", "Bumrah", "India")];
    let stats = vec![bowling(2, "2024-03-01", 3, 4.0, 20)];

    let derived = derive_player_stats(2i64, &players, &stats).expect("player exists");
    assert_eq!(derived.economy, 5.0);
    assert_eq!(derived.mvp_score, 60);
    assert_eq!(derived.sr, 0.0);
    assert_eq!(derived.avg, 0.0);
    assert_eq!(derived.scoring.total(), 0);
}

#[test]
fn economy_rounds_to_two_decimals() {
    let players = vec![player(2, "Jasprit", "Bumrah", "India")];
    let stats = vec![bowling(2, "2024-03-01", 1, 3.0, 20)];
    let derived = derive_player_stats(2i64, &players, &stats).unwrap();
    assert_eq!(derived.economy, 6.67);
}

#[test]
fn player_without_records_is_all_zero() {
    let players = vec![player(1, "Virat", "Kohli", "India"), player(9, "New", "Guy", "India")];
    let stats = vec![batting(1, "2024-03-01", 50, 40, 4, 2)];

    let derived = derive_player_stats(9i64, &players, &stats).expect("player exists");
    assert_eq!(derived.matches, 0);
    assert_eq!(derived.avg, 0.0);
    assert_eq!(derived.sr, 0.0);
    assert_eq!(derived.economy, 0.0);
    assert_eq!(derived.mvp_score, 0);
    assert_eq!(derived.scoring.total(), 0);
    assert!(derived.trend.is_empty());
}

#[test]
fn unknown_player_is_absent() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    assert!(derive_player_stats(42i64, &players, &[]).is_none());
    assert!(derive_player_stats("abc", &players, &[]).is_none());
    assert!(derive_player_stats(1i64, &[], &[]).is_none());
}

#[test]
fn numeric_string_ids_are_coerced() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let stats = vec![batting(1, "2024-03-01", 50, 40, 4, 2)];

    let from_str = derive_player_stats(" 1 ", &players, &stats).expect("coerced id matches");
    let from_int = derive_player_stats(1i64, &players, &stats).unwrap();
    assert_eq!(from_str, from_int);
    assert_eq!(from_str.runs, 50);
}

#[test]
fn other_runs_never_go_negative() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    // Inconsistent input: boundaries worth 34 runs but only 10 recorded.
    let stats = vec![batting(1, "2024-03-01", 10, 8, 4, 3)];

    let derived = derive_player_stats(1i64, &players, &stats).unwrap();
    assert_eq!(derived.scoring.sixes, 18);
    assert_eq!(derived.scoring.fours, 16);
    assert_eq!(derived.scoring.others, 0);
}

#[test]
fn scoring_buckets_never_exceed_runs() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let cases = [(0, 0, 0), (6, 0, 1), (37, 3, 2), (10, 4, 3), (100, 10, 5)];
    for (runs, fours, sixes) in cases {
        let stats = vec![batting(1, "2024-03-01", runs, 50, fours, sixes)];
        let derived = derive_player_stats(1i64, &players, &stats).unwrap();
        let buckets = derived.scoring.buckets();
        assert_eq!(buckets[0].0, "Sixes");
        assert_eq!(buckets[2].0, "Others");
        let sum: u32 = buckets.iter().map(|(_, v)| *v).sum();
        if fours * 4 + sixes * 6 <= runs {
            assert_eq!(sum, runs);
        } else {
            assert_eq!(derived.scoring.others, 0);
        }
    }
}

#[test]
fn trend_is_sorted_by_date_and_only_own_records() {
    let players = vec![player(1, "Virat", "Kohli", "India"), player(2, "Rohit", "Sharma", "India")];
    let stats = vec![
        batting(1, "2024-03-10", 10, 10, 0, 0),
        batting(2, "2024-03-02", 99, 60, 0, 0),
        batting(1, "2024-03-01", 20, 10, 0, 0),
        batting(1, "2024-03-05", 30, 10, 0, 0),
        batting(1, "2024-03-05", 31, 10, 0, 0),
    ];

    let derived = derive_player_stats(1i64, &players, &stats).unwrap();
    let runs: Vec<u32> = derived.trend.iter().map(|r| r.runs).collect();
    assert_eq!(runs, vec![20, 30, 31, 10]);
    assert!(derived.trend.iter().all(|r| r.player_id == Some(1)));
    assert!(
        derived
            .trend
            .windows(2)
            .all(|w| w[0].match_day() <= w[1].match_day())
    );
}

#[test]
fn records_without_player_are_ignored() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let mut orphan = batting(1, "2024-03-01", 99, 50, 0, 0);
    orphan.player_id = None;
    let stats = vec![orphan, batting(1, "2024-03-02", 10, 10, 0, 0)];

    let derived = derive_player_stats(1i64, &players, &stats).unwrap();
    assert_eq!(derived.runs, 10);
    assert_eq!(derived.matches, 1);
}

#[test]
fn derive_is_idempotent() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let stats = vec![
        batting(1, "2024-03-01", 50, 40, 4, 2),
        bowling(1, "2024-03-02", 2, 3.3, 27),
    ];
    let first = derive_player_stats(1i64, &players, &stats);
    let second = derive_player_stats(1i64, &players, &stats);
    assert_eq!(first, second);
    assert_eq!(stats.len(), 2);
}

#[test]
fn leaders_on_empty_input_are_absent() {
    let leaders = derive_leaders(&[]);
    assert!(leaders.top_run_scorer.is_none());
    assert!(leaders.top_wicket_taker.is_none());
}

#[test]
fn single_player_holds_both_caps() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let all = derive_all_player_stats(&players, &[]);
    let leaders = derive_leaders(&all);
    assert_eq!(leaders.top_run_scorer.map(|s| s.player.id), Some(1));
    assert_eq!(leaders.top_wicket_taker.map(|s| s.player.id), Some(1));
}

#[test]
fn leader_ties_go_to_first_in_roster() {
    let players = vec![
        player(1, "Virat", "Kohli", "India"),
        player(2, "Rohit", "Sharma", "India"),
        player(3, "Jasprit", "Bumrah", "India"),
    ];
    let stats = vec![
        batting(1, "2024-03-01", 40, 30, 0, 0),
        batting(2, "2024-03-01", 40, 30, 0, 0),
        bowling(2, "2024-03-01", 2, 4.0, 30),
        bowling(3, "2024-03-01", 2, 4.0, 25),
    ];
    let all = derive_all_player_stats(&players, &stats);
    let leaders = derive_leaders(&all);
    assert_eq!(leaders.top_run_scorer.map(|s| s.player.id), Some(1));
    assert_eq!(leaders.top_wicket_taker.map(|s| s.player.id), Some(2));
}

#[test]
fn derive_all_keeps_roster_order() {
    let players = vec![player(5, "A", "A", "X"), player(3, "B", "B", "Y")];
    let all = derive_all_player_stats(&players, &[]);
    let ids: Vec<i64> = all.iter().map(|s| s.player.id).collect();
    assert_eq!(ids, vec![5, 3]);
}

#[test]
fn mvp_board_sorts_descending_and_truncates() {
    let players = vec![
        player(1, "A", "A", "X"),
        player(2, "B", "B", "X"),
        player(3, "C", "C", "X"),
    ];
    let mut catch = batting(3, "2024-03-01", 0, 0, 0, 0);
    catch.catches = 2;
    let stats = vec![
        batting(1, "2024-03-01", 10, 10, 0, 0),
        bowling(2, "2024-03-01", 1, 2.0, 10),
        catch,
    ];
    let all = derive_all_player_stats(&players, &stats);

    let board = mvp_leaderboard(&all, 10);
    let ids: Vec<i64> = board.iter().map(|s| s.player.id).collect();
    // 20 (wicket) and 20 (catches) tie: roster order decides.
    assert_eq!(ids, vec![2, 3, 1]);

    assert_eq!(mvp_leaderboard(&all, 1).len(), 1);
}

#[test]
fn team_results_count_each_match_once() {
    let players = vec![
        player(1, "Virat", "Kohli", "India"),
        player(2, "Jasprit", "Bumrah", "India"),
        player(3, "Pat", "Cummins", "Australia"),
    ];
    let mut lost = batting(1, "2024-03-05", 10, 10, 0, 0);
    lost.opposition = "England".to_string();
    lost.match_result = "Lost".to_string();
    let mut aus = batting(3, "2024-03-01", 10, 10, 0, 0);
    aus.opposition = "India".to_string();
    aus.match_result = "Lost".to_string();
    let stats = vec![
        batting(1, "2024-03-01", 50, 40, 0, 0),
        bowling(2, "2024-03-01", 3, 4.0, 20),
        lost,
        aus,
    ];

    let records = team_results(&players, &stats);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].team, "India");
    assert_eq!(records[0].wins, 1);
    assert_eq!(records[0].losses, 1);
    assert_eq!(records[0].played(), 2);
    assert_eq!(records[1].team, "Australia");
    assert_eq!(records[1].wins, 0);
    assert_eq!(records[1].losses, 1);
}

#[test]
fn averages_round_the_stored_value_not_the_scaled_one() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    // 29 / 20 is stored as 1.4499..., so one decimal gives 1.4.
    let mut stats: Vec<MatchStatRecord> = (1..=20)
        .map(|day| batting(1, &format!("2024-03-{day:02}"), 1, 1, 0, 0))
        .collect();
    stats[0].runs = 10;

    let derived = derive_player_stats(1i64, &players, &stats).unwrap();
    assert_eq!(derived.runs, 29);
    assert_eq!(derived.matches, 20);
    assert_eq!(derived.avg, 1.4);
}

#[test]
fn match_days_accept_datetimes_and_prefixes() {
    let day = |d| NaiveDate::from_ymd_opt(2024, 3, d);
    assert_eq!(parse_match_day("2024-03-05"), day(5));
    assert_eq!(parse_match_day(" 2024-03-05 "), day(5));
    assert_eq!(parse_match_day("2024-03-01T10:00:00"), day(1));
    assert_eq!(parse_match_day("2024-03-01T10:00:00Z"), day(1));
    assert_eq!(parse_match_day("2024-03-03 09:00:00"), day(3));
    assert_eq!(parse_match_day("2024-03-03T09:00"), day(3));
    assert_eq!(parse_match_day("TBD"), None);
    assert_eq!(parse_match_day(""), None);
}

#[test]
fn trend_orders_mixed_date_formats_with_unknown_dates_first() {
    let players = vec![player(1, "Virat", "Kohli", "India")];
    let stats = vec![
        batting(1, "2024-03-05", 5, 5, 0, 0),
        batting(1, "2024-03-01T10:00:00Z", 1, 1, 0, 0),
        batting(1, "2024-03-03 09:00:00", 3, 3, 0, 0),
        batting(1, "TBD", 0, 1, 0, 0),
    ];

    let derived = derive_player_stats(1i64, &players, &stats).unwrap();
    let dates: Vec<&str> = derived.trend.iter().map(|r| r.match_date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["TBD", "2024-03-01T10:00:00Z", "2024-03-03 09:00:00", "2024-03-05"]
    );
}
