use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Result, anyhow};

use cricket_terminal::api_fetch::{PlayerRows, parse_players_json};
use cricket_terminal::feed::{CricketSource, run_command, spawn_provider};
use cricket_terminal::state::{
    AppState, Delta, LiveMatch, LoadState, MatchStatRecord, Player, ProviderCommand, Team,
    apply_delta,
};

struct StubSource {
    fail_stats: bool,
}

impl CricketSource for StubSource {
    fn live_matches(&self) -> Result<Vec<LiveMatch>> {
        Ok(vec![LiveMatch {
            id: "m1".to_string(),
            name: "India vs Australia".to_string(),
            status: "Live".to_string(),
            venue: "Mumbai".to_string(),
            date: "2024-03-01".to_string(),
        }])
    }

    fn teams(&self) -> Result<Vec<Team>> {
        Err(anyhow!("http 503 Service Unavailable"))
    }

    fn players(&self) -> Result<PlayerRows> {
        Ok(PlayerRows {
            players: vec![Player {
                id: 1,
                first_name: "Virat".to_string(),
                last_name: "Kohli".to_string(),
                role: "Batsman".to_string(),
                team: "India".to_string(),
                image_url: None,
            }],
            skipped: 0,
        })
    }

    fn match_stats(&self) -> Result<Vec<MatchStatRecord>> {
        if self.fail_stats {
            return Err(anyhow!("connection reset"));
        }
        Ok(vec![MatchStatRecord {
            player_id: Some(1),
            runs: 50,
            balls: 40,
            ..MatchStatRecord::default()
        }])
    }
}

#[test]
fn live_fetch_produces_timestamped_matches() {
    let (tx, rx) = mpsc::channel();
    run_command(
        &StubSource { fail_stats: false },
        ProviderCommand::FetchLiveMatches,
        &tx,
    );
    match rx.try_recv().expect("delta sent") {
        Delta::SetLiveMatches {
            matches,
            fetched_at,
        } => {
            assert_eq!(matches.len(), 1);
            assert_eq!(fetched_at.len(), 8);
        }
        other => panic!("unexpected delta {other:?}"),
    }
}

#[test]
fn team_failure_becomes_failed_delta() {
    let (tx, rx) = mpsc::channel();
    run_command(
        &StubSource { fail_stats: false },
        ProviderCommand::FetchTeams,
        &tx,
    );
    let delta = rx.try_recv().expect("delta sent");
    assert!(matches!(&delta, Delta::TeamsFailed(err) if err.contains("503")));
}

#[test]
fn roster_failure_names_the_failing_request() {
    let (tx, rx) = mpsc::channel();
    run_command(
        &StubSource { fail_stats: true },
        ProviderCommand::FetchRoster,
        &tx,
    );
    let delta = rx.try_recv().expect("delta sent");
    match delta {
        Delta::RosterFailed(err) => {
            assert!(err.contains("fetch match stats"));
            assert!(err.contains("connection reset"));
        }
        other => panic!("unexpected delta {other:?}"),
    }
}

struct OrphanSource;

impl CricketSource for OrphanSource {
    fn live_matches(&self) -> Result<Vec<LiveMatch>> {
        Ok(Vec::new())
    }

    fn teams(&self) -> Result<Vec<Team>> {
        Ok(Vec::new())
    }

    fn players(&self) -> Result<PlayerRows> {
        Ok(PlayerRows::default())
    }

    fn match_stats(&self) -> Result<Vec<MatchStatRecord>> {
        Ok(vec![
            MatchStatRecord {
                player_id: Some(404),
                ..MatchStatRecord::default()
            },
            MatchStatRecord::default(),
        ])
    }
}

#[test]
fn roster_with_orphan_records_logs_a_warning_first() {
    let (tx, rx) = mpsc::channel();
    run_command(&OrphanSource, ProviderCommand::FetchRoster, &tx);

    let mut state = AppState::new();
    let first = rx.try_recv().expect("warning sent");
    assert!(matches!(&first, Delta::Log(line) if line.starts_with("[WARN] 2 match records")));
    apply_delta(&mut state, first);
    apply_delta(&mut state, rx.try_recv().expect("roster sent"));

    assert_eq!(state.roster_load, LoadState::Loaded);
    assert!(state.derived.is_empty());
    assert_eq!(state.match_stats.len(), 2);
}

struct PartlyBadRoster;

impl CricketSource for PartlyBadRoster {
    fn live_matches(&self) -> Result<Vec<LiveMatch>> {
        Ok(Vec::new())
    }

    fn teams(&self) -> Result<Vec<Team>> {
        Ok(Vec::new())
    }

    fn players(&self) -> Result<PlayerRows> {
        parse_players_json(
            r#"[{"id":"n/a","first_name":"Ghost"},{"id":7,"first_name":"Shubman","last_name":"Gill"}]"#,
        )
    }

    fn match_stats(&self) -> Result<Vec<MatchStatRecord>> {
        Ok(vec![MatchStatRecord {
            player_id: Some(7),
            runs: 64,
            balls: 50,
            ..MatchStatRecord::default()
        }])
    }
}

#[test]
fn roster_keeps_good_rows_and_warns_about_bad_ones() {
    let (tx, rx) = mpsc::channel();
    run_command(&PartlyBadRoster, ProviderCommand::FetchRoster, &tx);

    let mut state = AppState::new();
    let first = rx.try_recv().expect("warning sent");
    assert!(matches!(&first, Delta::Log(line) if line.starts_with("[WARN] 1 roster rows")));
    apply_delta(&mut state, first);
    apply_delta(&mut state, rx.try_recv().expect("roster sent"));
    assert!(rx.try_recv().is_err());

    assert_eq!(state.roster_load, LoadState::Loaded);
    assert_eq!(state.derived.len(), 1);
    assert_eq!(state.derived[0].player.full_name(), "Shubman Gill");
    assert_eq!(state.derived[0].runs, 64);
    assert!(state.logs.iter().any(|l| l.contains("roster rows without a usable id")));
}

#[test]
fn provider_answers_every_command() {
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(Arc::new(StubSource { fail_stats: false }), tx, cmd_rx);

    cmd_tx.send(ProviderCommand::FetchRoster).unwrap();
    cmd_tx.send(ProviderCommand::FetchLiveMatches).unwrap();
    cmd_tx.send(ProviderCommand::FetchLiveMatches).unwrap();

    let mut state = AppState::new();
    for _ in 0..3 {
        let delta = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("provider should answer");
        apply_delta(&mut state, delta);
    }

    assert_eq!(state.roster_load, LoadState::Loaded);
    assert_eq!(state.derived.len(), 1);
    assert_eq!(state.derived[0].runs, 50);
    assert_eq!(state.matches.len(), 1);
    assert!(state.last_updated.is_some());
}
