//! Derived player statistics and leaderboards.
//!
//! Everything here is a pure reduction over the roster and the match-stat
//! records currently loaded; nothing is cached and nothing fails. A player
//! without records gets all-zero metrics, and "nobody matched" is `None`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::state::{MatchStatRecord, Player, contains_ascii_ci};

/// Identifier used to look a player up. Built from integers or from numeric
/// strings; anything else matches no player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerKey(Option<i64>);

impl PlayerKey {
    pub fn id(self) -> Option<i64> {
        self.0
    }
}

impl From<i64> for PlayerKey {
    fn from(id: i64) -> Self {
        Self(Some(id))
    }
}

impl From<u32> for PlayerKey {
    fn from(id: u32) -> Self {
        Self(Some(i64::from(id)))
    }
}

impl From<i32> for PlayerKey {
    fn from(id: i32) -> Self {
        Self(Some(i64::from(id)))
    }
}

impl From<&str> for PlayerKey {
    fn from(raw: &str) -> Self {
        Self(raw.trim().parse::<i64>().ok())
    }
}

impl From<&String> for PlayerKey {
    fn from(raw: &String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<String> for PlayerKey {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Runs split by how they were scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoringBreakdown {
    pub sixes: u32,
    pub fours: u32,
    pub others: u32,
}

impl ScoringBreakdown {
    fn from_totals(runs: u32, fours: u32, sixes: u32) -> Self {
        let sixes = sixes.saturating_mul(6);
        let fours = fours.saturating_mul(4);
        // Boundary runs can exceed the recorded total on inconsistent input.
        let others = runs.saturating_sub(sixes.saturating_add(fours));
        Self {
            sixes,
            fours,
            others,
        }
    }

    pub fn buckets(&self) -> [(&'static str, u32); 3] {
        [
            ("Sixes", self.sixes),
            ("Fours", self.fours),
            ("Others", self.others),
        ]
    }

    pub fn total(&self) -> u32 {
        self.sixes
            .saturating_add(self.fours)
            .saturating_add(self.others)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedPlayerStats {
    pub player: Player,
    pub matches: usize,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub wickets: u32,
    pub overs: f64,
    pub runs_conceded: u32,
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: u32,
    pub avg: f64,
    pub sr: f64,
    pub economy: f64,
    pub mvp_score: u32,
    pub scoring: ScoringBreakdown,
    /// The player's own records, oldest match first.
    pub trend: Vec<MatchStatRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Leaders<'a> {
    pub top_run_scorer: Option<&'a DerivedPlayerStats>,
    pub top_wicket_taker: Option<&'a DerivedPlayerStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub other: u32,
}

impl TeamRecord {
    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.other
    }
}

#[derive(Debug, Default)]
struct Totals {
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    wickets: u32,
    overs: f64,
    runs_conceded: u32,
    catches: u32,
    stumpings: u32,
    run_outs: u32,
}

impl Totals {
    fn add(&mut self, rec: &MatchStatRecord) {
        self.runs = self.runs.saturating_add(rec.runs);
        self.balls = self.balls.saturating_add(rec.balls);
        self.fours = self.fours.saturating_add(rec.fours);
        self.sixes = self.sixes.saturating_add(rec.sixes);
        self.wickets = self.wickets.saturating_add(rec.wickets);
        self.overs += rec.overs;
        self.runs_conceded = self.runs_conceded.saturating_add(rec.runs_conceded);
        self.catches = self.catches.saturating_add(rec.catches);
        self.stumpings = self.stumpings.saturating_add(rec.stumpings);
        self.run_outs = self.run_outs.saturating_add(rec.run_outs);
    }
}

pub fn derive_player_stats(
    player_id: impl Into<PlayerKey>,
    players: &[Player],
    match_stats: &[MatchStatRecord],
) -> Option<DerivedPlayerStats> {
    let id = player_id.into().id()?;
    let player = players.iter().find(|p| p.id == id)?;
    Some(derive_for_player(player, match_stats))
}

/// Derived stats for every roster entry, in roster order.
pub fn derive_all_player_stats(
    players: &[Player],
    match_stats: &[MatchStatRecord],
) -> Vec<DerivedPlayerStats> {
    players
        .iter()
        .map(|player| derive_for_player(player, match_stats))
        .collect()
}

fn derive_for_player(player: &Player, match_stats: &[MatchStatRecord]) -> DerivedPlayerStats {
    let mut trend: Vec<MatchStatRecord> = match_stats
        .iter()
        .filter(|rec| rec.player_id == Some(player.id))
        .cloned()
        .collect();

    let mut totals = Totals::default();
    for rec in &trend {
        totals.add(rec);
    }
    let matches = trend.len();

    let avg = if matches == 0 {
        0.0
    } else {
        round_to(f64::from(totals.runs) / matches as f64, 1)
    };
    let sr = if totals.balls == 0 {
        0.0
    } else {
        round_to(f64::from(totals.runs) / f64::from(totals.balls) * 100.0, 1)
    };
    let economy = if totals.overs > 0.0 {
        round_to(f64::from(totals.runs_conceded) / totals.overs, 2)
    } else {
        0.0
    };
    let mvp_score = totals
        .runs
        .saturating_add(totals.wickets.saturating_mul(20))
        .saturating_add(totals.catches.saturating_mul(10));

    // `sort_by` is stable: records on the same day keep their input order.
    trend.sort_by(|a, b| a.match_day().cmp(&b.match_day()));

    DerivedPlayerStats {
        player: player.clone(),
        matches,
        runs: totals.runs,
        balls: totals.balls,
        fours: totals.fours,
        sixes: totals.sixes,
        wickets: totals.wickets,
        overs: totals.overs,
        runs_conceded: totals.runs_conceded,
        catches: totals.catches,
        stumpings: totals.stumpings,
        run_outs: totals.run_outs,
        avg,
        sr,
        economy,
        mvp_score,
        scoring: ScoringBreakdown::from_totals(totals.runs, totals.fours, totals.sixes),
        trend,
    }
}

/// Orange and purple cap holders. Ties go to the earliest entry.
pub fn derive_leaders(all: &[DerivedPlayerStats]) -> Leaders<'_> {
    Leaders {
        top_run_scorer: first_max_by(all, |s| s.runs),
        top_wicket_taker: first_max_by(all, |s| s.wickets),
    }
}

fn first_max_by<F>(all: &[DerivedPlayerStats], key: F) -> Option<&DerivedPlayerStats>
where
    F: Fn(&DerivedPlayerStats) -> u32,
{
    let mut best: Option<&DerivedPlayerStats> = None;
    for entry in all {
        match best {
            Some(current) if key(entry) <= key(current) => {}
            _ => best = Some(entry),
        }
    }
    best
}

pub fn mvp_leaderboard(all: &[DerivedPlayerStats], limit: usize) -> Vec<&DerivedPlayerStats> {
    let mut board: Vec<&DerivedPlayerStats> = all.iter().collect();
    board.sort_by(|a, b| b.mvp_score.cmp(&a.mvp_score));
    board.truncate(limit);
    board
}

/// Win/loss record per team. A match is one `(match_date, opposition)` pair
/// and counts once per team however many of its players have a record.
pub fn team_results(players: &[Player], match_stats: &[MatchStatRecord]) -> Vec<TeamRecord> {
    let team_of: HashMap<i64, &str> = players
        .iter()
        .filter(|p| !p.team.trim().is_empty())
        .map(|p| (p.id, p.team.trim()))
        .collect();

    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut records: HashMap<&str, TeamRecord> = HashMap::new();
    for rec in match_stats {
        let Some(team) = rec.player_id.and_then(|id| team_of.get(&id).copied()) else {
            continue;
        };
        if !seen.insert((team, rec.match_date.trim(), rec.opposition.trim())) {
            continue;
        }
        let entry = records.entry(team).or_insert_with(|| TeamRecord {
            team: team.to_string(),
            wins: 0,
            losses: 0,
            other: 0,
        });
        if contains_ascii_ci(&rec.match_result, "won") {
            entry.wins += 1;
        } else if contains_ascii_ci(&rec.match_result, "lost") {
            entry.losses += 1;
        } else {
            entry.other += 1;
        }
    }

    let mut out: Vec<TeamRecord> = records.into_values().collect();
    out.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.team.cmp(&b.team)));
    out
}

/// Rounds the exact binary value: 1.45 (stored as 1.4499...) gives 1.4.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
