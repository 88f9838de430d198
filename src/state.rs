use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::stats::{self, DerivedPlayerStats, Leaders, TeamRecord};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Live,
    Teams,
    Players,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Live, Tab::Teams, Tab::Players, Tab::Analytics];

    pub fn next(self) -> Self {
        match self {
            Tab::Live => Tab::Teams,
            Tab::Teams => Tab::Players,
            Tab::Players => Tab::Analytics,
            Tab::Analytics => Tab::Live,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Live => Tab::Analytics,
            Tab::Teams => Tab::Live,
            Tab::Players => Tab::Teams,
            Tab::Analytics => Tab::Players,
        }
    }
}

/// Fetch bookkeeping for one data set. `Loaded` is the "already fetched" flag
/// that keeps a tab visit from requesting the same data twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn needs_fetch(&self) -> bool {
        matches!(self, LoadState::Idle | LoadState::Failed(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Interval timer for the live poll. A due tick counts as an attempt whether
/// or not the request could be sent.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    every: Duration,
    last: Option<Instant>,
}

impl PollSchedule {
    pub fn new(every: Duration) -> Self {
        Self { every, last: None }
    }

    /// True when a poll is due at `now`; records `now` as the latest attempt.
    pub fn due_at(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.every);
        if due {
            self.last = Some(now);
        }
        due
    }

    /// Restart the interval, e.g. after a manual refresh.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Live,
    Upcoming,
    Finished,
}

impl MatchPhase {
    /// Classify a free-text match status such as "India won by 6 wickets".
    pub fn from_status(status: &str) -> Self {
        const FINISHED: &[&str] = &["won", "drawn", "tied", "no result", "abandoned"];
        const UPCOMING: &[&str] = &["not started", "starts at"];
        if FINISHED.iter().any(|kw| contains_ascii_ci(status, kw)) {
            return MatchPhase::Finished;
        }
        if UPCOMING.iter().any(|kw| contains_ascii_ci(status, kw)) {
            return MatchPhase::Upcoming;
        }
        MatchPhase::Live
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "de_player_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub role: String,
    #[serde(default, deserialize_with = "de_text")]
    pub team: String,
    #[serde(
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// One player's performance in one match. Numeric fields that are missing,
/// `null` or not numbers read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchStatRecord {
    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "de_text")]
    pub match_date: String,
    #[serde(default, deserialize_with = "de_text")]
    pub opposition: String,
    #[serde(default, deserialize_with = "de_text")]
    pub venue: String,
    #[serde(default, deserialize_with = "de_text")]
    pub match_result: String,
    #[serde(default, deserialize_with = "de_count")]
    pub runs: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub balls: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub fours: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub sixes: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub wickets: u32,
    #[serde(default, deserialize_with = "de_overs")]
    pub overs: f64,
    #[serde(default, deserialize_with = "de_count")]
    pub runs_conceded: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub catches: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub stumpings: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub run_outs: u32,
}

impl MatchStatRecord {
    pub fn match_day(&self) -> Option<NaiveDate> {
        parse_match_day(&self.match_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveMatch {
    #[serde(default, deserialize_with = "de_text")]
    pub id: String,
    #[serde(default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub status: String,
    #[serde(default, deserialize_with = "de_text")]
    pub venue: String,
    #[serde(default, deserialize_with = "de_text")]
    pub date: String,
}

impl LiveMatch {
    pub fn phase(&self) -> MatchPhase {
        MatchPhase::from_status(&self.status)
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == MatchPhase::Finished
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub country: Option<String>,
}

impl Team {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Team")
    }

    pub fn location(&self) -> &str {
        self.city
            .as_deref()
            .or(self.country.as_deref())
            .unwrap_or("N/A")
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    pub matches: Vec<LiveMatch>,
    pub live_load: LoadState,
    pub live_error: Option<String>,
    pub last_updated: Option<String>,
    pub show_only_live: bool,
    pub search: String,
    pub search_active: bool,
    pub teams: Vec<Team>,
    pub teams_load: LoadState,
    pub players: Vec<Player>,
    pub match_stats: Vec<MatchStatRecord>,
    pub roster_load: LoadState,
    pub derived: Vec<DerivedPlayerStats>,
    pub team_records: Vec<TeamRecord>,
    pub selected: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Live,
            matches: Vec::with_capacity(32),
            live_load: LoadState::Idle,
            live_error: None,
            last_updated: None,
            show_only_live: false,
            search: String::new(),
            search_active: false,
            teams: Vec::new(),
            teams_load: LoadState::Idle,
            players: Vec::new(),
            match_stats: Vec::new(),
            roster_load: LoadState::Idle,
            derived: Vec::new(),
            team_records: Vec::new(),
            selected: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        self.selected = 0;
        self.search_active = false;
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(self.tab.prev());
    }

    /// The fetch the active tab still needs, if its data set was never loaded
    /// (or the last attempt failed).
    pub fn fetch_needed_for_tab(&self) -> Option<ProviderCommand> {
        match self.tab {
            Tab::Live => None,
            Tab::Teams => self
                .teams_load
                .needs_fetch()
                .then_some(ProviderCommand::FetchTeams),
            Tab::Players | Tab::Analytics => self
                .roster_load
                .needs_fetch()
                .then_some(ProviderCommand::FetchRoster),
        }
    }

    /// Record that `cmd` was sent. Live polls only show a loading state until
    /// the first answer arrives.
    pub fn mark_requested(&mut self, cmd: &ProviderCommand) {
        match cmd {
            ProviderCommand::FetchLiveMatches => {
                if self.live_load == LoadState::Idle {
                    self.live_load = LoadState::Loading;
                }
            }
            ProviderCommand::FetchTeams => self.teams_load = LoadState::Loading,
            ProviderCommand::FetchRoster => self.roster_load = LoadState::Loading,
        }
    }

    pub fn toggle_show_only_live(&mut self) {
        self.show_only_live = !self.show_only_live;
        self.clamp_selection();
        let label = if self.show_only_live {
            "live only"
        } else {
            "all matches"
        };
        self.push_log(format!("[INFO] Showing {label}"));
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.search_active = false;
        self.selected = 0;
    }

    /// Live matches after the live-only and search filters, unfinished
    /// matches first. Relative order within each group is kept.
    pub fn displayed_matches(&self) -> Vec<&LiveMatch> {
        let mut rows: Vec<&LiveMatch> = self
            .matches
            .iter()
            .filter(|m| !self.show_only_live || !m.is_finished())
            .filter(|m| contains_ascii_ci(&m.name, self.search.trim()))
            .collect();
        rows.sort_by_key(|m| m.is_finished());
        rows
    }

    pub fn filtered_players(&self) -> Vec<&DerivedPlayerStats> {
        let needle = self.search.trim();
        self.derived
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || contains_ascii_ci(&s.player.full_name(), needle)
                    || contains_ascii_ci(&s.player.team, needle)
                    || contains_ascii_ci(&s.player.role, needle)
            })
            .collect()
    }

    pub fn selected_player(&self) -> Option<&DerivedPlayerStats> {
        self.filtered_players().get(self.selected).copied()
    }

    pub fn leaders(&self) -> Leaders<'_> {
        stats::derive_leaders(&self.derived)
    }

    pub fn select_next(&mut self) {
        let total = self.row_count();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.row_count();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.row_count();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Live => self.displayed_matches().len(),
            Tab::Teams => self.teams.len(),
            Tab::Players => self.filtered_players().len(),
            Tab::Analytics => 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn refresh_derived(&mut self) {
        self.derived = stats::derive_all_player_stats(&self.players, &self.match_stats);
        self.team_records = stats::team_results(&self.players, &self.match_stats);
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetLiveMatches {
        matches: Vec<LiveMatch>,
        fetched_at: String,
    },
    LiveMatchesFailed(String),
    SetTeams(Vec<Team>),
    TeamsFailed(String),
    SetRoster {
        players: Vec<Player>,
        stats: Vec<MatchStatRecord>,
    },
    RosterFailed(String),
    Log(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchLiveMatches,
    FetchTeams,
    FetchRoster,
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetLiveMatches {
            matches,
            fetched_at,
        } => {
            state.matches = matches;
            state.live_load = LoadState::Loaded;
            state.live_error = None;
            state.last_updated = Some(fetched_at);
            if state.tab == Tab::Live {
                state.clamp_selection();
            }
        }
        Delta::LiveMatchesFailed(err) => {
            if state.live_load.is_loading() {
                state.live_load = LoadState::Failed(err.clone());
            }
            state.push_log(format!("[WARN] Live matches error: {err}"));
            state.live_error = Some(err);
        }
        Delta::SetTeams(teams) => {
            state.push_log(format!("[INFO] Teams loaded: {}", teams.len()));
            state.teams = teams;
            state.teams_load = LoadState::Loaded;
            if state.tab == Tab::Teams {
                state.clamp_selection();
            }
        }
        Delta::TeamsFailed(err) => {
            state.push_log(format!("[WARN] Teams error: {err}"));
            state.teams_load = LoadState::Failed(err);
        }
        Delta::SetRoster { players, stats } => {
            state.push_log(format!(
                "[INFO] Roster loaded: {} players, {} match records",
                players.len(),
                stats.len()
            ));
            state.players = players;
            state.match_stats = stats;
            state.refresh_derived();
            state.roster_load = LoadState::Loaded;
            if state.tab == Tab::Players {
                state.clamp_selection();
            }
        }
        Delta::RosterFailed(err) => {
            state.push_log(format!("[WARN] Roster error: {err}"));
            state.roster_load = LoadState::Failed(err);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Live => "Live Matches",
        Tab::Teams => "Teams",
        Tab::Players => "Players",
        Tab::Analytics => "Analytics",
    }
}

/// Calendar day of an ISO-ish date string ("2024-03-01", "2024-03-01T14:00:00Z", ...).
pub fn parse_match_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(day);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Case-insensitive ASCII substring search without allocating a lowercased copy.
pub fn contains_ascii_ci(haystack: &str, needle: &str) -> bool {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.len() > h.len() {
        return false;
    }
    if n.is_empty() {
        return true;
    }
    h.windows(n.len())
        .any(|window| window.iter().zip(n).all(|(a, b)| a.eq_ignore_ascii_case(b)))
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn de_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let text = de_text(deserializer)?;
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = number_from_value(&value).unwrap_or(0.0);
    if number <= 0.0 {
        return Ok(0);
    }
    Ok(number.min(u32::MAX as f64) as u32)
}

fn de_overs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).unwrap_or(0.0).max(0.0))
}

fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(id_from_value(&value))
}

fn de_player_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    de_opt_id(deserializer)?.ok_or_else(|| serde::de::Error::custom("player id is not an integer"))
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
