use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::{api_base_url, http_client};
use crate::state::{LiveMatch, MatchStatRecord, Player, Team};

const LIVE_MATCHES_PATH: &str = "/api/live-matches";
const TEAMS_PATH: &str = "/api/teams";
const PLAYERS_PATH: &str = "/api/players";
const STATS_PATH: &str = "/api/stats";
const RESET_PATH: &str = "/api/reset";

/// Body of a player creation request; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Roster as served, minus rows that carry no usable integer id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerRows {
    pub players: Vec<Player>,
    pub skipped: usize,
}

impl NewPlayer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

pub fn fetch_live_matches() -> Result<Vec<LiveMatch>> {
    let body = get_text(LIVE_MATCHES_PATH)?;
    parse_live_matches_json(&body)
}

pub fn fetch_teams() -> Result<Vec<Team>> {
    let body = get_text(TEAMS_PATH)?;
    parse_teams_json(&body)
}

pub fn fetch_players() -> Result<PlayerRows> {
    let body = get_text(PLAYERS_PATH)?;
    parse_players_json(&body)
}

pub fn fetch_match_stats() -> Result<Vec<MatchStatRecord>> {
    let body = get_text(STATS_PATH)?;
    parse_match_stats_json(&body)
}

/// Returns the id the server assigned, when the reply carries one.
pub fn create_player(player: &NewPlayer) -> Result<Option<i64>> {
    let body = post_json(PLAYERS_PATH, player).context("create player")?;
    Ok(parse_created_id(&body))
}

pub fn add_match_stat(record: &MatchStatRecord) -> Result<Option<i64>> {
    if record.player_id.is_none() {
        return Err(anyhow!("match stat record has no player_id"));
    }
    let body = post_json(STATS_PATH, record).context("add match stat")?;
    Ok(parse_created_id(&body))
}

pub fn delete_match_stat(stat_id: i64) -> Result<()> {
    let client = http_client()?;
    let url = endpoint(&format!("{STATS_PATH}/{stat_id}"));
    let resp = client.delete(&url).send().context("request failed")?;
    read_body(resp).context("delete match stat")?;
    Ok(())
}

pub fn reset_database() -> Result<()> {
    post_json(RESET_PATH, &serde_json::json!({})).context("reset database")?;
    Ok(())
}

/// `{"data": [...]}`; a missing or null `data` means no matches.
pub fn parse_live_matches_json(raw: &str) -> Result<Vec<LiveMatch>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    match root.get("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => {
            serde_json::from_value(data.clone()).context("invalid live matches payload")
        }
    }
}

/// Either `{"teams": [...]}` or a bare array.
pub fn parse_teams_json(raw: &str) -> Result<Vec<Team>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    let list = root
        .get("teams")
        .filter(|teams| !teams.is_null())
        .cloned()
        .unwrap_or(root);
    if !list.is_array() {
        return Ok(Vec::new());
    }
    serde_json::from_value(list).context("invalid teams payload")
}

/// A row that fails to deserialize is counted in `skipped` instead of
/// failing the whole roster.
pub fn parse_players_json(raw: &str) -> Result<PlayerRows> {
    let rows: Vec<Value> = parse_list(raw).context("invalid players json")?;
    let mut out = PlayerRows::default();
    for row in rows {
        match serde_json::from_value::<Player>(row) {
            Ok(player) => out.players.push(player),
            Err(_) => out.skipped += 1,
        }
    }
    Ok(out)
}

pub fn parse_match_stats_json(raw: &str) -> Result<Vec<MatchStatRecord>> {
    parse_list(raw).context("invalid match stats json")
}

/// `{"id": 7, ...}` or the echoed row. Anything else, including a non-JSON
/// success body, yields `None`.
pub fn parse_created_id(raw: &str) -> Option<i64> {
    let root: Value = serde_json::from_str(raw.trim()).ok()?;
    match root.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_list<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

fn parse_root(raw: &str) -> Result<Option<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let root = serde_json::from_str(trimmed).context("invalid json")?;
    Ok(Some(root))
}

fn endpoint(path: &str) -> String {
    format!("{}{path}", api_base_url())
}

fn get_text(path: &str) -> Result<String> {
    let client = http_client()?;
    let url = endpoint(path);
    let resp = client.get(&url).send().context("request failed")?;
    read_body(resp)
}

fn post_json<T: Serialize + ?Sized>(path: &str, body: &T) -> Result<String> {
    let client = http_client()?;
    let url = endpoint(path);
    let resp = client.post(&url).json(body).send().context("request failed")?;
    read_body(resp)
}

fn read_body(resp: Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, body));
    }
    Ok(body)
}
