use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use cricket_terminal::api_fetch::{self, NewPlayer};
use cricket_terminal::http_client::api_base_url;
use cricket_terminal::state::MatchStatRecord;

const DEFAULT_SEED_FILE: &str = "seed.json";

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    players: Vec<NewPlayer>,
    #[serde(default)]
    stats: Vec<SeedStat>,
}

/// A stat record that names its player ("First Last") instead of, or as well
/// as, carrying a `player_id`.
#[derive(Debug, Deserialize)]
struct SeedStat {
    #[serde(default)]
    player: Option<String>,
    #[serde(flatten)]
    record: MatchStatRecord,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    if let Some(raw) = flag_value("--delete-stat") {
        let stat_id = raw
            .trim()
            .parse::<i64>()
            .with_context(|| format!("invalid stat id {raw}"))?;
        println!("API: {}", api_base_url());
        api_fetch::delete_match_stat(stat_id)?;
        println!("Deleted stat record {stat_id}");
        return Ok(());
    }

    let path = flag_value("--file")
        .map(PathBuf::from)
        .unwrap_or_else(default_seed_file);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read seed file {}", path.display()))?;
    let seed: SeedFile = serde_json::from_str(&raw).context("invalid seed json")?;
    if seed.players.is_empty() && seed.stats.is_empty() {
        return Err(anyhow!("seed file {} has no players or stats", path.display()));
    }

    println!("API: {}", api_base_url());
    if has_flag("--reset") {
        api_fetch::reset_database()?;
        println!("Remote store wiped");
    }

    let mut errors = Vec::new();
    let mut players_created = 0usize;
    for player in &seed.players {
        match api_fetch::create_player(player) {
            Ok(_) => players_created += 1,
            Err(err) => errors.push(format!("player {}: {err:#}", player.full_name())),
        }
    }

    let ids_by_name = if seed.stats.iter().any(|s| s.record.player_id.is_none()) {
        player_ids_by_name()?
    } else {
        HashMap::new()
    };

    let mut stats_created = 0usize;
    for (idx, stat) in seed.stats.into_iter().enumerate() {
        let mut record = stat.record;
        if record.player_id.is_none() {
            record.player_id = stat
                .player
                .as_deref()
                .and_then(|name| ids_by_name.get(&name_key(name)).copied());
        }
        if record.player_id.is_none() {
            let who = stat.player.as_deref().unwrap_or("<unnamed>");
            errors.push(format!("stat #{idx}: unknown player {who}"));
            continue;
        }
        match api_fetch::add_match_stat(&record) {
            Ok(_) => stats_created += 1,
            Err(err) => errors.push(format!("stat #{idx}: {err:#}")),
        }
    }

    println!("Seed ingest complete");
    println!("File: {}", path.display());
    println!("Players created: {}/{}", players_created, seed.players.len());
    println!("Stats created: {stats_created}");
    if !errors.is_empty() {
        println!("Errors: {}", errors.len());
        for err in errors.iter().take(8) {
            println!(" - {err}");
        }
    }

    Ok(())
}

/// Name to id for the remote roster. Later entries win, so a re-created
/// player resolves to its newest id.
fn player_ids_by_name() -> Result<HashMap<String, i64>> {
    let rows = api_fetch::fetch_players().context("fetch roster for name lookup")?;
    Ok(rows
        .players
        .iter()
        .map(|p| (name_key(&p.full_name()), p.id))
        .collect())
}

fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn default_seed_file() -> PathBuf {
    std::env::var("CRICKET_SEED_FILE")
        .ok()
        .filter(|val| !val.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_FILE))
}

fn has_flag(flag: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == flag)
}

/// Value of `--name VALUE` or `--name=VALUE`; blank values are ignored.
fn flag_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
