use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use chrono::Local;

use crate::api_fetch::{self, PlayerRows};
use crate::state::{Delta, LiveMatch, MatchStatRecord, Player, ProviderCommand, Team};

/// Where the provider gets its data from.
pub trait CricketSource: Send + Sync + 'static {
    fn live_matches(&self) -> Result<Vec<LiveMatch>>;
    fn teams(&self) -> Result<Vec<Team>>;
    fn players(&self) -> Result<PlayerRows>;
    fn match_stats(&self) -> Result<Vec<MatchStatRecord>>;
}

/// The remote cricket API.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSource;

impl CricketSource for HttpSource {
    fn live_matches(&self) -> Result<Vec<LiveMatch>> {
        api_fetch::fetch_live_matches()
    }

    fn teams(&self) -> Result<Vec<Team>> {
        api_fetch::fetch_teams()
    }

    fn players(&self) -> Result<PlayerRows> {
        api_fetch::fetch_players()
    }

    fn match_stats(&self) -> Result<Vec<MatchStatRecord>> {
        api_fetch::fetch_match_stats()
    }
}

/// Serve `ProviderCommand`s until the command channel closes. Each command
/// runs on its own worker thread, so a slow request never holds back the
/// next one and answers may arrive out of order.
pub fn spawn_provider<S: CricketSource>(
    source: Arc<S>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let source = Arc::clone(&source);
            let tx = tx.clone();
            thread::spawn(move || run_command(source.as_ref(), cmd, &tx));
        }
    });
}

pub fn run_command<S: CricketSource + ?Sized>(
    source: &S,
    cmd: ProviderCommand,
    tx: &Sender<Delta>,
) {
    let delta = match cmd {
        ProviderCommand::FetchLiveMatches => match source.live_matches() {
            Ok(matches) => Delta::SetLiveMatches {
                matches,
                fetched_at: Local::now().format("%H:%M:%S").to_string(),
            },
            Err(err) => Delta::LiveMatchesFailed(format!("{err:#}")),
        },
        ProviderCommand::FetchTeams => match source.teams() {
            Ok(teams) => Delta::SetTeams(teams),
            Err(err) => Delta::TeamsFailed(format!("{err:#}")),
        },
        ProviderCommand::FetchRoster => match fetch_roster(source) {
            Ok((rows, stats)) => {
                if rows.skipped > 0 {
                    let _ = tx.send(Delta::Log(format!(
                        "[WARN] {} roster rows without a usable id were skipped",
                        rows.skipped
                    )));
                }
                let players = rows.players;
                let orphans = orphan_records(&players, &stats);
                if orphans > 0 {
                    let _ = tx.send(Delta::Log(format!(
                        "[WARN] {orphans} match records reference no known player"
                    )));
                }
                Delta::SetRoster { players, stats }
            }
            Err(err) => Delta::RosterFailed(format!("{err:#}")),
        },
    };
    let _ = tx.send(delta);
}

fn fetch_roster<S: CricketSource + ?Sized>(
    source: &S,
) -> Result<(PlayerRows, Vec<MatchStatRecord>)> {
    let players = source.players().context("fetch players")?;
    let stats = source.match_stats().context("fetch match stats")?;
    Ok((players, stats))
}

fn orphan_records(players: &[Player], stats: &[MatchStatRecord]) -> usize {
    stats
        .iter()
        .filter(|rec| {
            rec.player_id
                .is_none_or(|id| !players.iter().any(|p| p.id == id))
        })
        .count()
}
