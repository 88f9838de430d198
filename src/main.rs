use std::io;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Sparkline};

use cricket_terminal::feed::{self, HttpSource};
use cricket_terminal::http_client::api_base_url;
use cricket_terminal::state::{
    AppState, Delta, LoadState, MatchPhase, PollSchedule, ProviderCommand, Tab, apply_delta,
    parse_match_day, tab_label,
};
use cricket_terminal::stats::{self, DerivedPlayerStats};

const MVP_BOARD_SIZE: usize = 10;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    live_poll: PollSchedule,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        let live_poll = std::env::var("LIVE_POLL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(30)
            .max(5);
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            live_poll: PollSchedule::new(Duration::from_secs(live_poll)),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.switch_tab(Tab::Live),
            KeyCode::Char('2') => self.switch_tab(Tab::Teams),
            KeyCode::Char('3') => self.switch_tab(Tab::Players),
            KeyCode::Char('4') => self.switch_tab(Tab::Analytics),
            KeyCode::Tab => self.switch_tab(self.state.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.state.tab.prev()),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('/') => self.state.search_active = true,
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if self.state.tab == Tab::Live {
                    self.state.toggle_show_only_live();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_current_tab(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    self.state.clear_search();
                }
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state.search_active = false,
            KeyCode::Esc => self.state.clear_search(),
            KeyCode::Backspace => self.state.pop_search_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.push_search_char(c)
            }
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.state.set_tab(tab);
        if let Some(cmd) = self.state.fetch_needed_for_tab() {
            self.request(cmd, false);
        }
    }

    fn refresh_current_tab(&mut self) {
        let cmd = match self.state.tab {
            Tab::Live => ProviderCommand::FetchLiveMatches,
            Tab::Teams => ProviderCommand::FetchTeams,
            Tab::Players | Tab::Analytics => ProviderCommand::FetchRoster,
        };
        self.request(cmd, true);
    }

    fn request(&mut self, cmd: ProviderCommand, announce: bool) {
        let label = command_label(cmd);
        if cmd == ProviderCommand::FetchLiveMatches {
            self.live_poll.mark(Instant::now());
        }
        let Some(tx) = &self.cmd_tx else {
            if announce {
                self.state.push_log(format!("[INFO] {label} fetch unavailable"));
            }
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {label} request failed"));
            return;
        }
        self.state.mark_requested(&cmd);
        if announce {
            self.state.push_log(format!("[INFO] {label} request sent"));
        }
    }

    fn maybe_poll_live(&mut self) {
        if self.live_poll.due_at(Instant::now()) {
            self.request(ProviderCommand::FetchLiveMatches, false);
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(Arc::new(HttpSource), tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    app.state
        .push_log(format!("[INFO] API: {}", api_base_url()));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_poll_live();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.tab {
        Tab::Live => render_live(frame, chunks[1], &app.state),
        Tab::Teams => render_teams(frame, chunks[1], &app.state),
        Tab::Players => render_players(frame, chunks[1], &app.state),
        Tab::Analytics => render_analytics(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let mut title = format!("CRICKET TERMINAL | {}", tab_label(state.tab));
    if state.tab == Tab::Live {
        match &state.last_updated {
            Some(at) => title.push_str(&format!(" | Live updates, last checked {at}")),
            None => title.push_str(" | Waiting for first update"),
        }
        if state.show_only_live {
            title.push_str(" | LIVE ONLY");
        }
    }

    let tabs = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| {
            let marker = if *tab == state.tab { "*" } else { " " };
            format!("{marker}{} {}", idx + 1, tab_label(*tab))
        })
        .collect::<Vec<_>>()
        .join("  ");

    let search = if state.search_active {
        format!("Search: {}_", state.search)
    } else if state.search.is_empty() {
        "Search: (press / to search)".to_string()
    } else {
        format!("Search: {}", state.search)
    };
    format!("{title}\n{tabs}\n{search}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to filter | Enter Done | Esc Clear".to_string();
    }
    match state.tab {
        Tab::Live => {
            "1-4/Tab Switch | j/k Move | / Search | f Live only | r Refresh | ? Help | q Quit"
                .to_string()
        }
        Tab::Teams => "1-4/Tab Switch | j/k Move | r Reload | ? Help | q Quit".to_string(),
        Tab::Players => {
            "1-4/Tab Switch | j/k Select player | / Search | r Reload | ? Help | q Quit".to_string()
        }
        Tab::Analytics => "1-4/Tab Switch | r Reload | ? Help | q Quit".to_string(),
    }
}

fn render_live(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(err) = &state.live_error {
        let error = Paragraph::new(format!("Error: {err}")).style(Style::default().fg(Color::Red));
        frame.render_widget(error, area);
        return;
    }
    if matches!(state.live_load, LoadState::Idle | LoadState::Loading) {
        render_placeholder(frame, area, "Loading live matches...");
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = live_columns();
    render_live_header(frame, sections[0], &widths);

    let list_area = sections[1];
    let displayed = state.displayed_matches();
    if displayed.is_empty() {
        render_placeholder(frame, list_area, "No matches found right now.");
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, displayed.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let m = displayed[idx];
        let phase = m.phase();
        let phase_style = row_style.fg(phase_color(phase));
        render_cell_text(frame, cols[0], phase_label(phase), phase_style);
        render_cell_text(frame, cols[1], &m.name, row_style);
        render_cell_text(frame, cols[2], &m.status, row_style);
        render_cell_text(frame, cols[3], &m.venue, row_style);
        render_cell_text(frame, cols[4], &format_match_date(&m.date), row_style);
    }
}

fn live_columns() -> [Constraint; 5] {
    [
        Constraint::Length(9),
        Constraint::Min(24),
        Constraint::Min(24),
        Constraint::Length(28),
        Constraint::Length(12),
    ]
}

fn render_live_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "", style);
    render_cell_text(frame, cols[1], "Match", style);
    render_cell_text(frame, cols[2], "Status", style);
    render_cell_text(frame, cols[3], "Venue", style);
    render_cell_text(frame, cols[4], "Date", style);
}

fn render_teams(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Teams").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &state.teams_load {
        LoadState::Idle | LoadState::Loading => {
            render_placeholder(frame, inner, "Loading teams...");
            return;
        }
        LoadState::Failed(err) => {
            render_placeholder(frame, inner, &format!("Teams unavailable: {err} (r to retry)"));
            return;
        }
        LoadState::Loaded => {}
    }
    if state.teams.is_empty() {
        render_placeholder(frame, inner, "No teams found in the database.");
        return;
    }
    if inner.height == 0 {
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(state.selected, state.teams.len(), visible);
    let sep_style = Style::default().fg(Color::DarkGray);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(24),
                Constraint::Length(1),
                Constraint::Min(16),
            ])
            .split(row_area);

        let team = &state.teams[idx];
        let prefix = if idx == state.selected { ">" } else { " " };
        render_cell_text(frame, cols[0], prefix, Style::default());
        render_cell_text(
            frame,
            cols[1],
            team.display_name(),
            Style::default().fg(Color::Green),
        );
        render_vseparator(frame, cols[2], sep_style);
        render_cell_text(frame, cols[3], team.location(), Style::default());
    }
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(msg) = roster_placeholder(state) {
        render_placeholder(frame, area, &msg);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let caps = Paragraph::new(caps_text(state))
        .block(Block::default().title("Caps").borders(Borders::ALL));
    frame.render_widget(caps, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let list = Paragraph::new(player_list_text(state, columns[0].height.saturating_sub(2)))
        .block(Block::default().title("Players").borders(Borders::ALL));
    frame.render_widget(list, columns[0]);

    render_profile(frame, columns[1], state.selected_player());
}

fn roster_placeholder(state: &AppState) -> Option<String> {
    match &state.roster_load {
        LoadState::Idle | LoadState::Loading => Some("Loading players...".to_string()),
        LoadState::Failed(err) => Some(format!("Players unavailable: {err} (r to retry)")),
        LoadState::Loaded if state.players.is_empty() => {
            Some("No players yet. Seed the API with stats_ingest.".to_string())
        }
        LoadState::Loaded => None,
    }
}

fn caps_text(state: &AppState) -> String {
    let leaders = state.leaders();
    let orange = leaders
        .top_run_scorer
        .map(|s| format!("{} ({} runs)", s.player.full_name(), s.runs))
        .unwrap_or_else(|| "-".to_string());
    let purple = leaders
        .top_wicket_taker
        .map(|s| format!("{} ({} wkts)", s.player.full_name(), s.wickets))
        .unwrap_or_else(|| "-".to_string());
    format!("Orange Cap: {orange}    Purple Cap: {purple}")
}

fn player_list_text(state: &AppState, height: u16) -> String {
    let players = state.filtered_players();
    if players.is_empty() {
        return "No players match the search".to_string();
    }
    let (start, end) = visible_range(state.selected, players.len(), height as usize);
    players[start..end]
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let prefix = if start + i == state.selected { "> " } else { "  " };
            format!(
                "{prefix}{:<22} {:<10} R{:>5} W{:>3} MVP{:>5}",
                truncate(&s.player.full_name(), 22),
                truncate(&s.player.team, 10),
                s.runs,
                s.wickets,
                s.mvp_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_profile(frame: &mut Frame, area: Rect, selected: Option<&DerivedPlayerStats>) {
    let Some(s) = selected else {
        let empty = Paragraph::new("No player selected")
            .block(Block::default().title("Profile").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(3),
        ])
        .split(area);

    let metrics = Paragraph::new(profile_text(s))
        .block(Block::default().title("Profile").borders(Borders::ALL));
    frame.render_widget(metrics, sections[0]);

    let bars = s
        .scoring
        .buckets()
        .iter()
        .map(|(label, runs)| {
            Bar::default()
                .value(u64::from(*runs))
                .label(Line::from(*label))
                .text_value(runs.to_string())
                .style(Style::default().fg(bucket_color(label)))
        })
        .collect::<Vec<_>>();
    let scoring = BarChart::default()
        .block(Block::default().title("Scoring").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1);
    frame.render_widget(scoring, sections[1]);

    let runs = s.trend.iter().map(|rec| u64::from(rec.runs)).collect::<Vec<_>>();
    let span = match (s.trend.first(), s.trend.last()) {
        (Some(first), Some(last)) => format!(
            "Runs by match ({} to {})",
            format_match_date(&first.match_date),
            format_match_date(&last.match_date)
        ),
        _ => "Runs by match".to_string(),
    };
    let trend = Sparkline::default()
        .block(Block::default().title(span).borders(Borders::ALL))
        .data(&runs)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(trend, sections[2]);
}

fn profile_text(s: &DerivedPlayerStats) -> String {
    let mut heading = s.player.full_name();
    let details = [s.player.role.trim(), s.player.team.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    if !details.is_empty() {
        heading.push_str(&format!(" ({})", details.join(", ")));
    }
    [
        heading,
        format!(
            "Matches: {}  Runs: {}  Balls: {}",
            s.matches, s.runs, s.balls
        ),
        format!("Average: {:.1}  Strike rate: {:.1}", s.avg, s.sr),
        format!(
            "Wickets: {}  Overs: {:.1}  Economy: {:.2}",
            s.wickets, s.overs, s.economy
        ),
        format!(
            "Catches: {}  Stumpings: {}  Run outs: {}",
            s.catches, s.stumpings, s.run_outs
        ),
        format!("MVP score: {}", s.mvp_score),
    ]
    .join("\n")
}

fn render_analytics(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(msg) = roster_placeholder(state) {
        render_placeholder(frame, area, &msg);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(3)])
        .split(area);

    let chart_block = Block::default()
        .title("Win/Loss Record (green wins, red losses)")
        .borders(Borders::ALL);
    if state.team_records.is_empty() {
        let empty = Paragraph::new("No team results yet").block(chart_block);
        frame.render_widget(empty, rows[0]);
    } else {
        let mut chart = BarChart::default()
            .block(chart_block)
            .bar_width(4)
            .bar_gap(1)
            .group_gap(3);
        for record in &state.team_records {
            let wins = Bar::default()
                .value(u64::from(record.wins))
                .style(Style::default().fg(Color::Green));
            let losses = Bar::default()
                .value(u64::from(record.losses))
                .style(Style::default().fg(Color::Red));
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(truncate(&record.team, 9)))
                    .bars(&[wins, losses]),
            );
        }
        frame.render_widget(chart, rows[0]);
    }

    let board = Paragraph::new(mvp_board_text(state))
        .block(Block::default().title("MVP Leaderboard").borders(Borders::ALL));
    frame.render_widget(board, rows[1]);
}

fn mvp_board_text(state: &AppState) -> String {
    let board = stats::mvp_leaderboard(&state.derived, MVP_BOARD_SIZE);
    if board.is_empty() {
        return "No players yet".to_string();
    }
    board
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            format!(
                "#{:<2} {:<22} {:<10} MVP{:>5}  R{:>5} W{:>3} C{:>3}",
                idx + 1,
                truncate(&s.player.full_name(), 22),
                truncate(&s.player.team, 10),
                s.mvp_score,
                s.runs,
                s.wickets,
                s.catches
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, text_area);
}

fn render_vseparator(frame: &mut Frame, area: Rect, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let text = vec!["│"; area.height as usize].join("\n");
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn command_label(cmd: ProviderCommand) -> &'static str {
    match cmd {
        ProviderCommand::FetchLiveMatches => "Live matches",
        ProviderCommand::FetchTeams => "Teams",
        ProviderCommand::FetchRoster => "Roster",
    }
}

fn phase_label(phase: MatchPhase) -> &'static str {
    match phase {
        MatchPhase::Live => "LIVE",
        MatchPhase::Upcoming => "UPCOMING",
        MatchPhase::Finished => "RESULT",
    }
}

fn phase_color(phase: MatchPhase) -> Color {
    match phase {
        MatchPhase::Live => Color::Red,
        MatchPhase::Upcoming => Color::Yellow,
        MatchPhase::Finished => Color::DarkGray,
    }
}

fn bucket_color(label: &str) -> Color {
    match label {
        "Sixes" => Color::Magenta,
        "Fours" => Color::Cyan,
        _ => Color::Gray,
    }
}

fn format_match_date(raw: &str) -> String {
    if let Some(day) = parse_match_day(raw) {
        return day.format("%d %b %Y").to_string();
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "TBD".to_string()
    } else {
        trimmed.to_string()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = text.chars().take(max.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Cricket Terminal - Help",
        "",
        "Global:",
        "  1-4 / Tab    Switch tab",
        "  j/k or ↑/↓   Move selection",
        "  /            Search (Enter done, Esc clear)",
        "  r            Refresh current tab",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Live Matches:",
        "  f            Toggle live only",
        "",
        "Players:",
        "  j/k          Select player profile",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
