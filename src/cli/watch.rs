//! Watch command implementation - Interactive TUI viewer.
//!
//! The same viewer drives `replay --format tui`.

use super::{CliError, match_config, resolve_seed};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ludo::game::{Color as Seat, GameState, PieceState, TRACK_LEN, is_safe};
use ludo::match_runner::{TurnAction, TurnEvent};
use ludo::replay::{Recording, ReplayEngine};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::stdout;
use std::time::{Duration, Instant};

const MIN_SPEED_MS: u64 = 50;
const MAX_SPEED_MS: u64 = 2000;

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the TUI fails.
pub(crate) fn execute(
    players: &[Seat],
    seed: Option<u64>,
    max_turns: Option<u32>,
    speed: u64,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let config = match_config(players, max_turns, None)?;
    let engine = ReplayEngine::new(Recording::new(seed, config))?;
    run_tui(engine, speed, false)
}

/// App state for the TUI.
struct App {
    engine: ReplayEngine,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
}

impl App {
    fn step_forward(&mut self) {
        if !self.engine.is_game_over() {
            let _ = self.engine.step_forward();
            self.last_step = Instant::now();
        }
    }

    fn step_backward(&mut self) {
        let _ = self.engine.step_backward();
        self.last_step = Instant::now();
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(MIN_SPEED_MS);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(MAX_SPEED_MS);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.engine.is_game_over()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

/// Run the interactive viewer until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven.
pub(crate) fn run_tui(engine: ReplayEngine, speed: u64, paused: bool) -> Result<(), CliError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        engine,
        paused,
        speed_ms: speed.clamp(MIN_SPEED_MS, MAX_SPEED_MS),
        last_step: Instant::now(),
    };

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if app.should_auto_step() {
            app.step_forward();
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ') => app.paused = !app.paused,
                KeyCode::Right | KeyCode::Char('l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    app.paused = true;
                    app.step_backward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Char('r') => {
                    let _ = app.engine.goto_turn(0);
                    app.paused = true;
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Main content
            Constraint::Length(3),  // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app.engine.state());
    render_players(f, main_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let turn = app.engine.turn();
    let recording = app.engine.recording();

    let status = if app.engine.is_game_over() {
        "GAME OVER"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = format!(
        " Ludo Viewer | Seed {} | Turn {}/{} | {} | Speed: {}ms ",
        recording.seed, turn, recording.config.max_turns, status, app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn seat_color(seat: Seat) -> Color {
    match seat {
        Seat::Red => Color::Red,
        Seat::Green => Color::Green,
        Seat::Yellow => Color::Yellow,
        Seat::Blue => Color::Blue,
    }
}

fn seat_letter(seat: Seat) -> &'static str {
    match seat {
        Seat::Red => "R",
        Seat::Green => "G",
        Seat::Yellow => "Y",
        Seat::Blue => "B",
    }
}

/// Pieces on a track cell, grouped as (owner, count).
fn occupants(state: &GameState, cell: u8) -> Vec<(Seat, usize)> {
    state
        .active_players
        .iter()
        .filter_map(|seat| {
            let count = state
                .pieces(seat)
                .iter()
                .filter(|p| p.track_cell() == Some(cell))
                .count();
            (count > 0).then_some((seat, count))
        })
        .collect()
}

fn render_board(f: &mut Frame, area: Rect, state: &GameState) {
    let row_len = TRACK_LEN / 4;
    let mut lines: Vec<Line> = vec![Line::from("")];

    for row in 0..4 {
        let first = row * row_len;
        let mut spans = vec![Span::styled(
            format!(" {first:>2} "),
            Style::default().fg(Color::DarkGray),
        )];
        for cell in first..first + row_len {
            let span = match occupants(state, cell).as_slice() {
                [] if is_safe(cell) => Span::styled(" * ", Style::default().fg(Color::DarkGray)),
                [] => Span::raw(" . "),
                [(seat, 1)] => Span::styled(
                    format!(" {} ", seat_letter(*seat)),
                    Style::default().fg(seat_color(*seat)).add_modifier(Modifier::BOLD),
                ),
                [(seat, count), ..] => Span::styled(
                    format!("{}{count:<2}", seat_letter(*seat)),
                    Style::default().fg(seat_color(*seat)).add_modifier(Modifier::BOLD),
                ),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    for seat in state.active_players.iter() {
        let mut spans = vec![Span::styled(
            format!(" {:<7}", seat.name()),
            Style::default().fg(seat_color(seat)),
        )];
        for pos in 0..5 {
            let here = state
                .pieces(seat)
                .iter()
                .any(|p| p.state() == PieceState::InHomeStretch(pos));
            spans.push(if here {
                Span::styled(format!(" {} ", seat_letter(seat)), Style::default().fg(seat_color(seat)))
            } else {
                Span::raw(" - ")
            });
        }
        spans.push(Span::raw(format!(" home {}", state.finished_count(seat))));
        lines.push(Line::from(spans));
    }

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));
    f.render_widget(board, area);
}

fn describe(event: &TurnEvent) -> String {
    match event.action {
        TurnAction::Moved(outcome) => match outcome.captured {
            Some(captured) => format!(
                "{} rolled {}: piece {} captured {}",
                event.player, event.roll, outcome.piece, captured.player
            ),
            None => format!("{} rolled {}: piece {} moved", event.player, event.roll, outcome.piece),
        },
        TurnAction::Passed => format!("{} rolled {}: no move", event.player, event.roll),
        TurnAction::Forfeited => format!("{} rolled a third six", event.player),
    }
}

fn render_players(f: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let mut lines = vec![Line::from("")];

    for seat in state.active_players.iter() {
        let marker = if state.winner == Some(seat) {
            " [WINNER]"
        } else if !state.game_over && state.current_player() == seat {
            " <"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(
                seat.name().to_string(),
                Style::default().fg(seat_color(seat)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(marker),
        ]));
        lines.push(Line::from(format!(
            "  base {}  home {}/4",
            state.in_base_count(seat),
            state.finished_count(seat)
        )));
        lines.push(Line::from(""));
    }

    if let Some(event) = app.engine.last_event() {
        lines.push(Line::from(Span::styled("Last turn", Style::default().add_modifier(Modifier::BOLD))));
        lines.push(Line::from(describe(event)));
    }

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Players "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.is_game_over() {
        " [q] Quit  [r] Restart  [←/→] Step "
    } else {
        " [q] Quit  [Space] Pause  [←/→] Step  [+/-] Speed  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
