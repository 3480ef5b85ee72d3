//! Dashboard application and TUI event loop.
//!
//! [`App`] owns the theme and draws either a finished [`DashboardResult`] or
//! an error panel, then waits for the user to quit.

use std::io;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use recap_core::error::{RecapError, Result};
use recap_data::analysis::DashboardResult;

use crate::chart_view;
use crate::table_view;
use crate::themes::Theme;

/// Root application state for the recap TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
        }
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Show the dashboard until `q`, `Q` or `Ctrl+C`.
    pub fn run_dashboard(&self, result: &DashboardResult) -> Result<()> {
        self.run(|frame| render_dashboard(frame, result, &self.theme))
    }

    /// Show a user-facing error message until `q`, `Q` or `Ctrl+C`.
    pub fn run_error(&self, message: &str) -> Result<()> {
        self.run(|frame| {
            let area = frame.area();
            render_error(frame, area, message, &self.theme)
        })
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn run<F>(&self, mut draw: F) -> Result<()>
    where
        F: FnMut(&mut Frame),
    {
        enable_raw_mode().map_err(terminal_error)?;
        // Dropped on every return path below, including `?` and panics.
        let _restore = RestoreOnDrop::new(restore_terminal);

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

        event_loop(&mut terminal, &mut draw).map_err(terminal_error)
    }
}

/// Runs its cleanup exactly once when dropped.
struct RestoreOnDrop<C: FnOnce()>(Option<C>);

impl<C: FnOnce()> RestoreOnDrop<C> {
    fn new(cleanup: C) -> Self {
        Self(Some(cleanup))
    }
}

impl<C: FnOnce()> Drop for RestoreOnDrop<C> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.0.take() {
            cleanup();
        }
    }
}

/// Best effort: leave raw mode and the alternate screen, show the cursor.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

fn event_loop<F>(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, draw: &mut F) -> io::Result<()>
where
    F: FnMut(&mut Frame),
{
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| draw(frame))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    _ => {}
                }
            }
        }
    }
}

fn terminal_error(err: io::Error) -> RecapError {
    RecapError::Terminal(err.to_string())
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Lay out the dashboard: records and summary side by side, chart below.
pub fn render_dashboard(frame: &mut Frame, result: &DashboardResult, theme: &Theme) {
    let area = frame.area();
    if result.records.is_empty() {
        table_view::render_no_data(frame, area, theme);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(48)])
        .split(rows[0]);

    table_view::render_records_table(frame, top[0], &result.records, theme);
    table_view::render_summary_table(frame, top[1], &result.totals, theme);
    chart_view::render_pnl_chart(frame, rows[1], &result.series, theme);
}

/// Bordered panel holding a (possibly multi-line) error message.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(
        message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme.error))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press 'q' or Ctrl+C to exit",
        theme.dim,
    )));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Notify Betting Recaps ", theme.header)),
            ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
