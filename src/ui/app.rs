//! Interactive terminal viewer
//!
//! Read-only view of the grid: cells are painted from the vegetation color
//! ramp with occupant counts overlaid, next to a rolling event log. The
//! viewer's input loop is the tick driver; the widgets themselves never
//! mutate simulation state.
//!
//! Controls:
//!   q / Esc: quit
//!   Space:   pause / resume
//!   t:       single tick while paused
//!   + / -:   faster / slower

use std::collections::VecDeque;
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::core::error::Result;
use crate::core::types::Tick;
use crate::grid::Grid;
use crate::pathfind::AStar;
use crate::ui::colors::{vegetation_color, BARE_EARTH, OCCUPANT_FG};

/// Rolling event log entries kept on screen
const MAX_LOG_ENTRIES: usize = 50;

struct App {
    grid: Grid,
    planner: AStar,
    paused: bool,
    interval_ms: u64,
    last_tick: Instant,
    log: VecDeque<(Tick, String)>,
}

impl App {
    fn new(grid: Grid, interval_ms: u64) -> Self {
        Self {
            grid,
            planner: AStar,
            paused: false,
            interval_ms,
            last_tick: Instant::now(),
            log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    fn step(&mut self) -> Result<()> {
        let events = self.grid.advance(&self.planner)?;
        let tick = self.grid.current_tick();
        for event in events {
            if self.log.len() >= MAX_LOG_ENTRIES {
                self.log.pop_front();
            }
            self.log.push_back((tick, event.to_string()));
        }
        self.last_tick = Instant::now();
        Ok(())
    }

    fn should_auto_step(&self) -> bool {
        !self.paused && self.last_tick.elapsed() >= Duration::from_millis(self.interval_ms)
    }

    fn speed_up(&mut self) {
        self.interval_ms = self.interval_ms.saturating_sub(50).max(25);
    }

    fn slow_down(&mut self) {
        self.interval_ms = (self.interval_ms + 50).min(2000);
    }
}

/// Run the viewer until the user quits
pub fn run(grid: Grid, interval_ms: u64) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(grid, interval_ms);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if app.should_auto_step() {
            app.step()?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => app.paused = !app.paused,
                        KeyCode::Char('t') => {
                            app.paused = true;
                            app.step()?;
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => app.speed_up(),
                        KeyCode::Char('-') => app.slow_down(),
                        _ => {}
                    }
                }
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.size());

    draw_header(f, chunks[0], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    draw_map(f, main[0], app);
    draw_log(f, main[1], app);
    draw_footer(f, chunks[2]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.paused { "PAUSED" } else { "RUNNING" };
    let title = format!(
        " Veldt | Tick {} | Population {} | Vegetation {:.0} | {} | {}ms ",
        app.grid.current_tick(),
        app.grid.live_count(),
        app.grid.total_vegetation(),
        status,
        app.interval_ms,
    );
    let header = Paragraph::new(title)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_map(f: &mut Frame, area: Rect, app: &App) {
    let inner_width = (area.width as usize).saturating_sub(2);
    let inner_height = (area.height as usize).saturating_sub(2);

    // Two terminal columns per cell keeps the aspect ratio roughly square
    let visible_cols = (inner_width / 2).min(app.grid.width() as usize);
    let visible_rows = inner_height.min(app.grid.height() as usize);

    let mut lines: Vec<Line> = Vec::with_capacity(visible_rows);
    for y in 0..visible_rows {
        let mut spans = Vec::with_capacity(visible_cols);
        for x in 0..visible_cols {
            let node = match app.grid.get_node(x as i32, y as i32) {
                Ok(node) => node,
                Err(_) => continue,
            };
            let bg = match node.plants() {
                Ok(plants) => vegetation_color(plants.amount, plants.veg_max),
                Err(_) => BARE_EARTH,
            };
            let count = node.occupants.len();
            let text = if count > 0 {
                format!("{:>2}", count.min(99))
            } else {
                "  ".to_string()
            };
            spans.push(Span::styled(text, Style::default().bg(bg).fg(OCCUPANT_FG)));
        }
        lines.push(Line::from(spans));
    }

    let map = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Map "));
    f.render_widget(map, area);
}

fn draw_log(f: &mut Frame, area: Rect, app: &App) {
    let visible = (area.height as usize).saturating_sub(2);
    let lines: Vec<Line> = app
        .log
        .iter()
        .rev()
        .take(visible)
        .map(|(tick, message)| Line::from(format!("[{tick}] {message}")))
        .collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Events "));
    f.render_widget(log, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(" q quit | space pause | t step | +/- speed ")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
