//! Terminal variant: snake on a walled 40×28 grid, drawn as text.
//!
//! Same core as the graphical binary; only the glue differs. Logs go to a
//! file because stderr would scribble over the alternate screen.

use std::fs::File;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use simplelog::WriteLogger;

use gridsnake::config::Config;
use gridsnake::input::{self, Controls};
use gridsnake::scheduler::{Clock, MonotonicClock, Pacing, Scheduler};
use gridsnake::session::GameState;
use gridsnake::{Cell, Playfield, Session};

const DEFAULT_COLS: i32 = 40;
const DEFAULT_ROWS: i32 = 28;
// Smallest grid that fits the centered spawn with room to play.
const MIN_COLS: i32 = 10;
const MIN_ROWS: i32 = 8;
const POINTS_PER_FOOD: u32 = 10;
const LOG_FILE: &str = "gridsnake-tui.log";
const POLL_MS: u64 = 10;

/// Snake in the terminal, walls included. Arrows/WASD to steer, space to
/// pause, enter to restart, q to quit.
#[derive(Parser, Debug)]
#[command(name = "gridsnake-tui", version)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<String>,
    /// Grid width in cells.
    #[arg(long)]
    cols: Option<i32>,
    /// Grid height in cells.
    #[arg(long)]
    rows: Option<i32>,
    /// Random seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(log::LevelFilter::Info, simplelog::Config::default(), file);
    }

    let config = Config::load_or_default(args.config.as_deref());
    let cols = args.cols.or(config.cols).unwrap_or(DEFAULT_COLS).max(MIN_COLS);
    let rows = args.rows.or(config.rows).unwrap_or(DEFAULT_ROWS).max(MIN_ROWS);
    let seed = args.seed.or(config.seed);

    let mut session = Session::new(Playfield::walled(cols, rows), POINTS_PER_FOOD, seed);
    let mut scheduler = Scheduler::new(config.pacing(Pacing::default()));
    info!("starting {cols}x{rows} walled session");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, &mut scheduler);

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    scheduler: &mut Scheduler,
) -> io::Result<()> {
    let mut clock = MonotonicClock::new();

    loop {
        terminal.draw(|frame| draw(frame, session))?;

        // The poll timeout doubles as the frame yield.
        let mut controls = Controls::default();
        if event::poll(Duration::from_millis(POLL_MS))? {
            loop {
                // A failed read counts as no input this frame.
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('a') => controls.left = true,
                        KeyCode::Right | KeyCode::Char('d') => controls.right = true,
                        KeyCode::Up | KeyCode::Char('w') => controls.up = true,
                        KeyCode::Down | KeyCode::Char('s') => controls.down = true,
                        KeyCode::Char(' ') => controls.pause = true,
                        KeyCode::Enter => controls.confirm = true,
                        _ => {}
                    },
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("input read failed: {e}");
                        controls = Controls::default();
                        break;
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        input::apply(&controls, session);

        scheduler.advance(session, clock.delta_ms());
    }
}

fn draw(frame: &mut Frame, session: &Session) {
    let cols = session.field().cols() as u16;
    let rows = session.field().rows() as u16;
    let area = frame.area();

    if area.width < cols || area.height < rows.saturating_add(2) {
        frame.render_widget(
            Paragraph::new(format!("Terminal too small: need {}x{}", cols, rows + 2)),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(rows),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(format!(
            "SNAKE  Score:{}   [Space]=Pause  [Q]=Quit",
            session.score()
        )),
        chunks[0],
    );

    // Center the fixed-size board in the middle chunk.
    let board = Rect {
        x: chunks[1].x + (chunks[1].width - cols) / 2,
        y: chunks[1].y,
        width: cols,
        height: rows,
    };
    frame.render_widget(BoardWidget(session), board);

    frame.render_widget(
        Paragraph::new(status_line(session.state())).alignment(Alignment::Center),
        chunks[2],
    );
}

fn status_line(state: GameState) -> &'static str {
    match state {
        GameState::WaitStart => "Press a direction key to start.",
        GameState::Running => "",
        GameState::Paused => "Paused. Space to continue.",
        GameState::GameOver => "Game over. Press enter to restart, q to quit.",
        GameState::WaitResume => "Press a direction key to resume.",
    }
}

struct BoardWidget<'a>(&'a Session);

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.0;
        let cols = session.field().cols();
        let rows = session.field().rows();

        let mut put = |cell: Cell, symbol: &str, fg: Color| {
            if cell.x >= 0 && cell.x < cols && cell.y >= 0 && cell.y < rows {
                buf[(area.x + cell.x as u16, area.y + cell.y as u16)]
                    .set_symbol(symbol)
                    .set_fg(fg);
            }
        };

        for y in 0..rows {
            for x in 0..cols {
                if x == 0 || x == cols - 1 || y == 0 || y == rows - 1 {
                    put(Cell::new(x, y), "#", Color::DarkGray);
                }
            }
        }

        put(session.food(), "*", Color::LightRed);

        let mut cells = session.snake_cells();
        if let Some(head) = cells.next() {
            put(head, "O", Color::Yellow);
        }
        for body in cells {
            put(body, "o", Color::Green);
        }
    }
}
