//! Money Run terminal demo
//!
//! Drives the engine in a raw-mode terminal at the nominal refresh rate:
//! the character grid stands in for the host's canvas, one cell per
//! 10x20 px world block. Space jumps, `r` restarts, `q` quits.

use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use glam::Vec2;

use money_run::consts::NOMINAL_TICK_HZ;
use money_run::engine::{AvatarImage, Engine, FrameToken, HostConfig, TickScheduler};
use money_run::render::{Color, DrawSurface};
use money_run::sim::{GamePhase, Rect, Viewport};

/// World pixels spanned by one terminal cell
const CELL_W: f32 = 10.0;
const CELL_H: f32 = 20.0;

/// Scheduler for a blocking frame loop: the loop itself fires `on_frame`
/// once per refresh interval whenever the engine has a request armed.
#[derive(Default)]
struct LoopScheduler {
    next_token: u64,
    armed: Option<FrameToken>,
}

impl TickScheduler for LoopScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.armed = Some(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.armed == Some(token) {
            self.armed = None;
        }
    }
}

/// One cell of the frame being built
#[derive(Clone, Copy, PartialEq)]
struct CellGlyph {
    ch: char,
    fg: TermColor,
    bg: TermColor,
}

/// Character-grid drawing surface
struct TermSurface {
    cols: u16,
    rows: u16,
    cells: Vec<CellGlyph>,
}

impl TermSurface {
    fn new(cols: u16, rows: u16) -> Self {
        let blank = CellGlyph {
            ch: ' ',
            fg: TermColor::Reset,
            bg: TermColor::Reset,
        };
        Self {
            cols,
            rows,
            cells: vec![blank; cols as usize * rows as usize],
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    fn put(&mut self, col: i32, row: i32, cell: CellGlyph) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    fn cell_at(&self, col: i32, row: i32) -> Option<CellGlyph> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    /// Emit the whole grid in one batch, then flush once. Every cell is
    /// positioned explicitly so double-width glyphs cannot shift the grid.
    fn present(&self, out: &mut impl Write) -> io::Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                queue!(
                    out,
                    MoveTo(col, row),
                    SetBackgroundColor(cell.bg),
                    SetForegroundColor(cell.fg),
                    Print(cell.ch)
                )?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: (color[0] * 255.0) as u8,
        g: (color[1] * 255.0) as u8,
        b: (color[2] * 255.0) as u8,
    }
}

impl DrawSurface for TermSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.cols as f32 * CELL_W, self.rows as f32 * CELL_H)
    }

    fn clear(&mut self, color: Color) {
        let bg = term_color(color);
        for cell in &mut self.cells {
            *cell = CellGlyph {
                ch: ' ',
                fg: TermColor::Reset,
                bg,
            };
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let bg = term_color(color);
        let col0 = (rect.x / CELL_W).floor() as i32;
        let col1 = (rect.right() / CELL_W).ceil() as i32;
        let row0 = (rect.y / CELL_H).floor() as i32;
        let row1 = (rect.bottom() / CELL_H).ceil() as i32;
        for row in row0..row1 {
            for col in col0..col1 {
                self.put(
                    col,
                    row,
                    CellGlyph {
                        ch: ' ',
                        fg: TermColor::Reset,
                        bg,
                    },
                );
            }
        }
    }

    fn draw_avatar(&mut self, _image: AvatarImage, _rect: &Rect) -> bool {
        // A character grid has no image support; the painter falls back
        false
    }

    fn draw_glyph(&mut self, glyph: char, rect: &Rect) {
        let center = rect.center();
        let col = (center.x / CELL_W) as i32;
        let row = (center.y / CELL_H) as i32;
        let bg = self
            .cell_at(col, row)
            .map_or(TermColor::Reset, |cell| cell.bg);
        self.put(
            col,
            row,
            CellGlyph {
                ch: glyph,
                fg: TermColor::Reset,
                bg,
            },
        );
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        let fg = term_color(color);
        let row = (pos.y / CELL_H) as i32;
        let col0 = (pos.x / CELL_W) as i32;
        for (i, ch) in text.chars().enumerate() {
            let col = col0 + i as i32;
            let bg = self
                .cell_at(col, row)
                .map_or(TermColor::Reset, |cell| cell.bg);
            self.put(col, row, CellGlyph { ch, fg, bg });
        }
    }
}

fn session_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Money Run (terminal demo) starting...");

    let mut engine = Engine::new(
        LoopScheduler::default(),
        HostConfig {
            avatar: None,
            currency_symbol: "$".to_string(),
        },
    );
    engine.set_on_game_over(|score| log::info!("final score reported to host: {score}"));

    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut engine, &mut out);

    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(engine: &mut Engine<LoopScheduler>, out: &mut impl Write) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TermSurface::new(cols, rows);
    let frame_time = Duration::from_micros(1_000_000 / u64::from(NOMINAL_TICK_HZ));

    engine.start(session_seed());
    let mut last_phase = engine.phase();

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char(' ') | KeyCode::Up => engine.jump(),
                    KeyCode::Char('r') | KeyCode::Enter => engine.start(session_seed()),
                    KeyCode::Char('q') | KeyCode::Esc => {
                        engine.exit();
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Resize(new_cols, new_rows) => surface.resize(new_cols, new_rows),
                _ => {}
            }
        }

        if engine.wants_frame() {
            engine.on_frame(Some(&mut surface));
            surface.present(out)?;
        }

        let phase = engine.phase();
        if phase == GamePhase::GameOver && last_phase != GamePhase::GameOver {
            draw_game_over_banner(out, engine.score(), surface.cols, surface.rows)?;
        }
        last_phase = phase;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

/// Host-owned overlay: the engine froze its last frame, the host says why.
fn draw_game_over_banner(
    out: &mut impl Write,
    score: u64,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let lines = [
        format!("  GAME OVER - score $ {score}  "),
        "  [r] restart   [q] quit  ".to_string(),
    ];
    let row0 = rows / 2;
    for (i, line) in lines.iter().enumerate() {
        let col = cols.saturating_sub(line.chars().count() as u16) / 2;
        queue!(
            out,
            MoveTo(col, row0 + i as u16),
            SetBackgroundColor(TermColor::Black),
            SetForegroundColor(TermColor::White),
            Print(line),
            ResetColor
        )?;
    }
    out.flush()
}
