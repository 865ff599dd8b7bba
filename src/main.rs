//! Terminal client
//!
//! A crossterm raw-mode harness around the simulation: key events become
//! queued input commands, a fixed-timestep accumulator drives the tick, and
//! the playfield is scaled into a character-cell grid.

use std::collections::{HashMap, VecDeque};
use std::io::{stdout, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use breakaway::consts::{MAX_SUBSTEPS, SIM_DT};
use breakaway::sim::{tick, GameState, InputCommand, Shape};
use breakaway::{draw_game, Color, GameConfig, LevelSet, RenderSink};

/// Render frame budget (the sim still steps at `SIM_DT`)
const FRAME: Duration = Duration::from_millis(33);

/// Character cells the playfield is scaled into
const GRID_COLS: u16 = 64;
const GRID_ROWS: u16 = 36;

/// A direction key counts as held if its last press/repeat event arrived
/// within this many render frames. Terminals without key-release events
/// deliver OS key-repeat as fresh presses at 15+ Hz, so the window expires
/// only once the key is truly up.
const HOLD_WINDOW: u64 = 4;

/// Tracks held direction keys and converts hold edges into commands
///
/// Works on both terminal classes: with keyboard enhancement, release events
/// clear keys immediately; without it, keys expire after `HOLD_WINDOW`
/// frames of repeat silence.
struct KeyTracker {
    /// Frame each key was last seen pressed or repeating
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    left_held: bool,
    right_held: bool,
}

impl KeyTracker {
    fn new() -> Self {
        Self {
            key_frame: HashMap::new(),
            frame: 0,
            left_held: false,
            right_held: false,
        }
    }

    fn begin_frame(&mut self) {
        self.frame += 1;
    }

    fn record(&mut self, event: &KeyEvent) {
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_frame.insert(event.code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&event.code);
            }
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Emit press/release commands for any hold-state change this frame
    fn sync_directions(&mut self, commands: &mut VecDeque<InputCommand>) {
        let left = self.is_held(KeyCode::Left)
            || self.is_held(KeyCode::Char('a'))
            || self.is_held(KeyCode::Char('A'));
        let right = self.is_held(KeyCode::Right)
            || self.is_held(KeyCode::Char('d'))
            || self.is_held(KeyCode::Char('D'));

        if left != self.left_held {
            self.left_held = left;
            commands.push_back(if left {
                InputCommand::MoveLeftPressed
            } else {
                InputCommand::MoveLeftReleased
            });
        }
        if right != self.right_held {
            self.right_held = right;
            commands.push_back(if right {
                InputCommand::MoveRightPressed
            } else {
                InputCommand::MoveRightReleased
            });
        }
    }
}

/// A render sink that rasterizes world shapes into colored character cells
struct CellGrid {
    cols: u16,
    rows: u16,
    /// Cells per world unit on each axis
    scale_x: f32,
    scale_y: f32,
    /// Row-major cell colors; `None` is empty
    cells: Vec<Option<Color>>,
}

impl CellGrid {
    fn new(cols: u16, rows: u16, field_width: f32, field_height: f32) -> Self {
        Self {
            cols,
            rows,
            scale_x: cols as f32 / field_width,
            scale_y: rows as f32 / field_height,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn set(&mut self, col: i32, row: i32, color: Color) {
        if col >= 0 && col < self.cols as i32 && row >= 0 && row < self.rows as i32 {
            self.cells[row as usize * self.cols as usize + col as usize] = Some(color);
        }
    }

    /// First cell a world coordinate lands in
    fn to_col(&self, x: f32) -> i32 {
        (x * self.scale_x).floor() as i32
    }

    fn to_row(&self, y: f32) -> i32 {
        (y * self.scale_y).floor() as i32
    }

    /// Last cell a world extent reaches (exclusive upper edge)
    fn end_col(&self, x: f32) -> i32 {
        (x * self.scale_x).ceil() as i32 - 1
    }

    fn end_row(&self, y: f32) -> i32 {
        (y * self.scale_y).ceil() as i32 - 1
    }

    /// World coordinates of a cell's center
    fn cell_center(&self, col: i32, row: i32) -> (f32, f32) {
        (
            (col as f32 + 0.5) / self.scale_x,
            (row as f32 + 0.5) / self.scale_y,
        )
    }

    fn flush(&self, out: &mut impl Write) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row + 1))?;
            for col in 0..self.cols {
                match self.cells[row as usize * self.cols as usize + col as usize] {
                    Some(color) => {
                        out.queue(style::SetForegroundColor(style::Color::Rgb {
                            r: color.r,
                            g: color.g,
                            b: color.b,
                        }))?;
                        out.queue(Print('█'))?;
                    }
                    None => {
                        out.queue(Print(' '))?;
                    }
                }
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

impl RenderSink for CellGrid {
    fn draw(&mut self, shape: &Shape, color: Color, fill: bool) {
        match shape {
            Shape::Rect(rect) => {
                let c0 = self.to_col(rect.left());
                let c1 = self.end_col(rect.right()).max(c0);
                let r0 = self.to_row(rect.top());
                let r1 = self.end_row(rect.bottom()).max(r0);
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        if fill || row == r0 || row == r1 || col == c0 || col == c1 {
                            self.set(col, row, color);
                        }
                    }
                }
            }
            Shape::Circle(circle) => {
                let c0 = self.to_col(circle.center.x - circle.radius);
                let c1 = self.end_col(circle.center.x + circle.radius);
                let r0 = self.to_row(circle.center.y - circle.radius);
                let r1 = self.end_row(circle.center.y + circle.radius);
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        let (x, y) = self.cell_center(col, row);
                        let dx = x - circle.center.x;
                        let dy = y - circle.center.y;
                        if dx * dx + dy * dy <= circle.radius * circle.radius {
                            self.set(col, row, color);
                        }
                    }
                }
            }
        }
    }
}

struct App {
    state: GameState,
    commands: VecDeque<InputCommand>,
    keys: KeyTracker,
    grid: CellGrid,
    accumulator: f32,
    running: bool,
}

impl App {
    fn new(config: GameConfig, levels: LevelSet) -> Self {
        let grid = CellGrid::new(GRID_COLS, GRID_ROWS, config.field_width, config.field_height);
        Self {
            state: GameState::new(config, levels),
            commands: VecDeque::new(),
            keys: KeyTracker::new(),
            grid,
            accumulator: 0.0,
            running: true,
        }
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Press {
            match event.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.running = false;
                    return;
                }
                KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.running = false;
                    return;
                }
                KeyCode::Char(' ') => {
                    self.commands.push_back(InputCommand::ServePressed);
                }
                _ => {}
            }
        }
        self.keys.record(&event);
    }

    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &mut self.commands, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn draw(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        self.grid.clear();
        draw_game(&self.state, &mut self.grid);

        let hud = format!(
            "{}  |  level {}/{}  |  lives {}  |  {}",
            GameState::NAME,
            self.state.current_level + 1,
            self.state.levels.len(),
            self.state.lives,
            self.state.status_string()
        );
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(Print(format!("{hud:<width$}", width = GRID_COLS as usize)))?;

        self.grid.flush(out)?;

        out.queue(cursor::MoveTo(0, GRID_ROWS + 1))?;
        out.queue(Print(format!(
            "{:<width$}",
            "move: arrows or a/d  |  serve: space  |  quit: q",
            width = GRID_COLS as usize
        )))?;
        out.flush()
    }

    fn run(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        let mut last = Instant::now();
        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last).as_secs_f32();
            last = frame_start;

            self.keys.begin_frame();
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            self.keys.sync_directions(&mut self.commands);

            self.update(dt);
            self.draw(out)?;

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME {
                std::thread::sleep(FRAME - elapsed);
            }
        }
        Ok(())
    }
}

/// Load the pack named on the command line, or fall back to the built-in one
fn load_levels() -> Result<LevelSet, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            let levels = LevelSet::parse(&text)?;
            log::info!("loaded level pack {path}: {} levels", levels.len());
            Ok(levels)
        }
        None => Ok(LevelSet::builtin()),
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    // Fail on bad packs before touching the terminal
    let levels = match load_levels() {
        Ok(levels) => levels,
        Err(err) => {
            eprintln!("breakaway: {err}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(GameConfig::default(), levels);
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
    if keyboard_enhanced {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
        ))?;
    }
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    let result = app.run(&mut out);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
