use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use mouse_maze::{Cell, Mode, Snapshot, Status, Tile};

const CELL_W: usize = 2;
const KEYS_HELP: &str = "arrows/hjkl move  ? hint  p auto  x stop  r reset  q quit";

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Goal,
    Blocked,
    Hint,
    Floor,
}

#[derive(Clone, Copy, PartialEq)]
struct Drawn {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<Drawn>,
    last_hud: String,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(size: usize) -> Self {
        Self {
            last: vec![
                Drawn {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                size * size
            ],
            last_hud: String::new(),
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, stdout: &mut Stdout, view: &Snapshot<'_>) -> io::Result<()> {
        let size = view.grid.size();
        if self.last.len() != size * size {
            *self = Renderer::new(size);
        }
        let needed_w = ((size * CELL_W) as u16).max(KEYS_HELP.width() as u16);
        let needed_h = (size + 3) as u16;

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - (size * CELL_W) as u16) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = format!("Level: {}  Steps: {}", view.level, view.steps);
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..size {
            for x in 0..size {
                let drawn = drawn_for(view, Cell::new(x, y));
                let idx = y * size + x;
                if self.needs_full || drawn != self.last[idx] {
                    self.last[idx] = drawn;
                    self.draw_cell(stdout, x, y, drawn)?;
                }
            }
        }

        let status = view.status.map(status_text).unwrap_or_default();
        if self.needs_full || status != self.last_status {
            let row = self.origin_y + size as u16;
            stdout.queue(MoveTo(0, row))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(MoveTo(self.origin_x, row))?;
            stdout.queue(SetForegroundColor(status_color(view.mode)))?;
            stdout.queue(Print(&status))?;
            stdout.queue(ResetColor)?;
            stdout.queue(MoveTo((term_w - KEYS_HELP.width() as u16) / 2, row + 1))?;
            stdout.queue(SetForegroundColor(Color::DarkGrey))?;
            stdout.queue(Print(KEYS_HELP))?;
            stdout.queue(ResetColor)?;
            self.last_status = status;
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, drawn: Drawn) -> io::Result<()> {
        let text = match drawn.glyph {
            Glyph::Player => "🐭",
            Glyph::Goal => "🧀",
            Glyph::Blocked => "██",
            Glyph::Hint => "░░",
            Glyph::Floor => "· ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(drawn.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn drawn_for(view: &Snapshot<'_>, pos: Cell) -> Drawn {
    if pos == view.player {
        return Drawn {
            glyph: Glyph::Player,
            color: Color::Cyan,
        };
    }
    if pos == view.goal {
        return Drawn {
            glyph: Glyph::Goal,
            color: Color::Yellow,
        };
    }
    if view.grid.is_blocked(pos) {
        return Drawn {
            glyph: Glyph::Blocked,
            color: Color::Green,
        };
    }
    if view.hint.contains(&pos) {
        return Drawn {
            glyph: Glyph::Hint,
            color: Color::DarkYellow,
        };
    }
    Drawn {
        glyph: Glyph::Floor,
        color: if (pos.x + pos.y) % 2 == 0 {
            Color::DarkGrey
        } else {
            Color::Grey
        },
    }
}

fn status_color(mode: Mode) -> Color {
    match mode {
        Mode::Playing => Color::White,
        Mode::AutoPlaying => Color::Cyan,
        Mode::Victory => Color::Green,
    }
}

fn status_text(status: Status) -> String {
    match status {
        Status::LevelStarted { level } => format!("Level {level}. Find the cheese!"),
        Status::Unreachable => "No route to the cheese!".to_string(),
        Status::HintShown => "Hint: follow the highlighted cells.".to_string(),
        Status::AutoPlaying => "Auto-playing...".to_string(),
        Status::AutoPlayStopped => "Auto-play stopped.".to_string(),
        Status::Victory {
            level,
            steps,
            is_optimal: true,
            ..
        } => format!("Level {level} cleared in {steps} steps, the shortest route!"),
        Status::Victory {
            level,
            steps,
            min_steps,
            ..
        } => format!("Level {level} cleared in {steps} steps; the shortest route is {min_steps}."),
        Status::NoPathForAuto => "No route, auto-play unavailable.".to_string(),
    }
}

/// Plain-text board, one string per row.
pub fn board_lines(view: &Snapshot<'_>) -> Vec<String> {
    let size = view.grid.size();
    let mut lines = vec![String::with_capacity(size); size];
    for (pos, tile) in view.grid.tiles() {
        let ch = if pos == view.player {
            'M'
        } else if pos == view.goal {
            'C'
        } else if tile == Tile::Blocked {
            '#'
        } else if view.hint.contains(&pos) {
            '*'
        } else {
            '.'
        };
        lines[pos.y].push(ch);
    }
    lines
}
