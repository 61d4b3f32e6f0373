use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::components::{Cell, Direction};
use crate::config::SessionConfig;
use crate::error::{MazeError, MazeResult};
use crate::grid::Grid;
use crate::level::generate_obstacles;
use crate::pathfinding::{find_shortest_path, Path};

/// Intents the front end can hand to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    RequestHint,
    StartAutoPlay,
    StopAutoPlay,
    Reset,
}

/// Classified outcome for the front end to put into words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    LevelStarted {
        level: u32,
    },
    Unreachable,
    HintShown,
    AutoPlaying,
    AutoPlayStopped,
    Victory {
        level: u32,
        steps: usize,
        min_steps: usize,
        is_optimal: bool,
    },
    NoPathForAuto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The move landed on the goal.
    Won,
    Rejected(Rejection),
    /// Input is frozen (auto-play or victory) or the move went nowhere.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Playing,
    AutoPlaying,
    Victory,
}

#[derive(Clone, Debug)]
enum Phase {
    Playing,
    AutoPlaying {
        path: VecDeque<Cell>,
        since_step: Duration,
    },
    Victory {
        level: u32,
        remaining: Duration,
    },
}

/// Read-only view handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub level: u32,
    pub grid: &'a Grid,
    pub player: Cell,
    pub goal: Cell,
    pub steps: usize,
    pub hint: &'a [Cell],
    pub mode: Mode,
    pub status: Option<Status>,
}

pub struct Session {
    config: SessionConfig,
    level: u32,
    grid: Grid,
    start: Cell,
    goal: Cell,
    player: Cell,
    steps: usize,
    hint: Path,
    phase: Phase,
    status: Option<Status>,
}

impl Session {
    /// Starts at level 1 on a freshly generated board.
    pub fn new(rng: &mut impl Rng, config: SessionConfig) -> MazeResult<Self> {
        let size = config.grid_size;
        let start = Cell::new(0, 0);
        let goal = Cell::new(size.saturating_sub(1), size.saturating_sub(1));
        let grid = generate_obstacles(rng, size, 1, start, goal, config.max_generation_attempts)?;
        Ok(Self::assemble(config, 1, grid, start, goal))
    }

    /// Plays `level` on a prepared board instead of a generated one. Later
    /// resets and level changes generate boards of the same size.
    pub fn from_grid(mut config: SessionConfig, level: u32, grid: Grid) -> MazeResult<Self> {
        let size = grid.size();
        let start = Cell::new(0, 0);
        let goal = Cell::new(size.saturating_sub(1), size.saturating_sub(1));
        for cell in [start, goal] {
            if !grid.in_bounds(cell) {
                return Err(MazeError::EndpointOutOfBounds { cell, size });
            }
            if grid.is_blocked(cell) {
                return Err(MazeError::BlockedEndpoint { cell });
            }
        }
        config.grid_size = size;
        Ok(Self::assemble(config, level.max(1), grid, start, goal))
    }

    fn assemble(config: SessionConfig, level: u32, grid: Grid, start: Cell, goal: Cell) -> Self {
        info!(level, obstacles = grid.blocked_count(), "level started");
        Self {
            config,
            level,
            grid,
            start,
            goal,
            player: start,
            steps: 0,
            hint: Vec::new(),
            phase: Phase::Playing,
            status: Some(Status::LevelStarted { level }),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn hint(&self) -> &[Cell] {
        &self.hint
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn mode(&self) -> Mode {
        match self.phase {
            Phase::Playing => Mode::Playing,
            Phase::AutoPlaying { .. } => Mode::AutoPlaying,
            Phase::Victory { .. } => Mode::Victory,
        }
    }

    pub fn is_auto_playing(&self) -> bool {
        matches!(self.phase, Phase::AutoPlaying { .. })
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level: self.level,
            grid: &self.grid,
            player: self.player,
            goal: self.goal,
            steps: self.steps,
            hint: &self.hint,
            mode: self.mode(),
            status: self.status,
        }
    }

    pub fn dispatch(&mut self, rng: &mut impl Rng, command: Command) -> MazeResult<Option<Status>> {
        match command {
            Command::Move(dir) => Ok(match self.step(dir) {
                MoveOutcome::Won => self.status,
                _ => None,
            }),
            Command::RequestHint => Ok(self.request_hint()),
            Command::StartAutoPlay => Ok(self.start_auto_play()),
            Command::StopAutoPlay => Ok(self.stop_auto_play()),
            Command::Reset => self.reset_level(rng).map(Some),
        }
    }

    pub fn step(&mut self, dir: Direction) -> MoveOutcome {
        let (dx, dy) = dir.delta();
        self.move_player(dx, dy)
    }

    /// Manual move. Only accepted while playing; blocked and off-board
    /// targets leave the player and step count untouched.
    pub fn move_player(&mut self, dx: isize, dy: isize) -> MoveOutcome {
        if !matches!(self.phase, Phase::Playing) {
            return MoveOutcome::Ignored;
        }
        let Some(target) = self.grid.offset(self.player, dx, dy) else {
            return MoveOutcome::Rejected(Rejection::OutOfBounds);
        };
        if self.grid.is_blocked(target) {
            return MoveOutcome::Rejected(Rejection::Blocked);
        }
        if target == self.player {
            return MoveOutcome::Ignored;
        }

        self.player = target;
        self.steps += 1;
        self.hint.clear();
        trace!(x = target.x, y = target.y, steps = self.steps, "player moved");

        if self.check_victory() {
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        }
    }

    /// Shortest route from the player to the goal, kept for highlighting.
    pub fn request_hint(&mut self) -> Option<Status> {
        if !matches!(self.phase, Phase::Playing) {
            return None;
        }
        let path = find_shortest_path(&self.grid, self.player, self.goal);
        let status = if path.is_empty() {
            debug!(level = self.level, "hint requested but goal is unreachable");
            self.hint.clear();
            Status::Unreachable
        } else {
            debug!(level = self.level, len = path.len(), "hint shown");
            self.hint = path;
            Status::HintShown
        };
        self.status = Some(status);
        Some(status)
    }

    /// Enters auto-play and takes the first step right away. Further steps
    /// come from [`Session::update`] or direct [`Session::auto_step`] calls.
    pub fn start_auto_play(&mut self) -> Option<Status> {
        if !matches!(self.phase, Phase::Playing) {
            return None;
        }
        let path = find_shortest_path(&self.grid, self.player, self.goal);
        if path.is_empty() {
            debug!(level = self.level, "auto-play requested but goal is unreachable");
            self.status = Some(Status::NoPathForAuto);
            return self.status;
        }

        debug!(level = self.level, len = path.len(), "auto-play started");
        self.phase = Phase::AutoPlaying {
            path: path.into(),
            since_step: Duration::ZERO,
        };
        self.status = Some(Status::AutoPlaying);
        self.auto_step();
        self.status
    }

    pub fn stop_auto_play(&mut self) -> Option<Status> {
        if !self.is_auto_playing() {
            return None;
        }
        debug!(level = self.level, steps = self.steps, "auto-play stopped");
        self.phase = Phase::Playing;
        self.status = Some(Status::AutoPlayStopped);
        self.status
    }

    /// Advances one cell along the auto-play route. Returns the victory
    /// status when this step finishes the level.
    pub fn auto_step(&mut self) -> Option<Status> {
        let Phase::AutoPlaying { path, .. } = &mut self.phase else {
            return None;
        };
        if let Some(next) = path.pop_front() {
            self.player = next;
            self.steps += 1;
            trace!(x = next.x, y = next.y, steps = self.steps, "auto-play step");
        }
        let exhausted = path.is_empty();

        if exhausted || self.player == self.goal {
            self.phase = Phase::Playing;
            if self.check_victory() {
                return self.status;
            }
        }
        None
    }

    /// True when the player stands on the goal. The first time this holds
    /// for a level, reports the result and schedules the next level.
    pub fn check_victory(&mut self) -> bool {
        if self.player != self.goal {
            return false;
        }
        if let Phase::Victory { level, .. } = self.phase {
            if level == self.level {
                return true;
            }
        }

        let min_steps = find_shortest_path(&self.grid, self.start, self.goal).len();
        let is_optimal = self.steps == min_steps;
        info!(
            level = self.level,
            steps = self.steps,
            min_steps,
            is_optimal,
            "level cleared"
        );
        self.status = Some(Status::Victory {
            level: self.level,
            steps: self.steps,
            min_steps,
            is_optimal,
        });
        self.phase = Phase::Victory {
            level: self.level,
            remaining: self.config.advance_delay,
        };
        true
    }

    /// Drives the timed parts of a session: auto-play steps and the pause
    /// after a victory. Call with the time elapsed since the last update.
    pub fn update(&mut self, rng: &mut impl Rng, elapsed: Duration) -> MazeResult<Option<Status>> {
        match &mut self.phase {
            Phase::Playing => Ok(None),
            Phase::AutoPlaying { since_step, .. } => {
                *since_step += elapsed;
                if *since_step < self.config.auto_step {
                    return Ok(None);
                }
                *since_step -= self.config.auto_step;
                Ok(self.auto_step())
            }
            Phase::Victory { level, remaining } => {
                *remaining = remaining.saturating_sub(elapsed);
                if !remaining.is_zero() {
                    return Ok(None);
                }
                if *level != self.level {
                    self.phase = Phase::Playing;
                    return Ok(None);
                }
                self.advance_level(rng).map(Some)
            }
        }
    }

    /// Moves on to the next level with a new board.
    pub fn advance_level(&mut self, rng: &mut impl Rng) -> MazeResult<Status> {
        let next = self.level + 1;
        self.load_level(rng, next)?;
        info!(level = next, "advanced to next level");
        Ok(Status::LevelStarted { level: next })
    }

    /// New board for the current level; any auto-play or pending advance
    /// is dropped.
    pub fn reset_level(&mut self, rng: &mut impl Rng) -> MazeResult<Status> {
        let level = self.level;
        self.load_level(rng, level)?;
        info!(level, "level reset");
        Ok(Status::LevelStarted { level })
    }

    fn load_level(&mut self, rng: &mut impl Rng, level: u32) -> MazeResult<()> {
        let grid = generate_obstacles(
            rng,
            self.config.grid_size,
            level,
            self.start,
            self.goal,
            self.config.max_generation_attempts,
        )?;
        *self = Self::assemble(self.config.clone(), level, grid, self.start, self.goal);
        Ok(())
    }
}
