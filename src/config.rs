use std::path::PathBuf;
use std::time::Duration;

use crate::grid::GRID_SIZE;
use crate::level::MAX_GENERATION_ATTEMPTS;

pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const DEFAULT_AUTO_STEP_MS: u64 = 200;
pub const DEFAULT_ADVANCE_MS: u64 = 2000;

/// Rules of a single session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub grid_size: usize,
    pub auto_step: Duration,
    pub advance_delay: Duration,
    pub max_generation_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            auto_step: Duration::from_millis(DEFAULT_AUTO_STEP_MS),
            advance_delay: Duration::from_millis(DEFAULT_ADVANCE_MS),
            max_generation_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }
}

/// Everything the terminal front end reads from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub session: SessionConfig,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        let session = SessionConfig {
            auto_step: Duration::from_millis(positive(
                "MOUSE_MAZE_AUTO_STEP_MS",
                DEFAULT_AUTO_STEP_MS,
            )),
            advance_delay: Duration::from_millis(positive(
                "MOUSE_MAZE_ADVANCE_MS",
                DEFAULT_ADVANCE_MS,
            )),
            ..SessionConfig::default()
        };

        Self {
            tick_ms: positive("MOUSE_MAZE_TICK_MS", DEFAULT_TICK_MS),
            render_fps: positive("MOUSE_MAZE_FPS", DEFAULT_RENDER_FPS),
            seed: lookup("MOUSE_MAZE_SEED").and_then(|v| v.trim().parse::<u64>().ok()),
            log_file: lookup("MOUSE_MAZE_LOG")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            session,
        }
    }
}
