//! Grid maze with a player, a goal and randomly scattered obstacles.
//!
//! Boards are generated per level with a guaranteed route to the goal, and
//! a breadth-first search supplies hints, auto-play and the optimal step
//! count reported on victory. Rendering lives in the binary.

pub mod components;
pub mod config;
pub mod error;
pub mod grid;
pub mod level;
pub mod pathfinding;
pub mod session;

pub use components::{Cell, Direction, Tile};
pub use config::{SessionConfig, Settings};
pub use error::{MazeError, MazeResult};
pub use grid::{Grid, GRID_SIZE};
pub use level::{generate_obstacles, obstacle_count};
pub use pathfinding::{find_shortest_path, shortest_distance, Path};
pub use session::{Command, Mode, MoveOutcome, Rejection, Session, Snapshot, Status};
