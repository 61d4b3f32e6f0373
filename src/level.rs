use rand::Rng;
use tracing::{debug, warn};

use crate::components::Cell;
use crate::error::{MazeError, MazeResult};
use crate::grid::Grid;
use crate::pathfinding::find_shortest_path;

pub const OBSTACLES_PER_LEVEL: usize = 8;
pub const MAX_GENERATION_ATTEMPTS: u32 = 1000;

/// Obstacles for `level`: eight more per level, capped at a third of the board.
pub fn obstacle_count(size: usize, level: u32) -> usize {
    let wanted = (level as usize).saturating_mul(OBSTACLES_PER_LEVEL);
    let cap = size * size / 3;
    wanted.min(cap)
}

/// Scatters obstacles at random and keeps the first layout in which `goal`
/// is still reachable from `start`.
///
/// An unsolvable layout is thrown away whole and generation starts again
/// from an empty board; there is no local repair. Gives up with
/// [`MazeError::GenerationExhausted`] after `max_attempts` layouts.
pub fn generate_obstacles(
    rng: &mut impl Rng,
    size: usize,
    level: u32,
    start: Cell,
    goal: Cell,
    max_attempts: u32,
) -> MazeResult<Grid> {
    for cell in [start, goal] {
        if cell.x >= size || cell.y >= size {
            return Err(MazeError::EndpointOutOfBounds { cell, size });
        }
    }

    let reserved = if start == goal { 1 } else { 2 };
    let count = obstacle_count(size, level).min(size * size - reserved);
    let mut grid = Grid::new(size);

    for attempt in 1..=max_attempts {
        grid.clear();
        scatter(&mut grid, rng, count, start, goal);
        if start == goal || !find_shortest_path(&grid, start, goal).is_empty() {
            debug!(level, obstacles = count, attempt, "obstacle layout accepted");
            return Ok(grid);
        }
        debug!(level, attempt, "goal sealed off, regenerating");
    }

    warn!(level, attempts = max_attempts, "level generation exhausted");
    Err(MazeError::GenerationExhausted {
        level,
        attempts: max_attempts,
    })
}

fn scatter(grid: &mut Grid, rng: &mut impl Rng, count: usize, start: Cell, goal: Cell) {
    let size = grid.size();
    let mut placed = 0;
    while placed < count {
        let cell = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if cell == start || cell == goal || grid.is_blocked(cell) {
            continue;
        }
        grid.set_blocked(cell);
        placed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GRID_SIZE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const START: Cell = Cell::new(0, 0);
    const GOAL: Cell = Cell::new(GRID_SIZE - 1, GRID_SIZE - 1);

    #[test]
    fn count_scales_then_caps() {
        assert_eq!(obstacle_count(GRID_SIZE, 1), 8);
        assert_eq!(obstacle_count(GRID_SIZE, 4), 32);
        assert_eq!(obstacle_count(GRID_SIZE, 5), 33);
        assert_eq!(obstacle_count(GRID_SIZE, 50), 33);
    }

    #[test]
    fn every_level_stays_solvable() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for level in 1..=12 {
            let grid = generate_obstacles(
                &mut rng,
                GRID_SIZE,
                level,
                START,
                GOAL,
                MAX_GENERATION_ATTEMPTS,
            )
            .expect("solvable layout");
            assert!(!find_shortest_path(&grid, START, GOAL).is_empty());
            assert_eq!(grid.blocked_count(), obstacle_count(GRID_SIZE, level));
            assert!(!grid.is_blocked(START));
            assert!(!grid.is_blocked(GOAL));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate_obstacles(
            &mut ChaCha8Rng::seed_from_u64(42),
            GRID_SIZE,
            3,
            START,
            GOAL,
            MAX_GENERATION_ATTEMPTS,
        )
        .expect("layout");
        let b = generate_obstacles(
            &mut ChaCha8Rng::seed_from_u64(42),
            GRID_SIZE,
            3,
            START,
            GOAL,
            MAX_GENERATION_ATTEMPTS,
        )
        .expect("layout");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_endpoint_outside_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_obstacles(
            &mut rng,
            GRID_SIZE,
            1,
            START,
            Cell::new(GRID_SIZE, 0),
            MAX_GENERATION_ATTEMPTS,
        )
        .unwrap_err();
        assert!(matches!(err, MazeError::EndpointOutOfBounds { .. }));
    }

    #[test]
    fn zero_attempts_is_exhausted() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_obstacles(&mut rng, GRID_SIZE, 1, START, GOAL, 0).unwrap_err();
        assert!(matches!(
            err,
            MazeError::GenerationExhausted {
                level: 1,
                attempts: 0
            }
        ));
    }
}
