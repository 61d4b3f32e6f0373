use std::collections::VecDeque;

use crate::components::Cell;
use crate::grid::Grid;

/// Cells walked after leaving the start, ending on the target. Empty means
/// the target cannot be reached (or the walk starts on it).
pub type Path = Vec<Cell>;

// +x, -x, +y, -y
const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Breadth-first search over the 4-connected free cells of `grid`.
///
/// Cells are marked seen when enqueued, so each one enters the queue at
/// most once. The neighbour order is fixed, which makes the chosen path
/// stable for a given grid and pair of endpoints.
pub fn find_shortest_path(grid: &Grid, start: Cell, end: Cell) -> Path {
    if start == end || !grid.in_bounds(start) || !grid.in_bounds(end) {
        return Vec::new();
    }

    let size = grid.size();
    let mut seen = vec![vec![false; size]; size];
    let mut came_from: Vec<Vec<Option<Cell>>> = vec![vec![None; size]; size];
    let mut q = VecDeque::new();
    seen[start.y][start.x] = true;
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        if pos == end {
            return rebuild(&came_from, start, end);
        }
        for (dx, dy) in NEIGHBOURS {
            let Some(next) = grid.offset(pos, dx, dy) else {
                continue;
            };
            if seen[next.y][next.x] || grid.is_blocked(next) {
                continue;
            }
            seen[next.y][next.x] = true;
            came_from[next.y][next.x] = Some(pos);
            q.push_back(next);
        }
    }
    Vec::new()
}

fn rebuild(came_from: &[Vec<Option<Cell>>], start: Cell, end: Cell) -> Path {
    let mut path = Vec::new();
    let mut cur = end;
    while cur != start {
        path.push(cur);
        match came_from[cur.y][cur.x] {
            Some(prev) => cur = prev,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Length of the shortest walk, or `None` when there is none.
pub fn shortest_distance(grid: &Grid, start: Cell, end: Cell) -> Option<usize> {
    if start == end {
        return Some(0);
    }
    let path = find_shortest_path(grid, start, end);
    (!path.is_empty()).then_some(path.len())
}
