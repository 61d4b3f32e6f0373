use crate::components::{Cell, Tile};

/// Side length of the board used by the game.
pub const GRID_SIZE: usize = 10;

/// Square occupancy map. Row-major: `tiles[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tiles: vec![vec![Tile::Free; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    /// Callers bounds-check first; an out-of-bounds cell reads as blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.tiles.get(cell.y).and_then(|row| row.get(cell.x)) {
            Some(Tile::Free) => false,
            Some(Tile::Blocked) | None => true,
        }
    }

    pub fn set_blocked(&mut self, cell: Cell) {
        if let Some(tile) = self.tiles.get_mut(cell.y).and_then(|row| row.get_mut(cell.x)) {
            *tile = Tile::Blocked;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.tiles {
            row.fill(Tile::Free);
        }
    }

    /// The cell one `(dx, dy)` step away, or `None` if that leaves the grid.
    pub fn offset(&self, cell: Cell, dx: isize, dy: isize) -> Option<Cell> {
        let nx = cell.x as isize + dx;
        let ny = cell.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let next = Cell::new(nx as usize, ny as usize);
        self.in_bounds(next).then_some(next)
    }

    pub fn blocked_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| tile == Tile::Blocked)
            .count()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &tile)| (Cell::new(x, y), tile))
        })
    }
}
