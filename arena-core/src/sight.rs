//! Line of sight along the facing direction.

use crate::geometry::{translate, Orientation, Position};
use crate::grid::{Cell, Grid};

/// Cells seen stepping forward from `origin`, nearest first. Stops after
/// `max_range` steps or on the first wall (the wall is included).
pub fn scan(grid: &Grid, origin: Position, orientation: Orientation, max_range: usize) -> Vec<Cell> {
    let dims = grid.dimensions();
    let delta = orientation.delta();
    let mut at = origin;
    let mut seen = Vec::with_capacity(max_range);
    for _ in 0..max_range {
        at = translate(dims, at, delta);
        let cell = grid.cell_at(at);
        seen.push(cell);
        if cell.blocks_sight() {
            break;
        }
    }
    seen
}

/// True when the sight line is zero or more empty/laser cells followed
/// immediately by the enemy.
pub fn enemy_in_crosshairs(sight: &[Cell]) -> bool {
    for cell in sight {
        match cell {
            Cell::Empty | Cell::Laser => continue,
            Cell::Enemy => return true,
            _ => return false,
        }
    }
    false
}

pub fn render(sight: &[Cell]) -> String {
    sight.iter().map(|cell| cell.symbol()).collect()
}
