pub mod cell;
pub mod direction;
mod grid;
mod render;

pub use cell::{Cell, Wall};
pub use direction::{Direction, wall_pair};
pub use grid::Grid;

/// A `(row, col)` coordinate in a [`Grid`].
pub type Position = (usize, usize);

/// Get neighbors of a cell, ignoring walls.
/// A neighbor is a cell one step away in the cardinal directions, yielded in
/// up, right, down, left order. Out-of-bounds positions yield nothing.
pub fn get_neighbors(pos: Position, grid: &Grid) -> impl Iterator<Item = Position> + '_ {
    Direction::CLOCKWISE
        .into_iter()
        .filter_map(move |d| grid.step(pos, d))
}
