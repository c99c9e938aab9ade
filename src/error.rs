use crate::maze::Position;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("position {pos:?} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    /// Generation needs a fully walled grid with no visited cells.
    #[error("grid is not fresh: {visited} visited cells, {open_passages} open passages")]
    GridNotFresh {
        visited: usize,
        open_passages: usize,
    },

    #[error("cells {a:?} and {b:?} are not adjacent")]
    NotAdjacent { a: Position, b: Position },

    /// The exact solver exhausted the maze without reaching the exit.
    /// A generated maze is a spanning tree, so this means the grid was corrupted.
    #[error("no path from {from:?} to {to:?}")]
    NoPath { from: Position, to: Position },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
