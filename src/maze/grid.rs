use super::{
    Position,
    cell::{Cell, Wall},
    direction::{Direction, wall_pair},
};
use crate::error::{MazeError, Result};

/// A rectangular block of cells stored row-major.
///
/// The topology never changes after construction. Only the generation-time `visited`
/// flags and the walls mutate, and walls only through [`Grid::remove_wall_between`].
#[derive(Debug, Clone)]
pub struct Grid {
    data: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Creates a fully walled grid with every cell unvisited.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let data = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Grid { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bottom-right corner, the conventional exit.
    pub fn last(&self) -> Position {
        (self.rows - 1, self.cols - 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.data.iter()
    }

    fn ravel_index(&self, pos: Position) -> usize {
        pos.0 * self.cols + pos.1
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    pub fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Marks a cell as reached by the generator. `pos` must be in bounds.
    pub(crate) fn mark_visited(&mut self, pos: Position) {
        let idx = self.ravel_index(pos);
        self.data[idx].visited = true;
    }

    pub fn all_visited(&self) -> bool {
        self.data.iter().all(Cell::visited)
    }

    /// Number of cells the generator has reached.
    pub fn visited_count(&self) -> usize {
        self.data.iter().filter(|c| c.visited()).count()
    }

    fn walls_between(&self, a: Position, b: Position) -> Option<(Wall, Wall)> {
        if !self.in_bounds(a) || !self.in_bounds(b) {
            return None;
        }
        wall_pair(b.0 as isize - a.0 as isize, b.1 as isize - a.1 as isize)
    }

    /// Knocks down the wall shared by two adjacent cells, on both sides.
    pub fn remove_wall_between(&mut self, a: Position, b: Position) -> Result<()> {
        let (wall_a, wall_b) = self
            .walls_between(a, b)
            .ok_or(MazeError::NotAdjacent { a, b })?;
        let (ia, ib) = (self.ravel_index(a), self.ravel_index(b));
        self.data[ia].clear_wall(wall_a);
        self.data[ib].clear_wall(wall_b);
        Ok(())
    }

    /// True if `a` and `b` are adjacent and neither side of their shared wall is standing.
    pub fn is_open(&self, a: Position, b: Position) -> bool {
        match self.walls_between(a, b) {
            Some((wall_a, wall_b)) => !self[a].has_wall(wall_a) && !self[b].has_wall(wall_b),
            None => false,
        }
    }

    /// Neighbors reachable through an open wall, in top, right, bottom, left order.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::CLOCKWISE
            .into_iter()
            .filter_map(move |d| self.step(pos, d))
            .filter(move |&n| self.is_open(pos, n))
    }

    /// The in-bounds cell one step away in direction `d`.
    pub fn step(&self, pos: Position, d: Direction) -> Option<Position> {
        // wrapping_sub turns 0 - 1 into usize::MAX, which the bounds check rejects
        let next = match d {
            Direction::Up => (pos.0.wrapping_sub(1), pos.1),
            Direction::Right => (pos.0, pos.1.saturating_add(1)),
            Direction::Down => (pos.0.saturating_add(1), pos.1),
            Direction::Left => (pos.0, pos.1.wrapping_sub(1)),
        };
        (self.in_bounds(pos) && self.in_bounds(next)).then_some(next)
    }

    /// Number of adjacent cell pairs with the wall between them removed.
    pub fn open_passages(&self) -> usize {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|pos| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter_map(|d| self.step(pos, d))
                    .filter(|&n| self.is_open(pos, n))
                    .count()
            })
            .sum()
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}
