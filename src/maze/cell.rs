/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Top,
    Right,
    Bottom,
    Left,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Right, Wall::Bottom, Wall::Left];

    fn index(self) -> usize {
        match self {
            Wall::Top => 0,
            Wall::Right => 1,
            Wall::Bottom => 2,
            Wall::Left => 3,
        }
    }
}

/// A single maze cell.
///
/// Walls can only be knocked down through [`Grid::remove_wall_between`](super::Grid::remove_wall_between),
/// which keeps both sides of a shared wall in agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    pub(super) visited: bool,
    walls: [bool; 4],
}

impl Cell {
    pub(super) fn new(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            visited: false,
            walls: [true; 4],
        }
    }

    pub fn pos(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Generation-time visited flag. Solvers keep their own bookkeeping.
    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn has_wall(&self, wall: Wall) -> bool {
        self.walls[wall.index()]
    }

    /// Number of walls still standing around this cell.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    pub(super) fn clear_wall(&mut self, wall: Wall) {
        self.walls[wall.index()] = false;
    }
}
