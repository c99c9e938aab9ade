use super::cell::Wall;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise from the top, the order wall-respecting neighbors are visited in.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The wall a cell must lack to be left in this direction.
    pub fn wall(self) -> Wall {
        match self {
            Direction::Up => Wall::Top,
            Direction::Right => Wall::Right,
            Direction::Down => Wall::Bottom,
            Direction::Left => Wall::Left,
        }
    }

    /// Signed `(row, col)` offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Inverse of [`Direction::delta`]. Anything but a unit step is `None`.
    pub fn from_delta(delta_row: isize, delta_col: isize) -> Option<Direction> {
        match (delta_row, delta_col) {
            (-1, 0) => Some(Direction::Up),
            (0, 1) => Some(Direction::Right),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Map the step from one cell to an adjacent one onto the pair of walls that separate them.
///
/// `delta_row` and `delta_col` are `to - from`. Returns `(wall_on_current, wall_on_neighbor)`,
/// or `None` when the two cells are not orthogonally adjacent. Every wall removal and every
/// legality check goes through here so both sides of a wall are always treated together.
pub fn wall_pair(delta_row: isize, delta_col: isize) -> Option<(Wall, Wall)> {
    Direction::from_delta(delta_row, delta_col).map(|d| (d.wall(), d.opposite().wall()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_pair_directions() {
        assert_eq!(wall_pair(-1, 0), Some((Wall::Top, Wall::Bottom)));
        assert_eq!(wall_pair(1, 0), Some((Wall::Bottom, Wall::Top)));
        assert_eq!(wall_pair(0, -1), Some((Wall::Left, Wall::Right)));
        assert_eq!(wall_pair(0, 1), Some((Wall::Right, Wall::Left)));
    }

    #[test]
    fn test_wall_pair_rejects_non_unit_steps() {
        assert_eq!(wall_pair(0, 0), None);
        assert_eq!(wall_pair(1, 1), None);
        assert_eq!(wall_pair(-2, 0), None);
        assert_eq!(wall_pair(0, 3), None);
    }

    #[test]
    fn test_delta_roundtrip() {
        for d in Direction::CLOCKWISE {
            let (dr, dc) = d.delta();
            assert_eq!(Direction::from_delta(dr, dc), Some(d));
            assert_eq!(d.opposite().opposite(), d);
        }
    }
}
