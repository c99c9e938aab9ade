use std::{collections::HashSet, fmt};

use crossterm::style::{Color, Stylize};

use super::{Grid, Position, cell::Wall};

/// What to draw inside a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    Empty,
    Start,
    Goal,
    Route,
}

impl Mark {
    fn write(self, f: &mut impl fmt::Write, colored: bool) -> fmt::Result {
        let (symbol, color) = match self {
            Mark::Empty => (" ", Color::Reset),
            Mark::Start => ("S", Color::Green),
            Mark::Goal => ("G", Color::Red),
            Mark::Route => ("*", Color::Yellow),
        };
        if colored && self != Mark::Empty {
            write!(f, " {} ", symbol.with(color))
        } else {
            write!(f, " {} ", symbol)
        }
    }
}

impl Grid {
    /// ASCII drawing of the maze with `path` overlaid. Start and goal are the
    /// top-left and bottom-right corners. `colored` adds terminal color codes.
    pub fn render_with_path(&self, path: &[Position], colored: bool) -> String {
        Overlay {
            grid: self,
            path,
            colored,
        }
        .to_string()
    }

    fn write_maze(&self, f: &mut impl fmt::Write, path: &[Position], colored: bool) -> fmt::Result {
        let route = path.iter().copied().collect::<HashSet<_>>();
        let mark = |pos: Position| {
            if pos == (0, 0) {
                Mark::Start
            } else if pos == self.last() {
                Mark::Goal
            } else if route.contains(&pos) {
                Mark::Route
            } else {
                Mark::Empty
            }
        };

        for col in 0..self.cols() {
            let top = if self[(0, col)].has_wall(Wall::Top) { "---" } else { "   " };
            write!(f, "+{}", top)?;
        }
        writeln!(f, "+")?;

        for row in 0..self.rows() {
            let left = if self[(row, 0)].has_wall(Wall::Left) { "|" } else { " " };
            write!(f, "{}", left)?;
            for col in 0..self.cols() {
                mark((row, col)).write(f, colored)?;
                let right = if self[(row, col)].has_wall(Wall::Right) { "|" } else { " " };
                write!(f, "{}", right)?;
            }
            writeln!(f)?;

            for col in 0..self.cols() {
                let bottom = if self[(row, col)].has_wall(Wall::Bottom) { "---" } else { "   " };
                write!(f, "+{}", bottom)?;
            }
            writeln!(f, "+")?;
        }
        Ok(())
    }
}

/// A grid drawn with a route on top.
struct Overlay<'a> {
    grid: &'a Grid,
    path: &'a [Position],
    colored: bool,
}

impl fmt::Display for Overlay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.write_maze(f, self.path, self.colored)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_maze(f, &[], false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_closed_grid() {
        let grid = Grid::new(1, 2).unwrap();
        let expected = "+---+---+\n| S | G |\n+---+---+\n";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn test_render_open_passage_and_route() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.remove_wall_between((0, 0), (0, 1)).unwrap();
        grid.remove_wall_between((0, 1), (0, 2)).unwrap();
        let drawn = grid.render_with_path(&[(0, 0), (0, 1), (0, 2)], false);
        assert_eq!(drawn, "+---+---+---+\n| S   *   G |\n+---+---+---+\n");
    }

    #[test]
    fn test_overlay_matches_display_and_colors_marks() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.render_with_path(&[], false), grid.to_string());
        let colored = grid.render_with_path(&[(0, 1)], true);
        assert!(colored.contains(&format!("{}", "S".with(Color::Green))));
        assert!(colored.contains(&format!("{}", "*".with(Color::Yellow))));
        assert!(colored.contains(&format!("{}", "G".with(Color::Red))));
    }
}
