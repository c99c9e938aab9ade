use super::Path;
use crate::{
    error::{MazeError, Result},
    maze::{Grid, Position},
};

/// A path through the maze together with how much of the maze was searched to find it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Entrance first, exit last.
    pub path: Path,
    /// Number of distinct cells the search entered, including both endpoints.
    pub explored: usize,
}

/// Depth-first search with backtracking from `entrance` to `exit`, through open walls only.
///
/// Neighbors are tried in top, right, bottom, left order and the first branch that reaches
/// the exit wins, so the same maze always yields the same path. The recursion is unrolled
/// onto an explicit stack of `(cell, next neighbor index)` frames; when the exit is found
/// the frames on the stack are exactly the path.
pub fn solve(grid: &Grid, entrance: Position, exit: Position) -> Result<Solution> {
    grid.check_bounds(entrance)?;
    grid.check_bounds(exit)?;

    let ravel = |pos: Position| pos.0 * grid.cols() + pos.1;
    let mut visited = vec![false; grid.len()];
    visited[ravel(entrance)] = true;
    let mut explored = 1;

    if entrance == exit {
        return Ok(Solution {
            path: Path::from(vec![entrance]),
            explored,
        });
    }

    let mut stack: Vec<(Position, usize)> = vec![(entrance, 0)];
    while let Some(frame) = stack.last_mut() {
        let (pos, idx) = *frame;
        frame.1 += 1;

        match grid.open_neighbors(pos).nth(idx) {
            // Every neighbor tried, this branch is a dead end
            None => {
                stack.pop();
            }
            Some(next) if visited[ravel(next)] => {}
            Some(next) => {
                visited[ravel(next)] = true;
                explored += 1;
                if next == exit {
                    let path = stack
                        .iter()
                        .map(|&(p, _)| p)
                        .chain(std::iter::once(next))
                        .collect::<Vec<_>>();
                    tracing::debug!(
                        "[dfs] reached {:?} after exploring {} cells, path length {}",
                        exit,
                        explored,
                        path.len()
                    );
                    return Ok(Solution {
                        path: Path::from(path),
                        explored,
                    });
                }
                stack.push((next, 0));
            }
        }
    }

    Err(MazeError::NoPath {
        from: entrance,
        to: exit,
    })
}

/// Solve from the top-left corner to the bottom-right corner.
pub fn solve_maze(grid: &Grid) -> Result<Solution> {
    solve(grid, (0, 0), grid.last())
}
