use rand::Rng;

use crate::{
    error::{MazeError, Result},
    maze::{Grid, Position, get_neighbors},
};

/// Outcome of a single [`Carver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStep {
    /// A wall was knocked down and the carver moved into a fresh cell.
    Carved { from: Position, to: Position },
    /// Dead end; the carver retreated to an earlier cell.
    Backtracked { to: Position },
    /// Every cell has been reached. Further steps keep returning this.
    Done,
}

/// Randomized depth-first backtracker that carves one passage per step.
///
/// Walls are only ever removed toward unvisited cells, so the passages always form a
/// spanning tree of the grid once the carver reports [`CarveStep::Done`].
pub struct Carver<'g> {
    grid: &'g mut Grid,
    current: Position,
    stack: Vec<Position>,
    done: bool,
}

impl<'g> Carver<'g> {
    /// Fails with `GridNotFresh` unless `grid` is fully walled with no visited cells.
    pub fn new(grid: &'g mut Grid, start: Position) -> Result<Self> {
        grid.check_bounds(start)?;
        let visited = grid.visited_count();
        let open_passages = grid.open_passages();
        if visited > 0 || open_passages > 0 {
            return Err(MazeError::GridNotFresh {
                visited,
                open_passages,
            });
        }
        grid.mark_visited(start);
        Ok(Carver {
            grid,
            current: start,
            stack: Vec::new(),
            done: false,
        })
    }

    /// The cell the carver is standing on.
    pub fn current(&self) -> Position {
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<CarveStep> {
        if self.done {
            return Ok(CarveStep::Done);
        }

        let neighbors = get_neighbors(self.current, &*self.grid)
            .filter(|&pos| !self.grid[pos].visited())
            .collect::<Vec<_>>();

        if !neighbors.is_empty() {
            let next = neighbors[rng.random_range(0..neighbors.len())];
            let from = self.current;
            self.stack.push(from);
            self.grid.remove_wall_between(from, next)?;
            self.grid.mark_visited(next);
            self.current = next;
            Ok(CarveStep::Carved { from, to: next })
        } else if let Some(prev) = self.stack.pop() {
            self.current = prev;
            Ok(CarveStep::Backtracked { to: prev })
        } else {
            self.done = true;
            Ok(CarveStep::Done)
        }
    }
}

/// Carve a perfect maze into `grid` in one go, starting from `start`.
pub fn recursive_backtrack<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    start: Position,
) -> Result<()> {
    let mut carver = Carver::new(grid, start)?;
    let mut carved = 0usize;
    loop {
        match carver.step(rng)? {
            CarveStep::Carved { .. } => carved += 1,
            CarveStep::Backtracked { .. } => {}
            CarveStep::Done => break,
        }
    }
    tracing::debug!(
        "[generate] carved {} passages into a {}x{} grid",
        carved,
        grid.rows(),
        grid.cols()
    );
    Ok(())
}
