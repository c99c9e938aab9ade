mod dfs;
mod random_walk;

pub use dfs::{Solution, solve, solve_maze};
pub use random_walk::{Move, RandomWalkSolver, VisitedSet, WalkConfig, WalkStatus};

use crate::maze::Position;

/// An ordered, append-only sequence of positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Position>);

impl Path {
    pub fn new() -> Self {
        Path(Vec::new())
    }

    pub fn push(&mut self, pos: Position) {
        self.0.push(pos);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    pub fn last(&self) -> Option<Position> {
        self.0.last().copied()
    }

    /// The same positions in the opposite order.
    pub fn reversed(&self) -> Path {
        Path(self.0.iter().rev().copied().collect())
    }
}

impl From<Vec<Position>> for Path {
    fn from(positions: Vec<Position>) -> Self {
        Path(positions)
    }
}

pub enum Solver {
    Dfs,
    RandomWalk,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::RandomWalk => write!(f, "Random Walk"),
        }
    }
}
