use rand::Rng;

use super::Path;
use crate::maze::{Grid, Position};

/// Chance of jumping back to a visited cell after bumping into a wall.
const TELEPORT_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Give up once this many steps have been taken.
    pub max_steps: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_steps: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Running,
    Solved,
    GaveUp,
}

/// What a single call to [`RandomWalkSolver::make_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Moved through an open wall.
    Stepped(Position),
    /// Hit a wall and jumped to a previously visited cell.
    Teleported(Position),
    /// Hit a wall and stayed put.
    Stayed,
    /// Standing on the exit.
    Solved,
    /// Ran out of steps.
    GaveUp,
    /// The walk had already ended; nothing happened.
    Finished,
}

/// Distinct positions with O(1) membership and uniform sampling.
///
/// Membership is a dense bitmap over the grid, the positions themselves live in a vector in
/// first-visit order. Sampling picks a vector index uniformly, so every distinct position is
/// equally likely regardless of when or how often it was visited.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    member: Vec<bool>,
    positions: Vec<Position>,
    cols: usize,
}

impl VisitedSet {
    pub fn new(rows: usize, cols: usize) -> Self {
        VisitedSet {
            member: vec![false; rows * cols],
            positions: Vec::new(),
            cols,
        }
    }

    fn ravel_index(&self, pos: Position) -> usize {
        pos.0 * self.cols + pos.1
    }

    /// Returns true if the position was not already present.
    pub fn insert(&mut self, pos: Position) -> bool {
        let idx = self.ravel_index(pos);
        if self.member[idx] {
            return false;
        }
        self.member[idx] = true;
        self.positions.push(pos);
        true
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.1 < self.cols
            && self
                .member
                .get(self.ravel_index(pos))
                .copied()
                .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        if self.positions.is_empty() {
            return None;
        }
        Some(self.positions[rng.random_range(0..self.positions.len())])
    }
}

/// A deliberately poor maze solver.
///
/// Each move picks a random adjacent cell without looking at walls, and only then checks
/// whether the wall is actually open. Blocked moves either leave the walker in place or,
/// with probability one half, teleport it to a random cell it has already stood on.
/// The walk starts at the top-left corner and ends at the bottom-right one, or after
/// `max_steps` moves.
pub struct RandomWalkSolver<'g, R> {
    grid: &'g Grid,
    rng: R,
    current_pos: Position,
    end_pos: Position,
    visited: VisitedSet,
    steps: usize,
    max_steps: usize,
    path: Path,
    status: WalkStatus,
    teleports: usize,
}

impl<'g, R: Rng> RandomWalkSolver<'g, R> {
    pub fn new(grid: &'g Grid, rng: R, config: WalkConfig) -> Self {
        RandomWalkSolver {
            grid,
            rng,
            current_pos: (0, 0),
            end_pos: grid.last(),
            visited: VisitedSet::new(grid.rows(), grid.cols()),
            steps: 0,
            max_steps: config.max_steps,
            path: Path::new(),
            status: WalkStatus::Running,
            teleports: 0,
        }
    }

    pub fn current_pos(&self) -> Position {
        self.current_pos
    }

    pub fn end_pos(&self) -> Position {
        self.end_pos
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn teleports(&self) -> usize {
        self.teleports
    }

    /// Every successful move through an open wall, in order.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn status(&self) -> WalkStatus {
        self.status
    }

    pub fn solved(&self) -> bool {
        self.status == WalkStatus::Solved
    }

    pub fn gave_up(&self) -> bool {
        self.status == WalkStatus::GaveUp
    }

    pub fn is_finished(&self) -> bool {
        self.status != WalkStatus::Running
    }

    /// Cells one step away, ignoring walls, in up, down, left, right order.
    fn possible_moves(&self, (row, col): Position) -> Vec<Position> {
        let mut moves = Vec::with_capacity(4);
        if row > 0 {
            moves.push((row - 1, col));
        }
        if row + 1 < self.grid.rows() {
            moves.push((row + 1, col));
        }
        if col > 0 {
            moves.push((row, col - 1));
        }
        if col + 1 < self.grid.cols() {
            moves.push((row, col + 1));
        }
        moves
    }

    pub fn make_move(&mut self) -> Move {
        if self.is_finished() {
            return Move::Finished;
        }

        self.steps += 1;
        if self.steps > self.max_steps {
            self.status = WalkStatus::GaveUp;
            tracing::debug!("[random walk] gave up after {} steps", self.max_steps);
            return Move::GaveUp;
        }

        self.visited.insert(self.current_pos);

        if self.current_pos == self.end_pos {
            self.status = WalkStatus::Solved;
            tracing::debug!("[random walk] reached the exit in {} steps", self.steps);
            return Move::Solved;
        }

        let moves = self.possible_moves(self.current_pos);
        if moves.is_empty() {
            return Move::Stayed;
        }
        let next = moves[self.rng.random_range(0..moves.len())];

        // Only now look at the walls
        if self.grid.is_open(self.current_pos, next) {
            self.current_pos = next;
            self.path.push(next);
            return Move::Stepped(next);
        }

        if self.rng.random_bool(TELEPORT_PROBABILITY) {
            if let Some(target) = self.visited.choose(&mut self.rng) {
                self.current_pos = target;
                self.teleports += 1;
                return Move::Teleported(target);
            }
        }
        Move::Stayed
    }

    /// Keep moving until the walk is solved or abandoned.
    pub fn run_to_end(&mut self) -> WalkStatus {
        while !self.is_finished() {
            self.make_move();
        }
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate;
    use rand::{SeedableRng, rngs::StdRng};

    fn maze(rows: usize, cols: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        generate(&mut grid, &mut StdRng::seed_from_u64(seed), (0, 0)).unwrap();
        grid
    }

    #[test]
    fn test_zero_max_steps_gives_up_immediately() {
        let grid = maze(5, 5, 1);
        let mut solver =
            RandomWalkSolver::new(&grid, StdRng::seed_from_u64(1), WalkConfig { max_steps: 0 });
        assert_eq!(solver.make_move(), Move::GaveUp);
        assert!(solver.gave_up());
        assert!(!solver.solved());
        assert_eq!(solver.steps(), 1);
        assert!(solver.visited().is_empty());
    }

    #[test]
    fn test_single_cell_solves_on_first_move() {
        let grid = maze(1, 1, 0);
        let mut solver = RandomWalkSolver::new(&grid, StdRng::seed_from_u64(0), WalkConfig::default());
        assert_eq!(solver.make_move(), Move::Solved);
        assert_eq!(solver.steps(), 1);
        assert!(solver.path().is_empty());
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        let grid = maze(30, 30, 2);
        let mut solver =
            RandomWalkSolver::new(&grid, StdRng::seed_from_u64(2), WalkConfig { max_steps: 50 });
        assert_eq!(solver.run_to_end(), WalkStatus::GaveUp);
        assert_eq!(solver.steps(), 51);
        let pos = solver.current_pos();
        for _ in 0..10 {
            assert_eq!(solver.make_move(), Move::Finished);
        }
        assert_eq!(solver.steps(), 51);
        assert_eq!(solver.current_pos(), pos);
        assert!(solver.gave_up() && !solver.solved());
    }

    #[test]
    fn test_steps_bounded_by_max_steps() {
        for seed in 0..10 {
            let grid = maze(12, 12, seed);
            let config = WalkConfig { max_steps: 300 };
            let mut solver = RandomWalkSolver::new(&grid, StdRng::seed_from_u64(seed), config);
            let status = solver.run_to_end();
            assert!(solver.steps() <= config.max_steps + 1);
            match status {
                WalkStatus::Solved => assert_eq!(solver.current_pos(), solver.end_pos()),
                WalkStatus::GaveUp => assert_eq!(solver.steps(), config.max_steps + 1),
                WalkStatus::Running => panic!("run_to_end returned while running"),
            }
        }
    }

    #[test]
    fn test_small_maze_gets_solved() {
        let grid = maze(3, 3, 4);
        let mut solver = RandomWalkSolver::new(&grid, StdRng::seed_from_u64(4), WalkConfig::default());
        assert_eq!(solver.run_to_end(), WalkStatus::Solved);
        assert_eq!(solver.current_pos(), (2, 2));
        assert!(solver.visited().contains((0, 0)));
        assert!(solver.visited().contains((2, 2)));
    }

    #[test]
    fn test_moves_respect_walls_and_teleports_stay_in_visited() {
        let grid = maze(15, 15, 8);
        let mut solver =
            RandomWalkSolver::new(&grid, StdRng::seed_from_u64(8), WalkConfig { max_steps: 20_000 });
        let mut seen = VisitedSet::new(grid.rows(), grid.cols());
        let mut teleports = 0;
        while !solver.is_finished() {
            let before = solver.current_pos();
            seen.insert(before);
            match solver.make_move() {
                Move::Stepped(next) => {
                    assert!(grid.is_open(before, next));
                    assert_eq!(solver.path().last(), Some(next));
                }
                Move::Teleported(target) => {
                    assert!(seen.contains(target), "teleported to unvisited {:?}", target);
                    teleports += 1;
                }
                Move::Stayed => assert_eq!(solver.current_pos(), before),
                Move::Solved | Move::GaveUp => {}
                Move::Finished => panic!("move after the walk ended"),
            }
        }
        assert_eq!(teleports, solver.teleports());
    }

    #[test]
    fn test_corridor_never_blocked() {
        let mut grid = Grid::new(1, 8).unwrap();
        for col in 1..8 {
            grid.remove_wall_between((0, col - 1), (0, col)).unwrap();
        }
        let mut solver = RandomWalkSolver::new(&grid, StdRng::seed_from_u64(6), WalkConfig::default());
        assert_eq!(solver.run_to_end(), WalkStatus::Solved);
        assert_eq!(solver.teleports(), 0);
        assert_eq!(solver.path().len(), solver.steps() - 1);
    }

    #[test]
    fn test_path_records_steps_in_order() {
        let grid = maze(8, 8, 12);
        let mut solver =
            RandomWalkSolver::new(&grid, StdRng::seed_from_u64(12), WalkConfig { max_steps: 5_000 });
        let mut stepped = Vec::new();
        while !solver.is_finished() {
            if let Move::Stepped(next) = solver.make_move() {
                stepped.push(next);
            }
        }
        assert_eq!(solver.path(), &Path::from(stepped));
    }

    #[test]
    fn test_visited_set_sampling_is_uniform_over_distinct_cells() {
        let mut set = VisitedSet::new(2, 2);
        assert!(set.insert((0, 0)));
        for _ in 0..50 {
            assert!(!set.insert((0, 0)));
        }
        assert!(set.insert((1, 1)));
        assert_eq!(set.len(), 2);
        assert!(!set.contains((0, 1)));
        assert!(!set.contains((5, 5)));

        let mut rng = StdRng::seed_from_u64(0);
        let hits = (0..10_000)
            .filter(|_| set.choose(&mut rng) == Some((1, 1)))
            .count();
        assert!((4_000..6_000).contains(&hits), "biased sampling: {}", hits);
        assert_eq!(VisitedSet::new(1, 1).choose(&mut rng), None);
    }
}
