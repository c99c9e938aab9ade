use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::{CarveStep, Carver, recursive_backtrack};

use crate::{
    error::Result,
    maze::{Grid, Position},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carve a perfect maze into an existing grid, starting from `start`.
pub fn generate<R: rand::Rng + ?Sized>(grid: &mut Grid, rng: &mut R, start: Position) -> Result<()> {
    recursive_backtrack(grid, rng, start)
}

/// Build a `rows x cols` grid and carve a maze into it from the top-left corner.
pub fn generate_maze(rows: usize, cols: usize, seed: Option<u64>) -> Result<Grid> {
    let mut grid = Grid::new(rows, cols)?;
    let mut rng = get_rng(seed);
    generate(&mut grid, &mut rng, (0, 0))?;
    Ok(grid)
}
