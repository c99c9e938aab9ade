use std::time::Instant;

use mazewalk::{
    generators::{generate, get_rng},
    maze::Grid,
    solvers::solve_maze,
};

/// Generate and exactly solve a large maze a number of times, for use under a profiler.
/// Usage: `profile [iterations] [size]`
fn main() -> mazewalk::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let size = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(500);

    let mut rng = get_rng(Some(0));
    let start = Instant::now();
    for _ in 0..num_iters {
        let mut grid = Grid::new(size, size)?;
        generate(&mut grid, &mut rng, (0, 0))?;
        let solution = solve_maze(&grid)?;
        std::hint::black_box(solution);
    }
    println!(
        "{} iterations of {}x{} in {:.2?}",
        num_iters,
        size,
        size,
        start.elapsed()
    );
    Ok(())
}
