mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use crossterm::style::Stylize;
use mazewalk::{
    experiment::{ExperimentRunner, FileSink, ResultSink, Summary},
    generators::{generate, get_rng},
    logging,
    maze::Grid,
    solvers::{self, RandomWalkSolver, Solver, WalkConfig, WalkStatus},
};

use crate::cli::{BatchArgs, Cli, Command, MazeArgs, WalkArgs};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_dir = match &cli.command {
        Command::Batch(args) => Some(args.output_dir.as_path()),
        _ => None,
    };
    let _guard = logging::init(log_dir, cli.verbose).context("failed to set up logging")?;

    match cli.command {
        Command::Batch(args) => run_batch(&args),
        Command::Solve(args) => run_solve(&args),
        Command::Walk(args) => run_walk(&args),
    }
}

fn build_maze(args: &MazeArgs, rng: &mut impl rand::Rng) -> anyhow::Result<Grid> {
    let (rows, cols) = args.dimensions();
    let mut grid = Grid::new(rows, cols)?;
    generate(&mut grid, rng, (0, 0))?;
    tracing::info!("Generated a {}x{} maze ({} cells)", rows, cols, rows * cols);
    Ok(grid)
}

fn run_batch(args: &BatchArgs) -> anyhow::Result<()> {
    let config = args.experiment_config();
    let sink = FileSink::create(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let mut runner = ExperimentRunner::new(config, sink);

    let summary = if args.parallel {
        run_parallel(&mut runner)?
    } else {
        runner.run_batch()?
    };

    println!(
        "{} of {} runs solved, {} failed. Results saved in '{}'.",
        summary.solved_count().to_string().green(),
        summary.num_runs,
        summary.failed_count().to_string().red(),
        runner.config().output_dir.display()
    );
    if let Some(mean) = summary.mean_solved_steps() {
        println!("Mean steps over solved runs: {:.1}", mean);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn run_parallel<S: ResultSink>(runner: &mut ExperimentRunner<S>) -> anyhow::Result<Summary> {
    Ok(runner.run_batch_parallel()?)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel<S: ResultSink>(_runner: &mut ExperimentRunner<S>) -> anyhow::Result<Summary> {
    bail!("--parallel requires mazewalk to be built with the `parallel` feature")
}

fn run_solve(args: &MazeArgs) -> anyhow::Result<()> {
    let mut rng = get_rng(args.seed);
    let grid = build_maze(args, &mut rng)?;

    println!("Solving with {}", Solver::Dfs);
    let solution = solvers::solve_maze(&grid).context("generated maze has no solution")?;
    print!("{}", grid.render_with_path(solution.path.as_slice(), true));
    println!(
        "Path length {} after exploring {} of {} cells.",
        solution.path.len(),
        solution.explored,
        grid.len()
    );
    Ok(())
}

fn run_walk(args: &WalkArgs) -> anyhow::Result<()> {
    if args.max_steps == 0 {
        tracing::warn!("max steps is 0, the walker will give up immediately");
    }
    let mut rng = get_rng(args.maze.seed);
    let grid = build_maze(&args.maze, &mut rng)?;

    println!("Solving with {}", Solver::RandomWalk);
    let config = WalkConfig {
        max_steps: args.max_steps,
    };
    let mut solver = RandomWalkSolver::new(&grid, rng, config);
    let status = solver.run_to_end();

    if args.show {
        print!("{}", grid.render_with_path(solver.path().as_slice(), true));
    }
    let outcome = match status {
        WalkStatus::Solved => "Solved!".green(),
        WalkStatus::GaveUp => "Gave up :(".red(),
        WalkStatus::Running => bail!("walker stopped before finishing"),
    };
    println!(
        "{} {} of at most {} steps, {} teleports, {} of {} cells visited.",
        outcome,
        solver.steps(),
        solver.max_steps(),
        solver.teleports(),
        solver.visited().len(),
        grid.len()
    );
    Ok(())
}
