use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mazewalk::{experiment::ExperimentConfig, solvers::WalkConfig};

#[derive(Debug, Parser)]
#[command(name = "mazewalk", version, about = "Perfect mazes, an exact solver and a terrible one")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run many random-walk trials and write per-run results plus a summary
    Batch(BatchArgs),
    /// Generate one maze and print it with the exact solution
    Solve(MazeArgs),
    /// Let the random walker loose on one maze
    Walk(WalkArgs),
}

/// Window presets: cell size in pixels and window width x height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizePreset {
    Small,
    Medium,
    Large,
    Huge,
}

impl SizePreset {
    pub fn cell_size(self) -> u32 {
        match self {
            SizePreset::Small => 40,
            SizePreset::Medium => 30,
            SizePreset::Large => 20,
            SizePreset::Huge => 15,
        }
    }

    /// `(width, height)` in pixels.
    pub fn window(self) -> (u32, u32) {
        match self {
            SizePreset::Small => (800, 800),
            SizePreset::Medium => (900, 900),
            SizePreset::Large => (1000, 1000),
            SizePreset::Huge => (1200, 1200),
        }
    }

    /// `(rows, cols)` of cells that fit the window.
    pub fn dimensions(self) -> (usize, usize) {
        let (width, height) = self.window();
        let cell = self.cell_size();
        ((height / cell) as usize, (width / cell) as usize)
    }
}

#[derive(Debug, Clone, Args)]
pub struct MazeArgs {
    /// Size preset, ignored when --rows and --cols are given
    #[arg(long, value_enum, default_value_t = SizePreset::Large)]
    pub size: SizePreset,

    #[arg(long, requires = "cols")]
    pub rows: Option<usize>,

    #[arg(long, requires = "rows")]
    pub cols: Option<usize>,

    /// Seed for reproducible mazes and walks
    #[arg(long)]
    pub seed: Option<u64>,
}

impl MazeArgs {
    pub fn dimensions(&self) -> (usize, usize) {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => (rows, cols),
            _ => self.size.dimensions(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub maze: MazeArgs,

    #[arg(long, default_value = "maze_solver_runs")]
    pub output_dir: PathBuf,

    /// Number of trials
    #[arg(long, default_value_t = 100)]
    pub runs: usize,

    #[arg(long, default_value_t = WalkConfig::default().max_steps)]
    pub max_steps: usize,

    /// Run trials on all cores (needs the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,
}

impl BatchArgs {
    pub fn experiment_config(&self) -> ExperimentConfig {
        let (rows, cols) = self.maze.dimensions();
        ExperimentConfig {
            rows,
            cols,
            cell_size: self.maze.size.cell_size(),
            max_steps: self.max_steps,
            num_runs: self.runs,
            seed: self.maze.seed,
            output_dir: self.output_dir.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct WalkArgs {
    #[command(flatten)]
    pub maze: MazeArgs,

    #[arg(long, default_value_t = WalkConfig::default().max_steps)]
    pub max_steps: usize,

    /// Print the maze with every cell the walker stepped through
    #[arg(long)]
    pub show: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_presets_match_window_sizes() {
        assert_eq!(SizePreset::Small.dimensions(), (20, 20));
        assert_eq!(SizePreset::Medium.dimensions(), (30, 30));
        assert_eq!(SizePreset::Large.dimensions(), (50, 50));
        assert_eq!(SizePreset::Huge.dimensions(), (80, 80));
    }

    #[test]
    fn test_batch_defaults() {
        let cli = Cli::try_parse_from(["mazewalk", "batch"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        let config = args.experiment_config();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_explicit_dimensions_override_preset() {
        let cli = Cli::try_parse_from([
            "mazewalk", "batch", "--size", "small", "--rows", "7", "--cols", "9", "--runs", "3",
            "--seed", "11",
        ])
        .unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        let config = args.experiment_config();
        assert_eq!((config.rows, config.cols), (7, 9));
        assert_eq!(config.cell_size, 40);
        assert_eq!(config.num_runs, 3);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_rows_requires_cols() {
        assert!(Cli::try_parse_from(["mazewalk", "solve", "--rows", "7"]).is_err());
    }
}
