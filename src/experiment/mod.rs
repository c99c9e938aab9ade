//! Batch experiments with the random-walk solver.
//!
//! Each trial owns a fresh maze, a fresh solver and its own random stream, and ends up as
//! a [`RunResult`]. A batch runs trials `1..=num_runs`, hands every result to a
//! [`ResultSink`] and finishes with a [`Summary`]. A trial that fails is logged and
//! recorded in the summary; the rest of the batch carries on.

mod record;
mod sink;

pub use record::{RunResult, Summary, TIMESTAMP_FORMAT, TrialError};
pub use sink::{FileSink, MemorySink, ResultSink};

use std::{path::PathBuf, time::Instant};

use chrono::Local;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::Result,
    generators::{generate, get_rng},
    maze::Grid,
    solvers::{RandomWalkSolver, WalkConfig},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pixel size of a cell; carried into the records only.
    pub cell_size: u32,
    pub max_steps: usize,
    pub num_runs: usize,
    /// Base seed. Each trial derives its own stream from it; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            cell_size: 20,
            max_steps: WalkConfig::default().max_steps,
            num_runs: 100,
            seed: None,
            output_dir: PathBuf::from("maze_solver_runs"),
        }
    }
}

impl ExperimentConfig {
    /// Seed for one trial, spread out so neighbouring run numbers get unrelated streams.
    fn trial_seed(&self, run_number: usize) -> Option<u64> {
        self.seed
            .map(|s| s ^ (run_number as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

pub struct ExperimentRunner<S> {
    config: ExperimentConfig,
    sink: S,
}

impl<S: ResultSink> ExperimentRunner<S> {
    pub fn new(config: ExperimentConfig, sink: S) -> Self {
        ExperimentRunner { config, sink }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Generate a maze, let a fresh random walker loose on it until it solves or gives up,
    /// and time the walk.
    pub fn run_single_test(&self, run_number: usize) -> Result<RunResult> {
        run_trial(&self.config, run_number)
    }

    /// Run every trial in order, recording each one, then record the summary.
    pub fn run_batch(&mut self) -> Result<Summary> {
        let num_runs = self.config.num_runs;
        let mut summary = Summary::new(num_runs);
        for run in 1..=num_runs {
            tracing::info!("[batch] Starting run {}/{}", run, num_runs);
            let outcome = self.run_single_test(run);
            self.collect(&mut summary, run, outcome);
        }
        self.finish(summary)
    }

    /// Run the trials on the rayon pool. Per-trial seeding makes the outcomes match
    /// [`ExperimentRunner::run_batch`]; only the timings differ.
    #[cfg(feature = "parallel")]
    pub fn run_batch_parallel(&mut self) -> Result<Summary> {
        use rayon::prelude::*;

        let num_runs = self.config.num_runs;
        tracing::info!("[batch] Starting {} runs in parallel", num_runs);
        let config = &self.config;
        let outcomes = (1..=num_runs)
            .into_par_iter()
            .map(|run| (run, run_trial(config, run)))
            .collect::<Vec<_>>();

        let mut summary = Summary::new(num_runs);
        for (run, outcome) in outcomes {
            self.collect(&mut summary, run, outcome);
        }
        self.finish(summary)
    }

    fn collect(&mut self, summary: &mut Summary, run: usize, outcome: Result<RunResult>) {
        let recorded = outcome.and_then(|result| {
            self.sink.record_run(&result)?;
            Ok(result)
        });
        match recorded {
            Ok(result) => {
                let status = if result.solved { "SOLVED" } else { "GAVE UP" };
                tracing::info!(
                    "[batch] Run {} complete: {} in {} steps",
                    run,
                    status,
                    result.steps
                );
                summary.results.push(result);
            }
            Err(e) => {
                tracing::warn!("[batch] Run {} failed: {}", run, e);
                summary.errors.push(TrialError {
                    run_number: run,
                    message: e.to_string(),
                });
            }
        }
    }

    fn finish(&mut self, mut summary: Summary) -> Result<Summary> {
        summary.sort();
        self.sink.record_summary(&summary)?;
        tracing::info!(
            "[batch] Finished {} runs: {} solved, {} failed",
            summary.num_runs,
            summary.solved_count(),
            summary.failed_count()
        );
        Ok(summary)
    }
}

fn run_trial(config: &ExperimentConfig, run_number: usize) -> Result<RunResult> {
    let mut rng: StdRng = match config.trial_seed(run_number) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => get_rng(None),
    };

    let mut grid = Grid::new(config.rows, config.cols)?;
    generate(&mut grid, &mut rng, (0, 0))?;

    let walk = WalkConfig {
        max_steps: config.max_steps,
    };
    let mut solver = RandomWalkSolver::new(&grid, rng, walk);

    let start = Instant::now();
    while !solver.solved() && !solver.gave_up() {
        solver.make_move();
    }
    let elapsed = start.elapsed();

    Ok(RunResult {
        run_number,
        steps: solver.steps(),
        solved: solver.solved(),
        gave_up: solver.gave_up(),
        elapsed,
        rows: grid.rows(),
        cols: grid.cols(),
        cell_size: config.cell_size,
        timestamp: Local::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn small_config(num_runs: usize) -> ExperimentConfig {
        ExperimentConfig {
            rows: 6,
            cols: 6,
            max_steps: 200_000,
            num_runs,
            seed: Some(1234),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_batch_parameters() {
        let config = ExperimentConfig::default();
        assert_eq!((config.rows, config.cols), (50, 50));
        assert_eq!(config.num_runs, 100);
        assert_eq!(config.max_steps, 1_000_000);
        assert_eq!(config.output_dir, PathBuf::from("maze_solver_runs"));
    }

    #[test]
    fn test_single_test_outcome() {
        let runner = ExperimentRunner::new(small_config(1), MemorySink::default());
        let result = runner.run_single_test(3).unwrap();
        assert_eq!(result.run_number, 3);
        assert_eq!(result.maze_size(), "6x6");
        assert_ne!(result.solved, result.gave_up);
        assert!(result.steps >= 1 && result.steps <= 200_001);
    }

    #[test]
    fn test_seeded_trials_are_reproducible() {
        let runner = ExperimentRunner::new(small_config(1), MemorySink::default());
        let a = runner.run_single_test(5).unwrap();
        let b = runner.run_single_test(5).unwrap();
        assert_eq!((a.steps, a.solved), (b.steps, b.solved));
    }

    #[test]
    fn test_gave_up_is_recorded_as_data() {
        let config = ExperimentConfig {
            max_steps: 0,
            ..small_config(3)
        };
        let mut runner = ExperimentRunner::new(config, MemorySink::default());
        let summary = runner.run_batch().unwrap();
        assert_eq!(summary.results.len(), 3);
        assert!(summary.results.iter().all(|r| r.gave_up && r.steps == 1));
        assert_eq!(summary.solved_count(), 0);
        assert_eq!(summary.failed_count(), 3);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn test_batch_records_every_run() {
        let mut runner = ExperimentRunner::new(small_config(4), MemorySink::default());
        let summary = runner.run_batch().unwrap();
        assert_eq!(summary.num_runs, 4);
        assert_eq!(summary.solved_count() + summary.failed_count(), 4);
        let numbers = summary.results.iter().map(|r| r.run_number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let sink = runner.into_sink();
        assert_eq!(sink.runs.len(), 4);
        assert_eq!(sink.summary, Some(summary));
    }

    #[test]
    fn test_invalid_dimensions_do_not_abort_batch() {
        let config = ExperimentConfig {
            rows: 0,
            ..small_config(3)
        };
        let mut runner = ExperimentRunner::new(config, MemorySink::default());
        let summary = runner.run_batch().unwrap();
        assert!(summary.results.is_empty());
        assert_eq!(summary.errors.len(), 3);
        assert_eq!(summary.failed_count(), 3);
        assert!(summary.errors[0].message.contains("invalid maze dimensions"));
    }

    /// Refuses to write run 2.
    #[derive(Default)]
    struct FlakySink {
        inner: MemorySink,
    }

    impl ResultSink for FlakySink {
        fn record_run(&mut self, result: &RunResult) -> io::Result<()> {
            if result.run_number == 2 {
                return Err(io::Error::other("disk full"));
            }
            self.inner.record_run(result)
        }

        fn record_summary(&mut self, summary: &Summary) -> io::Result<()> {
            self.inner.record_summary(summary)
        }
    }

    #[test]
    fn test_sink_failure_is_isolated_to_its_run() {
        let mut runner = ExperimentRunner::new(small_config(3), FlakySink::default());
        let summary = runner.run_batch().unwrap();
        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].run_number, 2);
        assert!(summary.errors[0].message.contains("disk full"));
    }

    #[test]
    fn test_batch_with_borrowed_file_sink() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = FileSink::create(tmp.path().join("runs")).unwrap();
        let mut runner = ExperimentRunner::new(small_config(2), &mut sink);
        runner.run_batch().unwrap();
        assert!(sink.run_dir(1).join(FileSink::RESULTS_FILE).is_file());
        assert!(sink.run_dir(2).join(FileSink::RESULTS_FILE).is_file());
        assert!(sink.base().join(FileSink::SUMMARY_FILE).is_file());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = ExperimentRunner::new(small_config(6), MemorySink::default());
        let mut parallel = ExperimentRunner::new(small_config(6), MemorySink::default());
        let a = sequential.run_batch().unwrap();
        let b = parallel.run_batch_parallel().unwrap();
        let key = |s: &Summary| {
            s.results
                .iter()
                .map(|r| (r.run_number, r.steps, r.solved))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&a), key(&b));
    }
}
