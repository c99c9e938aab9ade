use std::{fmt, time::Duration};

use chrono::{DateTime, Local};

/// Timestamp layout used in result files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one random-walk trial.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub run_number: usize,
    pub steps: usize,
    pub solved: bool,
    pub gave_up: bool,
    pub elapsed: Duration,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: u32,
    pub timestamp: DateTime<Local>,
}

impl RunResult {
    pub fn time_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// `<rows>x<cols>`
    pub fn maze_size(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    pub fn status_label(&self) -> &'static str {
        if self.solved { "Solved" } else { "Failed" }
    }

    /// The `key: value` lines written to a run's `results.txt`.
    pub fn to_record(&self) -> String {
        format!(
            "run_number: {}\nsteps: {}\nsolved: {}\ntime_seconds: {}\nmaze_size: {}\ncell_size: {}\ntimestamp: {}\n",
            self.run_number,
            self.steps,
            self.solved,
            self.time_seconds(),
            self.maze_size(),
            self.cell_size,
            self.timestamp.format(TIMESTAMP_FORMAT),
        )
    }
}

/// A trial that could not produce a result.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialError {
    pub run_number: usize,
    pub message: String,
}

/// Aggregate of a whole batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub num_runs: usize,
    pub results: Vec<RunResult>,
    pub errors: Vec<TrialError>,
}

impl Summary {
    pub fn new(num_runs: usize) -> Self {
        Summary {
            num_runs,
            ..Default::default()
        }
    }

    pub fn solved_count(&self) -> usize {
        self.results.iter().filter(|r| r.solved).count()
    }

    /// Trials that did not end in a solve, errored ones included.
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.solved).count() + self.errors.len()
    }

    /// Mean step count over the solved trials.
    pub fn mean_solved_steps(&self) -> Option<f64> {
        let solved = self.results.iter().filter(|r| r.solved).collect::<Vec<_>>();
        if solved.is_empty() {
            return None;
        }
        Some(solved.iter().map(|r| r.steps as f64).sum::<f64>() / solved.len() as f64)
    }

    /// Sort results and errors by run number, for batches that finish out of order.
    pub fn sort(&mut self) {
        self.results.sort_by_key(|r| r.run_number);
        self.errors.sort_by_key(|e| e.run_number);
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(40);
        let thin_rule = "-".repeat(40);
        writeln!(f, "Maze Solver Batch Test Summary")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "Total runs: {}", self.num_runs)?;
        writeln!(f, "Successful solves: {}", self.solved_count())?;
        writeln!(f, "Failures: {}", self.failed_count())?;
        writeln!(f)?;
        writeln!(f, "Run Details:")?;
        writeln!(f, "{}", thin_rule)?;
        for run in &self.results {
            writeln!(
                f,
                "Run {:3}: {:7} in {:5} steps, {:.2} sec",
                run.run_number,
                run.status_label(),
                run.steps,
                run.time_seconds()
            )?;
        }
        for error in &self.errors {
            writeln!(f, "Run {:3}: Error: {}", error.run_number, error.message)?;
        }
        Ok(())
    }
}
