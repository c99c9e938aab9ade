use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use super::record::{RunResult, Summary};

/// Where batch results end up.
pub trait ResultSink {
    fn record_run(&mut self, result: &RunResult) -> io::Result<()>;
    fn record_summary(&mut self, summary: &Summary) -> io::Result<()>;
}

/// Writes `run_NNN/results.txt` per trial and `summary.txt` under a base directory.
pub struct FileSink {
    base: PathBuf,
}

impl FileSink {
    pub const RESULTS_FILE: &'static str = "results.txt";
    pub const SUMMARY_FILE: &'static str = "summary.txt";

    /// Creates the base directory if it does not exist yet.
    pub fn create(base: impl Into<PathBuf>) -> io::Result<Self> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(FileSink { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn run_dir(&self, run_number: usize) -> PathBuf {
        self.base.join(format!("run_{:03}", run_number))
    }
}

impl ResultSink for FileSink {
    fn record_run(&mut self, result: &RunResult) -> io::Result<()> {
        let dir = self.run_dir(result.run_number);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(Self::RESULTS_FILE), result.to_record())
    }

    fn record_summary(&mut self, summary: &Summary) -> io::Result<()> {
        fs::write(self.base.join(Self::SUMMARY_FILE), summary.to_string())
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub runs: Vec<RunResult>,
    pub summary: Option<Summary>,
}

impl ResultSink for MemorySink {
    fn record_run(&mut self, result: &RunResult) -> io::Result<()> {
        self.runs.push(result.clone());
        Ok(())
    }

    fn record_summary(&mut self, summary: &Summary) -> io::Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn record_run(&mut self, result: &RunResult) -> io::Result<()> {
        (**self).record_run(result)
    }

    fn record_summary(&mut self, summary: &Summary) -> io::Result<()> {
        (**self).record_summary(summary)
    }
}
