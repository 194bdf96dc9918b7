use super::format::{write_blocks, DateLine};
use crate::error::Result;
use crate::logic::date_cursor;
use crate::models::SimulationOutcome;
use chrono::NaiveDate;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only simulation log on disk.
///
/// Scanning and appending are two separate steps; only one process may
/// write at a time.
#[derive(Debug, Clone)]
pub struct SimulationLog {
    path: PathBuf,
}

impl SimulationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn next_start_date(&self, today: NaiveDate) -> NaiveDate {
        date_cursor::next_start_date(&self.path, today)
    }

    /// Append the outcome's date blocks. Creates the parent directory if
    /// needed; existing content is never touched.
    pub fn append(&self, outcome: &SimulationOutcome) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_blocks(&mut writer, outcome, DateLine::Inline)?;
        writer.flush()?;

        tracing::info!(
            path = %self.path.display(),
            start = %outcome.start_date,
            days = outcome.day_count,
            plants = outcome.plants.len(),
            "Appended simulation to log"
        );
        Ok(())
    }
}
