//! Calculation history.
//!
//! Keeps the most recent `capacity` records in memory and mirrors them to a
//! JSON file (an array of strings) after every insertion. Storage faults
//! are logged and never interrupt a calculation.

use chrono::Local;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name used when no other location is configured.
pub const HISTORY_FILE_NAME: &str = ".calculator_history.json";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history file is not a JSON list of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default history location: `~/.calculator_history.json`, or
/// `calc_history.json` in the working directory when there is no home.
pub fn default_history_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(HISTORY_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from("calc_history.json"))
}

/// Bounded, timestamped history of calculations.
#[derive(Debug)]
pub struct History {
    records: VecDeque<String>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl History {
    /// Create a history backed by `path`, loading up to `capacity` of the
    /// most recent stored records. Unreadable or malformed files yield an
    /// empty history.
    pub fn new(capacity: usize, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match load_records(&path, capacity) {
            Ok(records) => {
                info!(count = records.len(), path = %path.display(), "loaded history");
                records
            }
            Err(e) => {
                warn!(path = %path.display(), "could not load history: {}", e);
                VecDeque::new()
            }
        };

        Self {
            records,
            capacity,
            path: Some(path),
        }
    }

    /// Create a history that is never persisted.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            path: None,
        }
    }

    /// Timestamp `text`, append it, and rewrite the history file.
    pub fn add_record(&mut self, text: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.push(format!("[{}] {}", timestamp, text));

        if let Err(e) = self.save() {
            warn!("could not save history: {}", e);
        }
    }

    /// The last `count` records (all when `None`), oldest first.
    pub fn get_recent_history(&self, count: Option<usize>) -> Vec<String> {
        let count = count.unwrap_or(self.records.len());
        let skip = self.records.len().saturating_sub(count);
        self.records.iter().skip(skip).cloned().collect()
    }

    /// Records containing `term`, ignoring case, oldest first.
    pub fn search(&self, term: &str) -> Vec<String> {
        let term = term.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.to_lowercase().contains(&term))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn push(&mut self, record: String) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    fn save(&self) -> Result<(), HistoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, json)?;
        debug!(count = self.records.len(), path = %path.display(), "saved history");
        Ok(())
    }
}

fn load_records(path: &Path, capacity: usize) -> Result<VecDeque<String>, HistoryError> {
    if !path.exists() {
        return Ok(VecDeque::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(VecDeque::new());
    }

    let stored: Vec<String> = serde_json::from_str(&content)?;
    let skip = stored.len().saturating_sub(capacity);
    Ok(stored.into_iter().skip(skip).collect())
}
