// core/action_log.rs

// Append-only record of what the robot did: moves, recharges, shutdowns.
// Recording is best-effort; a sink that fails to write reports the problem
// through the diagnostic log and never disturbs navigation.

// Dependencies
use log::{info, warn};
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Result;

/// Destination for action records
#[cfg_attr(test, mockall::automock)]
pub trait ActionLog {
    /// Appends one timestamped message
    fn record(&mut self, timestamp: SystemTime, message: &str);
}

/// Formats a timestamp as `<unix seconds>.<millis>`
pub fn format_timestamp(timestamp: SystemTime) -> String {
    match timestamp.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => format!("{}.{:03}", elapsed.as_secs(), elapsed.subsec_millis()),
        Err(_) => "0.000".to_string(),
    }
}

/// Appends records to a text file, one line each: `<timestamp> - <message>`.
/// The file is closed when the sink is dropped.
pub struct FileActionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    failed: bool,
}

impl FileActionLog {
    /// Opens (or creates) `path` in append mode
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!("Recording actions to {}", path.display());
        Ok(FileActionLog {
            path,
            writer: BufWriter::new(file),
            failed: false,
        })
    }

    /// File being written
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActionLog for FileActionLog {
    fn record(&mut self, timestamp: SystemTime, message: &str) {
        let written = writeln!(self.writer, "{} - {}", format_timestamp(timestamp), message)
            .and_then(|_| self.writer.flush());
        if let Err(e) = written {
            // warn once, later failures are silent
            if !self.failed {
                warn!("Failed to write action log {}: {}", self.path.display(), e);
                self.failed = true;
            }
        }
    }
}

impl Drop for FileActionLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// One in-memory record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRecord {
    /// When it was recorded
    pub timestamp: SystemTime,
    /// What happened
    pub message: String,
}

/// In-memory sink. Clones share the same buffer, so a handle kept by the
/// caller sees everything recorded through the clone given to the navigator.
#[derive(Clone, Debug, Default)]
pub struct MemoryActionLog {
    records: Rc<RefCell<Vec<ActionRecord>>>,
}

impl MemoryActionLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record so far
    pub fn records(&self) -> Vec<ActionRecord> {
        self.records.borrow().clone()
    }

    /// Just the messages
    pub fn messages(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl ActionLog for MemoryActionLog {
    fn record(&mut self, timestamp: SystemTime, message: &str) {
        self.records.borrow_mut().push(ActionRecord {
            timestamp,
            message: message.to_string(),
        });
    }
}

/// Discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullActionLog;

impl ActionLog for NullActionLog {
    fn record(&mut self, _timestamp: SystemTime, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("clean_sweep_{}_{}.log", name, std::process::id()))
    }

    #[test]
    fn timestamp_has_millis() {
        let at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_042);
        assert_eq!(format_timestamp(at), "1700000000.042");
    }

    #[test]
    fn file_log_appends_lines() {
        let path = scratch_path("append");
        let _ = fs::remove_file(&path);

        {
            let mut log = FileActionLog::open(&path).unwrap();
            log.record(UNIX_EPOCH + Duration::from_secs(5), "Moved to (1, 0)");
        }
        {
            let mut log = FileActionLog::open(&path).unwrap();
            log.record(UNIX_EPOCH + Duration::from_secs(6), "Shutdown: power exhausted");
        }

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "5.000 - Moved to (1, 0)",
                "6.000 - Shutdown: power exhausted"
            ]
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let path = std::env::temp_dir()
            .join("clean_sweep_missing_dir_for_test")
            .join("actions.log");
        assert!(FileActionLog::open(path).is_err());
    }

    #[test]
    fn memory_log_clones_share_records() {
        let log = MemoryActionLog::new();
        let mut sink = log.clone();
        sink.record(SystemTime::now(), "Recharged at (2, 2)");

        assert_eq!(log.len(), 1);
        assert_eq!(log.messages(), vec!["Recharged at (2, 2)".to_string()]);
    }
}
