//! Durable line-delimited JSON store.
//!
//! One event record per line, terminated by `\n`, in standard (not
//! canonical) JSON. The format is append-only: a crash mid-write leaves
//! either a complete line or a partial one, and partial lines are skipped
//! with a warning on the next load. An in-memory mirror of the file backs
//! the read operations; the file is reopened per append rather than holding
//! a long-lived handle.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use trailproof_chain::GENESIS_HASH;
use trailproof_contracts::{QueryFilters, QueryResult, TrailError, TrailResult, TrailEvent};

use crate::query::run_query;
use crate::traits::TrailStore;

struct JsonlState {
    events: Vec<TrailEvent>,
    corrupt_lines: Vec<usize>,
}

/// Persistent store writing one JSON object per line to a file.
///
/// The file is created with owner-only permissions (`0o600`) on first
/// append; the mode of a pre-existing file is preserved. Construction scans
/// any existing file to rebuild the mirror: lines that fail to parse into a
/// valid record are skipped, their zero-based indices recorded, and a
/// warning emitted naming the index and path.
pub struct JsonlStore {
    path: PathBuf,
    state: Mutex<JsonlState>,
}

impl JsonlStore {
    /// Open the store at `path`, scanning the file if it already exists.
    ///
    /// A missing file is fine — no I/O happens until the first `append`.
    /// An unreadable file is a store-kind error.
    pub fn open(path: impl Into<PathBuf>) -> TrailResult<Self> {
        let path = path.into();
        let mut events = Vec::new();
        let mut corrupt_lines = Vec::new();

        if path.exists() {
            let file = File::open(&path).map_err(|e| TrailError::Store {
                reason: format!("failed to read trail file '{}': {}", path.display(), e),
            })?;
            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|e| TrailError::Store {
                    reason: format!("failed to read trail file '{}': {}", path.display(), e),
                })?;
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match serde_json::from_str::<TrailEvent>(trimmed) {
                    Ok(event) => events.push(event),
                    Err(e) => {
                        corrupt_lines.push(index);
                        warn!(
                            line = index,
                            path = %path.display(),
                            error = %e,
                            "skipping corrupt trail line"
                        );
                    }
                }
            }
        }

        Ok(Self {
            path,
            state: Mutex::new(JsonlState { events, corrupt_lines }),
        })
    }

    /// Zero-based file line indices that were skipped during the load scan.
    pub fn corrupt_lines(&self) -> Vec<usize> {
        self.state
            .lock()
            .expect("trail state lock poisoned")
            .corrupt_lines
            .clone()
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = if self.path.exists() {
            OpenOptions::new().append(true).open(&self.path)?
        } else {
            let mut options = OpenOptions::new();
            options.write(true).create_new(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }
            options.open(&self.path)?
        };
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

impl TrailStore for JsonlStore {
    /// Append the record as one line plus `\n`, then mirror it into memory.
    ///
    /// The mirror is only updated after the write succeeds, so a failed
    /// append leaves the store's view unchanged.
    fn append(&self, event: TrailEvent) -> TrailResult<()> {
        let mut line = serde_json::to_string(&event).map_err(|e| TrailError::Store {
            reason: format!("failed to encode event '{}': {}", event.event_id, e),
        })?;
        line.push('\n');

        let mut state = self.state.lock().map_err(|e| TrailError::Store {
            reason: format!("trail state lock poisoned: {e}"),
        })?;
        self.write_line(&line).map_err(|e| TrailError::Store {
            reason: format!("failed to append to trail file '{}': {}", self.path.display(), e),
        })?;
        state.events.push(event);
        Ok(())
    }

    fn read_all(&self) -> Vec<TrailEvent> {
        self.state
            .lock()
            .expect("trail state lock poisoned")
            .events
            .clone()
    }

    fn query(&self, filters: &QueryFilters) -> QueryResult {
        let state = self.state.lock().expect("trail state lock poisoned");
        run_query(&state.events, filters)
    }

    fn last_hash(&self) -> String {
        let state = self.state.lock().expect("trail state lock poisoned");
        state
            .events
            .last()
            .map(|e| e.hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string())
    }

    fn count(&self) -> usize {
        self.state.lock().expect("trail state lock poisoned").events.len()
    }

    /// Every append writes and flushes its line before returning, so there
    /// is nothing buffered to surface here.
    fn flush(&self) -> TrailResult<()> {
        Ok(())
    }
}
