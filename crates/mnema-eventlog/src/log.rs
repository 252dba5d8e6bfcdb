// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only JSONL event log.
//!
//! Each named log is one `{dir}/{name}.jsonl` file holding one JSON
//! object per line. Appends are flushed before returning, so a record
//! that was acknowledged survives a crash.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use mnema_core::MnemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// One logged event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub timestamp: DateTime<Utc>,
}

/// Lower bound on event timestamps during replay.
#[derive(Debug, Clone, Copy)]
pub enum Since {
    /// Events from the last N hours, fractional hours allowed.
    Hours(f64),
    /// Events at or after an absolute instant.
    At(DateTime<Utc>),
}

impl Since {
    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Since::Hours(hours) => {
                let millis = (hours * 3_600_000.0) as i64;
                now - Duration::milliseconds(millis)
            }
            Since::At(instant) => *instant,
        }
    }
}

/// Narrows a replay to matching events.
#[derive(Debug, Clone, Default)]
pub struct ReplayFilter {
    pub kind: Option<String>,
    pub since: Option<Since>,
    /// Keep only the most recent N events after the other filters.
    pub max: Option<usize>,
}

/// One named JSONL log under a data directory.
pub struct EventLog {
    path: PathBuf,
    dir: PathBuf,
}

impl EventLog {
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(format!("{name}.jsonl"));
        Self { path, dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event, stamped now. The directory is created on demand
    /// and the line is flushed before returning.
    pub async fn append(&self, kind: &str, data: Value) -> Result<(), MnemaError> {
        let record = EventRecord {
            kind: kind.to_string(),
            data,
            timestamp: Utc::now(),
        };
        self.append_record(&record).await
    }

    pub async fn append_record(&self, record: &EventRecord) -> Result<(), MnemaError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| MnemaError::StorageWrite { source: Box::new(e) })?;

        let mut line = serde_json::to_string(record)
            .map_err(|e| MnemaError::StorageWrite { source: Box::new(e) })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| MnemaError::StorageWrite { source: Box::new(e) })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| MnemaError::StorageWrite { source: Box::new(e) })?;
        file.flush()
            .await
            .map_err(|e| MnemaError::StorageWrite { source: Box::new(e) })?;
        Ok(())
    }

    /// Read back events in append order, newest last. A log that was never
    /// written replays as empty.
    pub async fn replay(&self, filter: &ReplayFilter) -> Result<Vec<EventRecord>, MnemaError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MnemaError::StorageRead {
                    message: format!("failed to read event log {}: {e}", self.path.display()),
                });
            }
        };

        let now = Utc::now();
        let cutoff = filter.since.as_ref().map(|s| s.cutoff(now));

        let mut events = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: EventRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = lineno + 1,
                        reason = %e,
                        "skipping malformed event log line"
                    );
                    continue;
                }
            };
            if let Some(kind) = &filter.kind
                && &record.kind != kind
            {
                continue;
            }
            if let Some(cutoff) = cutoff
                && record.timestamp < cutoff
            {
                continue;
            }
            events.push(record);
        }

        if let Some(max) = filter.max
            && events.len() > max
        {
            events.drain(..events.len() - max);
        }
        Ok(events)
    }
}
