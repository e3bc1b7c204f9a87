use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

/// One line of the session event log.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord<'a> {
    /// When the event was recorded (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Short kind label, e.g. `click` or `dismiss`.
    pub kind: &'a str,
    pub payload: Value,
}

impl<'a> EventRecord<'a> {
    pub fn now(kind: &'a str, payload: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            payload,
        }
    }
}

/// Newline-delimited JSON writer for session events.
pub struct JsonlSink {
    out: BufWriter<File>,
}

impl JsonlSink {
    /// Create a sink at `path`, creating parent directories if needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create event log {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
