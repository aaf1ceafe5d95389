//! Append-only JSON-lines log of session events.
//!
//! One object per line, tagged by `"type"`:
//!
//! ```text
//! {"ts_ms":1760000000000,"type":"session","seed":42}
//! {"ts_ms":1760000000412,"type":"lock","kind":"t","lines_cleared":1,...}
//! {"ts_ms":1760000093113,"type":"game_over","score":1200,"lines":9,"level":1}
//! ```
//!
//! A failed write disables the log for the rest of the run; the caller gets
//! the error once and gameplay continues.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::LockEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    Session {
        seed: u32,
    },
    Lock {
        kind: &'static str,
        lines_cleared: u32,
        line_clear_score: u32,
        score: u32,
        lines: u32,
        level: u32,
        topped_out: bool,
    },
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
    },
}

impl From<&LockEvent> for LogRecord {
    fn from(ev: &LockEvent) -> Self {
        LogRecord::Lock {
            kind: ev.kind.as_str(),
            lines_cleared: ev.lines_cleared,
            line_clear_score: ev.line_clear_score,
            score: ev.score,
            lines: ev.lines,
            level: ev.level,
            topped_out: ev.topped_out,
        }
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    ts_ms: u64,
    #[serde(flatten)]
    record: &'a LogRecord,
}

pub struct EventLog<W: Write = BufWriter<File>> {
    sink: Option<W>,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("event log: failed to open {}", path.display()))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            sink: None,
            buf: Vec::new(),
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            sink: Some(writer),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Append one record and flush.
    ///
    /// Returns the error from the write that disabled the log; later calls
    /// are no-ops.
    pub fn record(&mut self, record: &LogRecord) -> Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        self.buf.clear();
        let entry = Entry {
            ts_ms: now_ms(),
            record,
        };
        let written = serde_json::to_writer(&mut self.buf, &entry)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                self.buf.push(b'\n');
                sink.write_all(&self.buf)?;
                sink.flush()?;
                Ok(())
            });

        if let Err(e) = written {
            self.sink = None;
            return Err(e.context("event log: write failed, logging disabled"));
        }
        Ok(())
    }

    pub fn into_inner(self) -> Option<W> {
        self.sink
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
