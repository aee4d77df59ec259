//! JSON-lines event log.
//!
//! One JSON object per line: an `event` record for every [`GameEvent`] and a
//! `summary` record whenever a game ends. The log is best effort: the first
//! write failure is reported on stderr and disables it.

use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{EventSink, GameEvent, GameState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub seq: u64,
    pub ts_ms: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}

/// Final numbers of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

impl From<&GameState> for GameSummary {
    fn from(state: &GameState) -> Self {
        Self {
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRecord {
    #[serde(rename = "type")]
    kind: &'static str,
    seq: u64,
    ts_ms: u64,
    #[serde(flatten)]
    summary: GameSummary,
}

impl EventRecord {
    fn new(seq: u64, ts_ms: u64, event: GameEvent) -> Self {
        let (lines, distance) = match event {
            GameEvent::LinesCleared(n) => (Some(n), None),
            GameEvent::TetrisCleared => (Some(4), None),
            GameEvent::HardDropped { distance } => (None, Some(distance)),
            GameEvent::RotateSucceeded | GameEvent::Held | GameEvent::GameOver => (None, None),
        };
        Self {
            kind: "event",
            seq,
            ts_ms,
            event: event.as_str(),
            lines,
            distance,
        }
    }
}

pub struct EventLog<W: Write = LineWriter<File>> {
    out: Option<W>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path))?;
        Ok(Self::new(LineWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// False once a write has failed.
    pub fn is_active(&self) -> bool {
        self.out.is_some()
    }

    /// Records written so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn write_summary(&mut self, summary: GameSummary) {
        let record = SummaryRecord {
            kind: "summary",
            seq: self.seq,
            ts_ms: now_ms(),
            summary,
        };
        self.write_record(&record);
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }

    fn write_record<T: Serialize>(&mut self, record: &T) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        match out.write_all(&self.buf) {
            Ok(()) => self.seq += 1,
            Err(e) => self.disable(e),
        }
    }

    fn disable(&mut self, err: io::Error) {
        eprintln!("[blockfall] event log disabled: {}", err);
        self.out = None;
    }
}

impl<W: Write> EventSink for EventLog<W> {
    fn notify(&mut self, event: GameEvent) {
        let record = EventRecord::new(self.seq, now_ms(), event);
        self.write_record(&record);
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
