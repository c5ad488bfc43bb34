//! Event Logger
//!
//! Append-only JSONL logging for the coordinator's diagnostic events, and
//! the pending queue hosts drain each frame.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use ai_events::AiEvent;

/// Writes AI events to a JSONL file, one event per line.
#[derive(Debug)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
}

impl EventLogger {
    /// Creates a new event logger writing to the specified path.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
        })
    }

    /// Creates a logger that discards events (for testing).
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
        }
    }

    /// Number of events logged so far.
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Logs an event to the file.
    pub fn log(&mut self, event: &AiEvent) -> std::io::Result<()> {
        self.event_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(event)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Logs every event in a batch.
    pub fn log_batch(&mut self, events: &[AiEvent]) -> std::io::Result<()> {
        for event in events {
            self.log(event)?;
        }
        Ok(())
    }

    /// Flushes the buffer to disk.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: failed to flush AI event logger: {}", e);
        }
    }
}

/// Pending diagnostic events awaiting the host.
///
/// Strictly one-way: the coordinator pushes, the host drains. Nothing in
/// the decision core reads events back.
#[derive(Debug, Default)]
pub struct AiEventQueue {
    events: Vec<AiEvent>,
}

impl AiEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AiEvent) {
        self.events.push(event);
    }

    /// Takes every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<AiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Read-only view of the pending events, in emission order.
    pub fn pending(&self) -> &[AiEvent] {
        &self.events
    }
}
