//! Event Plumbing
//!
//! In-memory queue the coordinator emits into and the host drains, plus an
//! optional append-only JSONL sink.

pub mod logger;

pub use logger::{AiEventQueue, EventLogger};
