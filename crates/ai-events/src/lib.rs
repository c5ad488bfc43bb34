//! Shared observability event types for the NPC decision core.
//!
//! This crate contains pure data structures with no AI logic. It is a
//! dependency for every other crate in the workspace and for host tooling
//! that consumes the JSONL event stream.

pub mod event;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use event::{AiEvent, AiEventKind, ParseEventError, TickStatus};
