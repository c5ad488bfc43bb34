//! Sample data fixtures for testing.
//!
//! This module provides ready-made event streams for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // ai-events = { path = "../ai-events", features = ["test-fixtures"] }
//!
//! use ai_events::fixtures;
//!
//! let events = fixtures::sample_events();
//! ```

use crate::{AiEvent, TickStatus};

/// Returns a small, representative event stream.
///
/// Contains 8 events for two entities: lifecycle bookends plus a few ticks
/// covering every status, in emission order.
pub fn sample_events() -> Vec<AiEvent> {
    vec![
        AiEvent::entity_added("evt_00000001", 0, 1),
        AiEvent::entity_added("evt_00000002", 0, 2),
        AiEvent::tick("evt_00000003", 1, 1, TickStatus::Running),
        AiEvent::tick("evt_00000004", 1, 2, TickStatus::Success),
        AiEvent::tick("evt_00000005", 2, 1, TickStatus::Success),
        AiEvent::tick("evt_00000006", 2, 2, TickStatus::Failure),
        AiEvent::entity_removed("evt_00000007", 3, 2),
        AiEvent::tick("evt_00000008", 3, 1, TickStatus::Running),
    ]
}

/// Returns the sample stream serialized as JSONL, one event per line.
pub fn sample_events_jsonl() -> String {
    sample_events()
        .iter()
        .map(|e| e.to_jsonl().expect("fixture events always serialize"))
        .collect::<Vec<_>>()
        .join("\n")
}
