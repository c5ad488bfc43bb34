//! Event Types
//!
//! Diagnostic events emitted by the AI coordinator, matching the
//! observability output schema. Events are one-way: consumers may log,
//! chart, or replay them, but nothing in the decision core reads them back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status carried by `ai:tick` events.
///
/// Mirrors the engine's tick status without pulling the engine crate into
/// the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickStatus {
    Success,
    Failure,
    Running,
}

/// Event payload, tagged with the wire-level event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum AiEventKind {
    /// An entity entered the AI coordinator's management.
    #[serde(rename = "ai:entityAdded")]
    EntityAdded,
    /// An entity left the AI coordinator's management.
    #[serde(rename = "ai:entityRemoved")]
    EntityRemoved,
    /// One behavior-tree tick completed for an entity.
    #[serde(rename = "ai:tick")]
    Tick { status: TickStatus },
}

impl AiEventKind {
    /// Returns the wire-level event name.
    pub fn name(&self) -> &'static str {
        match self {
            AiEventKind::EntityAdded => "ai:entityAdded",
            AiEventKind::EntityRemoved => "ai:entityRemoved",
            AiEventKind::Tick { .. } => "ai:tick",
        }
    }

    /// Returns all event names this schema can produce.
    pub fn all_names() -> &'static [&'static str] {
        &["ai:entityAdded", "ai:entityRemoved", "ai:tick"]
    }
}

/// A single diagnostic event from the AI coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiEvent {
    /// Unique identifier, `evt_` followed by a zero-padded counter
    pub event_id: String,
    /// Simulation turn at which the event was emitted
    pub turn: u64,
    /// Bit representation of the subject entity; the schema crate stays
    /// ECS-agnostic, hosts convert back with their entity type
    pub entity_bits: u64,
    /// Payload and wire name
    #[serde(flatten)]
    pub kind: AiEventKind,
}

impl AiEvent {
    pub fn new(event_id: impl Into<String>, turn: u64, entity_bits: u64, kind: AiEventKind) -> Self {
        Self {
            event_id: event_id.into(),
            turn,
            entity_bits,
            kind,
        }
    }

    /// Creates an `ai:entityAdded` event.
    pub fn entity_added(event_id: impl Into<String>, turn: u64, entity_bits: u64) -> Self {
        Self::new(event_id, turn, entity_bits, AiEventKind::EntityAdded)
    }

    /// Creates an `ai:entityRemoved` event.
    pub fn entity_removed(event_id: impl Into<String>, turn: u64, entity_bits: u64) -> Self {
        Self::new(event_id, turn, entity_bits, AiEventKind::EntityRemoved)
    }

    /// Creates an `ai:tick` event carrying the tick's resulting status.
    pub fn tick(
        event_id: impl Into<String>,
        turn: u64,
        entity_bits: u64,
        status: TickStatus,
    ) -> Self {
        Self::new(event_id, turn, entity_bits, AiEventKind::Tick { status })
    }

    /// Returns the wire-level event name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Serializes the event as a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, ParseEventError> {
        serde_json::to_string(self).map_err(ParseEventError::Json)
    }

    /// Parses an event from a JSONL line.
    pub fn from_jsonl(line: &str) -> Result<Self, ParseEventError> {
        serde_json::from_str(line).map_err(ParseEventError::Json)
    }
}

/// Error parsing or serializing an event line.
#[derive(Debug)]
pub enum ParseEventError {
    Json(serde_json::Error),
}

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEventError::Json(e) => write!(f, "invalid event JSON: {}", e),
        }
    }
}

impl std::error::Error for ParseEventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseEventError::Json(e) => Some(e),
        }
    }
}
