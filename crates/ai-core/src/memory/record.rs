//! Memory Records
//!
//! Durable facts an agent remembers about entities, locations, and events.
//! Records are plain serde data so an external save subsystem can persist
//! them untouched.

use bevy_ecs::entity::Entity;
use serde::{Deserialize, Serialize};

use crate::components::TilePosition;

/// Ordinal importance tier protecting a memory from early forgetting.
///
/// Ordering follows declaration: `Trivial < Normal < High < Critical`.
/// Importance rises only through explicit reinforcement and falls only
/// through decay.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Trivial,
    #[default]
    Normal,
    High,
    Critical,
}

impl Importance {
    /// One tier up, capped at `Critical`.
    pub fn escalate(self) -> Self {
        match self {
            Importance::Trivial => Importance::Normal,
            Importance::Normal => Importance::High,
            Importance::High => Importance::Critical,
            Importance::Critical => Importance::Critical,
        }
    }

    /// One tier down, floored at `Trivial`.
    pub fn demote(self) -> Self {
        match self {
            Importance::Critical => Importance::High,
            Importance::High => Importance::Normal,
            Importance::Normal => Importance::Trivial,
            Importance::Trivial => Importance::Trivial,
        }
    }
}

/// How the observer regards a remembered entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Hostile,
    Neutral,
    Friendly,
}

/// What an observer knows about another entity.
///
/// The `last_known_*` fields are by-value snapshots captured at observation
/// time, never live references into the other entity's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityData {
    pub target: Entity,
    pub relationship: Relationship,
    pub last_known_position: Option<TilePosition>,
    pub last_known_health: Option<f32>,
    /// False once the observer loses line of sight; the snapshot fields
    /// above are retained
    pub is_visible: bool,
}

/// A remembered place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub x: i32,
    pub y: i32,
    pub description: String,
    pub tags: Vec<String>,
}

/// A remembered happening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub event_type: String,
    pub description: String,
    pub participants: Vec<Entity>,
    pub outcome: String,
}

/// Record payload, one variant per memory kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryData {
    Entity(EntityData),
    Location(LocationData),
    Event(EventData),
}

/// Discriminant of [`MemoryData`], for filtering without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    Entity,
    Location,
    Event,
}

impl MemoryData {
    pub fn kind(&self) -> MemoryKind {
        match self {
            MemoryData::Entity(_) => MemoryKind::Entity,
            MemoryData::Location(_) => MemoryKind::Location,
            MemoryData::Event(_) => MemoryKind::Event,
        }
    }
}

/// A single durable memory held by one observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique within one observer, `mem_` followed by a zero-padded counter
    pub id: String,
    pub data: MemoryData,
    pub created_turn: u64,
    /// Refreshed by every remember/reinforce touching this record; decay
    /// ages are measured from here
    pub last_access_turn: u64,
    /// Belief strength in [0, 1], clamped at every mutation
    pub confidence: f32,
    pub importance: Importance,
}

impl MemoryRecord {
    pub fn new(id: impl Into<String>, data: MemoryData, turn: u64, importance: Importance) -> Self {
        Self {
            id: id.into(),
            data,
            created_turn: turn,
            last_access_turn: turn,
            confidence: 1.0,
            importance,
        }
    }

    pub fn kind(&self) -> MemoryKind {
        self.data.kind()
    }

    /// Turns since this record was last accessed.
    pub fn age(&self, current_turn: u64) -> u64 {
        current_turn.saturating_sub(self.last_access_turn)
    }

    /// Marks the record as accessed this turn.
    pub fn touch(&mut self, turn: u64) {
        self.last_access_turn = turn;
    }

    /// Sets confidence, clamped to [0, 1].
    pub fn set_confidence(&mut self, confidence: f32) {
        self.confidence = confidence.clamp(0.0, 1.0);
    }

    /// The entity payload, when this is an entity memory.
    pub fn as_entity(&self) -> Option<&EntityData> {
        match &self.data {
            MemoryData::Entity(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&LocationData> {
        match &self.data {
            MemoryData::Location(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&EventData> {
        match &self.data {
            MemoryData::Event(data) => Some(data),
            _ => None,
        }
    }
}
