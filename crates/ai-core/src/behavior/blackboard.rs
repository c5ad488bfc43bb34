//! Blackboard
//!
//! Per-entity key/value scratch space used for inter-node communication
//! within one tick cycle or across ticks. Each blackboard is exclusively
//! owned by one behavior tree and never aliased across entities.

use bevy_ecs::entity::Entity;
use std::collections::HashMap;
use std::sync::Arc;

use crate::components::TilePosition;
use crate::memory::SharedMemorySystem;

/// Well-known blackboard keys.
///
/// Keys are free-form strings; these constants cover the contract between
/// the coordinator and the stock nodes.
pub mod keys {
    /// Handle to the owning entity's memory system, injected by the
    /// coordinator when the entity is added
    pub const MEMORY: &str = "memory";
    /// Tile the current movement behavior is heading toward
    pub const MOVE_TARGET: &str = "move_target";
    /// Route planned by the pathfinding capability
    pub const CURRENT_PATH: &str = "current_path";
    /// Entity currently treated as the primary threat
    pub const THREAT: &str = "threat";
}

/// A value stored on the blackboard.
///
/// The kind set is closed: nodes communicate through this fixed, documented
/// contract rather than arbitrary dynamic typing.
#[derive(Debug, Clone)]
pub enum BlackboardValue {
    Position(TilePosition),
    EntityRef(Entity),
    Number(f64),
    Bool(bool),
    /// A planned route, ordered first-step-first
    Path(Vec<TilePosition>),
    /// An unordered collection of tiles (patrol points, known exits)
    Positions(Vec<TilePosition>),
    /// Shared handle to the owning entity's memory system
    Memory(SharedMemorySystem),
}

impl PartialEq for BlackboardValue {
    fn eq(&self, other: &Self) -> bool {
        use BlackboardValue::*;
        match (self, other) {
            (Position(a), Position(b)) => a == b,
            (EntityRef(a), EntityRef(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Path(a), Path(b)) => a == b,
            (Positions(a), Positions(b)) => a == b,
            // Handles are equal when they point at the same system.
            (Memory(a), Memory(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<TilePosition> for BlackboardValue {
    fn from(value: TilePosition) -> Self {
        BlackboardValue::Position(value)
    }
}

impl From<Entity> for BlackboardValue {
    fn from(value: Entity) -> Self {
        BlackboardValue::EntityRef(value)
    }
}

impl From<f64> for BlackboardValue {
    fn from(value: f64) -> Self {
        BlackboardValue::Number(value)
    }
}

impl From<bool> for BlackboardValue {
    fn from(value: bool) -> Self {
        BlackboardValue::Bool(value)
    }
}

/// Per-entity transient scratch store.
///
/// Missing keys are a normal, checkable state: every read returns `Option`
/// or a caller-supplied default, and nothing here ever errors.
#[derive(Debug, Default)]
pub struct Blackboard {
    values: HashMap<String, BlackboardValue>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any previous value under the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<BlackboardValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&BlackboardValue> {
        self.values.get(key)
    }

    /// Returns the stored value, or `default` when the key is absent.
    pub fn get_or(&self, key: &str, default: BlackboardValue) -> BlackboardValue {
        self.values.get(key).cloned().unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes a key. Returns `false` when the key was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when the key is present and its value equals `expected`.
    pub fn is_condition_met(&self, key: &str, expected: &BlackboardValue) -> bool {
        self.values.get(key).map(|v| v == expected).unwrap_or(false)
    }

    /// Typed read of a [`BlackboardValue::Position`].
    pub fn position(&self, key: &str) -> Option<TilePosition> {
        match self.values.get(key) {
            Some(BlackboardValue::Position(p)) => Some(*p),
            _ => None,
        }
    }

    /// Typed read of a [`BlackboardValue::EntityRef`].
    pub fn entity_ref(&self, key: &str) -> Option<Entity> {
        match self.values.get(key) {
            Some(BlackboardValue::EntityRef(e)) => Some(*e),
            _ => None,
        }
    }

    /// Typed read of a [`BlackboardValue::Number`].
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(BlackboardValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Typed read of a [`BlackboardValue::Bool`].
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(BlackboardValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Typed read of a [`BlackboardValue::Path`].
    pub fn path(&self, key: &str) -> Option<&[TilePosition]> {
        match self.values.get(key) {
            Some(BlackboardValue::Path(p)) => Some(p.as_slice()),
            _ => None,
        }
    }

    /// Typed read of a [`BlackboardValue::Positions`].
    pub fn positions(&self, key: &str) -> Option<&[TilePosition]> {
        match self.values.get(key) {
            Some(BlackboardValue::Positions(p)) => Some(p.as_slice()),
            _ => None,
        }
    }

    /// The memory handle under [`keys::MEMORY`], if the coordinator has
    /// injected one.
    pub fn memory(&self) -> Option<SharedMemorySystem> {
        match self.values.get(keys::MEMORY) {
            Some(BlackboardValue::Memory(m)) => Some(Arc::clone(m)),
            _ => None,
        }
    }

    /// Stores the memory handle under [`keys::MEMORY`].
    pub fn set_memory(&mut self, memory: SharedMemorySystem) {
        self.values
            .insert(keys::MEMORY.to_string(), BlackboardValue::Memory(memory));
    }
}
