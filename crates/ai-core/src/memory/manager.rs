//! Memory Manager
//!
//! Registry owning exactly one [`MemorySystem`] per agent entity, created
//! lazily and destroyed explicitly. Fans out turn advances and decay sweeps
//! to every owned system.

use bevy_ecs::entity::Entity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::memory::decay::{DecayConfig, DecaySweep};
use crate::memory::system::MemorySystem;

/// Shared handle to one entity's memory system.
///
/// The manager and the entity's blackboard hold the same `Arc`; the mutex
/// satisfies the `Send + Sync` bounds on tree nodes, not any real
/// parallelism — ticking is single-threaded throughout.
pub type SharedMemorySystem = Arc<Mutex<MemorySystem>>;

/// Locks a shared memory system, recovering the guard even if a panic
/// elsewhere poisoned the lock.
pub fn lock_memory(system: &SharedMemorySystem) -> MutexGuard<'_, MemorySystem> {
    system.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the `Entity -> MemorySystem` mapping for every managed agent.
#[derive(Debug, Default)]
pub struct MemoryManager {
    systems: HashMap<Entity, SharedMemorySystem>,
    global_turn: u64,
    decay: DecayConfig,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(decay: DecayConfig) -> Self {
        Self {
            decay,
            ..Self::default()
        }
    }

    pub fn decay_config(&self) -> &DecayConfig {
        &self.decay
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// The one memory system for this entity, created on first request.
    /// Repeated calls return handles to the identical instance.
    pub fn system(&mut self, entity: Entity) -> SharedMemorySystem {
        let global_turn = self.global_turn;
        let system = self.systems.entry(entity).or_insert_with(|| {
            let mut fresh = MemorySystem::new(entity);
            fresh.set_turn(global_turn);
            Arc::new(Mutex::new(fresh))
        });
        Arc::clone(system)
    }

    /// The entity's memory system, if one has been created.
    pub fn get(&self, entity: Entity) -> Option<SharedMemorySystem> {
        self.systems.get(&entity).map(Arc::clone)
    }

    pub fn has_system(&self, entity: Entity) -> bool {
        self.systems.contains_key(&entity)
    }

    /// Drops the entity's memory system. Returns `false` when none existed.
    pub fn remove_system(&mut self, entity: Entity) -> bool {
        self.systems.remove(&entity).is_some()
    }

    /// Advances the global turn counter and syncs every owned system.
    pub fn set_global_turn(&mut self, turn: u64) {
        self.global_turn = turn;
        for system in self.systems.values() {
            lock_memory(system).set_turn(turn);
        }
    }

    pub fn global_turn(&self) -> u64 {
        self.global_turn
    }

    /// Runs one decay sweep over every owned system, returning the merged
    /// summary.
    pub fn process_all_decay(&mut self) -> DecaySweep {
        let mut total = DecaySweep::default();
        for system in self.systems.values() {
            total.merge(lock_memory(system).process_decay(&self.decay));
        }
        total
    }

    /// Drops every owned system.
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}
