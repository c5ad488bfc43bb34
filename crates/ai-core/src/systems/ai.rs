//! AI Coordinator
//!
//! Owns the named behavior registry, the entity-to-tree bindings, and the
//! per-agent memory registry. Explicitly constructed, no global state:
//! dropping the coordinator (or calling [`AiSystem::clear`]) tears the whole
//! AI layer down together.

use bevy_ecs::entity::Entity;
use std::collections::HashMap;
use tracing::{debug, trace};

use ai_events::AiEvent;

use crate::behavior::{BehaviorTree, FrameContext, Status};
use crate::capability::ComponentAccess;
use crate::config::AiConfig;
use crate::events::AiEventQueue;
use crate::memory::{DecaySweep, MemoryManager};

/// Builds a fresh behavior tree for an entity.
pub type BehaviorFactory = Box<dyn Fn(Entity) -> BehaviorTree + Send + Sync>;

/// The coordinator: one per host world.
pub struct AiSystem {
    behaviors: HashMap<String, BehaviorFactory>,
    trees: HashMap<Entity, BehaviorTree>,
    memory: MemoryManager,
    events: AiEventQueue,
    next_event_id: u64,
}

impl Default for AiSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl AiSystem {
    pub fn new() -> Self {
        Self::with_config(AiConfig::default())
    }

    pub fn with_config(config: AiConfig) -> Self {
        Self {
            behaviors: HashMap::new(),
            trees: HashMap::new(),
            memory: MemoryManager::with_config(config.decay),
            events: AiEventQueue::new(),
            next_event_id: 1,
        }
    }

    /// Registers a named behavior factory, replacing any previous factory
    /// under that name.
    pub fn register_behavior(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(Entity) -> BehaviorTree + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("registered behavior '{}'", name);
        self.behaviors.insert(name, Box::new(factory));
    }

    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    /// Builds a tree from a registered factory without attaching it.
    pub fn build_behavior(&self, name: &str, entity: Entity) -> Option<BehaviorTree> {
        self.behaviors.get(name).map(|factory| factory(entity))
    }

    /// Builds and attaches the named behavior to an entity.
    ///
    /// Returns `false` when the name is unregistered or the entity lacks the
    /// AI marker; neither case is an error. An already-attached tree is
    /// replaced, discarding its resume state.
    pub fn assign_behavior(
        &mut self,
        components: &dyn ComponentAccess,
        entity: Entity,
        name: &str,
    ) -> bool {
        if !components.is_ai_controlled(entity) {
            debug!("refusing behavior '{}' for non-AI entity {:?}", name, entity);
            return false;
        }
        let Some(factory) = self.behaviors.get(name) else {
            debug!("unknown behavior '{}' requested for {:?}", name, entity);
            return false;
        };

        let mut tree = factory(entity);
        if let Some(system) = self.memory.get(entity) {
            tree.blackboard_mut().set_memory(system);
        }
        self.trees.insert(entity, tree);
        debug!("assigned behavior '{}' to {:?}", name, entity);
        true
    }

    pub fn has_tree(&self, entity: Entity) -> bool {
        self.trees.contains_key(&entity)
    }

    pub fn tree(&self, entity: Entity) -> Option<&BehaviorTree> {
        self.trees.get(&entity)
    }

    pub fn tree_mut(&mut self, entity: Entity) -> Option<&mut BehaviorTree> {
        self.trees.get_mut(&entity)
    }

    /// Called when an agent entity enters the world.
    ///
    /// Lazily creates the entity's memory system, injects its handle into an
    /// already-attached tree's blackboard, and emits `ai:entityAdded`.
    pub fn on_entity_added(&mut self, entity: Entity) {
        let system = self.memory.system(entity);
        if let Some(tree) = self.trees.get_mut(&entity) {
            tree.blackboard_mut().set_memory(system);
        }
        debug!("entity {:?} added to AI coordinator", entity);
        let event_id = self.next_event_id();
        self.events.push(AiEvent::entity_added(
            event_id,
            self.memory.global_turn(),
            entity.to_bits(),
        ));
    }

    /// Called when an agent entity leaves the world.
    ///
    /// Detaches its tree, releases its memory system, and emits
    /// `ai:entityRemoved`.
    pub fn on_entity_removed(&mut self, entity: Entity) {
        self.trees.remove(&entity);
        self.memory.remove_system(entity);
        debug!("entity {:?} removed from AI coordinator", entity);
        let event_id = self.next_event_id();
        self.events.push(AiEvent::entity_removed(
            event_id,
            self.memory.global_turn(),
            entity.to_bits(),
        ));
    }

    /// Ticks every entity with an attached tree, in the caller-supplied
    /// order, emitting an `ai:tick` event per tick.
    ///
    /// The emitted status is diagnostic only and never feeds back into
    /// control flow.
    pub fn update(&mut self, entities: &[Entity], frame: &mut FrameContext<'_>) {
        let turn = self.memory.global_turn();
        for &entity in entities {
            let Some(tree) = self.trees.get_mut(&entity) else {
                continue;
            };
            let status = tree.tick(frame);
            trace!("ticked {:?}: {:?}", entity, status);
            let event_id = self.next_event_id();
            self.events
                .push(AiEvent::tick(event_id, turn, entity.to_bits(), status.into()));
        }
    }

    /// Ticks a single entity's tree, if attached.
    pub fn tick_entity(&mut self, entity: Entity, frame: &mut FrameContext<'_>) -> Option<Status> {
        let tree = self.trees.get_mut(&entity)?;
        let status = tree.tick(frame);
        let event_id = self.next_event_id();
        self.events.push(AiEvent::tick(
            event_id,
            self.memory.global_turn(),
            entity.to_bits(),
            status.into(),
        ));
        Some(status)
    }

    /// Advances the discrete world turn, fanning out to every memory
    /// system. Decoupled from per-frame ticking.
    pub fn set_global_turn(&mut self, turn: u64) {
        self.memory.set_global_turn(turn);
    }

    pub fn global_turn(&self) -> u64 {
        self.memory.global_turn()
    }

    /// Runs one decay sweep across all memory systems. Invoked once per
    /// discrete world turn, never per frame.
    pub fn process_memory_decay(&mut self) -> DecaySweep {
        let sweep = self.memory.process_all_decay();
        debug!(
            "memory decay sweep at turn {}: {} removed, {} demoted",
            self.memory.global_turn(),
            sweep.removed,
            sweep.demoted
        );
        sweep
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryManager {
        &mut self.memory
    }

    /// Takes all pending diagnostic events, in emission order.
    pub fn drain_events(&mut self) -> Vec<AiEvent> {
        self.events.drain()
    }

    /// Read-only view of pending events.
    pub fn pending_events(&self) -> &[AiEvent] {
        self.events.pending()
    }

    /// Tears down the registry, every tree, and every memory system
    /// together.
    pub fn clear(&mut self) {
        self.behaviors.clear();
        self.trees.clear();
        self.memory.clear();
    }

    fn next_event_id(&mut self) -> String {
        let id = format!("evt_{:08}", self.next_event_id);
        self.next_event_id += 1;
        id
    }
}
