//! NPC decision core: behavior trees, blackboards, and working memory.
//!
//! The crate is the single-threaded "mind" of AI-controlled entities in a
//! tile-based simulation. A host world supplies entities and the capability
//! surfaces in [`capability`]; the [`systems::AiSystem`] coordinator binds
//! behavior trees and memory systems to those entities, ticks them each
//! frame, and ages memories each discrete world turn.

pub mod behavior;
pub mod capability;
pub mod components;
pub mod config;
pub mod events;
pub mod memory;
pub mod systems;

pub use behavior::{
    keys, Action, BehaviorTree, Blackboard, BlackboardValue, Condition, Failer, FrameContext,
    Inverter, Node, Parallel, ParallelPolicy, Repeater, Selector, Sequence, Status, Succeeder,
    TickContext, UntilFail, Wait,
};
pub use capability::{
    ComponentAccess, MovementCapability, NullMovement, NullPathfinding, PathfindingCapability,
};
pub use components::{AiControlled, Direction, Health, TilePosition};
pub use config::{AiConfig, ConfigError};
pub use events::{AiEventQueue, EventLogger};
pub use memory::{
    lock_memory, DecayConfig, DecaySweep, EntityObservation, EventOptions, Importance,
    LocationOptions, MemoryManager, MemoryRecord, MemorySystem, Relationship, SharedMemorySystem,
    TierPolicy,
};
pub use systems::{AiSystem, BehaviorFactory};
