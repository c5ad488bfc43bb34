//! Working-Memory Model
//!
//! Per-entity long-term memory with confidence decay and reinforcement:
//! records, the per-observer store, the per-agent registry, and the tunable
//! retention policy.

pub mod decay;
pub mod manager;
pub mod record;
pub mod system;

pub use decay::{DecayConfig, DecaySweep, TierPolicy};
pub use manager::{lock_memory, MemoryManager, SharedMemorySystem};
pub use record::{
    EntityData, EventData, Importance, LocationData, MemoryData, MemoryKind, MemoryRecord,
    Relationship,
};
pub use system::{
    memory_constants, EntityObservation, EventOptions, LocationOptions, MemorySystem,
};
