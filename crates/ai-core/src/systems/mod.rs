//! Coordinator
//!
//! Ties agent entities to behavior trees and memory systems, and drives
//! per-frame ticking and per-turn decay.
//!
//! Ordering contract: the host schedules [`AiSystem::update`] before its
//! movement/actor resolution within a step, so a tick's decisions are
//! visible to movement that same step.

pub mod ai;

pub use ai::{AiSystem, BehaviorFactory};
