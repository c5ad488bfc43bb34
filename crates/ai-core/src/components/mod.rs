//! ECS Components
//!
//! Components the host world attaches to AI-controlled entities.

pub mod agent;
pub mod world;

pub use agent::{AiControlled, Health};
pub use world::{Direction, TilePosition};
