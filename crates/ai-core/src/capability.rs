//! Capability Surfaces
//!
//! Narrow traits through which the decision core consumes its collaborators:
//! movement execution, pathfinding, and entity/component reads. The host owns
//! the real implementations; the AI never touches world internals directly.
//!
//! Cross-entity reads made through these surfaces are by-value snapshots:
//! whatever an agent learns here is copied into its own blackboard or memory,
//! never held as a live reference.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::components::{AiControlled, Direction, Health, TilePosition};

/// Executes a single-step move for an entity.
///
/// Returns `true` when the step was taken, `false` when blocked. Failure is
/// ordinary (walls, occupied tiles) and surfaces as `Status::Failure` in the
/// acting node, never as an error.
pub trait MovementCapability {
    fn move_entity(&mut self, entity: Entity, direction: Direction) -> bool;
}

/// Plans a route between two tiles.
pub trait PathfindingCapability {
    /// Returns the sequence of tiles from just after `from` up to and
    /// including `to`, or `None` when unreachable.
    fn find_path(&self, from: TilePosition, to: TilePosition) -> Option<Vec<TilePosition>>;
}

/// Read-only access to the components the AI cares about.
pub trait ComponentAccess {
    fn is_ai_controlled(&self, entity: Entity) -> bool;
    fn position(&self, entity: Entity) -> Option<TilePosition>;
    fn health(&self, entity: Entity) -> Option<Health>;
}

impl ComponentAccess for World {
    fn is_ai_controlled(&self, entity: Entity) -> bool {
        self.get::<AiControlled>(entity).is_some()
    }

    fn position(&self, entity: Entity) -> Option<TilePosition> {
        self.get::<TilePosition>(entity).copied()
    }

    fn health(&self, entity: Entity) -> Option<Health> {
        self.get::<Health>(entity).copied()
    }
}

/// Movement that refuses every step (for testing and detached ticking).
#[derive(Debug, Default)]
pub struct NullMovement;

impl MovementCapability for NullMovement {
    fn move_entity(&mut self, _entity: Entity, _direction: Direction) -> bool {
        false
    }
}

/// Pathfinding that finds no routes (for testing and detached ticking).
#[derive(Debug, Default)]
pub struct NullPathfinding;

impl PathfindingCapability for NullPathfinding {
    fn find_path(&self, _from: TilePosition, _to: TilePosition) -> Option<Vec<TilePosition>> {
        None
    }
}
