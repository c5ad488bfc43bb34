//! Behavior Tree
//!
//! Binds one root node and one blackboard to one entity, and drives ticking.

use bevy_ecs::entity::Entity;

use crate::behavior::blackboard::Blackboard;
use crate::behavior::node::{FrameContext, Node, Status, TickContext};

/// One entity's decision tree.
///
/// The tree exclusively owns its root and its [`Blackboard`]; neither is
/// shared between entities. Abandoning a RUNNING subtree happens by
/// [`set_root`](BehaviorTree::set_root), by removing the entity from the
/// coordinator, or by the recursive [`reset`](BehaviorTree::reset).
pub struct BehaviorTree {
    entity: Entity,
    root: Box<dyn Node>,
    blackboard: Blackboard,
}

impl BehaviorTree {
    pub fn new(entity: Entity, root: Box<dyn Node>) -> Self {
        Self {
            entity,
            root,
            blackboard: Blackboard::new(),
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The owned blackboard, for external seeding (memory handle, patrol
    /// routes) before ticking starts.
    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    /// Replaces the root node. No resume state is carried over; the old
    /// subtree is dropped mid-flight.
    pub fn set_root(&mut self, root: Box<dyn Node>) {
        self.root = root;
    }

    /// Recursively rewinds the whole tree to its starting state. The
    /// blackboard is left untouched.
    pub fn reset(&mut self) {
        self.root.reset();
    }

    /// Merges the caller-supplied frame with the bound entity and owned
    /// blackboard, then ticks the root.
    pub fn tick(&mut self, frame: &mut FrameContext<'_>) -> Status {
        let mut ctx = TickContext {
            entity: self.entity,
            delta_ms: frame.delta_ms,
            blackboard: &mut self.blackboard,
            movement: &mut *frame.movement,
            pathfinding: frame.pathfinding,
            components: frame.components,
        };
        self.root.tick(&mut ctx)
    }
}
