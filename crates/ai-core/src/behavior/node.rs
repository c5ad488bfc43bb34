//! Node Contract
//!
//! The tick contract every behavior-tree node implements, and the context
//! threaded through an evaluation.

use bevy_ecs::entity::Entity;

use crate::behavior::blackboard::Blackboard;
use crate::capability::{ComponentAccess, MovementCapability, PathfindingCapability};

/// Result of ticking a node.
///
/// `Running` is the only suspension mechanism in the engine: a node that
/// returns it must keep whatever state it needs to resume on the next call,
/// because the caller holds no continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    Running,
}

impl Status {
    /// True for `Success` and `Failure`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

impl From<Status> for ai_events::TickStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ai_events::TickStatus::Success,
            Status::Failure => ai_events::TickStatus::Failure,
            Status::Running => ai_events::TickStatus::Running,
        }
    }
}

/// The caller-supplied half of a tick: frame timing plus the capability
/// surfaces the host wires up each frame.
///
/// [`BehaviorTree::tick`](crate::behavior::BehaviorTree::tick) merges this
/// with the bound entity and the tree-owned blackboard into a [`TickContext`].
pub struct FrameContext<'a> {
    /// Milliseconds elapsed since the previous frame
    pub delta_ms: f32,
    pub movement: &'a mut dyn MovementCapability,
    pub pathfinding: &'a dyn PathfindingCapability,
    pub components: &'a dyn ComponentAccess,
}

/// Everything a node can see during one tick.
pub struct TickContext<'a> {
    /// The entity this tree is deciding for
    pub entity: Entity,
    /// Milliseconds elapsed since the previous frame
    pub delta_ms: f32,
    /// The tree's scratch space, shared by all nodes in the tree
    pub blackboard: &'a mut Blackboard,
    pub movement: &'a mut dyn MovementCapability,
    pub pathfinding: &'a dyn PathfindingCapability,
    pub components: &'a dyn ComponentAccess,
}

/// A unit of behavior-tree logic.
///
/// Nodes are exclusively owned by their parent (or by the tree, for the
/// root); composites and decorators own their children as `Box<dyn Node>`.
/// Resume state lives in per-node fields, and `reset` rewinds it recursively
/// so a caller can deterministically restart the tree without rebuilding it.
pub trait Node: Send + Sync {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status;

    /// Clears local resume state and forwards to children.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(Status::Success.is_terminal());
        assert!(Status::Failure.is_terminal());
        assert!(!Status::Running.is_terminal());
    }

    #[test]
    fn test_status_converts_to_event_status() {
        assert_eq!(
            ai_events::TickStatus::from(Status::Running),
            ai_events::TickStatus::Running
        );
        assert_eq!(
            ai_events::TickStatus::from(Status::Success),
            ai_events::TickStatus::Success
        );
    }
}
