//! Shared helpers for behavior-engine unit tests.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::behavior::blackboard::Blackboard;
use crate::behavior::node::{Node, Status, TickContext};
use crate::capability::{NullMovement, NullPathfinding};
use crate::components::AiControlled;

/// Owns everything a [`TickContext`] borrows, so tests can tick nodes
/// without a coordinator.
pub(crate) struct TestRig {
    pub world: World,
    pub entity: Entity,
    pub blackboard: Blackboard,
    pub movement: NullMovement,
    pub pathfinding: NullPathfinding,
    pub delta_ms: f32,
}

impl TestRig {
    pub fn new() -> Self {
        let mut world = World::new();
        let entity = world.spawn(AiControlled).id();
        Self {
            world,
            entity,
            blackboard: Blackboard::new(),
            movement: NullMovement,
            pathfinding: NullPathfinding,
            delta_ms: 16.0,
        }
    }

    pub fn with_delta(delta_ms: f32) -> Self {
        let mut rig = Self::new();
        rig.delta_ms = delta_ms;
        rig
    }

    pub fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            entity: self.entity,
            delta_ms: self.delta_ms,
            blackboard: &mut self.blackboard,
            movement: &mut self.movement,
            pathfinding: &self.pathfinding,
            components: &self.world,
        }
    }
}

/// Read side of a [`CountingNode`]'s tick counter.
#[derive(Clone)]
pub(crate) struct CountHandle(Arc<AtomicUsize>);

impl CountHandle {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Leaf that always returns a fixed status and counts its ticks.
pub(crate) struct CountingNode {
    status: Status,
    ticks: Arc<AtomicUsize>,
}

impl CountingNode {
    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            ticks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn succeeding() -> Self {
        Self::with_status(Status::Success)
    }

    pub fn failing() -> Self {
        Self::with_status(Status::Failure)
    }

    pub fn count_handle(&self) -> CountHandle {
        CountHandle(Arc::clone(&self.ticks))
    }
}

impl Node for CountingNode {
    fn tick(&mut self, _ctx: &mut TickContext<'_>) -> Status {
        self.ticks.fetch_add(1, Ordering::SeqCst);
        self.status
    }

    fn reset(&mut self) {}
}

/// Leaf that plays back a scripted status sequence, repeating the final
/// entry once exhausted. `reset` rewinds to the start of the script.
pub(crate) struct ScriptNode {
    script: Vec<Status>,
    at: usize,
}

impl ScriptNode {
    pub fn new(script: Vec<Status>) -> Self {
        assert!(!script.is_empty(), "script must have at least one status");
        Self { script, at: 0 }
    }
}

impl Node for ScriptNode {
    fn tick(&mut self, _ctx: &mut TickContext<'_>) -> Status {
        let status = self.script[self.at.min(self.script.len() - 1)];
        self.at += 1;
        status
    }

    fn reset(&mut self) {
        self.at = 0;
    }
}
