//! Leaf Nodes
//!
//! User-authored actions and conditions, plus the stock timed Wait leaf.
//! Actions with their own resume state should implement [`Node`] directly;
//! the closure wrappers here cover the common stateless cases.

use crate::behavior::node::{Node, Status, TickContext};

/// A named closure leaf performing one step of work per tick.
pub struct Action<F> {
    name: &'static str,
    body: F,
}

impl<F> Action<F>
where
    F: FnMut(&mut TickContext<'_>) -> Status + Send + Sync,
{
    pub fn new(name: &'static str, body: F) -> Self {
        Self { name, body }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> Node for Action<F>
where
    F: FnMut(&mut TickContext<'_>) -> Status + Send + Sync,
{
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        (self.body)(ctx)
    }

    fn reset(&mut self) {}
}

/// A named predicate leaf: true maps to SUCCESS, false to FAILURE.
///
/// Conditions never return RUNNING, so they carry no resume state.
pub struct Condition<F> {
    name: &'static str,
    predicate: F,
}

impl<F> Condition<F>
where
    F: FnMut(&mut TickContext<'_>) -> bool + Send + Sync,
{
    pub fn new(name: &'static str, predicate: F) -> Self {
        Self { name, predicate }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> Node for Condition<F>
where
    F: FnMut(&mut TickContext<'_>) -> bool + Send + Sync,
{
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        if (self.predicate)(ctx) {
            Status::Success
        } else {
            Status::Failure
        }
    }

    fn reset(&mut self) {}
}

/// Accumulates frame time until a duration elapses.
///
/// RUNNING while the accumulated time is below the duration; SUCCESS on the
/// tick it is reached, which also rewinds the accumulator for the next run.
/// A [`Wait::forever`] leaf never completes.
pub struct Wait {
    duration_ms: Option<f32>,
    elapsed_ms: f32,
}

impl Wait {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            elapsed_ms: 0.0,
        }
    }

    /// A wait that never completes; the tree stays parked here until an
    /// outer node or `reset` abandons it.
    pub fn forever() -> Self {
        Self {
            duration_ms: None,
            elapsed_ms: 0.0,
        }
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}

impl Node for Wait {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        let Some(duration) = self.duration_ms else {
            return Status::Running;
        };

        self.elapsed_ms += ctx.delta_ms;
        if self.elapsed_ms >= duration {
            self.elapsed_ms = 0.0;
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}
