//! Decorator Nodes
//!
//! Nodes with exactly one child that transform its status or repeat it. The
//! child is taken by value at construction, so a childless decorator cannot
//! be built.

use crate::behavior::node::{Node, Status, TickContext};

/// Swaps the child's terminal status: SUCCESS becomes FAILURE and vice
/// versa. RUNNING passes through unchanged.
pub struct Inverter {
    child: Box<dyn Node>,
}

impl Inverter {
    pub fn new(child: Box<dyn Node>) -> Self {
        Self { child }
    }
}

impl Node for Inverter {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        match self.child.tick(ctx) {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Maps any terminal child status to SUCCESS. RUNNING passes through.
pub struct Succeeder {
    child: Box<dyn Node>,
}

impl Succeeder {
    pub fn new(child: Box<dyn Node>) -> Self {
        Self { child }
    }
}

impl Node for Succeeder {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Success,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Maps any terminal child status to FAILURE. RUNNING passes through.
pub struct Failer {
    child: Box<dyn Node>,
}

impl Failer {
    pub fn new(child: Box<dyn Node>) -> Self {
        Self { child }
    }
}

impl Node for Failer {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Failure,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Runs the child to completion `times` times, one child tick per outer
/// tick.
///
/// A terminal child status counts one completion and rewinds the child;
/// RUNNING leaves the completion count unchanged. Returns RUNNING until the
/// final completion, then SUCCESS, resetting the counter for the next run.
pub struct Repeater {
    child: Box<dyn Node>,
    times: u32,
    completed: u32,
}

impl Repeater {
    pub fn new(times: u32, child: Box<dyn Node>) -> Self {
        Self {
            child,
            times,
            completed: 0,
        }
    }
}

impl Node for Repeater {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        if self.times == 0 {
            return Status::Success;
        }

        if self.child.tick(ctx).is_terminal() {
            self.completed += 1;
            self.child.reset();
            if self.completed >= self.times {
                self.completed = 0;
                return Status::Success;
            }
        }

        Status::Running
    }

    fn reset(&mut self) {
        self.completed = 0;
        self.child.reset();
    }
}

/// Repeats the child until it fails, one child tick per outer tick.
///
/// Returns RUNNING while the child returns non-FAILURE (a terminal SUCCESS
/// rewinds the child for the next iteration), and SUCCESS on the tick the
/// child fails.
pub struct UntilFail {
    child: Box<dyn Node>,
}

impl UntilFail {
    pub fn new(child: Box<dyn Node>) -> Self {
        Self { child }
    }
}

impl Node for UntilFail {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        match self.child.tick(ctx) {
            Status::Failure => {
                self.child.reset();
                Status::Success
            }
            Status::Success => {
                self.child.reset();
                Status::Running
            }
            Status::Running => Status::Running,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::test_support::{CountingNode, ScriptNode, TestRig};

    #[test]
    fn test_inverter_swaps_terminal_statuses() {
        let mut rig = TestRig::new();
        let mut inv = Inverter::new(Box::new(CountingNode::succeeding()));
        assert_eq!(inv.tick(&mut rig.ctx()), Status::Failure);

        let mut inv = Inverter::new(Box::new(CountingNode::failing()));
        assert_eq!(inv.tick(&mut rig.ctx()), Status::Success);
    }

    #[test]
    fn test_inverter_passes_running_through() {
        let mut rig = TestRig::new();
        let mut inv = Inverter::new(Box::new(ScriptNode::new(vec![Status::Running])));
        assert_eq!(inv.tick(&mut rig.ctx()), Status::Running);
    }

    #[test]
    fn test_succeeder_masks_failure() {
        let mut rig = TestRig::new();
        let mut node = Succeeder::new(Box::new(CountingNode::failing()));
        assert_eq!(node.tick(&mut rig.ctx()), Status::Success);

        let mut node = Succeeder::new(Box::new(ScriptNode::new(vec![Status::Running])));
        assert_eq!(node.tick(&mut rig.ctx()), Status::Running);
    }

    #[test]
    fn test_failer_masks_success() {
        let mut rig = TestRig::new();
        let mut node = Failer::new(Box::new(CountingNode::succeeding()));
        assert_eq!(node.tick(&mut rig.ctx()), Status::Failure);

        let mut node = Failer::new(Box::new(ScriptNode::new(vec![Status::Running])));
        assert_eq!(node.tick(&mut rig.ctx()), Status::Running);
    }

    #[test]
    fn test_repeater_counts_three_completions() {
        let mut rig = TestRig::new();
        let action = CountingNode::succeeding();
        let count = action.count_handle();

        let mut rep = Repeater::new(3, Box::new(action));
        assert_eq!(rep.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(rep.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(rep.tick(&mut rig.ctx()), Status::Success);
        assert_eq!(count.get(), 3, "child runs exactly once per outer tick");

        // The counter reset with the SUCCESS; the cycle restarts cleanly.
        assert_eq!(rep.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_repeater_ignores_running_ticks() {
        let mut rig = TestRig::new();
        let slow = ScriptNode::new(vec![Status::Running, Status::Success]);

        let mut rep = Repeater::new(1, Box::new(slow));
        assert_eq!(rep.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(rep.tick(&mut rig.ctx()), Status::Success);
    }

    #[test]
    fn test_until_fail_succeeds_when_child_fails() {
        let mut rig = TestRig::new();
        let flaky = ScriptNode::new(vec![Status::Success, Status::Running, Status::Failure]);

        let mut node = UntilFail::new(Box::new(flaky));
        assert_eq!(node.tick(&mut rig.ctx()), Status::Running);
        // ScriptNode was rewound by the success above, so it replays from
        // the start of its script.
        assert_eq!(node.tick(&mut rig.ctx()), Status::Running);
    }

    #[test]
    fn test_until_fail_terminal_on_failure_tick() {
        let mut rig = TestRig::new();
        let mut node = UntilFail::new(Box::new(CountingNode::failing()));
        assert_eq!(node.tick(&mut rig.ctx()), Status::Success);
    }
}
