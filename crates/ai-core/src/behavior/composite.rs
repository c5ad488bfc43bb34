//! Composite Nodes
//!
//! Nodes with multiple children that combine their statuses: resumable
//! in-order evaluation (Sequence, Selector) and unconditional fan-out
//! (Parallel).

use crate::behavior::node::{Node, Status, TickContext};

/// Ticks children in order until one fails or all succeed.
///
/// A `Running` child suspends the sequence: the child index is remembered so
/// the next tick resumes at the same child instead of re-evaluating earlier
/// siblings. Failure and completion both rewind the index.
pub struct Sequence {
    children: Vec<Box<dyn Node>>,
    index: usize,
}

impl Sequence {
    pub fn new(children: Vec<Box<dyn Node>>) -> Self {
        debug_assert!(!children.is_empty(), "sequence with no children");
        Self { children, index: 0 }
    }
}

impl Node for Sequence {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx) {
                Status::Running => return Status::Running,
                Status::Failure => {
                    self.reset();
                    return Status::Failure;
                }
                Status::Success => self.index += 1,
            }
        }

        self.reset();
        Status::Success
    }

    fn reset(&mut self) {
        self.index = 0;
        for child in self.children.iter_mut() {
            child.reset();
        }
    }
}

/// Ticks children in order until one succeeds or all fail.
///
/// Uses the same resumable-index mechanism as [`Sequence`]; a `Running`
/// child short-circuits and is resumed on the next tick.
pub struct Selector {
    children: Vec<Box<dyn Node>>,
    index: usize,
}

impl Selector {
    pub fn new(children: Vec<Box<dyn Node>>) -> Self {
        debug_assert!(!children.is_empty(), "selector with no children");
        Self { children, index: 0 }
    }
}

impl Node for Selector {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx) {
                Status::Running => return Status::Running,
                Status::Success => {
                    self.reset();
                    return Status::Success;
                }
                Status::Failure => self.index += 1,
            }
        }

        self.reset();
        Status::Failure
    }

    fn reset(&mut self) {
        self.index = 0;
        for child in self.children.iter_mut() {
            child.reset();
        }
    }
}

/// How [`Parallel`] combines child statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Failure if any child fails; success only when every child succeeds.
    RequireAllSuccess,
    /// Success if any child succeeds; failure only when every child fails.
    RequireOneSuccess,
}

/// Ticks every child on every call, with no short-circuit.
///
/// Parallel holds no per-child terminal memory: children that already
/// reached a terminal status are re-ticked on subsequent calls. Statuses are
/// combined per the configured [`ParallelPolicy`] on each call's results.
pub struct Parallel {
    children: Vec<Box<dyn Node>>,
    policy: ParallelPolicy,
}

impl Parallel {
    pub fn new(policy: ParallelPolicy, children: Vec<Box<dyn Node>>) -> Self {
        debug_assert!(!children.is_empty(), "parallel with no children");
        Self { children, policy }
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }
}

impl Node for Parallel {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Status {
        let mut successes = 0;
        let mut failures = 0;

        for child in self.children.iter_mut() {
            match child.tick(ctx) {
                Status::Success => successes += 1,
                Status::Failure => failures += 1,
                Status::Running => {}
            }
        }

        let status = match self.policy {
            ParallelPolicy::RequireAllSuccess => {
                if failures > 0 {
                    Status::Failure
                } else if successes == self.children.len() {
                    Status::Success
                } else {
                    Status::Running
                }
            }
            ParallelPolicy::RequireOneSuccess => {
                if successes > 0 {
                    Status::Success
                } else if failures == self.children.len() {
                    Status::Failure
                } else {
                    Status::Running
                }
            }
        };

        if status.is_terminal() {
            self.reset();
        }
        status
    }

    fn reset(&mut self) {
        for child in self.children.iter_mut() {
            child.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::test_support::{CountingNode, ScriptNode, TestRig};

    #[test]
    fn test_sequence_all_success() {
        let mut rig = TestRig::new();
        let a = CountingNode::succeeding();
        let b = CountingNode::succeeding();
        let a_count = a.count_handle();
        let b_count = b.count_handle();

        let mut seq = Sequence::new(vec![Box::new(a), Box::new(b)]);
        assert_eq!(seq.tick(&mut rig.ctx()), Status::Success);
        assert_eq!(a_count.get(), 1);
        assert_eq!(b_count.get(), 1);
    }

    #[test]
    fn test_sequence_failure_skips_later_siblings() {
        let mut rig = TestRig::new();
        let failing = CountingNode::failing();
        let after = CountingNode::succeeding();
        let after_count = after.count_handle();

        let mut seq = Sequence::new(vec![
            Box::new(CountingNode::succeeding()),
            Box::new(failing),
            Box::new(after),
        ]);
        assert_eq!(seq.tick(&mut rig.ctx()), Status::Failure);
        assert_eq!(after_count.get(), 0, "sibling after failure must not tick");
    }

    #[test]
    fn test_sequence_resumes_at_running_child() {
        let mut rig = TestRig::new();
        let first = CountingNode::succeeding();
        let first_count = first.count_handle();
        let blocker = ScriptNode::new(vec![Status::Running, Status::Success]);

        let mut seq = Sequence::new(vec![Box::new(first), Box::new(blocker)]);
        assert_eq!(seq.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(seq.tick(&mut rig.ctx()), Status::Success);
        // The first child completed on tick one and was not re-entered.
        assert_eq!(first_count.get(), 1);
    }

    #[test]
    fn test_selector_success_short_circuits() {
        let mut rig = TestRig::new();
        let untried = CountingNode::succeeding();
        let untried_count = untried.count_handle();

        let mut sel = Selector::new(vec![
            Box::new(CountingNode::failing()),
            Box::new(CountingNode::succeeding()),
            Box::new(untried),
        ]);
        assert_eq!(sel.tick(&mut rig.ctx()), Status::Success);
        assert_eq!(untried_count.get(), 0, "sibling after success must not tick");
    }

    #[test]
    fn test_selector_all_failure() {
        let mut rig = TestRig::new();
        let mut sel = Selector::new(vec![
            Box::new(CountingNode::failing()),
            Box::new(CountingNode::failing()),
        ]);
        assert_eq!(sel.tick(&mut rig.ctx()), Status::Failure);
    }

    #[test]
    fn test_selector_resumes_at_running_child() {
        let mut rig = TestRig::new();
        let first = CountingNode::failing();
        let first_count = first.count_handle();
        let blocker = ScriptNode::new(vec![Status::Running, Status::Failure]);
        let fallback = CountingNode::succeeding();

        let mut sel = Selector::new(vec![
            Box::new(first),
            Box::new(blocker),
            Box::new(fallback),
        ]);
        assert_eq!(sel.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(sel.tick(&mut rig.ctx()), Status::Success);
        // The failed first child is not retried while resuming.
        assert_eq!(first_count.get(), 1);
    }

    #[test]
    fn test_parallel_require_all_fails_on_any_failure() {
        let mut rig = TestRig::new();
        let mut par = Parallel::new(
            ParallelPolicy::RequireAllSuccess,
            vec![
                Box::new(CountingNode::succeeding()),
                Box::new(CountingNode::failing()),
            ],
        );
        assert_eq!(par.tick(&mut rig.ctx()), Status::Failure);
    }

    #[test]
    fn test_parallel_require_one_succeeds_on_any_success() {
        let mut rig = TestRig::new();
        let mut par = Parallel::new(
            ParallelPolicy::RequireOneSuccess,
            vec![
                Box::new(CountingNode::failing()),
                Box::new(CountingNode::succeeding()),
            ],
        );
        assert_eq!(par.tick(&mut rig.ctx()), Status::Success);
    }

    #[test]
    fn test_parallel_ticks_every_child_every_call() {
        let mut rig = TestRig::new();
        let done = CountingNode::succeeding();
        let done_count = done.count_handle();
        let stuck = ScriptNode::new(vec![Status::Running, Status::Running, Status::Success]);

        let mut par = Parallel::new(
            ParallelPolicy::RequireAllSuccess,
            vec![Box::new(done), Box::new(stuck)],
        );
        assert_eq!(par.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(par.tick(&mut rig.ctx()), Status::Running);
        assert_eq!(par.tick(&mut rig.ctx()), Status::Success);
        // No short-circuit: the finished child kept being re-ticked.
        assert_eq!(done_count.get(), 3);
    }

    #[test]
    fn test_parallel_require_one_all_failures() {
        let mut rig = TestRig::new();
        let mut par = Parallel::new(
            ParallelPolicy::RequireOneSuccess,
            vec![
                Box::new(CountingNode::failing()),
                Box::new(CountingNode::failing()),
            ],
        );
        assert_eq!(par.tick(&mut rig.ctx()), Status::Failure);
    }

    #[test]
    fn test_reset_rewinds_resume_index() {
        let mut rig = TestRig::new();
        let first = CountingNode::succeeding();
        let first_count = first.count_handle();
        let blocker = ScriptNode::new(vec![Status::Running, Status::Running]);

        let mut seq = Sequence::new(vec![Box::new(first), Box::new(blocker)]);
        assert_eq!(seq.tick(&mut rig.ctx()), Status::Running);
        seq.reset();
        assert_eq!(seq.tick(&mut rig.ctx()), Status::Running);
        // After the rewind the sequence starts over from the first child.
        assert_eq!(first_count.get(), 2);
    }
}
