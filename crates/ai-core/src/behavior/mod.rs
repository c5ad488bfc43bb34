//! Behavior-Tree Engine
//!
//! A resumable, single-threaded behavior-tree runtime. Ticks are cooperative
//! and may span many frames: a node that returns [`Status::Running`] keeps
//! its own resume state (child index, wait accumulator, repeat counter) and
//! continues where it left off on the next call.

pub mod blackboard;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod node;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_support;

pub use blackboard::{keys, Blackboard, BlackboardValue};
pub use composite::{Parallel, ParallelPolicy, Selector, Sequence};
pub use decorator::{Failer, Inverter, Repeater, Succeeder, UntilFail};
pub use leaf::{Action, Condition, Wait};
pub use node::{FrameContext, Node, Status, TickContext};
pub use tree::BehaviorTree;
