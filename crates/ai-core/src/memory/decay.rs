//! Decay Policy
//!
//! Tunable retention curves for the forgetting model. Higher importance
//! tiers tolerate larger ages before losing confidence, and keep records
//! alive at lower confidence floors. Everything here deserializes from the
//! host's TOML config; the defaults encode the stock retention contract.

use serde::{Deserialize, Serialize};

use crate::memory::record::Importance;

/// Retention curve for one importance tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPolicy {
    /// Age (in turns since last access) tolerated before confidence starts
    /// draining
    pub retention_turns: u64,
    /// Confidence lost per turn beyond the retention window
    pub confidence_loss_per_turn: f32,
    /// Records whose confidence falls below this are removed by the sweep
    pub removal_threshold: f32,
}

impl Default for TierPolicy {
    fn default() -> Self {
        // Matches the Normal tier below.
        Self {
            retention_turns: 200,
            confidence_loss_per_turn: 0.002,
            removal_threshold: 0.05,
        }
    }
}

impl TierPolicy {
    pub const fn new(
        retention_turns: u64,
        confidence_loss_per_turn: f32,
        removal_threshold: f32,
    ) -> Self {
        Self {
            retention_turns,
            confidence_loss_per_turn,
            removal_threshold,
        }
    }
}

/// Full decay policy: one curve per importance tier plus the demotion
/// floor.
///
/// Default tuning: an unreinforced Trivial record lasts roughly 230 turns,
/// a Normal one roughly 675, while High and Critical records are untouched
/// for well over a thousand turns. A host can retune every number from
/// config without recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub trivial: TierPolicy,
    pub normal: TierPolicy,
    pub high: TierPolicy,
    pub critical: TierPolicy,
    /// A surviving record whose confidence drops below this loses one
    /// importance tier per sweep
    pub demote_below: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            trivial: TierPolicy::new(50, 0.005, 0.10),
            normal: TierPolicy::new(200, 0.002, 0.05),
            high: TierPolicy::new(1500, 0.001, 0.02),
            critical: TierPolicy::new(5000, 0.0005, 0.01),
            demote_below: 0.3,
        }
    }
}

impl DecayConfig {
    /// The retention curve for a given importance tier.
    pub fn tier(&self, importance: Importance) -> &TierPolicy {
        match importance {
            Importance::Trivial => &self.trivial,
            Importance::Normal => &self.normal,
            Importance::High => &self.high,
            Importance::Critical => &self.critical,
        }
    }
}

/// Summary of one decay sweep, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecaySweep {
    pub removed: usize,
    pub demoted: usize,
}

impl DecaySweep {
    pub fn merge(&mut self, other: DecaySweep) {
        self.removed += other.removed;
        self.demoted += other.demoted;
    }
}
