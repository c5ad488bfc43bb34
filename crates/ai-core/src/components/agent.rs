//! Agent Components
//!
//! Marker and state components for AI-controlled entities.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker component identifying an entity as AI-controlled.
///
/// The coordinator only attaches behaviors to entities carrying this marker;
/// removing it is how a host permanently abandons a running tree.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AiControlled;

/// Current and maximum health of an entity.
///
/// The AI reads health through [`ComponentAccess`](crate::capability::ComponentAccess)
/// to snapshot `last_known_health` into memory records; it never writes it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(current: f32, max: f32) -> Self {
        Self { current, max }
    }

    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Fraction of maximum health remaining, in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}
