//! Physics layers for collision filtering.

use avian2d::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, ceilings)
    Ground,
    /// Player character
    Player,
    /// Anything the player can strike
    Enemy,
    /// Sensors (pickups, triggers) - should not block movement
    Sensor,
}

/// Combine layers into the bit mask used by queries.
pub fn layer_bits(layers: &[GameLayer]) -> u32 {
    layers.iter().fold(0, |bits, layer| bits | layer.to_bits())
}
