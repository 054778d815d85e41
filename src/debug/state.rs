//! Debug domain: overlay toggles.

use bevy::prelude::*;

/// Resource tracking which debug overlays are drawn
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Ground/ceiling probe lines
    pub show_probes: bool,
    /// Last attack box and the colliders it touched
    pub show_attacks: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_probes: true,
            show_attacks: true,
        }
    }
}
