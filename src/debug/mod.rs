//! Debug domain: gizmo overlays for tuning locomotion and combat feel.
//!
//! Features:
//! - Ground and ceiling probe lines, colored by contact
//! - Last attack box with accepted, absorbed and rejected colliders

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                systems::toggle_debug_overlays,
                systems::draw_probe_gizmos,
                systems::draw_attack_gizmos,
            )
                .chain(),
        );
    }
}
