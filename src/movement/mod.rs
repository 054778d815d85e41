//! Movement domain: locomotion tuning, controller and systems.

mod bootstrap;
mod components;
mod controller;
mod events;
mod resources;
mod systems;

pub use components::{Facing, Feet, Ground, Player, PlayerColliders, VerticalState};
pub use controller::{
    BodyColliders, FrameInput, LocomotionControls, LocomotionController, MotionState,
    RecoilCommand,
};
pub use events::MovementEvent;
pub use resources::{JumpArc, MAX_AIR_JUMPS_LIMIT, MovementConfig, MovementInput};
pub(crate) use systems::to_aabb;

use bevy::prelude::*;

/// Ordering handles for the per-frame locomotion systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSet {
    Input,
    Frame,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_message::<MovementEvent>()
            .configure_sets(Update, (MovementSet::Input, MovementSet::Frame).chain())
            .add_systems(
                Startup,
                (bootstrap::spawn_test_room, bootstrap::spawn_player),
            )
            .add_systems(Update, systems::read_input.in_set(MovementSet::Input))
            .add_systems(
                Update,
                (systems::locomotion_frame, systems::log_movement_events)
                    .chain()
                    .in_set(MovementSet::Frame),
            )
            .add_systems(FixedUpdate, systems::locomotion_fixed);
    }
}
