//! Core domain: event plumbing, gameplay suspension, and frame/physics clocks.

mod clock;
mod events;
mod resources;
mod simulation;

pub use clock::{DEFAULT_FIXED_STEP, DEFAULT_MAX_STEPS, FixedStepClock};
pub use events::{Discard, EventSink};
pub use resources::{GameplayBlock, PAUSE_WINDOW};
pub use simulation::{FrameReport, SIM_BODY_SIZE, Simulation, SimulationInput};

use bevy::prelude::*;

/// World units are metres; this maps them onto screen pixels.
const PIXELS_PER_UNIT: f32 = 48.0;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayBlock>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, toggle_pause_window);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 2.0, 0.0).with_scale(Vec3::splat(1.0 / PIXELS_PER_UNIT)),
    ));
}

/// Stand-in for a UI stack: Tab opens/closes a window that blocks gameplay.
fn toggle_pause_window(keyboard: Res<ButtonInput<KeyCode>>, mut block: ResMut<GameplayBlock>) {
    if keyboard.just_pressed(KeyCode::Tab) {
        let open = block.toggle(PAUSE_WINDOW);
        info!("Pause window {}", if open { "opened" } else { "closed" });
    }
}
