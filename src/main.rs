use avian2d::prelude::*;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use ledgewalk::{combat, content, core, movement};

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Ledgewalk".to_string(),
                    resolution: (1280, 720).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "wgpu=error,ledgewalk=debug".to_string(),
                ..default()
            }),
    )
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
        combat::CombatPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(ledgewalk::debug::DebugPlugin);

    app.run();
}
