//! Movement domain: player and test room spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{AttackTuning, CombatResolver};
use crate::movement::{Feet, Ground, LocomotionController, MovementConfig, Player, PlayerColliders};
use crate::physics::GameLayer;

/// Player body size in world units.
const BODY_SIZE: Vec2 = Vec2::new(0.8, 1.6);
const FEET_HEIGHT: f32 = 0.1;
const FEET_WIDTH: f32 = 0.7;

/// Spawn the player from the loaded tuning resources.
pub(crate) fn spawn_player(
    mut commands: Commands,
    movement: Option<Res<MovementConfig>>,
    attack: Option<Res<AttackTuning>>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let controller = match movement {
        Some(config) => LocomotionController::new(config.clone()),
        None => LocomotionController::inert("MovementConfig resource is missing"),
    };
    let resolver = match attack {
        Some(tuning) => CombatResolver::new(tuning.clone()),
        None => CombatResolver::disabled("AttackTuning resource is missing"),
    };

    // Feet sit flush with the bottom of the body.
    let feet = commands
        .spawn((
            Feet,
            Collider::rectangle(FEET_WIDTH, FEET_HEIGHT),
            Sensor,
            Transform::from_xyz(0.0, (FEET_HEIGHT - BODY_SIZE.y) * 0.5, 0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ))
        .id();

    commands
        .spawn((
            // Identity & Movement
            (Player, controller, PlayerColliders { feet }),
            // Combat
            resolver,
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(BODY_SIZE),
                ..default()
            },
            Transform::from_xyz(0.0, 1.5, 0.0),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(BODY_SIZE.x, BODY_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Locomotion owns gravity
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
            ),
        ))
        .add_child(feet);

    info!("Spawned player");
}

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        Ground,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]),
    ));
}

/// Floor, a ledge with a gap below, a high platform and a low ceiling.
pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Ground, top surface at y = 0
    spawn_block(
        &mut commands,
        Vec2::new(0.0, -0.5),
        Vec2::new(30.0, 1.0),
        ground_color,
    );

    // Walls
    spawn_block(
        &mut commands,
        Vec2::new(-15.5, 5.0),
        Vec2::new(1.0, 12.0),
        wall_color,
    );
    spawn_block(
        &mut commands,
        Vec2::new(15.5, 5.0),
        Vec2::new(1.0, 12.0),
        wall_color,
    );

    // Ledge to walk off
    spawn_block(
        &mut commands,
        Vec2::new(10.0, 3.0),
        Vec2::new(5.0, 0.5),
        platform_color,
    );

    // High platform, one full jump up
    spawn_block(
        &mut commands,
        Vec2::new(-8.0, 5.5),
        Vec2::new(4.0, 0.5),
        platform_color,
    );

    // Low ceiling for head bonks
    spawn_block(
        &mut commands,
        Vec2::new(-1.0, 4.0),
        Vec2::new(3.0, 0.5),
        wall_color,
    );
}
