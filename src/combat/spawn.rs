//! Combat domain: practice target spawning for the sandbox room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{HitTint, TargetDummy};
use crate::combat::hittable::Damageable;
use crate::physics::GameLayer;

/// Upward force the pogo post hands to a down attack.
const POGO_POST_FORCE: f32 = 28.0;

fn dummy_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Enemy, [GameLayer::Ground])
}

pub(crate) fn spawn_target_dummies(mut commands: Commands) {
    let dummy_color = Color::srgb(0.8, 0.35, 0.3);
    let post_color = Color::srgb(0.75, 0.6, 0.25);

    // Plain dummy, one collider
    commands.spawn((
        TargetDummy,
        Damageable::new(3),
        HitTint::new(dummy_color),
        Sprite {
            color: dummy_color,
            custom_size: Some(Vec2::new(0.8, 1.4)),
            ..default()
        },
        Transform::from_xyz(3.5, 0.7, 0.0),
        RigidBody::Static,
        Collider::rectangle(0.8, 1.4),
        dummy_layers(),
    ));

    // Shielded dummy: body plus a shield collider, still one target
    let shield = commands
        .spawn((
            Collider::rectangle(0.3, 1.2),
            Transform::from_xyz(0.45, 0.0, 0.0),
            dummy_layers(),
        ))
        .id();
    commands
        .spawn((
            TargetDummy,
            Damageable::new(5),
            HitTint::new(dummy_color),
            Sprite {
                color: dummy_color,
                custom_size: Some(Vec2::new(0.8, 1.4)),
                ..default()
            },
            Transform::from_xyz(-3.5, 0.7, 0.0),
            RigidBody::Static,
            Collider::rectangle(0.8, 1.4),
            dummy_layers(),
        ))
        .add_child(shield);

    // Low pogo post under the ledge gap; boosts down-attack recoil
    commands.spawn((
        TargetDummy,
        Damageable::new(99)
            .with_invincibility(0.1)
            .with_upward_force(POGO_POST_FORCE),
        HitTint::new(post_color),
        Sprite {
            color: post_color,
            custom_size: Some(Vec2::new(1.0, 0.6)),
            ..default()
        },
        Transform::from_xyz(8.0, 0.3, 0.0),
        RigidBody::Static,
        Collider::rectangle(1.0, 0.6),
        dummy_layers(),
    ));

    info!("Spawned target dummies");
}
