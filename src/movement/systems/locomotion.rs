//! Movement domain: frame and fixed-step locomotion systems.

use avian2d::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::core::GameplayBlock;
use crate::movement::{
    BodyColliders, FrameInput, LocomotionControls, LocomotionController, MovementEvent,
    MovementInput, Player, PlayerColliders,
};
use crate::physics::AvianSurfaces;

pub(crate) fn to_aabb(aabb: &ColliderAabb) -> Aabb2d {
    Aabb2d {
        min: aabb.min,
        max: aabb.max,
    }
}

/// Frame tick: edges, probes, vertical state and timers.
pub(crate) fn locomotion_frame(
    time: Res<Time>,
    input: Res<MovementInput>,
    block: Res<GameplayBlock>,
    spatial_query: SpatialQuery,
    aabbs: Query<&ColliderAabb>,
    mut players: Query<(Entity, &mut LocomotionController, Option<&PlayerColliders>), With<Player>>,
    mut events: MessageWriter<MovementEvent>,
) {
    let frame = FrameInput {
        dt: time.delta_secs(),
        controls: LocomotionControls {
            axis: input.axis,
            run_held: input.run_held,
            jump_held: input.jump_held,
            jump_pressed: input.jump_just_pressed,
            jump_released: input.jump_just_released,
        },
        gameplay_blocked: block.is_blocked(),
    };
    let surfaces = AvianSurfaces {
        spatial: &spatial_query,
    };

    for (entity, mut controller, links) in &mut players {
        let colliders = links.and_then(|links| {
            let body = aabbs.get(entity).ok()?;
            let feet = aabbs.get(links.feet).ok()?;
            Some(BodyColliders {
                body: to_aabb(body),
                feet: to_aabb(feet),
            })
        });
        controller.frame_tick(&frame, colliders.as_ref(), &surfaces, &mut events);
    }
}

/// Fixed tick: take the solver's velocity, integrate, hand it back.
/// Jumps and recoils applied in `Update` since the last step survive the
/// hand-off because `absorb_contact_velocity` keeps pending components.
pub(crate) fn locomotion_fixed(
    time: Res<Time>,
    mut players: Query<(&mut LocomotionController, &mut LinearVelocity), With<Player>>,
    mut events: MessageWriter<MovementEvent>,
) {
    let dt = time.delta_secs();

    for (mut controller, mut velocity) in &mut players {
        controller.absorb_contact_velocity(velocity.0);
        velocity.0 = controller.fixed_tick(dt, &mut events);
    }
}

pub(crate) fn log_movement_events(mut events: MessageReader<MovementEvent>) {
    for event in events.read() {
        debug!("Movement event: {:?}", event);
    }
}
