//! Debug domain: gizmo overlays for locomotion probes and attacks.

use avian2d::prelude::*;
use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;

use crate::combat::{CombatResolver, HitOutcome};
use crate::debug::state::DebugState;
use crate::movement::{LocomotionController, Player, PlayerColliders, to_aabb};

const GROUNDED_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const AIRBORNE_COLOR: Color = Color::srgb(0.9, 0.2, 0.2);
const CEILING_COLOR: Color = Color::srgb(1.0, 0.6, 0.1);
const ATTACK_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const ACCEPTED_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const ABSORBED_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);
const REJECTED_COLOR: Color = Color::srgb(1.0, 0.5, 0.0);

/// F1 flips probe lines, F2 flips attack boxes
pub(crate) fn toggle_debug_overlays(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_probes = !debug_state.show_probes;
        info!("Probe overlay: {}", debug_state.show_probes);
    }
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_attacks = !debug_state.show_attacks;
        info!("Attack overlay: {}", debug_state.show_attacks);
    }
}

pub(crate) fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    aabbs: Query<&ColliderAabb>,
    players: Query<(Entity, &LocomotionController, &PlayerColliders), With<Player>>,
) {
    if !debug_state.show_probes {
        return;
    }

    for (entity, controller, links) in &players {
        let Some(config) = controller.config() else {
            continue;
        };
        let (Ok(body), Ok(feet)) = (aabbs.get(entity), aabbs.get(links.feet)) else {
            continue;
        };
        let (body, feet) = (to_aabb(body), to_aabb(feet));

        let ground_color = if controller.is_grounded() {
            GROUNDED_COLOR
        } else {
            AIRBORNE_COLOR
        };
        let feet_origin = Vec2::new(feet.center().x, feet.min.y);
        gizmos.line_2d(
            feet_origin,
            feet_origin - Vec2::new(0.0, config.ground_probe_distance),
            ground_color,
        );

        let head_origin = Vec2::new(body.center().x, body.max.y);
        let ceiling_color = if controller.is_head_blocked() {
            CEILING_COLOR
        } else {
            GROUNDED_COLOR
        };
        gizmos.line_2d(
            head_origin,
            head_origin + Vec2::new(0.0, config.ceiling_probe_distance),
            ceiling_color,
        );
    }
}

fn draw_box(gizmos: &mut Gizmos, bounds: Aabb2d, color: Color) {
    gizmos.rect_2d(bounds.center(), bounds.half_size() * 2.0, color);
}

pub(crate) fn draw_attack_gizmos(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    resolvers: Query<&CombatResolver, With<Player>>,
) {
    if !debug_state.show_attacks {
        return;
    }

    for resolver in &resolvers {
        let Some(report) = resolver.visible_report() else {
            continue;
        };

        draw_box(&mut gizmos, report.area, ATTACK_COLOR);
        for hit in &report.hits {
            let color = match hit.outcome {
                HitOutcome::Effective => ACCEPTED_COLOR,
                HitOutcome::Absorbed | HitOutcome::Ignored => ABSORBED_COLOR,
            };
            draw_box(&mut gizmos, hit.bounds, color);
        }
        for rejection in &report.rejections {
            draw_box(&mut gizmos, rejection.bounds, REJECTED_COLOR);
        }
        if report.truncated {
            gizmos.circle_2d(report.area.center(), 0.1, Color::WHITE);
        }
    }
}
