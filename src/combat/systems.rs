//! Combat domain: combat systems for input, attacks, and target upkeep.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::HitTint;
use crate::combat::events::{CombatEvent, TargetDefeated};
use crate::combat::hittable::{Damageable, Hittable, TargetTable};
use crate::combat::resolver::{Attacker, CombatResolver};
use crate::combat::resources::CombatInput;
use crate::core::GameplayBlock;
use crate::movement::{LocomotionController, MovementInput, Player};
use crate::physics::{AvianOverlap, ColliderHit, ColliderInfo};

const ATTACK_KEYS: [KeyCode; 2] = [KeyCode::KeyJ, KeyCode::KeyZ];

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CombatInput>,
) {
    input.attack_pressed = keyboard.any_just_pressed(ATTACK_KEYS);
}

/// Target table over every `Damageable` in the world.
pub(crate) struct DamageableTargets<'a, 'w, 's> {
    pub query: &'a mut Query<'w, 's, &'static mut Damageable>,
}

impl TargetTable for DamageableTargets<'_, '_, '_> {
    fn hittable(&mut self, hit: &ColliderHit) -> Option<(Entity, &mut dyn Hittable)> {
        let key = if self.query.contains(hit.collider) {
            hit.collider
        } else {
            hit.owner
        };
        let damageable = self.query.get_mut(key).ok()?;
        Some((key, damageable.into_inner() as &mut dyn Hittable))
    }
}

/// Tick resolvers, then resolve this frame's attack press.
pub(crate) fn process_player_attacks(
    time: Res<Time>,
    input: Res<CombatInput>,
    movement_input: Res<MovementInput>,
    block: Res<GameplayBlock>,
    spatial_query: SpatialQuery,
    colliders: Query<ColliderInfo>,
    mut damageables: Query<&'static mut Damageable>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut CombatResolver,
            Option<&mut LocomotionController>,
        ),
        With<Player>,
    >,
    mut events: MessageWriter<CombatEvent>,
) {
    let dt = time.delta_secs();
    let overlap = AvianOverlap {
        spatial: &spatial_query,
        colliders: &colliders,
    };

    for (entity, transform, mut resolver, mut locomotion) in &mut players {
        resolver.tick(dt);

        if !input.attack_pressed || block.is_blocked() {
            continue;
        }

        let attacker = Attacker {
            entity,
            origin: transform.translation.truncate(),
            aim: movement_input.axis,
        };
        let mut targets = DamageableTargets {
            query: &mut damageables,
        };
        resolver.trigger(
            &attacker,
            locomotion.as_deref_mut(),
            &overlap,
            &mut targets,
            &mut events,
        );
    }
}

/// Run down invincibility windows, tint recently hit targets and remove
/// defeated ones.
pub(crate) fn update_damageables(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Damageable, Option<(&HitTint, &mut Sprite)>)>,
    mut defeated: MessageWriter<TargetDefeated>,
) {
    let dt = time.delta_secs();

    for (entity, mut damageable, tint) in &mut query {
        damageable.tick(dt);

        if damageable.is_dead() {
            info!("Target {:?} defeated", entity);
            defeated.write(TargetDefeated { entity });
            commands.entity(entity).despawn();
            continue;
        }

        if let Some((tint, mut sprite)) = tint {
            sprite.color = if damageable.is_invincible() {
                tint.flash
            } else {
                tint.base
            };
        }
    }
}

pub(crate) fn log_combat_events(mut events: MessageReader<CombatEvent>) {
    for event in events.read() {
        if let CombatEvent::AttackResolved {
            hit,
            count,
            direction,
        } = event
        {
            debug!(
                "Attack resolved: direction={:?}, hit={}, count={}",
                direction, hit, count
            );
        }
    }
}
