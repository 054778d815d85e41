//! Combat domain: resolver tests over an in-memory collider set.

use bevy::ecs::system::SystemState;
use bevy::ecs::world::World;
use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use super::{
    AttackDirection, AttackReport, AttackTuning, Attacker, CombatEvent, CombatResolver,
    Damageable, HitOutcome, Hittable, HittableMap, RejectReason, TargetTable, VerticalFilter,
};
use super::systems::DamageableTargets;
use crate::movement::{
    BodyColliders, Facing, FrameInput, LocomotionController, MovementConfig, RecoilCommand,
};
use crate::physics::{ColliderHit, ColliderSet, GameLayer, StaticCollider, SurfaceProbe, layer_bits};

const UP: Vec2 = Vec2::Y;
const DOWN: Vec2 = Vec2::NEG_Y;
const NEUTRAL: Vec2 = Vec2::ZERO;

/// Probe that reports a floor directly under the feet and nothing overhead.
struct FlatFloor;

impl SurfaceProbe for FlatFloor {
    fn cast_box(&self, _: Vec2, _: Vec2, direction: Dir2, _: f32, _: u32) -> bool {
        direction == Dir2::NEG_Y
    }
}

/// A player at the origin with a collider set and target table around it.
struct Arena {
    world: World,
    player: Entity,
    colliders: ColliderSet,
    targets: HittableMap,
    locomotion: LocomotionController,
    resolver: CombatResolver,
}

impl Arena {
    fn new(tuning: AttackTuning) -> Self {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        Self {
            world,
            player,
            colliders: ColliderSet::new(),
            targets: HittableMap::new(),
            locomotion: LocomotionController::new(MovementConfig::default()),
            resolver: CombatResolver::new(tuning),
        }
    }

    fn enemy_bits() -> u32 {
        layer_bits(&[GameLayer::Enemy])
    }

    /// One-collider target with default health.
    fn spawn_target(&mut self, center: Vec2, size: Vec2) -> Entity {
        self.spawn_damageable(center, size, Damageable::default())
    }

    fn spawn_damageable(&mut self, center: Vec2, size: Vec2, target: Damageable) -> Entity {
        let owner = self.world.spawn_empty().id();
        self.colliders.insert(StaticCollider::solid(
            owner,
            center,
            size,
            Self::enemy_bits(),
        ));
        self.targets.insert(owner, target);
        owner
    }

    /// Extra collider owned by `owner`.
    fn attach_collider(&mut self, owner: Entity, center: Vec2, size: Vec2) -> Entity {
        let collider = self.world.spawn_empty().id();
        self.colliders.insert(
            StaticCollider::solid(collider, center, size, Self::enemy_bits()).with_owner(owner),
        );
        collider
    }

    fn land(&mut self) {
        let frame = FrameInput {
            dt: 0.02,
            ..default()
        };
        let colliders = BodyColliders {
            body: Aabb2d::new(Vec2::ZERO, Vec2::new(0.4, 0.8)),
            feet: Aabb2d::new(Vec2::new(0.0, -0.75), Vec2::new(0.35, 0.05)),
        };
        self.locomotion
            .frame_tick(&frame, Some(&colliders), &FlatFloor, &mut Vec::new());
        assert!(self.locomotion.is_grounded());
    }

    fn attack(&mut self, aim: Vec2) -> (Option<AttackReport>, Vec<CombatEvent>) {
        let attacker = Attacker {
            entity: self.player,
            origin: Vec2::ZERO,
            aim,
        };
        let mut events = Vec::new();
        let report = self.resolver.trigger(
            &attacker,
            Some(&mut self.locomotion),
            &self.colliders,
            &mut self.targets,
            &mut events,
        );
        (report, events)
    }

    fn health(&self, target: Entity) -> i32 {
        self.targets.get(target).map_or(-1, Damageable::health)
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// -----------------------------------------------------------------------------
// Direction tests
// -----------------------------------------------------------------------------

#[test]
fn test_direction_from_aim() {
    assert_eq!(
        AttackDirection::choose(DOWN, false, Facing::Right),
        AttackDirection::Down
    );
    assert_eq!(
        AttackDirection::choose(UP, true, Facing::Right),
        AttackDirection::Up
    );
    assert_eq!(
        AttackDirection::choose(Vec2::NEG_X, true, Facing::Right),
        AttackDirection::Left
    );
    // Vertical aim wins over horizontal.
    assert_eq!(
        AttackDirection::choose(Vec2::new(0.5, 0.5), true, Facing::Right),
        AttackDirection::Up
    );
}

#[test]
fn test_down_aim_on_ground_falls_back_to_facing() {
    assert_eq!(
        AttackDirection::choose(DOWN, true, Facing::Left),
        AttackDirection::Left
    );
    assert_eq!(
        AttackDirection::choose(Vec2::new(0.1, 0.0), false, Facing::Left),
        AttackDirection::Left
    );
}

#[test]
fn test_query_area_is_offset_toward_direction() {
    let tuning = AttackTuning::default();

    let right = AttackDirection::Right.query_area(Vec2::ZERO, &tuning);
    assert!(approx(right.min.x, 0.2) && approx(right.max.x, 1.6));
    assert!(approx(right.min.y, -0.5) && approx(right.max.y, 0.5));

    let down = AttackDirection::Down.query_area(Vec2::new(1.0, 1.0), &tuning);
    assert!(approx(down.min.y, -0.4) && approx(down.max.y, 0.6));
    assert!(approx(down.min.x, 0.5) && approx(down.max.x, 1.5));
}

// -----------------------------------------------------------------------------
// Hit acceptance tests
// -----------------------------------------------------------------------------

#[test]
fn test_target_with_two_colliders_is_hit_once() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let target = arena.spawn_target(Vec2::new(0.8, 0.0), Vec2::new(0.4, 0.4));
    arena.attach_collider(target, Vec2::new(1.2, 0.2), Vec2::new(0.3, 0.3));

    let (report, events) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");

    assert_eq!(report.direction, AttackDirection::Right);
    assert_eq!(report.accepted_count(), 1);
    assert_eq!(report.rejected_count(), 0);
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].reason, RejectReason::Duplicate);
    assert_eq!(arena.health(target), 2);
    assert_eq!(
        events,
        vec![
            CombatEvent::AttackStarted {
                direction: AttackDirection::Right
            },
            CombatEvent::AttackResolved {
                hit: true,
                count: 1,
                direction: AttackDirection::Right
            },
        ]
    );
}

#[test]
fn test_horizontal_hit_recoils_away_from_target() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    arena.spawn_target(Vec2::new(1.0, 0.0), Vec2::new(0.4, 0.4));

    let (report, _) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");

    // min(12, 22 * 0.5) = 11, pushed left.
    assert_eq!(
        report.recoil,
        Some(RecoilCommand::horizontal(-11.0, 0.08))
    );
    assert!(approx(arena.locomotion.velocity().x, -11.0));
    assert!(approx(arena.locomotion.velocity().y, 0.0));
    assert!(approx(arena.locomotion.recoil_timer(), 0.08));
}

#[test]
fn test_left_hit_recoils_right() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    arena.spawn_target(Vec2::new(-1.0, 0.0), Vec2::new(0.4, 0.4));

    let (report, _) = arena.attack(Vec2::NEG_X);
    assert_eq!(report.map(|r| r.direction), Some(AttackDirection::Left));
    assert!(approx(arena.locomotion.velocity().x, 11.0));
}

#[test]
fn test_hit_reports_contact_point_and_direction() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let target = arena.spawn_target(Vec2::new(1.0, 0.0), Vec2::new(0.4, 0.4));

    arena.attack(NEUTRAL);

    let (point, direction) = arena
        .targets
        .get(target)
        .and_then(Damageable::last_hit)
        .expect("hit should be recorded");
    assert!(approx(point.x, 0.8) && approx(point.y, 0.0));
    assert!(approx(direction.x, 1.0) && approx(direction.y, 0.0));
}

#[test]
fn test_down_attack_pogos_and_filters_targets_above() {
    let mut arena = Arena::new(AttackTuning::default());
    let below = arena.spawn_target(Vec2::new(0.0, -0.9), Vec2::new(0.5, 0.5));
    // Tall post reaching into the attack box but centered at the attacker's y.
    let level = arena.spawn_target(Vec2::new(0.3, 0.0), Vec2::new(0.2, 2.0));

    let (report, events) = arena.attack(DOWN);
    let report = report.expect("attack should resolve");

    assert_eq!(report.direction, AttackDirection::Down);
    assert_eq!(report.targets().collect::<Vec<_>>(), vec![below]);
    assert_eq!(report.rejected_count(), 1);
    assert_eq!(report.rejections[0].reason, RejectReason::WrongSide);
    assert_eq!(arena.health(level), 3);

    assert_eq!(report.recoil, Some(RecoilCommand::vertical(22.0, 0.04)));
    assert!(approx(arena.locomotion.velocity().y, 22.0));
    assert!(events.contains(&CombatEvent::AttackResolved {
        hit: true,
        count: 1,
        direction: AttackDirection::Down
    }));

    let (_, direction) = arena
        .targets
        .get(below)
        .and_then(Damageable::last_hit)
        .expect("hit should be recorded");
    assert_eq!(direction, Vec2::NEG_Y);
}

#[test]
fn test_down_attack_with_only_targets_above_misses() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.spawn_target(Vec2::new(0.0, -0.02), Vec2::new(0.4, 1.0));

    let (report, events) = arena.attack(DOWN);
    let report = report.expect("attack should resolve");

    assert_eq!(report.accepted_count(), 0);
    assert_eq!(report.recoil, None);
    assert_eq!(arena.locomotion.velocity(), Vec2::ZERO);
    assert_eq!(
        events.last(),
        Some(&CombatEvent::AttackResolved {
            hit: false,
            count: 0,
            direction: AttackDirection::Down
        })
    );
}

#[test]
fn test_vertical_filter_modes() {
    // Center at -0.5 passes the center rule; top edge at 0.0 fails the edge rule.
    let center = Vec2::new(0.0, -0.5);
    let size = Vec2::new(0.4, 1.0);

    let mut arena = Arena::new(AttackTuning::default());
    arena.spawn_target(center, size);
    assert_eq!(arena.attack(DOWN).0.map(|r| r.accepted_count()), Some(1));

    let mut arena = Arena::new(AttackTuning {
        vertical_filter: VerticalFilter::Edge,
        ..default()
    });
    arena.spawn_target(center, size);
    assert_eq!(arena.attack(DOWN).0.map(|r| r.accepted_count()), Some(0));

    let mut arena = Arena::new(AttackTuning {
        vertical_filter: VerticalFilter::Off,
        ..default()
    });
    arena.spawn_target(Vec2::new(0.3, 0.0), Vec2::new(0.2, 2.0));
    assert_eq!(arena.attack(DOWN).0.map(|r| r.accepted_count()), Some(1));
}

#[test]
fn test_zero_tolerance_still_rejects_level_targets() {
    let tuning = AttackTuning {
        vertical_filter_tolerance: 0.0,
        ..default()
    };

    // Tall post centered exactly at the attacker's y.
    let mut arena = Arena::new(tuning.clone());
    let level = arena.spawn_target(Vec2::new(0.3, 0.0), Vec2::new(0.5, 2.0));
    let report = arena.attack(DOWN).0.expect("attack should resolve");
    assert_eq!(report.accepted_count(), 0);
    assert_eq!(report.rejections[0].reason, RejectReason::WrongSide);
    assert_eq!(report.recoil, None);
    assert_eq!(arena.health(level), 3);

    arena.resolver.tick(1.0);
    let report = arena.attack(UP).0.expect("attack should resolve");
    assert_eq!(report.accepted_count(), 0);
    assert_eq!(arena.health(level), 3);

    // Top edge exactly at the attacker's y fails the edge rule.
    let mut arena = Arena::new(AttackTuning {
        vertical_filter: VerticalFilter::Edge,
        ..tuning
    });
    arena.spawn_target(Vec2::new(0.0, -0.5), Vec2::new(0.4, 1.0));
    assert_eq!(arena.attack(DOWN).0.map(|r| r.accepted_count()), Some(0));
}

#[test]
fn test_up_attack_hits_without_recoil() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let above = arena.spawn_target(Vec2::new(0.0, 0.9), Vec2::new(0.5, 0.5));

    let (report, events) = arena.attack(UP);
    let report = report.expect("attack should resolve");

    assert_eq!(report.direction, AttackDirection::Up);
    assert_eq!(report.accepted_count(), 1);
    assert_eq!(report.recoil, None);
    assert_eq!(arena.health(above), 2);
    assert_eq!(arena.locomotion.velocity(), Vec2::ZERO);
    assert_eq!(
        events.last(),
        Some(&CombatEvent::AttackResolved {
            hit: true,
            count: 1,
            direction: AttackDirection::Up
        })
    );
}

// -----------------------------------------------------------------------------
// Rejection tests
// -----------------------------------------------------------------------------

#[test]
fn test_own_colliders_are_rejected() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let player = arena.player;
    arena.colliders.insert(StaticCollider::solid(
        player,
        Vec2::new(0.5, 0.0),
        Vec2::new(0.8, 1.6),
        Arena::enemy_bits(),
    ));
    arena.attach_collider(player, Vec2::new(1.0, 0.0), Vec2::new(0.2, 0.2));

    let (report, events) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");

    assert_eq!(report.accepted_count(), 0);
    assert_eq!(report.rejected_count(), 2);
    assert!(
        report
            .rejections
            .iter()
            .all(|r| r.reason == RejectReason::OwnBody)
    );
    assert_eq!(report.recoil, None);
    assert_eq!(
        events.last(),
        Some(&CombatEvent::AttackResolved {
            hit: false,
            count: 0,
            direction: AttackDirection::Right
        })
    );
}

#[test]
fn test_colliders_without_hittable_are_rejected() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let prop = arena.world.spawn_empty().id();
    arena.colliders.insert(StaticCollider::solid(
        prop,
        Vec2::new(1.0, 0.0),
        Vec2::new(0.4, 0.4),
        Arena::enemy_bits(),
    ));

    let (report, _) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");

    assert_eq!(report.accepted_count(), 0);
    assert_eq!(report.rejections[0].reason, RejectReason::NotHittable);
}

#[test]
fn test_other_layers_are_not_queried() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let wall = arena.world.spawn_empty().id();
    arena.colliders.insert(StaticCollider::solid(
        wall,
        Vec2::new(1.0, 0.0),
        Vec2::new(0.4, 0.4),
        layer_bits(&[GameLayer::Ground]),
    ));
    arena.targets.insert(wall, Damageable::default());

    let (report, _) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");
    assert_eq!(report.accepted_count(), 0);
    assert!(report.rejections.is_empty());
}

#[test]
fn test_full_buffer_reports_truncation_in_order() {
    let mut arena = Arena::new(AttackTuning {
        hit_buffer_capacity: 2,
        ..default()
    });
    arena.land();
    for y in [-0.3, 0.0, 0.3] {
        arena.spawn_target(Vec2::new(1.0, y), Vec2::new(0.2, 0.2));
    }

    let (report, events) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");

    assert!(report.truncated);
    assert_eq!(report.accepted_count(), 2);
    assert_eq!(
        events,
        vec![
            CombatEvent::AttackStarted {
                direction: AttackDirection::Right
            },
            CombatEvent::HitBufferTruncated {
                direction: AttackDirection::Right,
                capacity: 2
            },
            CombatEvent::AttackResolved {
                hit: true,
                count: 2,
                direction: AttackDirection::Right
            },
        ]
    );
}

// -----------------------------------------------------------------------------
// Timing and gating tests
// -----------------------------------------------------------------------------

#[test]
fn test_cooldown_and_single_attack_per_frame() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();

    assert!(arena.attack(NEUTRAL).0.is_some());
    assert!(approx(arena.resolver.cooldown_remaining(), 0.25));

    let (report, events) = arena.attack(NEUTRAL);
    assert!(report.is_none());
    assert!(events.is_empty());

    arena.resolver.tick(0.1);
    assert!(arena.attack(NEUTRAL).0.is_none());

    arena.resolver.tick(0.2);
    assert!(arena.attack(NEUTRAL).0.is_some());
}

#[test]
fn test_invincible_target_absorbs_hit() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    let target = arena.spawn_target(Vec2::new(1.0, 0.0), Vec2::new(0.4, 0.4));

    arena.attack(NEUTRAL);
    // Past the cooldown but still inside the target's invincibility window.
    arena.resolver.tick(0.3);
    if let Some(t) = arena.targets.get_mut(target) {
        t.tick(0.1);
    }

    let (report, events) = arena.attack(NEUTRAL);
    let report = report.expect("attack should resolve");

    assert_eq!(report.accepted_count(), 1);
    assert_eq!(report.absorbed_count(), 1);
    assert_eq!(report.effective_count(), 0);
    assert_eq!(report.hits[0].outcome, HitOutcome::Absorbed);
    assert_eq!(arena.health(target), 2);
    assert!(events.contains(&CombatEvent::AttackResolved {
        hit: true,
        count: 1,
        direction: AttackDirection::Right
    }));
}

#[test]
fn test_disabled_resolver_ignores_presses() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.resolver = CombatResolver::disabled("no attack tuning");
    arena.spawn_target(Vec2::new(1.0, 0.0), Vec2::new(0.4, 0.4));

    let (report, events) = arena.attack(NEUTRAL);
    assert!(arena.resolver.is_disabled());
    assert!(report.is_none());
    assert!(events.is_empty());
}

#[test]
fn test_attacker_without_locomotion_does_nothing() {
    let mut arena = Arena::new(AttackTuning::default());
    let target = arena.spawn_target(Vec2::new(1.0, 0.0), Vec2::new(0.4, 0.4));
    let attacker = Attacker {
        entity: arena.player,
        origin: Vec2::ZERO,
        aim: NEUTRAL,
    };
    let mut events = Vec::new();

    let report = arena.resolver.trigger(
        &attacker,
        None,
        &arena.colliders,
        &mut arena.targets,
        &mut events,
    );

    assert!(report.is_none());
    assert!(events.is_empty());
    assert_eq!(arena.resolver.cooldown_remaining(), 0.0);
    assert_eq!(arena.health(target), 3);
}

#[test]
fn test_visible_report_expires() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.land();
    arena.attack(NEUTRAL);
    assert!(arena.resolver.visible_report().is_some());

    arena.resolver.tick(0.2);
    assert!(arena.resolver.visible_report().is_none());
}

// -----------------------------------------------------------------------------
// Pogo tests
// -----------------------------------------------------------------------------

#[test]
fn test_upward_force_raises_pogo() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.spawn_damageable(
        Vec2::new(0.0, -0.9),
        Vec2::new(0.5, 0.5),
        Damageable::default().with_upward_force(28.0),
    );

    let (report, _) = arena.attack(DOWN);
    assert_eq!(
        report.and_then(|r| r.recoil),
        Some(RecoilCommand::vertical(28.0, 0.04))
    );
}

#[test]
fn test_strong_upward_force_launches_player() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.spawn_damageable(
        Vec2::new(0.0, -0.9),
        Vec2::new(0.5, 0.5),
        Damageable::default().with_upward_force(40.0),
    );

    let (report, _) = arena.attack(DOWN);
    assert_eq!(
        report.and_then(|r| r.recoil),
        Some(RecoilCommand::vertical(40.0, 0.04))
    );
    assert!(approx(arena.locomotion.velocity().y, 40.0));
}

#[test]
fn test_weak_upward_force_keeps_base_pogo() {
    let mut arena = Arena::new(AttackTuning::default());
    arena.spawn_damageable(
        Vec2::new(0.0, -0.9),
        Vec2::new(0.5, 0.5),
        Damageable::default().with_upward_force(10.0),
    );

    let (report, _) = arena.attack(DOWN);
    assert_eq!(
        report.and_then(|r| r.recoil),
        Some(RecoilCommand::vertical(22.0, 0.04))
    );
}

#[test]
fn test_upward_force_ignored_when_not_respected() {
    let mut arena = Arena::new(AttackTuning {
        respect_upward_force: false,
        ..default()
    });
    arena.spawn_damageable(
        Vec2::new(0.0, -0.9),
        Vec2::new(0.5, 0.5),
        Damageable::default().with_upward_force(28.0),
    );

    let (report, _) = arena.attack(DOWN);
    assert_eq!(
        report.and_then(|r| r.recoil),
        Some(RecoilCommand::vertical(22.0, 0.04))
    );
}

// -----------------------------------------------------------------------------
// Damageable and target table tests
// -----------------------------------------------------------------------------

#[test]
fn test_damageable_invincibility_window() {
    let mut target = Damageable::new(3);

    assert!(target.take_damage(1));
    assert_eq!(target.health(), 2);
    assert!(target.was_hit());
    assert!(target.is_invincible());
    assert!(!target.take_damage(1));

    target.tick(0.1);
    assert!(target.was_hit());
    target.tick(0.15);
    assert!(!target.was_hit());
    assert!(target.take_damage(1));
    assert_eq!(target.health(), 1);
}

#[test]
fn test_damageable_death_is_permanent() {
    let mut target = Damageable::new(2).with_invincibility(0.0);

    assert!(target.take_damage(5));
    assert_eq!(target.health(), 0);
    assert!(target.is_dead());
    assert!(target.was_hit());

    target.tick(1.0);
    assert!(target.was_hit());
    assert!(!target.take_damage(1));
}

#[test]
fn test_target_table_prefers_collider_then_owner() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();
    let part = world.spawn_empty().id();
    let stray = world.spawn_empty().id();
    let bounds = Aabb2d::new(Vec2::ZERO, Vec2::ONE);

    let mut table = HittableMap::new();
    table.insert(owner, Damageable::new(3));
    table.insert(part, Damageable::new(1));

    let via_part = ColliderHit {
        collider: part,
        owner,
        bounds,
    };
    assert_eq!(table.hittable(&via_part).map(|(e, _)| e), Some(part));

    let via_owner = ColliderHit {
        collider: stray,
        owner,
        bounds,
    };
    assert_eq!(table.hittable(&via_owner).map(|(e, _)| e), Some(owner));

    let unknown = ColliderHit {
        collider: stray,
        owner: stray,
        bounds,
    };
    assert!(table.hittable(&unknown).is_none());
}

#[test]
fn test_damageable_query_resolves_owner_and_takes_hit() {
    let mut world = World::new();
    let owner = world.spawn(Damageable::new(3)).id();
    let part = world.spawn_empty().id();
    let bounds = Aabb2d::new(Vec2::ZERO, Vec2::ONE);

    let mut state = SystemState::<Query<&'static mut Damageable>>::new(&mut world);
    let mut query = state.get_mut(&mut world);
    let mut targets = DamageableTargets { query: &mut query };

    let via_part = ColliderHit {
        collider: part,
        owner,
        bounds,
    };
    let (key, target) = targets
        .hittable(&via_part)
        .expect("owner carries a Damageable");
    assert_eq!(key, owner);
    target.hit(Vec2::ZERO, Vec2::X, 1);

    let stray = ColliderHit {
        collider: part,
        owner: part,
        bounds,
    };
    assert!(targets.hittable(&stray).is_none());

    let damageable = world.get::<Damageable>(owner).expect("owner still exists");
    assert_eq!(damageable.health(), 2);
    assert!(damageable.was_hit());
}
