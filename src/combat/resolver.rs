//! Combat domain: directional melee resolution.
//!
//! One trigger runs a single overlap query, filters the candidates, delivers
//! at most one hit per distinct target and feeds recoil back into locomotion.

use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;
use std::collections::HashSet;

use crate::combat::{
    AttackDirection, AttackTuning, CombatEvent, Hittable, TargetTable, VerticalFilter,
};
use crate::core::EventSink;
use crate::movement::{LocomotionController, RecoilCommand};
use crate::physics::{ColliderHit, HitBuffer, OverlapQuery};

/// Who is attacking, from where, and which way the stick points.
#[derive(Debug, Clone, Copy)]
pub struct Attacker {
    pub entity: Entity,
    pub origin: Vec2,
    pub aim: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The target took the hit.
    Effective,
    /// The target was already invincible when the hit arrived.
    Absorbed,
    /// Delivered, but the target did not register it.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    OwnBody,
    WrongSide,
    NotHittable,
    /// Another collider of the same target was already hit.
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedHit {
    pub target: Entity,
    pub collider: Entity,
    pub bounds: Aabb2d,
    pub outcome: HitOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rejection {
    pub collider: Entity,
    pub bounds: Aabb2d,
    pub reason: RejectReason,
}

/// Everything one attack did, for callers, tests and debug overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub direction: AttackDirection,
    pub area: Aabb2d,
    /// Accepted targets in delivery order.
    pub hits: Vec<ResolvedHit>,
    pub rejections: Vec<Rejection>,
    pub truncated: bool,
    pub recoil: Option<RecoilCommand>,
}

impl AttackReport {
    pub fn accepted_count(&self) -> usize {
        self.hits.len()
    }

    pub fn effective_count(&self) -> usize {
        self.count_outcome(HitOutcome::Effective)
    }

    pub fn absorbed_count(&self) -> usize {
        self.count_outcome(HitOutcome::Absorbed)
    }

    /// Rejections other than duplicate colliders of an accepted target.
    pub fn rejected_count(&self) -> usize {
        self.rejections
            .iter()
            .filter(|r| r.reason != RejectReason::Duplicate)
            .count()
    }

    pub fn targets(&self) -> impl Iterator<Item = Entity> + '_ {
        self.hits.iter().map(|hit| hit.target)
    }

    fn count_outcome(&self, outcome: HitOutcome) -> usize {
        self.hits.iter().filter(|hit| hit.outcome == outcome).count()
    }
}

#[derive(Component, Debug, Clone)]
pub struct CombatResolver {
    tuning: Option<AttackTuning>,
    cooldown_timer: f32,
    attacked_this_frame: bool,
    buffer: HitBuffer,
    last_report: Option<AttackReport>,
    visual_timer: f32,
}

impl CombatResolver {
    pub fn new(tuning: AttackTuning) -> Self {
        let buffer = HitBuffer::with_capacity(tuning.hit_buffer_capacity);
        Self {
            tuning: Some(tuning),
            cooldown_timer: 0.0,
            attacked_this_frame: false,
            buffer,
            last_report: None,
            visual_timer: 0.0,
        }
    }

    /// A resolver that never attacks.
    pub fn disabled(reason: &str) -> Self {
        warn!("Combat resolver disabled: {}", reason);
        Self {
            tuning: None,
            cooldown_timer: 0.0,
            attacked_this_frame: false,
            buffer: HitBuffer::with_capacity(1),
            last_report: None,
            visual_timer: 0.0,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.tuning.is_none()
    }

    pub fn tuning(&self) -> Option<&AttackTuning> {
        self.tuning.as_ref()
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_timer
    }

    /// The last attack while its debug visual is still showing.
    pub fn visible_report(&self) -> Option<&AttackReport> {
        if self.visual_timer > 0.0 {
            self.last_report.as_ref()
        } else {
            None
        }
    }

    /// Start of frame: re-arm the per-frame guard and run down timers.
    pub fn tick(&mut self, dt: f32) {
        self.attacked_this_frame = false;
        self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        if self.visual_timer > 0.0 {
            self.visual_timer = (self.visual_timer - dt).max(0.0);
            if self.visual_timer <= 0.0 {
                self.last_report = None;
            }
        }
    }

    /// Handle an attack press. Returns `None` when the press was ignored
    /// (disabled, second press this frame, cooling down, or no locomotion).
    pub fn trigger<Q, T, S>(
        &mut self,
        attacker: &Attacker,
        locomotion: Option<&mut LocomotionController>,
        world: &Q,
        targets: &mut T,
        events: &mut S,
    ) -> Option<AttackReport>
    where
        Q: OverlapQuery + ?Sized,
        T: TargetTable + ?Sized,
        S: EventSink<CombatEvent>,
    {
        let tuning = self.tuning.as_ref()?;
        if self.attacked_this_frame {
            return None;
        }
        self.attacked_this_frame = true;

        if self.cooldown_timer > 0.0 {
            debug!("Attack ignored: cooldown {:.3}s", self.cooldown_timer);
            return None;
        }
        let Some(locomotion) = locomotion else {
            debug!("Attack ignored: attacker has no locomotion controller");
            return None;
        };

        let direction =
            AttackDirection::choose(attacker.aim, locomotion.is_grounded(), locomotion.facing());
        self.cooldown_timer = tuning.cooldown;
        events.emit(CombatEvent::AttackStarted { direction });

        let area = direction.query_area(attacker.origin, tuning);
        self.buffer.clear();
        world.overlap_box(area, tuning.hittable_mask(), true, &mut self.buffer);
        let truncated = self.buffer.is_saturated();

        let mut processed = HashSet::new();
        let mut hits = Vec::new();
        let mut rejections = Vec::new();
        let mut pogo_speed = tuning.pogo_speed;

        for candidate in self.buffer.hits() {
            let reason = if candidate.owner == attacker.entity || candidate.collider == attacker.entity
            {
                Some(RejectReason::OwnBody)
            } else if !on_attacked_side(direction, candidate, attacker.origin.y, tuning) {
                Some(RejectReason::WrongSide)
            } else {
                None
            };
            if let Some(reason) = reason {
                rejections.push(rejection(candidate, reason));
                continue;
            }

            let Some((target, hittable)) = targets.hittable(candidate) else {
                rejections.push(rejection(candidate, RejectReason::NotHittable));
                continue;
            };
            if !processed.insert(target) {
                rejections.push(rejection(candidate, RejectReason::Duplicate));
                continue;
            }

            let outcome = deliver(hittable, candidate, attacker.origin, direction, tuning.damage);
            if tuning.respect_upward_force
                && hittable.gives_upward_force()
                && hittable.upward_force() > 0.0
            {
                pogo_speed = pogo_speed.max(hittable.upward_force());
            }
            hits.push(ResolvedHit {
                target,
                collider: candidate.collider,
                bounds: candidate.bounds,
                outcome,
            });
        }

        if truncated {
            warn!(
                "{:?} attack hit buffer truncated at capacity {}",
                direction,
                self.buffer.capacity()
            );
            events.emit(CombatEvent::HitBufferTruncated {
                direction,
                capacity: self.buffer.capacity(),
            });
        }

        let recoil = if hits.is_empty() {
            None
        } else {
            match direction {
                AttackDirection::Left | AttackDirection::Right => {
                    // Push away from the struck side.
                    let speed = tuning.capped_horizontal_recoil();
                    let sign = if direction == AttackDirection::Right {
                        -1.0
                    } else {
                        1.0
                    };
                    Some(RecoilCommand::horizontal(
                        sign * speed,
                        tuning.horizontal_recoil_duration,
                    ))
                }
                AttackDirection::Down => {
                    Some(RecoilCommand::vertical(pogo_speed, tuning.pogo_duration))
                }
                AttackDirection::Up => None,
            }
        };
        if let Some(command) = recoil {
            locomotion.apply_recoil(command);
        }

        events.emit(CombatEvent::AttackResolved {
            hit: !hits.is_empty(),
            count: hits.len(),
            direction,
        });

        let report = AttackReport {
            direction,
            area,
            hits,
            rejections,
            truncated,
            recoil,
        };
        debug!(
            "{:?} attack: accepted={}, effective={}, absorbed={}, rejected={}, truncated={}",
            direction,
            report.accepted_count(),
            report.effective_count(),
            report.absorbed_count(),
            report.rejected_count(),
            truncated
        );

        self.visual_timer = tuning.debug_visual_time;
        self.last_report = Some(report.clone());
        Some(report)
    }
}

/// Down and up attacks only land on targets strictly beyond the attacker's
/// y, so a level target is never hit even with zero tolerance.
fn on_attacked_side(
    direction: AttackDirection,
    candidate: &ColliderHit,
    origin_y: f32,
    tuning: &AttackTuning,
) -> bool {
    let bounds = candidate.bounds;
    let tolerance = tuning.vertical_filter_tolerance;
    match (direction, tuning.vertical_filter) {
        (AttackDirection::Left | AttackDirection::Right, _) | (_, VerticalFilter::Off) => true,
        (AttackDirection::Down, VerticalFilter::Center) => bounds.center().y < origin_y - tolerance,
        (AttackDirection::Down, VerticalFilter::Edge) => bounds.max.y < origin_y - tolerance,
        (AttackDirection::Up, VerticalFilter::Center) => bounds.center().y > origin_y + tolerance,
        (AttackDirection::Up, VerticalFilter::Edge) => bounds.min.y > origin_y + tolerance,
    }
}

fn deliver(
    hittable: &mut dyn Hittable,
    candidate: &ColliderHit,
    origin: Vec2,
    direction: AttackDirection,
    damage: i32,
) -> HitOutcome {
    let bounds = candidate.bounds;
    let point = bounds.closest_point(origin);
    let hit_direction = match direction {
        AttackDirection::Down => Vec2::NEG_Y,
        AttackDirection::Up => Vec2::Y,
        AttackDirection::Left | AttackDirection::Right => {
            (bounds.center() - origin).normalize_or_zero()
        }
    };

    let was_hit_before = hittable.was_hit();
    hittable.hit(point, hit_direction, damage);
    if was_hit_before {
        HitOutcome::Absorbed
    } else if hittable.was_hit() {
        HitOutcome::Effective
    } else {
        HitOutcome::Ignored
    }
}

fn rejection(candidate: &ColliderHit, reason: RejectReason) -> Rejection {
    Rejection {
        collider: candidate.collider,
        bounds: candidate.bounds,
        reason,
    }
}
