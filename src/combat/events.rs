//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::AttackDirection;

/// Notifications raised while an attack resolves, in causal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    AttackStarted {
        direction: AttackDirection,
    },
    /// `hit` is true exactly when at least one target was accepted.
    AttackResolved {
        hit: bool,
        count: usize,
        direction: AttackDirection,
    },
    /// The overlap query filled the whole hit buffer; some targets may have
    /// been missed.
    HitBufferTruncated {
        direction: AttackDirection,
        capacity: usize,
    },
}

impl Message for CombatEvent {}

/// Emitted when a damageable target runs out of health
#[derive(Debug)]
pub struct TargetDefeated {
    pub entity: Entity,
}

impl Message for TargetDefeated {}
