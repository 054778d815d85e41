//! Combat domain: directional melee attacks against hittable targets.

pub mod attacks;
pub mod components;
pub mod events;
pub mod hittable;
pub mod resolver;
pub mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use attacks::AttackDirection;
pub use components::{HitTint, TargetDummy};
pub use events::{CombatEvent, TargetDefeated};
pub use hittable::{Damageable, Hittable, HittableMap, TargetTable};
pub use resolver::{
    AttackReport, Attacker, CombatResolver, HitOutcome, RejectReason, Rejection, ResolvedHit,
};
pub use resources::{AttackShape, AttackTuning, CombatInput, VerticalFilter};

use bevy::prelude::*;

use crate::movement::MovementSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatInput>()
            .add_message::<CombatEvent>()
            .add_message::<TargetDefeated>()
            .add_systems(Startup, spawn::spawn_target_dummies)
            .add_systems(
                Update,
                (
                    systems::read_combat_input,
                    systems::process_player_attacks.after(MovementSet::Frame),
                    systems::update_damageables,
                    systems::log_combat_events,
                )
                    .chain(),
            );
    }
}
