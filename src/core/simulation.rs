//! Core domain: headless scheduler for one player in a static collider world.
//!
//! Drives the same controller and resolver the app uses, with the frame and
//! fixed ticks invoked explicitly instead of by engine schedules.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::combat::{
    AttackReport, AttackTuning, Attacker, CombatEvent, CombatResolver, Damageable, HittableMap,
};
use crate::core::{DEFAULT_FIXED_STEP, FixedStepClock};
use crate::movement::{
    BodyColliders, FrameInput, LocomotionControls, LocomotionController, MovementConfig,
    MovementEvent,
};
use crate::physics::ColliderSet;

/// Player body size in world units.
pub const SIM_BODY_SIZE: Vec2 = Vec2::new(0.8, 1.6);
const SIM_FEET_HEIGHT: f32 = 0.1;
const SIM_FEET_WIDTH: f32 = 0.7;

/// Input for one simulated frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationInput {
    pub dt: f32,
    pub controls: LocomotionControls,
    pub attack_pressed: bool,
    pub gameplay_blocked: bool,
}

/// Everything observable from one frame, in the order it happened.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub movement: Vec<MovementEvent>,
    pub combat: Vec<CombatEvent>,
    pub attack: Option<AttackReport>,
    pub defeated: Vec<Entity>,
    pub fixed_steps: u32,
}

pub struct Simulation {
    pub player: Entity,
    /// Body center.
    pub position: Vec2,
    pub controller: LocomotionController,
    pub resolver: CombatResolver,
    pub world: ColliderSet,
    pub targets: HittableMap<Damageable>,
    clock: FixedStepClock,
    solid_mask: u32,
}

impl Simulation {
    pub fn new(
        player: Entity,
        position: Vec2,
        movement: MovementConfig,
        attack: AttackTuning,
        world: ColliderSet,
        targets: HittableMap<Damageable>,
    ) -> Self {
        let solid_mask = movement.ground_mask();
        Self {
            player,
            position,
            controller: LocomotionController::new(movement),
            resolver: CombatResolver::new(attack),
            world,
            targets,
            clock: FixedStepClock::new(DEFAULT_FIXED_STEP),
            solid_mask,
        }
    }

    pub fn with_clock(mut self, clock: FixedStepClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn body_bounds(&self) -> Aabb2d {
        Aabb2d::new(self.position, SIM_BODY_SIZE * 0.5)
    }

    /// Feet box flush with the bottom of the body.
    pub fn feet_bounds(&self) -> Aabb2d {
        let center = self.position - Vec2::new(0.0, (SIM_BODY_SIZE.y - SIM_FEET_HEIGHT) * 0.5);
        Aabb2d::new(center, Vec2::new(SIM_FEET_WIDTH, SIM_FEET_HEIGHT) * 0.5)
    }

    /// Run one frame: resolver tick, locomotion frame tick, attack on press,
    /// then however many fixed steps the clock hands out.
    pub fn frame(&mut self, input: &SimulationInput) -> FrameReport {
        let mut report = FrameReport::default();
        let dt = input.dt;

        self.resolver.tick(dt);
        self.update_targets(dt, &mut report.defeated);

        let colliders = BodyColliders {
            body: self.body_bounds(),
            feet: self.feet_bounds(),
        };
        let frame = FrameInput {
            dt,
            controls: input.controls,
            gameplay_blocked: input.gameplay_blocked,
        };
        self.controller
            .frame_tick(&frame, Some(&colliders), &self.world, &mut report.movement);

        if input.attack_pressed && !input.gameplay_blocked {
            let attacker = Attacker {
                entity: self.player,
                origin: self.position,
                aim: input.controls.axis,
            };
            report.attack = self.resolver.trigger(
                &attacker,
                Some(&mut self.controller),
                &self.world,
                &mut self.targets,
                &mut report.combat,
            );
        }

        let steps = self.clock.advance(dt);
        let step = self.clock.step();
        for _ in 0..steps {
            let velocity = self.controller.fixed_tick(step, &mut report.movement);
            let (applied, contacts) =
                self.world
                    .move_box(self.body_bounds(), velocity * step, self.solid_mask);
            self.position += applied;

            // Feed contact-resolved velocity back before the next step.
            let mut resolved = velocity;
            if (contacts.floor && resolved.y < 0.0) || (contacts.ceiling && resolved.y > 0.0) {
                resolved.y = 0.0;
            }
            if contacts.wall {
                resolved.x = 0.0;
            }
            self.controller.absorb_contact_velocity(resolved);
        }
        report.fixed_steps = steps;
        report
    }

    fn update_targets(&mut self, dt: f32, defeated: &mut Vec<Entity>) {
        for (entity, target) in self.targets.iter_mut() {
            target.tick(dt);
            if target.is_dead() {
                defeated.push(*entity);
            }
        }
        for entity in defeated.iter() {
            self.targets.remove(*entity);
            self.world.remove_owner(*entity);
        }
    }
}
