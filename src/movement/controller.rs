//! Movement domain: the locomotion controller.
//!
//! Split into a per-frame tick (input edges, surface probes, vertical state,
//! timers) and a fixed-step tick (velocity integration). The controller
//! never moves the body itself; it returns the commanded velocity and the
//! caller hands it to whatever integrates positions.

use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;

use crate::core::EventSink;
use crate::movement::{Facing, MovementConfig, MovementEvent, VerticalState};
use crate::physics::SurfaceProbe;

/// Frames after a launch during which ground hits are ignored.
const GROUND_SUPPRESS_FRAMES: u8 = 2;
/// Upward speed above which an airborne body counts as rising.
const RISING_THRESHOLD: f32 = 0.01;
/// Leaving the ground slower than this vertically is a walk-off.
const LEDGE_START_MAX_VERTICAL_SPEED: f32 = 0.02;
/// |vy| band around the apex where horizontal assist applies.
const APEX_ASSIST_BAND: f32 = 1.5;
/// Upward speed below which the rise eases to a stop instead of decelerating.
const APEX_EASE_BAND: f32 = 2.0;
const SHORT_HOP_FACTOR: f32 = 0.55;
const MAX_RISE_FACTOR: f32 = 1.2;
const FACING_DEADZONE: f32 = 0.05;
const INPUT_EPSILON: f32 = 0.01;

/// Level and edge input for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionControls {
    /// Move axis; x drives locomotion, y is only used for attack aim.
    pub axis: Vec2,
    pub run_held: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    pub controls: LocomotionControls,
    /// True while any UI surface owns the input.
    pub gameplay_blocked: bool,
}

/// World-space bounds of the body and feet colliders for this frame.
#[derive(Debug, Clone, Copy)]
pub struct BodyColliders {
    pub body: Aabb2d,
    pub feet: Aabb2d,
}

/// External velocity override, issued by combat recoil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoilCommand {
    pub velocity: Vec2,
    pub duration: f32,
    pub override_x: bool,
    pub override_y: bool,
}

impl RecoilCommand {
    pub fn horizontal(speed: f32, duration: f32) -> Self {
        Self {
            velocity: Vec2::new(speed, 0.0),
            duration,
            override_x: true,
            override_y: false,
        }
    }

    pub fn vertical(speed: f32, duration: f32) -> Self {
        Self {
            velocity: Vec2::new(0.0, speed),
            duration,
            override_x: false,
            override_y: true,
        }
    }
}

/// Read-only snapshot for animation and debug consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    pub grounded: bool,
    pub vertical_state: VerticalState,
    pub vertical_state_id: u8,
    pub ledge_fall_easing: bool,
    pub facing: Facing,
    pub max_horizontal_speed: f32,
    /// |horizontal speed| / max horizontal speed, in [0, 1].
    pub normalized_horizontal_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JumpKind {
    Ground,
    Air,
}

/// Mutable locomotion state, kept apart from the config so both can be
/// borrowed at once.
#[derive(Debug, Clone, Default)]
struct Motor {
    velocity: Vec2,
    facing: Facing,
    vertical: VerticalState,
    grounded: bool,
    head_blocked: bool,

    coyote_timer: f32,
    jump_buffer_timer: f32,
    apex_timer: f32,
    recoil_timer: f32,
    ledge_fall_timer: f32,
    ledge_fall_active: bool,
    suppress_ground_frames: u8,
    air_jumps_used: u8,
    last_vertical_velocity: f32,
    // Components written outside the fixed tick since the last one ran.
    pending_x: bool,
    pending_y: bool,

    axis: Vec2,
    run_held: bool,
    jump_held: bool,
    inputs_suspended: bool,
}

#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    config: Option<MovementConfig>,
    motor: Motor,
    colliders_missing: bool,
    warned_missing_colliders: bool,
}

impl LocomotionController {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config: Some(config),
            motor: Motor::default(),
            colliders_missing: false,
            warned_missing_colliders: false,
        }
    }

    /// A controller that reports zero velocity and ignores every call.
    pub fn inert(reason: &str) -> Self {
        warn!("Locomotion controller disabled: {}", reason);
        Self {
            config: None,
            motor: Motor::default(),
            colliders_missing: false,
            warned_missing_colliders: false,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.config.is_none() || self.colliders_missing
    }

    pub fn config(&self) -> Option<&MovementConfig> {
        self.config.as_ref()
    }

    /// Per-frame tick: input edges, surface probes, vertical state, buffered
    /// jump consumption and timers.
    pub fn frame_tick<P, S>(
        &mut self,
        frame: &FrameInput,
        colliders: Option<&BodyColliders>,
        probe: &P,
        events: &mut S,
    ) where
        P: SurfaceProbe + ?Sized,
        S: EventSink<MovementEvent>,
    {
        let Some(config) = &self.config else {
            return;
        };
        let Some(colliders) = colliders else {
            if !self.warned_missing_colliders {
                warn!("Locomotion controller has no body/feet colliders; movement disabled");
                self.warned_missing_colliders = true;
            }
            self.colliders_missing = true;
            self.motor.velocity = Vec2::ZERO;
            return;
        };
        self.colliders_missing = false;

        let motor = &mut self.motor;
        motor.handle_gameplay_block(frame.gameplay_blocked);

        let controls = if motor.inputs_suspended {
            LocomotionControls::default()
        } else {
            frame.controls
        };
        motor.axis = controls.axis;
        motor.run_held = controls.run_held;
        if controls.jump_pressed {
            motor.on_jump_pressed(config, events);
        }
        if controls.jump_released {
            motor.release_jump(config);
        }
        motor.jump_held = controls.jump_held;

        motor.probe_surfaces(config, colliders, probe, events);
        motor.update_vertical_state(config);
        motor.try_consume_buffered_jump(config, events);
        motor.tick_timers(frame.dt);
    }

    /// Fixed-step integration. Returns the velocity to hand to the body.
    pub fn fixed_tick<S>(&mut self, dt: f32, events: &mut S) -> Vec2
    where
        S: EventSink<MovementEvent>,
    {
        let Some(config) = &self.config else {
            return Vec2::ZERO;
        };
        if self.colliders_missing {
            return Vec2::ZERO;
        }

        let motor = &mut self.motor;
        motor.try_consume_buffered_jump(config, events);
        motor.integrate_horizontal(config, dt);
        motor.integrate_vertical(config, dt);
        motor.last_vertical_velocity = motor.velocity.y;
        motor.pending_x = false;
        motor.pending_y = false;
        motor.velocity
    }

    /// Take the velocity the physics world resolved (landing, wall stops)
    /// before the next fixed tick. Components that jump input or a recoil
    /// set since the last fixed tick are newer than the solver's and win.
    pub fn absorb_contact_velocity(&mut self, velocity: Vec2) {
        if self.is_inert() {
            return;
        }
        let motor = &mut self.motor;
        if !motor.pending_x {
            motor.velocity.x = velocity.x;
        }
        if !motor.pending_y {
            motor.velocity.y = velocity.y;
        }
    }

    /// Override velocity components and lock horizontal control for the
    /// command's duration. Overlapping recoils keep the longer lock.
    pub fn apply_recoil(&mut self, command: RecoilCommand) {
        if self.is_inert() {
            return;
        }
        let motor = &mut self.motor;
        if command.override_x {
            motor.velocity.x = command.velocity.x;
            motor.pending_x = true;
        }
        if command.override_y {
            motor.velocity.y = command.velocity.y;
            motor.pending_y = true;
            if command.velocity.y > 0.0 {
                motor.grounded = false;
                motor.vertical = VerticalState::Rising;
                motor.apex_timer = 0.0;
                motor.end_ledge_fall();
            }
        }
        motor.recoil_timer = motor.recoil_timer.max(command.duration);
        debug!(
            "Recoil applied: velocity={:?}, lock={:.3}s",
            motor.velocity, motor.recoil_timer
        );
    }

    pub fn motion(&self) -> MotionState {
        let motor = &self.motor;
        let max_horizontal_speed = self
            .config
            .as_ref()
            .map_or(0.0, MovementConfig::max_horizontal_speed);
        let normalized_horizontal_speed = if max_horizontal_speed > 0.0 {
            (motor.velocity.x.abs() / max_horizontal_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        MotionState {
            horizontal_speed: motor.velocity.x,
            vertical_speed: motor.velocity.y,
            grounded: motor.grounded,
            vertical_state: motor.vertical,
            vertical_state_id: motor.vertical.id(),
            ledge_fall_easing: motor.ledge_fall_active,
            facing: motor.facing,
            max_horizontal_speed,
            normalized_horizontal_speed,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        if self.is_inert() {
            Vec2::ZERO
        } else {
            self.motor.velocity
        }
    }

    pub fn facing(&self) -> Facing {
        self.motor.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.motor.grounded
    }

    pub fn is_head_blocked(&self) -> bool {
        self.motor.head_blocked
    }

    pub fn vertical_state(&self) -> VerticalState {
        self.motor.vertical
    }

    pub fn air_jumps_used(&self) -> u8 {
        self.motor.air_jumps_used
    }

    pub fn coyote_timer(&self) -> f32 {
        self.motor.coyote_timer
    }

    pub fn jump_buffer_timer(&self) -> f32 {
        self.motor.jump_buffer_timer
    }

    pub fn recoil_timer(&self) -> f32 {
        self.motor.recoil_timer
    }

    pub fn is_ledge_fall_active(&self) -> bool {
        self.motor.ledge_fall_active
    }

    pub fn inputs_suspended(&self) -> bool {
        self.motor.inputs_suspended
    }
}

impl Motor {
    fn handle_gameplay_block(&mut self, blocked: bool) {
        if blocked == self.inputs_suspended {
            return;
        }
        self.inputs_suspended = blocked;
        if blocked {
            self.jump_held = false;
            self.jump_buffer_timer = 0.0;
            self.axis = Vec2::ZERO;
            self.run_held = false;
            debug!("Locomotion input suspended");
        } else {
            debug!("Locomotion input resumed");
        }
    }

    fn can_ground_jump(&self) -> bool {
        self.grounded || self.coyote_timer > 0.0
    }

    fn can_air_jump(&self, config: &MovementConfig) -> bool {
        !self.grounded && self.air_jumps_used < config.max_air_jumps
    }

    fn on_jump_pressed<S: EventSink<MovementEvent>>(
        &mut self,
        config: &MovementConfig,
        events: &mut S,
    ) {
        if self.can_ground_jump() {
            self.perform_jump(config, JumpKind::Ground, events);
        } else if self.can_air_jump(config) {
            self.perform_jump(config, JumpKind::Air, events);
        } else {
            self.jump_buffer_timer = config.jump_buffer_time;
            debug!("Jump buffered for {:.3}s", config.jump_buffer_time);
        }
    }

    fn try_consume_buffered_jump<S: EventSink<MovementEvent>>(
        &mut self,
        config: &MovementConfig,
        events: &mut S,
    ) {
        if self.jump_buffer_timer <= 0.0 {
            return;
        }
        if self.can_ground_jump() {
            self.perform_jump(config, JumpKind::Ground, events);
        } else if self.can_air_jump(config) {
            self.perform_jump(config, JumpKind::Air, events);
        }
    }

    fn perform_jump<S: EventSink<MovementEvent>>(
        &mut self,
        config: &MovementConfig,
        kind: JumpKind,
        events: &mut S,
    ) {
        self.jump_buffer_timer = 0.0;
        match kind {
            JumpKind::Ground => self.air_jumps_used = 0,
            JumpKind::Air => self.air_jumps_used += 1,
        }
        // Any jump consumes the coyote window.
        self.coyote_timer = 0.0;
        self.suppress_ground_frames = GROUND_SUPPRESS_FRAMES;
        self.grounded = false;
        self.vertical = VerticalState::Rising;
        self.apex_timer = 0.0;
        self.velocity.y = config.jump_velocity();
        self.pending_y = true;
        self.end_ledge_fall();

        debug!(
            "{:?} jump: vy={:.2}, air_jumps_used={}/{}",
            kind, self.velocity.y, self.air_jumps_used, config.max_air_jumps
        );
        events.emit(MovementEvent::Jumped);
    }

    /// Early release cuts the rise to a short hop. Never increases upward speed.
    fn release_jump(&mut self, config: &MovementConfig) {
        if self.vertical == VerticalState::Rising
            && self.velocity.y > config.min_release_up_velocity
        {
            self.velocity.y =
                (self.velocity.y * SHORT_HOP_FACTOR).max(config.min_release_up_velocity);
            self.pending_y = true;
        }
    }

    fn probe_surfaces<P, S>(
        &mut self,
        config: &MovementConfig,
        colliders: &BodyColliders,
        probe: &P,
        events: &mut S,
    ) where
        P: SurfaceProbe + ?Sized,
        S: EventSink<MovementEvent>,
    {
        let was_grounded = self.grounded;
        let mask = config.ground_mask();
        let feet = colliders.feet;
        let width = (feet.max.x - feet.min.x) * config.ground_probe_width_multiplier;

        let feet_origin = Vec2::new(feet.center().x, feet.min.y);
        let ground_hit = probe.cast_box(
            feet_origin,
            Vec2::new(width, config.ground_probe_distance),
            Dir2::NEG_Y,
            config.ground_probe_distance,
            mask,
        );
        self.grounded = ground_hit && self.suppress_ground_frames == 0;

        let body = colliders.body;
        let head_origin = Vec2::new(body.center().x, body.max.y);
        self.head_blocked = probe.cast_box(
            head_origin,
            Vec2::new(width, config.ceiling_probe_distance),
            Dir2::Y,
            config.ceiling_probe_distance,
            mask,
        );

        if was_grounded
            && !self.grounded
            && !self.ledge_fall_active
            && self.suppress_ground_frames == 0
            && self.velocity.y.abs() < LEDGE_START_MAX_VERTICAL_SPEED
        {
            self.ledge_fall_active = true;
            self.ledge_fall_timer = 0.0;
            debug!("Walked off ledge: easing gravity in");
        }
        if self.grounded && self.ledge_fall_active {
            self.end_ledge_fall();
        }

        if self.grounded && !was_grounded && self.last_vertical_velocity <= 0.0 {
            debug!("Landed: vy={:.2}", self.last_vertical_velocity);
            events.emit(MovementEvent::Landed);
        }
    }

    fn update_vertical_state(&mut self, config: &MovementConfig) {
        if self.grounded {
            self.vertical = VerticalState::Grounded;
            self.coyote_timer = config.coyote_time;
            self.air_jumps_used = 0;
            return;
        }

        self.vertical = if self.velocity.y > RISING_THRESHOLD {
            VerticalState::Rising
        } else {
            VerticalState::Falling
        };
        if self.vertical == VerticalState::Rising {
            self.end_ledge_fall();
        }
    }

    fn tick_timers(&mut self, dt: f32) {
        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }
        if !self.grounded && self.coyote_timer > 0.0 {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }
        self.suppress_ground_frames = self.suppress_ground_frames.saturating_sub(1);
    }

    fn integrate_horizontal(&mut self, config: &MovementConfig, dt: f32) {
        // Horizontal control is locked while a recoil plays out.
        if self.recoil_timer > 0.0 {
            self.recoil_timer = (self.recoil_timer - dt).max(0.0);
            return;
        }

        let base_speed = if self.run_held {
            config.run_speed
        } else {
            config.walk_speed
        };
        let target = self.axis.x * base_speed;
        let mut current = self.velocity.x;

        let mut apex_assist = 1.0;
        if self.vertical != VerticalState::Grounded && self.velocity.y.abs() < APEX_ASSIST_BAND {
            let t = 1.0 - (self.velocity.y.abs() / APEX_ASSIST_BAND).clamp(0.0, 1.0);
            apex_assist = 1.0 + config.apex_horizontal_assist * t;
        }

        let (accel, decel) = if self.grounded {
            (config.ground_acceleration, config.ground_deceleration)
        } else {
            (config.air_acceleration, config.air_deceleration)
        };

        let has_input = target.abs() > INPUT_EPSILON;
        let reversing = has_input
            && current.abs() > INPUT_EPSILON
            && target.signum() != current.signum();

        if reversing {
            current = move_towards(current, 0.0, decel * config.turn_decel_multiplier * dt);
            if current.abs() < INPUT_EPSILON {
                current = move_towards(current, target, accel * apex_assist * dt);
            }
        } else {
            let rate = if has_input { accel } else { decel };
            current = move_towards(current, target, rate * apex_assist * dt);
        }

        self.velocity.x = current.clamp(-base_speed, base_speed);

        if self.axis.x.abs() > FACING_DEADZONE {
            self.facing = Facing::from_sign(self.axis.x);
        }
    }

    fn integrate_vertical(&mut self, config: &MovementConfig, dt: f32) {
        if !self.grounded && self.vertical == VerticalState::Grounded {
            self.vertical = VerticalState::Falling;
        }

        let gravity = config.gravity();
        let mut vy = self.velocity.y;
        if self.head_blocked && vy > 0.0 {
            vy = 0.0;
        }

        match self.vertical {
            VerticalState::Rising => {
                if vy > 0.0 && vy < APEX_EASE_BAND {
                    self.apex_timer += dt;
                    let t = if config.apex_ease_time <= 0.0 {
                        1.0
                    } else {
                        (self.apex_timer / config.apex_ease_time).clamp(0.0, 1.0)
                    };
                    // Lerp toward zero over the ease window.
                    vy *= 1.0 - t;
                } else {
                    vy += gravity * dt;
                }
            }
            VerticalState::Falling => {
                let base = if self.jump_held {
                    1.0
                } else {
                    config.gravity_release_multiplier
                };
                let mut ease = 1.0;
                if self.ledge_fall_active {
                    let t = if config.ledge_walk_gravity_ramp_time <= 0.0 {
                        1.0
                    } else {
                        (self.ledge_fall_timer / config.ledge_walk_gravity_ramp_time)
                            .clamp(0.0, 1.0)
                    };
                    ease = smoothstep(config.ledge_walk_initial_gravity_multiplier, 1.0, t);
                    self.ledge_fall_timer += dt;
                    if t >= 1.0 {
                        self.end_ledge_fall();
                    }
                }
                vy += gravity * base * ease * dt;
            }
            VerticalState::Grounded => {
                if vy < 0.0 {
                    vy = 0.0;
                }
            }
        }

        // Early release pulls a rising jump down harder.
        if !self.jump_held && self.vertical == VerticalState::Rising {
            vy += gravity * (config.gravity_release_multiplier - 1.0) * dt;
        }

        let max_down = if self.jump_held {
            config.max_fall_speed
        } else {
            config.fast_fall_speed
        };
        let max_up = config.jump_velocity() * MAX_RISE_FACTOR;
        self.velocity.y = vy.max(-max_down).min(max_up);
    }

    fn end_ledge_fall(&mut self) {
        self.ledge_fall_active = false;
        self.ledge_fall_timer = 0.0;
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Hermite interpolation from `from` to `to`.
fn smoothstep(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    from + (to - from) * t
}
