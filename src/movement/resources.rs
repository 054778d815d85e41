//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::{ConfigError, in_range, positive};
use crate::physics::{GameLayer, layer_bits};

/// Jump arc authored as height and time-to-apex.
///
/// Gravity and launch velocity are derived and only ever stored alongside the
/// inputs they were computed from. Serialization carries the two inputs
/// only, so a deserialized arc is always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "JumpArcSpec", into = "JumpArcSpec")]
pub struct JumpArc {
    height: f32,
    time_to_apex: f32,
    gravity: f32,
    velocity: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct JumpArcSpec {
    height: f32,
    time_to_apex: f32,
}

impl From<JumpArcSpec> for JumpArc {
    fn from(spec: JumpArcSpec) -> Self {
        JumpArc::new(spec.height, spec.time_to_apex)
    }
}

impl From<JumpArc> for JumpArcSpec {
    fn from(arc: JumpArc) -> Self {
        JumpArcSpec {
            height: arc.height,
            time_to_apex: arc.time_to_apex,
        }
    }
}

impl Default for JumpArc {
    fn default() -> Self {
        JumpArc::new(6.0, 0.32)
    }
}

impl JumpArc {
    pub fn new(height: f32, time_to_apex: f32) -> Self {
        let mut arc = Self {
            height,
            time_to_apex,
            gravity: 0.0,
            velocity: 0.0,
        };
        arc.recalculate();
        arc
    }

    /// Recompute gravity and launch velocity from height and time-to-apex.
    /// Uses the constant-acceleration arc: g = -2h / t², v = |g| t.
    pub fn recalculate(&mut self) {
        self.gravity = -(2.0 * self.height) / (self.time_to_apex * self.time_to_apex);
        self.velocity = self.gravity.abs() * self.time_to_apex;
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn time_to_apex(&self) -> f32 {
        self.time_to_apex
    }

    /// Signed gravity (negative, world units/s²).
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Upward launch velocity that reaches `height` in `time_to_apex`.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.recalculate();
    }

    pub fn set_time_to_apex(&mut self, time_to_apex: f32) {
        self.time_to_apex = time_to_apex;
        self.recalculate();
    }
}

/// Locomotion tuning. Loaded once per session and read-only afterwards.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // Horizontal
    pub walk_speed: f32,
    pub run_speed: f32,
    pub ground_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_acceleration: f32,
    pub air_deceleration: f32,
    /// Extra horizontal control near the apex of a jump (0 = none, 1 = double)
    pub apex_horizontal_assist: f32,
    /// Deceleration multiplier while reversing direction
    pub turn_decel_multiplier: f32,

    // Jump
    pub jump: JumpArc,
    /// Gravity multiplier when falling or when jump is released early
    pub gravity_release_multiplier: f32,
    /// Maximum air jumps (0 = no double jump, 1 = double jump, ...)
    pub max_air_jumps: u8,
    pub min_release_up_velocity: f32,
    pub max_fall_speed: f32,
    pub fast_fall_speed: f32,

    // Ledge fall ease
    pub ledge_walk_initial_gravity_multiplier: f32,
    pub ledge_walk_gravity_ramp_time: f32,

    // Timing windows (seconds)
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub apex_ease_time: f32,

    // Environment probes
    pub ground_layers: Vec<GameLayer>,
    pub ground_probe_distance: f32,
    pub ceiling_probe_distance: f32,
    pub ground_probe_width_multiplier: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 10.0,
            run_speed: 16.0,
            ground_acceleration: 120.0,
            ground_deceleration: 80.0,
            air_acceleration: 60.0,
            air_deceleration: 55.0,
            apex_horizontal_assist: 0.65,
            turn_decel_multiplier: 2.0,
            jump: JumpArc::default(),
            gravity_release_multiplier: 2.2,
            max_air_jumps: 0, // No double jump by default
            min_release_up_velocity: 4.0,
            max_fall_speed: 28.0,
            fast_fall_speed: 34.0,
            ledge_walk_initial_gravity_multiplier: 0.2,
            ledge_walk_gravity_ramp_time: 0.25,
            coyote_time: 0.1,
            jump_buffer_time: 0.12,
            apex_ease_time: 0.08,
            ground_layers: vec![GameLayer::Ground],
            ground_probe_distance: 0.06,
            ceiling_probe_distance: 0.06,
            ground_probe_width_multiplier: 0.9,
        }
    }
}

/// Upper bound on authored air jumps.
pub const MAX_AIR_JUMPS_LIMIT: u8 = 4;

impl MovementConfig {
    pub fn gravity(&self) -> f32 {
        self.jump.gravity()
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump.velocity()
    }

    pub fn ground_mask(&self) -> u32 {
        layer_bits(&self.ground_layers)
    }

    /// Fastest authored horizontal speed, used to normalize animation input.
    pub fn max_horizontal_speed(&self) -> f32 {
        self.walk_speed.max(self.run_speed)
    }

    /// Maximum height reachable with all available jumps, assuming each air
    /// jump is taken at the apex of the previous one.
    pub fn max_reachable_height(&self) -> f32 {
        self.jump.height() * (1.0 + self.max_air_jumps as f32)
    }

    /// Check every tunable against its authored range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        in_range("walk_speed", self.walk_speed, 1.0, 40.0)?;
        in_range("run_speed", self.run_speed, 1.0, 40.0)?;
        in_range("ground_acceleration", self.ground_acceleration, 1.0, 200.0)?;
        in_range("ground_deceleration", self.ground_deceleration, 1.0, 200.0)?;
        in_range("air_acceleration", self.air_acceleration, 1.0, 200.0)?;
        in_range("air_deceleration", self.air_deceleration, 1.0, 200.0)?;
        in_range("apex_horizontal_assist", self.apex_horizontal_assist, 0.0, 1.0)?;
        in_range("turn_decel_multiplier", self.turn_decel_multiplier, 1.0, 4.0)?;
        positive("jump.height", self.jump.height())?;
        positive("jump.time_to_apex", self.jump.time_to_apex())?;
        in_range(
            "gravity_release_multiplier",
            self.gravity_release_multiplier,
            1.0,
            5.0,
        )?;
        if self.max_air_jumps > MAX_AIR_JUMPS_LIMIT {
            return Err(ConfigError::Invalid {
                field: "max_air_jumps",
                reason: format!(
                    "{} exceeds the limit of {}",
                    self.max_air_jumps, MAX_AIR_JUMPS_LIMIT
                ),
            });
        }
        in_range("min_release_up_velocity", self.min_release_up_velocity, 0.0, f32::MAX)?;
        in_range("max_fall_speed", self.max_fall_speed, 0.0, 50.0)?;
        in_range("fast_fall_speed", self.fast_fall_speed, 0.0, 60.0)?;
        in_range(
            "ledge_walk_initial_gravity_multiplier",
            self.ledge_walk_initial_gravity_multiplier,
            0.0,
            1.0,
        )?;
        in_range(
            "ledge_walk_gravity_ramp_time",
            self.ledge_walk_gravity_ramp_time,
            0.0,
            0.6,
        )?;
        in_range("coyote_time", self.coyote_time, 0.0, 0.25)?;
        in_range("jump_buffer_time", self.jump_buffer_time, 0.0, 0.25)?;
        in_range("apex_ease_time", self.apex_ease_time, 0.0, 0.3)?;
        positive("ground_probe_distance", self.ground_probe_distance)?;
        positive("ceiling_probe_distance", self.ceiling_probe_distance)?;
        in_range(
            "ground_probe_width_multiplier",
            self.ground_probe_width_multiplier,
            f32::EPSILON,
            1.0,
        )?;
        if self.ground_layers.is_empty() {
            return Err(ConfigError::Invalid {
                field: "ground_layers",
                reason: "at least one layer is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Keyboard sample for the current frame.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub run_held: bool,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub jump_held: bool,
}
