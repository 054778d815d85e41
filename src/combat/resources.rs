//! Combat domain: attack tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::{ConfigError, in_range, positive};
use crate::physics::{GameLayer, layer_bits};

/// Size and forward offset of one attack's query box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackShape {
    pub width: f32,
    pub height: f32,
    pub offset: f32,
}

impl AttackShape {
    pub const fn new(width: f32, height: f32, offset: f32) -> Self {
        Self {
            width,
            height,
            offset,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// How down/up attacks decide whether a candidate is on the attacked side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalFilter {
    /// Candidate bounds center must lie beyond the attacker's y.
    #[default]
    Center,
    /// The candidate's nearest bounds edge must lie beyond the attacker's y.
    Edge,
    Off,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    pub cooldown: f32,
    pub damage: i32,
    pub hittable_layers: Vec<GameLayer>,

    pub horizontal: AttackShape,
    pub down: AttackShape,
    pub up: AttackShape,

    // Recoil
    pub horizontal_recoil_speed: f32,
    pub horizontal_recoil_duration: f32,
    pub pogo_speed: f32,
    pub pogo_duration: f32,
    /// Let targets that opt in raise the pogo speed
    pub respect_upward_force: bool,
    /// Horizontal recoil never exceeds pogo speed times this ratio
    pub horizontal_recoil_ratio: f32,

    // Hit filtering
    pub hit_buffer_capacity: usize,
    pub vertical_filter: VerticalFilter,
    pub vertical_filter_tolerance: f32,

    /// How long the last attack box stays visible in debug overlays
    pub debug_visual_time: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            cooldown: 0.25,
            damage: 1,
            hittable_layers: vec![GameLayer::Enemy],
            horizontal: AttackShape::new(1.4, 1.0, 0.9),
            down: AttackShape::new(1.0, 1.0, 0.9),
            up: AttackShape::new(1.0, 1.0, 0.9),
            horizontal_recoil_speed: 12.0,
            horizontal_recoil_duration: 0.08,
            pogo_speed: 22.0,
            pogo_duration: 0.04,
            respect_upward_force: true,
            horizontal_recoil_ratio: 0.5,
            hit_buffer_capacity: 8,
            vertical_filter: VerticalFilter::Center,
            vertical_filter_tolerance: 0.05,
            debug_visual_time: 0.12,
        }
    }
}

impl AttackTuning {
    pub fn hittable_mask(&self) -> u32 {
        layer_bits(&self.hittable_layers)
    }

    /// Horizontal recoil speed after the ratio cap against pogo speed.
    pub fn capped_horizontal_recoil(&self) -> f32 {
        self.horizontal_recoil_speed
            .min(self.pogo_speed * self.horizontal_recoil_ratio)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        in_range("cooldown", self.cooldown, 0.02, 0.6)?;
        for (field, shape) in [
            ("horizontal", &self.horizontal),
            ("down", &self.down),
            ("up", &self.up),
        ] {
            positive(field, shape.width)?;
            positive(field, shape.height)?;
        }
        in_range("horizontal_recoil_ratio", self.horizontal_recoil_ratio, 0.0, 1.0)?;
        in_range(
            "vertical_filter_tolerance",
            self.vertical_filter_tolerance,
            0.0,
            1.0,
        )?;
        in_range("debug_visual_time", self.debug_visual_time, 0.0, 0.5)?;
        if self.hit_buffer_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "hit_buffer_capacity",
                reason: "must hold at least one hit".to_string(),
            });
        }
        if self.hittable_layers.is_empty() {
            return Err(ConfigError::Invalid {
                field: "hittable_layers",
                reason: "at least one layer is required".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub attack_pressed: bool,
}
