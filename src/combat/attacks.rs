//! Combat domain: attack direction selection and hitbox geometry.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::AttackTuning;
use crate::movement::Facing;

/// Aim below this pulls a down attack (airborne only).
const AIM_DOWN_THRESHOLD: f32 = -0.3;
/// Aim above this pulls an up attack.
const AIM_UP_THRESHOLD: f32 = 0.3;
/// Horizontal aim beyond this overrides facing.
const AIM_SIDE_THRESHOLD: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackDirection {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl AttackDirection {
    /// Pick a direction from the aim axis at the moment of the press.
    pub fn choose(aim: Vec2, grounded: bool, facing: Facing) -> Self {
        if aim.y < AIM_DOWN_THRESHOLD && !grounded {
            AttackDirection::Down
        } else if aim.y > AIM_UP_THRESHOLD {
            AttackDirection::Up
        } else if aim.x.abs() > AIM_SIDE_THRESHOLD {
            if aim.x > 0.0 {
                AttackDirection::Right
            } else {
                AttackDirection::Left
            }
        } else {
            match facing {
                Facing::Right => AttackDirection::Right,
                Facing::Left => AttackDirection::Left,
            }
        }
    }

    /// Get the offset vector for hitbox placement
    pub fn to_offset(self, distance: f32) -> Vec2 {
        match self {
            AttackDirection::Up => Vec2::new(0.0, distance),
            AttackDirection::Down => Vec2::new(0.0, -distance),
            AttackDirection::Left => Vec2::new(-distance, 0.0),
            AttackDirection::Right => Vec2::new(distance, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, AttackDirection::Left | AttackDirection::Right)
    }

    /// World-space query box for an attack from `origin`.
    pub fn query_area(self, origin: Vec2, tuning: &AttackTuning) -> Aabb2d {
        let shape = match self {
            AttackDirection::Up => tuning.up,
            AttackDirection::Down => tuning.down,
            AttackDirection::Left | AttackDirection::Right => tuning.horizontal,
        };
        Aabb2d::new(origin + self.to_offset(shape.offset), shape.size() * 0.5)
    }
}
