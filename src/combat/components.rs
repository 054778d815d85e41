//! Combat domain: components for sandbox targets.

use bevy::prelude::*;

/// Marks a practice target spawned into the test room
#[derive(Component, Debug)]
pub struct TargetDummy;

/// Sprite tint swapped in while a target is invincible after a hit.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitTint {
    pub base: Color,
    pub flash: Color,
}

impl HitTint {
    pub fn new(base: Color) -> Self {
        Self {
            base,
            flash: Color::srgb(1.0, 0.5, 0.5),
        }
    }
}
