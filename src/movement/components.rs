//! Movement domain: components and small state enums for locomotion.

use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Child collider used as the feet reference for ground probes.
#[derive(Component, Debug)]
pub struct Feet;

/// Links the player body to its feet collider entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerColliders {
    pub feet: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn from_sign(x: f32) -> Self {
        if x < 0.0 { Facing::Left } else { Facing::Right }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Vertical phase of the character. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalState {
    #[default]
    Grounded,
    Rising,
    Falling,
}

impl VerticalState {
    /// Stable numeric id for animation parameters.
    pub fn id(self) -> u8 {
        match self {
            VerticalState::Grounded => 0,
            VerticalState::Rising => 1,
            VerticalState::Falling => 2,
        }
    }
}
