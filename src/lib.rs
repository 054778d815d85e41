//! Platformer locomotion and directional melee core, with bevy/avian2d
//! adapters for the sandbox binary.

pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod movement;
pub mod physics;
