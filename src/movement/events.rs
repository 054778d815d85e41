//! Movement domain: locomotion notifications.

use bevy::prelude::*;

/// Emitted by the locomotion controller when a jump starts or the body lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementEvent {
    Jumped,
    Landed,
}

impl Message for MovementEvent {}
