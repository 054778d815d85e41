//! Movement domain: system modules for locomotion updates.

pub(crate) mod input;
pub(crate) mod locomotion;

pub(crate) use input::read_input;
pub(crate) use locomotion::{locomotion_fixed, locomotion_frame, log_movement_events, to_aabb};
