//! Core domain: shared resources for gameplay suspension.

use bevy::prelude::*;
use std::collections::HashSet;

/// Window id the sandbox uses for its pause overlay.
pub const PAUSE_WINDOW: &str = "pause_menu";

/// Resource tracking which open UI windows block gameplay input.
/// Gameplay is blocked if any blocking window is open.
#[derive(Resource, Debug, Default)]
pub struct GameplayBlock {
    pub windows: HashSet<String>,
}

impl GameplayBlock {
    pub fn is_blocked(&self) -> bool {
        !self.windows.is_empty()
    }

    pub fn open(&mut self, window: impl Into<String>) {
        self.windows.insert(window.into());
    }

    pub fn close(&mut self, window: &str) {
        self.windows.remove(window);
    }

    /// Open the window if it is closed, close it otherwise. Returns the new open state.
    pub fn toggle(&mut self, window: &str) -> bool {
        if self.windows.remove(window) {
            false
        } else {
            self.windows.insert(window.to_string());
            true
        }
    }
}
