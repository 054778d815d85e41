//! Content domain: tuning files loaded once per session.

mod loader;
mod validation;

pub use loader::{
    ConfigError, TuningFile, load_config_file, load_tuning, parse_json, parse_ron,
};
pub(crate) use validation::{in_range, positive};

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use crate::combat::AttackTuning;
use crate::movement::MovementConfig;

pub const DEFAULT_CONFIG_DIR: &str = "assets/config";

/// Directory the tuning files are read from.
#[derive(Resource, Debug, Clone)]
pub struct ConfigDir(pub PathBuf);

impl Default for ConfigDir {
    fn default() -> Self {
        Self(PathBuf::from(DEFAULT_CONFIG_DIR))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigDir>()
            .add_systems(PreStartup, load_gameplay_config);
    }
}

/// Load every tuning file before anything spawns.
fn load_gameplay_config(mut commands: Commands, dir: Res<ConfigDir>) {
    let movement: MovementConfig = load_or_default(&dir.0);
    info!(
        "Movement tuning: jump height={}, gravity={:.2}, jump velocity={:.2}, air jumps={}",
        movement.jump.height(),
        movement.gravity(),
        movement.jump_velocity(),
        movement.max_air_jumps
    );
    commands.insert_resource(movement);

    let attack: AttackTuning = load_or_default(&dir.0);
    commands.insert_resource(attack);
}

/// Load `T` from `dir`, falling back to its built-in defaults on any error.
pub fn load_or_default<T: TuningFile>(dir: &Path) -> T {
    let path = dir.join(T::FILE_NAME);
    match load_tuning::<T>(&path) {
        Ok(tuning) => {
            info!("Loaded {}", path.display());
            tuning
        }
        Err(e) => {
            warn!("{}: {}; using built-in defaults", path.display(), e);
            T::default()
        }
    }
}
