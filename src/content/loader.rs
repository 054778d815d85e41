//! Loader for RON/JSON tuning files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::combat::AttackTuning;
use crate::movement::MovementConfig;

/// Error type for tuning load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format '{0}' (expected .ron or .json)")]
    UnsupportedFormat(String),
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A tuning type that lives in its own file under the config directory.
pub trait TuningFile: for<'de> serde::Deserialize<'de> + Default {
    const FILE_NAME: &'static str;

    fn validate(&self) -> Result<(), ConfigError>;
}

impl TuningFile for MovementConfig {
    const FILE_NAME: &'static str = "movement.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        MovementConfig::validate(self)
    }
}

impl TuningFile for AttackTuning {
    const FILE_NAME: &'static str = "attack.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        AttackTuning::validate(self)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_ron<T>(contents: &str) -> Result<T, ConfigError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    Ok(ron_options().from_str(contents)?)
}

pub fn parse_json<T>(contents: &str) -> Result<T, ConfigError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    Ok(serde_json::from_str(contents)?)
}

/// Read a file and deserialize it according to its extension.
pub fn load_config_file<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if extension != "ron" && extension != "json" {
        return Err(ConfigError::UnsupportedFormat(extension.to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    if extension == "ron" {
        parse_ron(&contents)
    } else {
        parse_json(&contents)
    }
}

/// Load and validate one tuning file.
pub fn load_tuning<T: TuningFile>(path: &Path) -> Result<T, ConfigError> {
    let tuning: T = load_config_file(path)?;
    tuning.validate()?;
    Ok(tuning)
}
