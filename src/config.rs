//! Run configuration
//!
//! An optional `elfventure.toml` next to the binary supplies the world
//! file, position-store file, and finish location; command-line flags
//! override it. A missing file means defaults (the file layout of the
//! original game); a malformed file is a startup-fatal error just like a
//! malformed world.
//!
//! ```toml
//! world = "custom.json"
//! positions = "location.json"
//! finish = "Hobbs' Apartment"
//! # seed = 1234        # fixed start-room choice, for reproducible runs
//! ```

use log::debug;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "elfventure.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the world JSON document.
    pub world: String,
    /// Path of the per-user position store.
    pub positions: String,
    /// Name of the location that ends the game.
    pub finish: String,
    /// Fixed RNG seed for the start-room choice. Unset means uniform.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            world: "custom.json".to_string(),
            positions: "location.json".to_string(),
            finish: "Hobbs' Apartment".to_string(),
            seed: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {e}"),
            ConfigError::Parse(msg) => write!(f, "malformed config file: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load the config file if it exists, falling back to defaults when it
    /// does not. A present-but-broken file is an error, not a fallback.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("loading config from {}", path.display());
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no config file at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}
