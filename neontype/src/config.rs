use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use keyflux::{Configuration, Difficulty};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

pub use theme::Theme;

/// Prefix of environment variables that override settings, e.g. `NEONTYPE_TIME_LIMIT=30`
pub const ENV_PREFIX: &str = "NEONTYPE_";

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Countdown length in seconds
    pub time_limit: u32,
    /// Words kept in the rolling window
    pub word_count: usize,
    /// Fixed seed for the word generator. Random when unset.
    pub seed: Option<u64>,
    /// Ring the terminal bell on mistakes
    pub bell: bool,
    /// How long feedback flashes stay visible
    pub flash_millis: u64,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        let config = Configuration::default();
        Self {
            difficulty: config.difficulty(),
            time_limit: config.time_limit_seconds(),
            word_count: config.word_count(),
            seed: None,
            bell: false,
            flash_millis: 150,
            theme: Theme::default(),
        }
    }
}

/// Settings given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Invalid game settings: {0}")]
    Invalid(keyflux::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
}

impl Settings {
    /// Load settings from every layer, lowest priority first:
    /// defaults, `settings.toml` in the config directory, environment, command line.
    pub fn load(override_dir: Option<PathBuf>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let config_dir = override_dir
            .or_else(|| {
                ProjectDirs::from("com", "NeonType", "NeonType")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings: Self = Self::figment(&config_dir, overrides)
            .extract()
            .map_err(Box::new)?;

        // Reject unusable values here instead of when the first game starts
        settings.configuration()?;

        Ok(settings)
    }

    fn figment(config_dir: &Path, overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_dir.join(SETTINGS_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
    }

    /// Engine configuration for these settings
    pub fn configuration(&self) -> Result<Configuration, keyflux::Error> {
        Configuration::new(self.difficulty, self.time_limit, self.word_count)
    }

    /// The effective settings as a TOML document
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
