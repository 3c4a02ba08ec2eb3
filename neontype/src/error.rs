use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop the app
#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(ConfigError),

    #[error("Failed to start a game: {0}")]
    Game(keyflux::Error),

    #[error("Terminal error: {0}")]
    Io(std::io::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(Box<dyn std::error::Error + Send + Sync>),
}
