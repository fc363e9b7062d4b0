//! Configuration loading errors.

use super::error_code::{self, TiendaErrorCode};

/// Errors raised while loading or parsing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse config: {message}")]
    Parse { message: String },
}

impl TiendaErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CONFIG_IO,
            Self::Parse { .. } => error_code::CONFIG_PARSE,
        }
    }
}
