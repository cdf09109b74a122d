//! Core error type.
//!
//! Only the settings loader can fail inside this crate; higher crates keep
//! their own error enums (`VariableError`, `ActionError`, `ConfigError`, …).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("settings parse error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `mascot-core`.
pub type CoreResult<T> = Result<T, CoreError>;
