//! Error types for the Ember console.

use std::io;

/// Errors produced by the console dispatch core.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// No registered command matches the entered name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Commands with the entered name exist, but none takes this many
    /// parameters.
    #[error("the amount of parameters doesn't match for '{0}'")]
    ArityMismatch(String),

    /// A string token could not be converted to the declared parameter kind.
    #[error("failed to cast '{value}' to '{kind}' (for parameter '{name}')")]
    Conversion {
        /// The offending token.
        value: String,
        /// Name of the target parameter kind.
        kind: String,
        /// Name of the parameter being filled.
        name: String,
    },

    /// A handler received arguments that don't match its expectations
    /// (wrong count or wrong kind at the call boundary).
    #[error("parameters are invalid")]
    InvalidParameters,

    /// The command handler itself failed.
    #[error("{0}")]
    Invocation(String),

    /// A command definition was rejected during module indexing.
    #[error("invalid command definition: {0}")]
    Definition(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
