//! Console configuration.

use ember_types::error::Result;
use serde::Deserialize;

/// Default input-history capacity.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
/// Default transcript capacity (lines kept for the overlay).
pub const DEFAULT_TRANSCRIPT_LIMIT: usize = 500;

/// Tunables for a [`crate::Console`], loadable from `console.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Maximum number of input-history entries to retain.
    pub history_limit: usize,
    /// Maximum number of transcript lines to retain.
    pub transcript_limit: usize,
    /// Pop the console open when an error line is written.
    pub show_on_error: bool,
    /// Prefix echoed before each submitted command.
    pub prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            transcript_limit: DEFAULT_TRANSCRIPT_LIMIT,
            show_on_error: false,
            prompt: "> ".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a TOML document; missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
