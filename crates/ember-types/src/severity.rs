//! Output line severity.

/// Severity of a console output line.
///
/// Hosts may route each severity to a different surface (colors in the
/// overlay, levels in the external logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Short lowercase label, used by text sinks.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}
