//! Diagnostics collected while a build runs.

use serde::Serialize;

/// Severity level for a diagnostic message.
///
/// Fatal problems are returned as errors and never recorded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// A soft mismatch; the run continues.
    Warning,
    /// Progress information.
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message raised by one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the phase that raised it.
    pub phase: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let diag = Diagnostic::warning("collect", "ignoring notes.txt");
        assert!(diag.severity.is_warning());
        assert_eq!(diag.phase, "collect");
        assert_eq!(diag.to_string(), "warning: ignoring notes.txt");
    }

    #[test]
    fn test_info_is_not_a_warning() {
        let diag = Diagnostic::info("parse", "2 declarations, 0 instances");
        assert!(!diag.severity.is_warning());
        assert_eq!(diag.to_string(), "info: 2 declarations, 0 instances");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
