//! Centralized color scheme for consistent output formatting
//!
//! Based on Rust compiler diagnostics design (RFC 1644)

use crate::analysis::Severity;
use colored::{ColoredString, Colorize};

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    /// File path header
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Line/column numbers
    pub fn location(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Rule id, e.g. `no-self-compare`
    pub fn rule_id(text: &str) -> ColoredString {
        text.magenta()
    }

    /// Count/statistics numbers
    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }

    pub fn fixable(text: &str) -> ColoredString {
        text.green()
    }
}

/// Severity symbols for compact display
pub struct SeveritySymbol;

impl SeveritySymbol {
    pub fn error() -> &'static str {
        "✖"
    }

    pub fn warning() -> &'static str {
        "⚠"
    }

    pub fn info() -> &'static str {
        "ℹ"
    }

    pub fn colored(severity: Severity) -> ColoredString {
        match severity {
            Severity::Error => Self::error().red().bold(),
            Severity::Warning => Self::warning().yellow(),
            Severity::Info => Self::info().blue(),
        }
    }

    /// Severity word colored like its symbol
    pub fn label(severity: Severity) -> ColoredString {
        match severity {
            Severity::Error => severity.as_str().red(),
            Severity::Warning => severity.as_str().yellow(),
            Severity::Info => severity.as_str().blue(),
        }
    }
}
