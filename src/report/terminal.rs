//! Terminal reporter with colored output
//!
//! Based on Rust compiler diagnostic design (RFC 1644)

use super::colors::{SeveritySymbol, StructureColors};
use super::Summary;
use crate::analysis::{Diagnostic, FileReport, Linter, Severity};
use colored::Colorize;
use std::fmt::Write;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Mark diagnostics that carry a fix
    show_fixable: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_fixable: true }
    }

    pub fn with_fixable(mut self, show: bool) -> Self {
        self.show_fixable = show;
        self
    }

    pub fn report(&self, linter: &Linter, reports: &[FileReport]) {
        print!("{}", self.render(linter, reports));
    }

    pub fn render(&self, linter: &Linter, reports: &[FileReport]) -> String {
        let summary = Summary::from_reports(reports);
        let mut out = String::new();

        if summary.total() == 0 {
            let _ = writeln!(
                out,
                "{} ({} files checked)",
                "No problems found!".green().bold(),
                summary.files
            );
            return out;
        }

        // Files come in discovery order, which is already sorted
        for report in reports.iter().filter(|r| !r.diagnostics.is_empty()) {
            let _ = writeln!(
                out,
                "{}",
                StructureColors::file_path(&report.path.display().to_string())
            );
            for diagnostic in &report.diagnostics {
                self.write_item(&mut out, linter, diagnostic);
            }
            out.push('\n');
        }

        self.write_summary(&mut out, &summary);
        out
    }

    fn write_item(&self, out: &mut String, linter: &Linter, diagnostic: &Diagnostic) {
        let location = format!(
            "{:>5}:{:<3}",
            diagnostic.span.start.line, diagnostic.span.start.column
        );
        let message = match linter.meta(diagnostic.rule) {
            Some(meta) => diagnostic.message(meta),
            None => diagnostic.message_id.to_string(),
        };
        let fixable = if self.show_fixable && diagnostic.fix.is_some() {
            format!(" {}", StructureColors::fixable("(fixable)"))
        } else {
            String::new()
        };

        let _ = writeln!(
            out,
            "  {} {} {:<7} [{}] {}{}",
            StructureColors::location(&location),
            SeveritySymbol::colored(diagnostic.severity),
            SeveritySymbol::label(diagnostic.severity),
            StructureColors::rule_id(diagnostic.rule),
            message,
            fixable
        );
    }

    fn write_summary(&self, out: &mut String, summary: &Summary) {
        let symbol = if summary.errors > 0 {
            SeveritySymbol::colored(Severity::Error)
        } else {
            SeveritySymbol::colored(Severity::Warning)
        };
        let _ = writeln!(
            out,
            "{} {} problems ({} errors, {} warnings, {} info) in {} files",
            symbol,
            StructureColors::count(&summary.total().to_string()),
            summary.errors,
            summary.warnings,
            summary.infos,
            summary.files
        );
        if self.show_fixable && summary.fixable > 0 {
            let _ = writeln!(
                out,
                "  {} potentially fixable",
                StructureColors::fixable(&summary.fixable.to_string())
            );
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
