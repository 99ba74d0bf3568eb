mod colors;
mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::{FileReport, Linter, Severity};
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Colored, grouped per file
    #[default]
    Terminal,
    /// JSON machine-readable format
    Json,
}

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub fixable: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files: reports.len(),
            ..Self::default()
        };
        for diagnostic in reports.iter().flat_map(|r| &r.diagnostics) {
            match diagnostic.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
            if diagnostic.fix.is_some() {
                summary.fixable += 1;
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

/// Reporter for outputting lint results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    /// Report the findings. `linter` supplies the message templates.
    pub fn report(&self, linter: &Linter, reports: &[FileReport]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new().report(linter, reports);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(linter, reports),
        }
    }
}
