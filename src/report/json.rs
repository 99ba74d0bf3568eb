//! JSON reporter for machine-readable output

use super::Summary;
use crate::analysis::{Diagnostic, FileReport, Fix, Linter, Severity};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    files: Vec<JsonFile<'a>>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a Path,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic<'a> {
    rule: &'static str,
    severity: Severity,
    message_id: &'static str,
    message: String,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<&'a Fix>,
}

impl<'a> JsonDiagnostic<'a> {
    fn new(linter: &Linter, diagnostic: &'a Diagnostic) -> Self {
        let message = match linter.meta(diagnostic.rule) {
            Some(meta) => diagnostic.message(meta),
            None => diagnostic.message_id.to_string(),
        };
        Self {
            rule: diagnostic.rule,
            severity: diagnostic.severity,
            message_id: diagnostic.message_id,
            message,
            line: diagnostic.span.start.line,
            column: diagnostic.span.start.column,
            end_line: diagnostic.span.end.line,
            end_column: diagnostic.span.end.column,
            fix: diagnostic.fix.as_ref(),
        }
    }
}

pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn render(&self, linter: &Linter, reports: &[FileReport]) -> Result<String> {
        let output = JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            files: reports
                .iter()
                .map(|report| JsonFile {
                    path: &report.path,
                    diagnostics: report
                        .diagnostics
                        .iter()
                        .map(|d| JsonDiagnostic::new(linter, d))
                        .collect(),
                })
                .collect(),
            summary: Summary::from_reports(reports),
        };

        serde_json::to_string_pretty(&output)
            .into_diagnostic()
            .wrap_err("failed to serialize report")
    }

    pub fn report(&self, linter: &Linter, reports: &[FileReport]) -> Result<()> {
        let json = self.render(linter, reports)?;

        match &self.output_path {
            Some(path) => {
                std::fs::write(path, json)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                tracing::info!("report written to {}", path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}
