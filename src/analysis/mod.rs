// Analysis module - diagnostics produced by the detectors and the host that runs them

pub mod ast;
pub mod detectors;
mod linter;

pub use linter::{FileReport, Linter};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use tree_sitter::Node;

/// Severity levels for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 1-based line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Source span of the node a diagnostic is anchored at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn of(node: Node<'_>) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start: Position {
                line: start.row + 1,
                column: start.column + 1,
            },
            end: Position {
                line: end.row + 1,
                column: end.column + 1,
            },
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }
}

/// A candidate source replacement. Never applied by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Fix {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Static description of a rule: its id and message templates
#[derive(Debug)]
pub struct RuleMeta {
    pub id: &'static str,
    pub description: &'static str,
    pub fixable: bool,
    pub default_severity: Severity,
    /// `messageId -> template`, placeholders written as `{{name}}`
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    pub fn template(&self, message_id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
    }
}

/// A finding reported by a detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: &'static str,
    /// Grammar kind of the anchor node
    pub node_kind: &'static str,
    pub span: Span,
    pub message_id: &'static str,
    pub data: BTreeMap<String, String>,
    pub severity: Severity,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(rule: &'static str, node: Node<'_>, message_id: &'static str) -> Self {
        Self {
            rule,
            node_kind: node.kind(),
            span: Span::of(node),
            message_id,
            data: BTreeMap::new(),
            severity: Severity::default(),
            fix: None,
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn with_fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Render the message template of `meta` with this diagnostic's data.
    /// Unknown placeholders are left as written.
    pub fn message(&self, meta: &RuleMeta) -> String {
        let Some(template) = meta.template(self.message_id) else {
            return self.message_id.to_string();
        };
        render_template(template, &self.data)
    }
}

fn render_template(template: &str, data: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let key = after[..close].trim();
                match data.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + 2 + close + 2]),
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
