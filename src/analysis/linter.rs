//! Host that runs the registered detectors over a syntax tree in one
//! shared preorder walk

use super::detectors::{
    CallbackReturnDetector, Detector, EmptyPatternDetector, RedundantBindDetector, RuleContext,
    SelfComparisonDetector,
};
use super::{Diagnostic, RuleMeta, Severity};
use crate::config::Config;
use crate::error::{ConfigError, Error, ParseError, Result};
use crate::parser::{JavaScriptParser, SourceTree};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Diagnostics found in one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

struct Registered {
    detector: Box<dyn Detector>,
    severity: Severity,
}

/// Runs a fixed set of detectors over JavaScript sources
pub struct Linter {
    detectors: Vec<Registered>,
    /// node kind -> indices into `detectors`, in registration order
    dispatch: HashMap<&'static str, Vec<usize>>,
}

impl Linter {
    /// Build a linter for the rules enabled in `config`
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let rules = &config.rules;
        let mut linter = Self::empty();

        if rules.callback_return.enabled {
            linter.register(
                Box::new(CallbackReturnDetector::new(
                    rules.callback_return.callback_names.clone(),
                )),
                rules.callback_return.severity,
            );
        }
        if rules.no_empty_pattern.enabled {
            linter.register(
                Box::new(EmptyPatternDetector::new(
                    rules.no_empty_pattern.allow_object_patterns_as_parameters,
                )),
                rules.no_empty_pattern.severity,
            );
        }
        if rules.no_self_compare.enabled {
            linter.register(
                Box::new(SelfComparisonDetector::new()),
                rules.no_self_compare.severity,
            );
        }
        if rules.no_extra_bind.enabled {
            linter.register(
                Box::new(RedundantBindDetector::new()),
                rules.no_extra_bind.severity,
            );
        }

        debug!("linter ready with {} detectors", linter.detectors.len());
        Ok(linter)
    }

    /// A linter with no detectors; add them with [`Linter::register`]
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
            dispatch: HashMap::new(),
        }
    }

    /// Register a detector for its node kinds. `severity` overrides the
    /// rule's default.
    pub fn register(&mut self, detector: Box<dyn Detector>, severity: Option<Severity>) {
        let index = self.detectors.len();
        for kind in detector.node_kinds() {
            self.dispatch.entry(*kind).or_default().push(index);
        }
        let severity = severity.unwrap_or(detector.meta().default_severity);
        self.detectors.push(Registered { detector, severity });
    }

    pub fn rules(&self) -> impl Iterator<Item = &'static RuleMeta> + '_ {
        self.detectors.iter().map(|r| r.detector.meta())
    }

    /// Metadata of a registered rule, for rendering messages
    pub fn meta(&self, rule: &str) -> Option<&'static RuleMeta> {
        self.rules().find(|meta| meta.id == rule)
    }

    /// Run every detector over an already parsed tree. Diagnostics come out
    /// in document order of their anchor's visit, then registration order.
    pub fn lint_tree(&self, tree: &SourceTree) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if self.detectors.is_empty() {
            return diagnostics;
        }

        let mut cursor = tree.root().walk();
        loop {
            let node = cursor.node();
            if let Some(indices) = self.dispatch.get(node.kind()) {
                for &index in indices {
                    let registered = &self.detectors[index];
                    let mut ctx = RuleContext::new(tree, registered.severity, &mut diagnostics);
                    registered.detector.check(node, &mut ctx);
                }
            }

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    trace!("walk finished with {} diagnostics", diagnostics.len());
                    return diagnostics;
                }
            }
        }
    }

    pub fn lint_source(&self, source: &str) -> std::result::Result<Vec<Diagnostic>, ParseError> {
        let tree = JavaScriptParser::new()?.parse(source)?;
        Ok(self.lint_tree(&tree))
    }

    pub fn lint_file(&self, path: &Path) -> Result<FileReport> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let diagnostics = self.lint_source(&source).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "{}: {} diagnostics",
            path.display(),
            diagnostics.len()
        );
        Ok(FileReport {
            path: path.to_path_buf(),
            diagnostics,
        })
    }
}
