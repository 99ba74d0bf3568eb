// JavaScript anti-pattern detectors
// Each one is invoked by the linter for the node kinds it registers.

mod callback_return;
mod empty_pattern;
mod redundant_bind;
mod self_compare;

pub use callback_return::{CallbackReturnDetector, DEFAULT_CALLBACK_NAMES};
pub use empty_pattern::EmptyPatternDetector;
pub use redundant_bind::RedundantBindDetector;
pub use self_compare::SelfComparisonDetector;

use crate::analysis::{Diagnostic, RuleMeta, Severity};
use crate::parser::SourceTree;
use tree_sitter::Node;

/// Trait for JavaScript detectors
///
/// A detector registers the node kinds it cares about and is called once
/// per matching node, in document order, during the linter's single
/// preorder walk. It only reads the tree.
pub trait Detector: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    /// Node kinds this detector is invoked on
    fn node_kinds(&self) -> &'static [&'static str];

    fn check(&self, node: Node<'_>, ctx: &mut RuleContext<'_>);
}

/// Per-file state handed to detectors: the read-only tree and the sink
/// for diagnostics
pub struct RuleContext<'a> {
    tree: &'a SourceTree,
    severity: Severity,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        tree: &'a SourceTree,
        severity: Severity,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            tree,
            severity,
            diagnostics,
        }
    }

    pub fn tree(&self) -> &'a SourceTree {
        self.tree
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics
            .push(diagnostic.with_severity(self.severity));
    }
}
