//! Self Comparison Detector
//!
//! Detects comparisons whose two operands are written identically, e.g.
//! `x === x`. Equality is purely lexical: both operands must consist of
//! the same tokens, so `a.b` and `a["b"]` differ while `NaN === NaN` is
//! still reported.

use super::{Detector, RuleContext};
use crate::analysis::ast::skip_parens;
use crate::analysis::{Diagnostic, RuleMeta, Severity};
use tree_sitter::Node;

const COMPARISON_OPERATORS: &[&str] = &["===", "==", "!==", "!=", ">", "<", ">=", "<="];

static META: RuleMeta = RuleMeta {
    id: "no-self-compare",
    description: "Disallow comparisons where both sides are exactly the same",
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "comparingToSelf",
        "Comparing to itself is potentially pointless.",
    )],
};

/// Detector for comparisons of an expression against itself
#[derive(Default)]
pub struct SelfComparisonDetector;

impl SelfComparisonDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for SelfComparisonDetector {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["binary_expression"]
    }

    fn check(&self, node: Node<'_>, ctx: &mut RuleContext<'_>) {
        let (Some(left), Some(operator), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("operator"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };

        if !COMPARISON_OPERATORS.contains(&operator.kind()) {
            return;
        }

        // Grouping parentheses are not part of the operand
        let (left, right) = (skip_parens(left), skip_parens(right));
        let tree = ctx.tree();
        if tree.same_tokens(tree.tokens_of(left), tree.tokens_of(right)) {
            ctx.report(Diagnostic::new(META.id, node, "comparingToSelf"));
        }
    }
}
