//! Empty Destructuring Pattern Detector
//!
//! Detects destructuring patterns that bind nothing, which usually means
//! a default value was intended instead of a nested pattern.
//!
//! ## Examples Detected
//!
//! ```javascript
//! var {} = foo;
//! var [] = foo;
//! var {a: {}} = foo;     // probably meant {a = {}}
//! function foo({}) {}
//! ```
//!
//! ## Not Detected (with `allowObjectPatternsAsParameters`)
//!
//! ```javascript
//! function foo({}) {}
//! var foo = ({} = {}) => {};
//! ```

use super::{Detector, RuleContext};
use crate::analysis::ast::{is_comment, named_children};
use crate::analysis::{Diagnostic, RuleMeta, Severity};
use tree_sitter::Node;

static META: RuleMeta = RuleMeta {
    id: "no-empty-pattern",
    description: "Disallow empty destructuring patterns",
    fixable: false,
    default_severity: Severity::Error,
    messages: &[("unexpected", "Unexpected empty {{type}} pattern.")],
};

/// Detector for empty object and array patterns
#[derive(Default)]
pub struct EmptyPatternDetector {
    allow_object_patterns_as_parameters: bool,
}

impl EmptyPatternDetector {
    pub fn new(allow_object_patterns_as_parameters: bool) -> Self {
        Self {
            allow_object_patterns_as_parameters,
        }
    }

    /// Exempt `{}` and `{} = {}` in parameter position
    pub fn allow_object_patterns_as_parameters(mut self, allow: bool) -> Self {
        self.allow_object_patterns_as_parameters = allow;
        self
    }

    fn check_object(&self, node: Node<'_>, ctx: &mut RuleContext<'_>) {
        if !named_children(node).is_empty() {
            return;
        }

        if self.allow_object_patterns_as_parameters && is_parameter_pattern(node) {
            return;
        }

        ctx.report(Diagnostic::new(META.id, node, "unexpected").with_data("type", "object"));
    }

    fn check_array(&self, node: Node<'_>, ctx: &mut RuleContext<'_>) {
        if has_elements(node) {
            return;
        }

        ctx.report(Diagnostic::new(META.id, node, "unexpected").with_data("type", "array"));
    }
}

/// `function f({})` or `function f({} = {})`
fn is_parameter_pattern(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };

    match parent.kind() {
        "formal_parameters" => true,
        "assignment_pattern" => {
            let in_parameters = parent
                .parent()
                .is_some_and(|p| p.kind() == "formal_parameters");
            let empty_object_default = parent
                .child_by_field_name("right")
                .is_some_and(|right| right.kind() == "object" && named_children(right).is_empty());
            in_parameters && empty_object_default
        }
        _ => false,
    }
}

/// Holes count as elements: `[,]` is not empty
fn has_elements(array_pattern: Node<'_>) -> bool {
    let mut cursor = array_pattern.walk();
    let found = array_pattern
        .children(&mut cursor)
        .any(|child| !is_comment(child) && !matches!(child.kind(), "[" | "]"));
    found
}

impl Detector for EmptyPatternDetector {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["object_pattern", "array_pattern"]
    }

    fn check(&self, node: Node<'_>, ctx: &mut RuleContext<'_>) {
        match node.kind() {
            "object_pattern" => self.check_object(node, ctx),
            "array_pattern" => self.check_array(node, ctx),
            _ => {}
        }
    }
}
