//! Callback Return Detector
//!
//! Detects calls to a callback (`callback`, `cb`, `next` by default) that
//! are neither returned nor the last thing their function does, so
//! execution continues after the callback has been invoked.
//!
//! ## Detection Algorithm
//!
//! 1. Only calls whose callee is an identifier or a plain `a.b.c` chain
//!    with a configured name are considered
//! 2. Climb to the closest block, `return` or arrow function
//! 3. `return` or arrow (implicit return) is fine
//! 4. In a block, the call is fine when its statement is the last one of
//!    a function body, or sits right before a final `return`
//! 5. Otherwise report, as long as the call is inside some function
//!
//! ## Examples Detected
//!
//! ```javascript
//! function foo(err, callback) {
//!     if (err) {
//!         callback(err);   // execution continues below
//!     }
//!     callback();
//! }
//! ```
//!
//! ## Not Detected
//!
//! ```javascript
//! function foo(err, callback) {
//!     if (err) {
//!         return callback(err);
//!     }
//!     callback();
//! }
//! ```

use super::{Detector, RuleContext};
use crate::analysis::ast::{ancestors, is_function, named_children, same_node, skip_parens};
use crate::analysis::{Diagnostic, RuleMeta, Severity};
use crate::parser::SourceTree;
use tree_sitter::Node;

pub const DEFAULT_CALLBACK_NAMES: &[&str] = &["callback", "cb", "next"];

static META: RuleMeta = RuleMeta {
    id: "callback-return",
    description: "Require `return` statements after callbacks",
    fixable: false,
    default_severity: Severity::Warning,
    messages: &[(
        "missingReturn",
        "Expected return with your callback function.",
    )],
};

/// Detector for callbacks that are not followed by a return
pub struct CallbackReturnDetector {
    callback_names: Vec<String>,
}

impl CallbackReturnDetector {
    pub fn new(callback_names: Vec<String>) -> Self {
        Self { callback_names }
    }

    pub fn callback_names(&self) -> &[String] {
        &self.callback_names
    }

    fn is_callback(&self, tree: &SourceTree, call: Node<'_>) -> bool {
        let Some(callee) = call.child_by_field_name("function").map(skip_parens) else {
            return false;
        };
        if !contains_only_identifiers(callee) {
            return false;
        }
        let text = tree.text(callee);
        self.callback_names.iter().any(|name| name == text)
    }
}

impl Default for CallbackReturnDetector {
    fn default() -> Self {
        Self::new(
            DEFAULT_CALLBACK_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        )
    }
}

/// `a`, `a.b`, `a.b.c`: no computed access, no calls, no `this`
fn contains_only_identifiers(node: Node<'_>) -> bool {
    let mut node = node;
    loop {
        match node.kind() {
            "identifier" => return true,
            "member_expression" => match node.child_by_field_name("object") {
                Some(object) if matches!(object.kind(), "identifier" | "member_expression") => {
                    node = object;
                }
                _ => return false,
            },
            _ => return false,
        }
    }
}

/// Whether `statement` is the expression statement holding `call`, either
/// directly or as the right operand of `&&`/`||`-style wrapping
fn is_callback_statement(call: Node<'_>, statement: Option<Node<'_>>) -> bool {
    let Some(statement) = statement else {
        return false;
    };
    if statement.kind() != "expression_statement" {
        return false;
    }
    let Some(expression) = named_children(statement).first().map(|e| skip_parens(*e)) else {
        return false;
    };

    if same_node(expression, call) {
        return true;
    }

    expression.kind() == "binary_expression"
        && expression
            .child_by_field_name("right")
            .is_some_and(|right| same_node(skip_parens(right), call))
}

/// Closest ancestor that ends the search for a covering `return`
fn find_boundary(call: Node<'_>) -> Option<Node<'_>> {
    ancestors(call).find(|n| {
        matches!(
            n.kind(),
            "statement_block" | "return_statement" | "arrow_function"
        )
    })
}

impl Detector for CallbackReturnDetector {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["call_expression"]
    }

    fn check(&self, node: Node<'_>, ctx: &mut RuleContext<'_>) {
        if !self.is_callback(ctx.tree(), node) {
            return;
        }

        match find_boundary(node) {
            Some(boundary) if matches!(boundary.kind(), "return_statement" | "arrow_function") => {
                return;
            }
            Some(block) => {
                let body = named_children(block);
                let last = body.last().copied();

                if is_callback_statement(node, last) && block.parent().is_some_and(is_function) {
                    return;
                }

                if last.is_some_and(|n| n.kind() == "return_statement") {
                    let before_last = body.len().checked_sub(2).map(|i| body[i]);
                    if is_callback_statement(node, before_last) {
                        return;
                    }
                }
            }
            None => {}
        }

        if ancestors(node).any(is_function) {
            ctx.report(Diagnostic::new(META.id, node, "missingReturn"));
        }
    }
}
