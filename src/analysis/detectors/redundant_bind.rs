//! Redundant Bind Detector
//!
//! Detects `.bind(receiver)` calls on function expressions where binding
//! has no observable effect, and proposes removing the bind when that is
//! safe.
//!
//! ## Detection Algorithm
//!
//! 1. The callee, looking through parentheses and optional chaining, is a
//!    `bind` property access (`.bind`, `['bind']`, `` [`bind`] ``) on a
//!    function or arrow expression
//! 2. The call passes exactly one, non-spread argument (more arguments
//!    partially apply the function, which is observable)
//! 3. Arrows never need binding. An ordinary function needs it only when
//!    it references `this`, `arguments` or `super` outside nested
//!    functions and classes; nested arrows share its receiver so they are
//!    searched too
//!
//! ## Examples Detected
//!
//! ```javascript
//! var a = function() { return 1; }.bind(b);
//! var a = (() => this.x).bind(b);
//! var a = function() { function c() { this.d } }.bind(b);
//! ```
//!
//! ## Not Detected
//!
//! ```javascript
//! var a = function() { return this.b; }.bind(c);
//! var a = function() { return () => this; }.bind(b);
//! var a = function(b) { return b; }.bind(c, d);
//! ```
//!
//! ## Fix
//!
//! The whole call is replaced by the function expression (with its own
//! parentheses). A parenthesized callee such as `(f.bind)(x)` keeps its
//! parentheses, giving `(f)`. No fix is offered when the argument could have side
//! effects or when a comment would be dropped.

use super::{Detector, RuleContext};
use crate::analysis::ast::{
    is_arrow, is_class, is_function, is_function_expression, named_children, skip_parens,
};
use crate::analysis::{Diagnostic, Fix, RuleMeta, Severity};
use crate::parser::SourceTree;
use tree_sitter::Node;

static META: RuleMeta = RuleMeta {
    id: "no-extra-bind",
    description: "Disallow unnecessary calls to `.bind()`",
    fixable: true,
    default_severity: Severity::Warning,
    messages: &[("unexpected", "The function binding is unnecessary.")],
};

/// Detector for unnecessary `.bind()` calls
#[derive(Default)]
pub struct RedundantBindDetector;

impl RedundantBindDetector {
    pub fn new() -> Self {
        Self
    }
}

/// A matched `<function>.bind(<argument>)` call
struct BindCall<'tree> {
    call: Node<'tree>,
    /// Object operand of the `bind` access, parentheses included
    object: Node<'tree>,
    /// The function or arrow itself
    function: Node<'tree>,
    argument: Node<'tree>,
    /// The callee itself is parenthesized, as in `(f.bind)(x)`
    wrapped: bool,
}

impl<'tree> BindCall<'tree> {
    fn match_call(tree: &SourceTree, call: Node<'tree>) -> Option<Self> {
        let callee = call.child_by_field_name("function")?;
        let wrapped = callee.kind() == "parenthesized_expression";
        let callee = skip_parens(callee);
        let object = bind_access_object(tree, callee)?;
        let function = skip_parens(object);
        if !is_function_expression(function) {
            return None;
        }

        let arguments = named_children(call.child_by_field_name("arguments")?);
        let [argument] = arguments.as_slice() else {
            return None;
        };
        if argument.kind() == "spread_element" {
            return None;
        }

        Some(Self {
            call,
            object,
            function,
            argument: *argument,
            wrapped,
        })
    }

    fn is_redundant(&self, tree: &SourceTree) -> bool {
        is_arrow(self.function) || !references_receiver(tree, self.function)
    }

    /// Replace the call with the bare function expression, when nothing
    /// observable is lost by doing so
    fn fix(&self, tree: &SourceTree) -> Option<Fix> {
        if !is_side_effect_free(self.argument) {
            return None;
        }

        let object = self.object.byte_range();
        let drops_comment = tree
            .comments_in(self.call.byte_range())
            .any(|comment| comment.start < object.start || comment.end > object.end);
        if drops_comment {
            return None;
        }

        // Keep the callee's parentheses so a statement-position call does
        // not turn into a function declaration
        let text = tree.source_text(object);
        let replacement = if self.wrapped {
            format!("({})", text)
        } else {
            text.to_string()
        };
        Some(Fix::replace(self.call.byte_range(), replacement))
    }
}

/// If `callee` accesses a property named `bind`, return the accessed object
fn bind_access_object<'tree>(tree: &SourceTree, callee: Node<'tree>) -> Option<Node<'tree>> {
    let named_bind = match callee.kind() {
        "member_expression" => {
            let property = callee.child_by_field_name("property")?;
            property.kind() == "property_identifier" && tree.text(property) == "bind"
        }
        "subscript_expression" => {
            let index = skip_parens(callee.child_by_field_name("index")?);
            static_key(tree, index) == Some("bind")
        }
        _ => false,
    };

    if named_bind {
        callee.child_by_field_name("object")
    } else {
        None
    }
}

/// Value of a string literal or substitution-free template used as a key.
/// Keys with escape sequences are not resolved.
fn static_key<'a>(tree: &'a SourceTree, node: Node<'_>) -> Option<&'a str> {
    if !matches!(node.kind(), "string" | "template_string") {
        return None;
    }

    let mut cursor = node.walk();
    let plain = node
        .named_children(&mut cursor)
        .all(|child| !matches!(child.kind(), "escape_sequence" | "template_substitution"));
    if !plain {
        return None;
    }

    // Quotes and backticks are single bytes
    let text = tree.text(node);
    text.get(1..text.len().checked_sub(1)?)
}

/// Whether `function` observes its own receiver: `this`, `arguments` or
/// `super` in its parameters or body
fn references_receiver(tree: &SourceTree, function: Node<'_>) -> bool {
    ["parameters", "body"]
        .iter()
        .filter_map(|field| function.child_by_field_name(field))
        .any(|part| scan_receiver(tree, part))
}

/// Nested arrows share the receiver and are searched; nested functions,
/// methods and classes bind their own and are skipped
fn scan_receiver(tree: &SourceTree, node: Node<'_>) -> bool {
    match node.kind() {
        "this" | "super" => return true,
        "identifier" | "shorthand_property_identifier" => return tree.text(node) == "arguments",
        _ => {}
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().any(|child| {
        let owns_receiver = (is_function(child) && !is_arrow(child)) || is_class(child);
        !owns_receiver && scan_receiver(tree, child)
    })
}

/// Syntactic whitelist of arguments that cannot run code when evaluated
fn is_side_effect_free(argument: Node<'_>) -> bool {
    let argument = skip_parens(argument);
    match argument.kind() {
        "string" | "number" | "regex" | "true" | "false" | "null" | "undefined" | "identifier"
        | "this" => true,
        "function_expression" | "function" => argument.is_named(),
        "member_expression" => is_identifier_chain(argument),
        _ => false,
    }
}

/// `a.b.c` without computed access or optional chaining
fn is_identifier_chain(node: Node<'_>) -> bool {
    let mut node = node;
    loop {
        match node.kind() {
            "identifier" | "this" => return true,
            "member_expression" => {
                let property_plain = node
                    .child_by_field_name("property")
                    .is_some_and(|p| p.kind() == "property_identifier");
                if !property_plain || has_optional_chain(node) {
                    return false;
                }
                match node.child_by_field_name("object") {
                    Some(object) => node = object,
                    None => return false,
                }
            }
            _ => return false,
        }
    }
}

fn has_optional_chain(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| matches!(child.kind(), "optional_chain" | "?."));
    found
}

impl Detector for RedundantBindDetector {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["call_expression"]
    }

    fn check(&self, node: Node<'_>, ctx: &mut RuleContext<'_>) {
        let tree = ctx.tree();
        let Some(bind) = BindCall::match_call(tree, node) else {
            return;
        };
        if !bind.is_redundant(tree) {
            return;
        }

        ctx.report(Diagnostic::new(META.id, bind.call, "unexpected").with_fix(bind.fix(tree)));
    }
}
