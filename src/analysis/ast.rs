//! Small helpers over tree-sitter JavaScript nodes shared by the detectors

use tree_sitter::Node;

/// Function-like kinds that own a body. `function` is the older grammar's
/// name for `function_expression`.
const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

const CLASS_KINDS: &[&str] = &["class", "class_declaration"];

pub fn is_comment(node: Node<'_>) -> bool {
    node.kind() == "comment"
}

/// Any function, method or arrow
pub fn is_function(node: Node<'_>) -> bool {
    node.is_named() && FUNCTION_KINDS.contains(&node.kind())
}

pub fn is_arrow(node: Node<'_>) -> bool {
    node.kind() == "arrow_function"
}

/// Function or arrow used as an expression (a possible `.bind` target)
pub fn is_function_expression(node: Node<'_>) -> bool {
    node.is_named()
        && matches!(
            node.kind(),
            "function_expression" | "function" | "generator_function" | "arrow_function"
        )
}

pub fn is_class(node: Node<'_>) -> bool {
    node.is_named() && CLASS_KINDS.contains(&node.kind())
}

/// Named children without interleaved comments
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !is_comment(*child))
        .collect();
    children
}

/// Strip any number of enclosing parentheses
pub fn skip_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match named_children(node).first() {
            Some(inner) => node = *inner,
            None => break,
        }
    }
    node
}

/// Parent chain from the immediate parent up to the root
pub fn ancestors(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(node.parent(), |n| n.parent())
}

pub fn same_node(a: Node<'_>, b: Node<'_>) -> bool {
    a.id() == b.id()
}
