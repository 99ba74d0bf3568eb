//! Read-only view over a parsed JavaScript file: syntax tree, source text
//! and the flat token stream (comments included).

use std::ops::Range;
use tree_sitter::{Node, Tree};

/// Node kinds that form a single token even though tree-sitter gives them
/// inner structure.
const ATOMIC_KINDS: &[&str] = &["string", "template_string", "regex", "comment"];

/// A minimal lexical unit with its byte range in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Grammar kind, e.g. `identifier`, `===`, `comment`
    pub kind: &'static str,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_comment(&self) -> bool {
        self.kind == "comment"
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A syntax tree together with the source it was parsed from
pub struct SourceTree {
    source: String,
    tree: Tree,
    tokens: Vec<Token>,
}

impl SourceTree {
    pub fn new(source: String, tree: Tree) -> Self {
        let tokens = collect_tokens(tree.root_node());
        Self {
            source,
            tree,
            tokens,
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `range`, empty if the range is out of bounds
    pub fn source_text(&self, range: Range<usize>) -> &str {
        self.source.get(range).unwrap_or("")
    }

    pub fn text(&self, node: Node<'_>) -> &str {
        self.source_text(node.byte_range())
    }

    pub fn token_text(&self, token: &Token) -> &str {
        self.source_text(token.range())
    }

    /// All tokens of the file in document order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens lying inside `range`, comments included
    pub fn tokens_in(&self, range: Range<usize>) -> &[Token] {
        let first = self.tokens.partition_point(|t| t.start < range.start);
        let last = self.tokens.partition_point(|t| t.start < range.end);
        &self.tokens[first..last.max(first)]
    }

    /// Tokens covering exactly the span of `node`, comments included
    pub fn tokens_of(&self, node: Node<'_>) -> &[Token] {
        self.tokens_in(node.byte_range())
    }

    /// Comment tokens inside `range`
    pub fn comments_in(&self, range: Range<usize>) -> impl Iterator<Item = &Token> + '_ {
        self.tokens_in(range).iter().filter(|t| t.is_comment())
    }

    /// Whether two token runs are identical by kind and text, ignoring comments
    pub fn same_tokens(&self, a: &[Token], b: &[Token]) -> bool {
        let mut a = a.iter().filter(|t| !t.is_comment());
        let mut b = b.iter().filter(|t| !t.is_comment());
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if x.kind != y.kind || self.token_text(x) != self.token_text(y) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

fn collect_tokens(root: Node<'_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        let is_leaf = node.child_count() == 0 || ATOMIC_KINDS.contains(&node.kind());

        if is_leaf {
            if node.end_byte() > node.start_byte() {
                tokens.push(Token {
                    kind: node.kind(),
                    start: node.start_byte(),
                    end: node.end_byte(),
                });
            }
        } else if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return tokens;
            }
        }
    }
}
