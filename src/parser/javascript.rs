//! JavaScript parser backed by tree-sitter

use super::SourceTree;
use crate::error::ParseError;
use tracing::debug;

/// File extensions handled by [`JavaScriptParser`]
pub const EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

pub struct JavaScriptParser {
    parser: tree_sitter::Parser,
}

impl JavaScriptParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_javascript::language())?;
        Ok(Self { parser })
    }

    pub fn extensions() -> &'static [&'static str] {
        EXTENSIONS
    }

    /// Parse `source` into a tree plus its token stream.
    ///
    /// tree-sitter recovers from syntax errors, so a tree is produced for
    /// malformed input as well; the recovered parts are still walked.
    pub fn parse(&mut self, source: &str) -> Result<SourceTree, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::NoTree)?;

        if tree.root_node().has_error() {
            debug!("source contains syntax errors, linting the recovered tree");
        }

        Ok(SourceTree::new(source.to_string(), tree))
    }
}
