mod javascript;
mod source_tree;

pub use javascript::JavaScriptParser;
pub use source_tree::{SourceTree, Token};
