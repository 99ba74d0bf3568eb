//! jsdetect - Fast anti-pattern detection for JavaScript
//!
//! This library provides four syntactic detectors for common JavaScript
//! mistakes, run over tree-sitter syntax trees.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .js, .mjs, .cjs and .jsx files
//! 2. **Parsing** - Parse source files using tree-sitter, keeping a token list
//! 3. **Linting** - One preorder walk per file, dispatching nodes to detectors
//! 4. **Reporting** - Output diagnostics as colored text or JSON
//!
//! # Example
//!
//! ```no_run
//! use jsdetect::{Config, Linter};
//!
//! let linter = Linter::new(&Config::default())?;
//! for diagnostic in linter.lint_source("if (x === x) {}")? {
//!     let meta = linter.meta(diagnostic.rule).expect("registered rule");
//!     println!("{}: {}", diagnostic.rule, diagnostic.message(meta));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parser;
pub mod report;

pub use analysis::detectors::{
    CallbackReturnDetector, Detector, EmptyPatternDetector, RedundantBindDetector, RuleContext,
    SelfComparisonDetector,
};
pub use analysis::{Diagnostic, FileReport, Fix, Linter, Position, RuleMeta, Severity, Span};
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{ConfigError, Error, ParseError, Result};
pub use parser::{JavaScriptParser, SourceTree, Token};
pub use report::{ReportFormat, Reporter};
