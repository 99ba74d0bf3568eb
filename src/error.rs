//! Error types shared by the library and the CLI

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate a configuration file
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    #[diagnostic(code(jsdetect::config::io))]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    #[diagnostic(code(jsdetect::config::toml))]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    #[diagnostic(code(jsdetect::config::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    #[diagnostic(code(jsdetect::config::json))]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(jsdetect::config::invalid))]
    Invalid(String),
}

/// Failure to turn source text into a syntax tree
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("failed to load the JavaScript grammar: {0}")]
    #[diagnostic(code(jsdetect::parse::language))]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no syntax tree")]
    #[diagnostic(code(jsdetect::parse::no_tree))]
    NoTree,
}

/// Top-level error for linting files on disk
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("{}: {source}", path.display())]
    #[diagnostic(code(jsdetect::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(jsdetect::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
