//! Source file discovery
//!
//! Walks the given paths with `ignore`, so `.gitignore` and hidden
//! directories are skipped the way editors and git skip them. Explicitly
//! named files are always linted when their extension matches.

use crate::error::{Error, Result};
use crate::parser::JavaScriptParser;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Finds JavaScript sources below a set of roots
pub struct FileFinder {
    extensions: &'static [&'static str],
    respect_ignore: bool,
}

impl FileFinder {
    pub fn new() -> Self {
        Self {
            extensions: JavaScriptParser::extensions(),
            respect_ignore: true,
        }
    }

    /// Also walk files excluded by `.gitignore` and `.ignore`
    pub fn with_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore = respect;
        self
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Collect matching files below every root, sorted and deduplicated
    pub fn find_files(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for root in roots {
            if !root.exists() {
                return Err(Error::Io {
                    path: root.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
                });
            }

            if root.is_file() {
                if self.is_source_file(root) {
                    files.insert(root.clone());
                } else {
                    debug!("skipping {}: not a JavaScript file", root.display());
                }
                continue;
            }

            let mut builder = WalkBuilder::new(root);
            builder
                .hidden(true)
                .git_ignore(self.respect_ignore)
                .git_global(self.respect_ignore)
                .git_exclude(self.respect_ignore)
                .ignore(self.respect_ignore);

            for entry in builder.build() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!("walk error below {}: {}", root.display(), err);
                        continue;
                    }
                };
                let is_file = entry.file_type().is_some_and(|t| t.is_file());
                if is_file && self.is_source_file(entry.path()) {
                    files.insert(entry.into_path());
                }
            }
        }

        debug!("found {} JavaScript files", files.len());
        Ok(files.into_iter().collect())
    }
}

impl Default for FileFinder {
    fn default() -> Self {
        Self::new()
    }
}
