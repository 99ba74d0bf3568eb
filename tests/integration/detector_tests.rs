//! Integration tests for each detector
//!
//! These tests lint the fixtures under `tests/fixtures/javascript` through
//! the public `Linter` API.

use jsdetect::{Config, Diagnostic, FileFinder, Linter, Severity};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/javascript")
}

fn read_fixture(filename: &str) -> String {
    let path = fixtures_path().join(filename);
    if !path.exists() {
        panic!("Fixture not found: {:?}", path);
    }
    std::fs::read_to_string(path).unwrap()
}

fn lint_fixture(filename: &str) -> Vec<Diagnostic> {
    lint_fixture_with(&Config::default(), filename)
}

fn lint_fixture_with(config: &Config, filename: &str) -> Vec<Diagnostic> {
    Linter::new(config)
        .unwrap()
        .lint_source(&read_fixture(filename))
        .unwrap()
}

fn lines(diagnostics: &[Diagnostic], rule: &str) -> Vec<usize> {
    diagnostics
        .iter()
        .filter(|d| d.rule == rule)
        .map(|d| d.span.start.line)
        .collect()
}

/// Apply every fix, back to front
fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut fixes: Vec<_> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|fix| std::cmp::Reverse(fix.range.start));
    let mut out = source.to_string();
    for fix in fixes {
        out.replace_range(fix.range.clone(), &fix.replacement);
    }
    out
}

// ============================================================================
// Callback Return Tests
// ============================================================================

mod callback_return_tests {
    use super::*;

    #[test]
    fn test_callback_fixture() {
        let diagnostics = lint_fixture("callbacks.js");
        assert_eq!(lines(&diagnostics, "callback-return"), vec![10, 16]);
        assert!(diagnostics
            .iter()
            .all(|d| d.message_id == "missingReturn" && d.node_kind == "call_expression"));
    }

    #[test]
    fn test_custom_callback_names() {
        let mut config = Config::default();
        config.rules.callback_return.callback_names = vec!["cleanup".to_string()];
        let diagnostics = lint_fixture_with(&config, "callbacks.js");
        // `cleanup()` is the last statement of its function
        assert!(lines(&diagnostics, "callback-return").is_empty());
    }
}

// ============================================================================
// Empty Pattern Tests
// ============================================================================

mod empty_pattern_tests {
    use super::*;

    #[test]
    fn test_pattern_fixture() {
        let diagnostics = lint_fixture("patterns.js");
        assert_eq!(lines(&diagnostics, "no-empty-pattern"), vec![1, 2, 3, 6, 7, 8]);
        let types: Vec<_> = diagnostics.iter().map(|d| d.data["type"].as_str()).collect();
        assert_eq!(
            types,
            vec!["object", "array", "object", "object", "object", "array"]
        );
    }

    #[test]
    fn test_pattern_fixture_allowing_parameters() {
        let mut config = Config::default();
        config.rules.no_empty_pattern.allow_object_patterns_as_parameters = true;
        let diagnostics = lint_fixture_with(&config, "patterns.js");
        assert_eq!(lines(&diagnostics, "no-empty-pattern"), vec![1, 2, 3, 8]);
    }
}

// ============================================================================
// Self Comparison Tests
// ============================================================================

mod self_compare_tests {
    use super::*;

    #[test]
    fn test_comparison_fixture() {
        let diagnostics = lint_fixture("comparisons.js");
        assert_eq!(lines(&diagnostics, "no-self-compare"), vec![1, 2, 5]);
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    }
}

// ============================================================================
// Redundant Bind Tests
// ============================================================================

mod redundant_bind_tests {
    use super::*;

    #[test]
    fn test_bind_fixture() {
        let diagnostics = lint_fixture("binds.js");
        assert_eq!(lines(&diagnostics, "no-extra-bind"), vec![1, 3, 4, 5]);

        let replacements: Vec<_> = diagnostics
            .iter()
            .map(|d| d.fix.as_ref().map(|f| f.replacement.as_str()))
            .collect();
        assert_eq!(
            replacements,
            vec![
                Some("function() { return 1; }"),
                None,
                None,
                Some("(() => { return this; })"),
            ]
        );
    }

    #[test]
    fn test_fixes_leave_only_unfixable_binds() {
        let source = read_fixture("binds.js");
        let linter = Linter::new(&Config::default()).unwrap();
        let fixed = apply_fixes(&source, &linter.lint_source(&source).unwrap());

        assert!(fixed.contains("var a = function() { return 1; };"));
        assert!(fixed.contains("var h = (() => { return this; });"));

        let again = linter.lint_source(&fixed).unwrap();
        assert_eq!(lines(&again, "no-extra-bind"), vec![3, 4]);
        assert!(again.iter().all(|d| d.fix.is_none()));
    }
}

// ============================================================================
// Whole-Tree Tests
// ============================================================================

mod linter_tests {
    use super::*;

    #[test]
    fn test_clean_fixture() {
        assert!(lint_fixture("clean.js").is_empty());
    }

    #[test]
    fn test_fixture_directory() {
        let files = FileFinder::new().find_files(&[fixtures_path()]).unwrap();
        assert_eq!(files.len(), 5);

        let linter = Linter::new(&Config::default()).unwrap();
        let total: usize = files
            .iter()
            .map(|f| linter.lint_file(f).unwrap().diagnostics.len())
            .sum();
        // callbacks 2, patterns 6, comparisons 3, binds 4
        assert_eq!(total, 15);
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let linter = Linter::new(&Config::default()).unwrap();
        for name in ["callbacks.js", "patterns.js", "comparisons.js", "binds.js"] {
            let source = read_fixture(name);
            assert_eq!(
                linter.lint_source(&source).unwrap(),
                linter.lint_source(&source).unwrap(),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_rule_selection() {
        let mut config = Config::default();
        config.enable_only(&["no-self-compare".to_string()]).unwrap();
        let linter = Linter::new(&config).unwrap();
        let source = read_fixture("binds.js") + &read_fixture("comparisons.js");
        let diagnostics = linter.lint_source(&source).unwrap();
        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().all(|d| d.rule == "no-self-compare"));
    }
}
