//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    dir
}

fn jsdetect() -> Command {
    let mut cmd = Command::cargo_bin("jsdetect").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_clean_project_succeeds() {
    let dir = project(&[("src/app.js", "var {a} = b;\n")]);

    jsdetect()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found!"));
}

#[test]
fn test_warnings_only_exit_zero() {
    let dir = project(&[("app.js", "var f = function () {}.bind(x);\n")]);

    jsdetect()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no-extra-bind"))
        .stdout(predicate::str::contains("(fixable)"));
}

#[test]
fn test_errors_exit_one() {
    let dir = project(&[("app.js", "if (x === x) {}\n")]);

    jsdetect()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no-self-compare"))
        .stdout(predicate::str::contains("Comparing to itself is potentially pointless."));
}

#[test]
fn test_json_output() {
    let dir = project(&[("app.js", "var [] = x;\n")]);

    let output = jsdetect()
        .args(["--format", "json", "--quiet"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostic = &value["files"][0]["diagnostics"][0];
    assert_eq!(diagnostic["rule"], "no-empty-pattern");
    assert_eq!(diagnostic["message"], "Unexpected empty array pattern.");
    assert_eq!(value["summary"]["errors"], 1);
}

#[test]
fn test_json_output_file() {
    let dir = project(&[("app.js", "function f(cb) { cb(); g(); }\n")]);
    let out = dir.path().join("report.json");

    jsdetect()
        .args(["--format", "json", "--output"])
        .arg(&out)
        .arg(dir.path().join("app.js"))
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["files"][0]["diagnostics"][0]["rule"], "callback-return");
}

#[test]
fn test_rule_selection() {
    let dir = project(&[("app.js", "if (x === x) {}\nvar f = function () {}.bind(x);\n")]);

    jsdetect()
        .args(["--rule", "no-extra-bind"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no-extra-bind"))
        .stdout(predicate::str::contains("no-self-compare").not());
}

#[test]
fn test_unknown_rule_rejected() {
    let dir = project(&[("app.js", "")]);

    jsdetect()
        .args(["--rule", "no-such-rule"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule"));
}

#[test]
fn test_config_file_in_project() {
    let dir = project(&[
        ("app.js", "if (x === x) {}\nfunction f({}) {}\n"),
        (
            "jsdetect.toml",
            "[rules.no-self-compare]\nenabled = false\n\n[rules.no-empty-pattern]\nallowObjectPatternsAsParameters = true\n",
        ),
    ]);

    jsdetect()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found!"));
}

#[test]
fn test_explicit_config_and_severity_override() {
    let dir = project(&[
        ("app.js", "if (x === x) {}\n"),
        ("lint.yaml", "rules:\n  no-self-compare:\n    severity: warning\n"),
    ]);

    jsdetect()
        .arg("--config")
        .arg(dir.path().join("lint.yaml"))
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = project(&[
        ("app.js", ""),
        ("jsdetect.toml", "[rules.callback-return]\ncallbackNames = [\"\"]\n"),
    ]);

    jsdetect()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("callbackNames"));
}

#[test]
fn test_missing_path_fails() {
    let dir = tempdir().unwrap();

    jsdetect()
        .arg(dir.path().join("missing"))
        .assert()
        .failure();
}

#[test]
fn test_sequential_mode_matches() {
    let dir = project(&[
        ("a.js", "if (a == a) {}\n"),
        ("b.js", "var {} = b;\n"),
    ]);

    jsdetect()
        .args(["--parallel", "false"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.js"))
        .stdout(predicate::str::contains("b.js"))
        .stdout(predicate::str::contains("2 problems"));
}
