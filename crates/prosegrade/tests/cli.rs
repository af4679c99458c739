//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE: &str = "The committee considered the proposal carefully. \
Revenue projections improved throughout the quarter. \
Analysts expected substantial organizational restructuring. \
The dog sat quietly near the door.";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn sample_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, SAMPLE).unwrap();
    path
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["config"]["language"], "english");
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Score Command
// =============================================================================

#[test]
fn score_single_test() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["score", file.to_str().unwrap(), "--test", "flesch-kincaid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flesch-Kincaid"))
        .stdout(predicate::str::contains("grade"));
}

#[test]
fn score_all_tests_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    let output = cmd()
        .args(["score", file.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let results = json["results"].as_array().expect("results array");
    assert!(results.len() > 10);
    assert!(
        results
            .iter()
            .any(|r| r["test"] == "flesch-reading-ease")
    );
}

#[test]
fn score_unknown_test_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["score", file.to_str().unwrap(), "--test", "not-a-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown test"));
}

#[test]
fn score_language_incompatible_test_fails_when_explicit() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["score", file.to_str().unwrap(), "--test", "amstad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not support"));
}

#[test]
fn score_language_override_switches_roster() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args([
            "score",
            file.to_str().unwrap(),
            "--test",
            "amstad",
            "--language",
            "german",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amstad"));
}

#[test]
fn score_markdown_is_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.md");
    std::fs::write(&path, format!("# Heading\n\n{SAMPLE}\n")).unwrap();
    cmd()
        .args(["score", path.to_str().unwrap(), "--test", "flesch-kincaid"])
        .assert()
        .success();
}

#[test]
fn score_missing_file_fails() {
    cmd()
        .args(["score", "/nonexistent/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Stats Command
// =============================================================================

#[test]
fn stats_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["stats", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words"))
        .stdout(predicate::str::contains("Sentences"));
}

#[test]
fn stats_json_has_populations() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    let output = cmd()
        .args(["stats", file.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["all"]["sentences"], 4);
    assert_eq!(json["valid"]["sentences"], 4);
}

// =============================================================================
// Hardwords Command
// =============================================================================

#[test]
fn hardwords_lists_standards() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["hardwords", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("dale-chall"))
        .stdout(predicate::str::contains("spache"))
        .stdout(predicate::str::contains("fog"));
}

#[test]
fn hardwords_single_standard_lists_words() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args([
            "hardwords",
            file.to_str().unwrap(),
            "--standard",
            "dale-chall",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("committee"));
}

#[test]
fn hardwords_unknown_standard_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["hardwords", file.to_str().unwrap(), "--standard", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown standard"));
}

// =============================================================================
// Tests Command
// =============================================================================

#[test]
fn tests_lists_english_roster() {
    cmd()
        .arg("tests")
        .assert()
        .success()
        .stdout(predicate::str::contains("flesch-kincaid"))
        .stdout(predicate::str::contains("gunning-fog"));
}

#[test]
fn tests_all_includes_other_languages() {
    cmd()
        .args(["tests", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("amstad"))
        .stdout(predicate::str::contains("crawford"));
}

#[test]
fn tests_language_filter() {
    cmd()
        .args(["tests", "--language", "german"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nws1"))
        .stdout(predicate::str::contains("flesch-kincaid").not());
}

// =============================================================================
// Goals Command
// =============================================================================

#[test]
fn goals_without_config_reports_none() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    cmd()
        .args(["goals", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no goals configured"));
}

#[test]
fn goals_pass_with_generous_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    let config = dir.path().join("goals.toml");
    std::fs::write(
        &config,
        "goals = [{ subject = \"flesch-kincaid\", max = 19.0 }]\n",
    )
    .unwrap();
    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "goals",
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn failing_goal_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    let config = dir.path().join("goals.toml");
    // grades are capped below 30, so this can never pass
    std::fs::write(
        &config,
        "goals = [{ subject = \"flesch-kincaid\", min = 30.0 }]\n",
    )
    .unwrap();
    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "goals",
            file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"));
}

// =============================================================================
// Custom Tests via Config
// =============================================================================

#[test]
fn custom_test_from_config_is_scorable() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        r#"
[[custom_tests]]
name = "asl"
display_name = "Average Sentence Length"
formula = "WordCount / SentenceCount"
"#,
    )
    .unwrap();
    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "score",
            file.to_str().unwrap(),
            "--test",
            "asl",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average Sentence Length"));
}

#[test]
fn invalid_custom_formula_is_a_startup_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(
        &config,
        "[[custom_tests]]\nname = \"broken\"\nformula = \"(WordCount\"\n",
    )
    .unwrap();
    cmd()
        .args(["--config", config.to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn input_size_limit_is_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let file = sample_file(&dir, "sample.txt");
    let config = dir.path().join("limit.toml");
    std::fs::write(&config, "max_input_bytes = 10\n").unwrap();
    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "score",
            file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}
