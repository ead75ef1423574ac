//! Integration tests for the fitquiz binary.
//!
//! These tests verify end-to-end behavior including:
//! - One-shot size estimates (text and JSON)
//! - The interactive quiz driven over stdin
//! - Input gating and restart
//! - Configuration overrides

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a config file into a fresh temp dir
fn setup_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    (temp_dir, path)
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitquiz"))
}

/// Run the quiz with defaults config and no pauses, returning stdout
fn run_quiz(extra_args: &[&str], stdin: &str) -> String {
    let (_dir, config) = setup_config("");
    let output = cli()
        .arg("--config")
        .arg(&config)
        .arg("quiz")
        .arg("--no-delay")
        .args(extra_args)
        .write_stdin(stdin)
        .output()
        .expect("Failed to run fitquiz");

    assert!(output.status.success(), "fitquiz exited with {:?}", output.status);
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

/// Extract the JSON object printed at the end of stdout
fn trailing_json(stdout: &str) -> serde_json::Value {
    let start = stdout.find('{').expect("No JSON object in output");
    serde_json::from_str(&stdout[start..]).expect("Invalid JSON output")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clothing and shoe size finder"));
}

#[test]
fn test_estimate_male_scenario() {
    let (_dir, config) = setup_config("");

    cli()
        .arg("--config")
        .arg(&config)
        .args(["estimate", "--gender", "male", "--height", "180", "--weight", "75"])
        .args(["--age", "30", "--belly", "average", "--chest", "average"])
        .assert()
        .success()
        .stdout(predicate::str::contains("YOUR SIZE RECOMMENDATIONS"))
        .stdout(predicate::str::contains("32-34"))
        .stdout(predicate::str::contains("UK 8 / EU 41"))
        .stdout(predicate::str::contains("Regular"));
}

#[test]
fn test_estimate_json_output() {
    let (_dir, config) = setup_config("");

    let output = cli()
        .arg("--config")
        .arg(&config)
        .args(["estimate", "--gender", "male", "--height", "180", "--weight", "75"])
        .args(["--belly", "average", "--chest", "average", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["top_size"], "M");
    assert_eq!(result["bottom_size"], "32-34");
    assert_eq!(result["shoe_size_uk"], "8");
    assert_eq!(result["shoe_size_eu"], "41");
    assert_eq!(result["fit_recommendation"], "Regular");
    assert!(result["product_type"].is_null());
}

#[test]
fn test_estimate_female_fitted_with_product() {
    let (_dir, config) = setup_config("");

    cli()
        .arg("--config")
        .arg(&config)
        .args(["estimate", "--gender", "female", "--height", "165", "--weight", "55"])
        .args(["--belly", "flatter", "--chest", "slimmer", "--product", "polo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitted"))
        .stdout(predicate::str::contains(
            "Polo — Size S: Slim-fit styles will complement your body shape.",
        ));
}

#[test]
fn test_estimate_rejects_unknown_gender() {
    cli()
        .args(["estimate", "--gender", "other", "--height", "170", "--weight", "70"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown gender"));
}

#[test]
fn test_heights_table() {
    let (_dir, config) = setup_config("");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("heights")
        .assert()
        .success()
        .stdout(predicate::str::contains("150 cm (4'11\")"))
        .stdout(predicate::str::contains("175 cm (5'9\")"))
        .stdout(predicate::str::contains("195 cm (6'5\")"));
}

#[test]
fn test_quiz_full_run() {
    let stdout = run_quiz(&[], "\nm\n180\n75\n30\naverage\naverage\nn\n");

    assert!(stdout.contains("FIND YOUR FIT"));
    assert!(stdout.contains("Step 1 of 6 (17% complete)"));
    assert!(stdout.contains("Step 6 of 6 (100% complete)"));
    assert!(stdout.contains("175 cm is 5' 9\""));
    assert!(stdout.contains("Narrower torso and shoulder width"));
    assert!(stdout.contains("YOUR SIZE RECOMMENDATIONS"));
    assert!(stdout.contains("32-34"));
    assert!(stdout.contains("Regular"));
    assert!(!stdout.contains("Step 7"));
}

#[test]
fn test_quiz_empty_entry_after_rejected_value_uses_default() {
    let stdout = run_quiz(&["--json"], "\nm\n250\n\n\n\n2\n2\n");

    assert!(stdout.contains("Please enter a value between 150 and 200 cm."));
    assert!(stdout.contains("Enter cm between 150 and 200 (Enter uses 175)"));
    assert!(!stdout.contains("Enter uses 250"));
    assert!(!stdout.contains("250 cm is"));

    // Height fell back to 175 cm, not the rejected 250
    let result = trailing_json(&stdout);
    assert_eq!(result["top_size"], "M");
    assert_eq!(result["shoe_size_uk"], "8");
}

#[test]
fn test_quiz_defaults_on_empty_entries() {
    let stdout = run_quiz(&["--json"], "\n1\n\n\n\n2\n2\n");
    let result = trailing_json(&stdout);

    // 175cm / 70kg defaults
    assert_eq!(result["top_size"], "M");
    assert_eq!(result["bottom_size"], "32-34");
    assert_eq!(result["shoe_size_uk"], "8");
}

#[test]
fn test_quiz_gates_invalid_entries() {
    let stdout = run_quiz(
        &["--json"],
        "\nfemale\n165\n35\nabc\n55\n30\nflatter\nslimmer\n",
    );

    assert!(stdout.contains("Please enter a value between 40 and 150 kg."));
    assert!(stdout.contains("Please enter a number."));

    let result = trailing_json(&stdout);
    assert_eq!(result["fit_recommendation"], "Fitted");
    assert_eq!(result["bottom_size"], "UK 6-8");
}

#[test]
fn test_quiz_rejects_unknown_choice() {
    let stdout = run_quiz(&["--json"], "\nx\n2\n\n\n\n9\n3\n3\n");

    assert_eq!(stdout.matches("Please pick one of the listed options.").count(), 2);
    let result = trailing_json(&stdout);
    assert_eq!(result["fit_recommendation"], "Relaxed");
}

#[test]
fn test_quiz_product_wording() {
    let stdout = run_quiz(&["--product", "trousers"], "\nm\n\n\n\n2\n2\n");
    assert!(stdout.contains("Trousers — Size 32-34"));
}

#[test]
fn test_quiz_restart_returns_to_welcome() {
    let stdout = run_quiz(&[], "\nm\n\n\n\n1\n1\ny\n");

    assert_eq!(stdout.matches("FIND YOUR FIT").count(), 2);
    assert!(stdout.contains("Fitted"));
}

#[test]
fn test_quiz_abandoned_on_end_of_input() {
    let stdout = run_quiz(&[], "\nm\n");
    assert!(stdout.contains("Step 2 of 6"));
    assert!(stdout.contains("Quiz abandoned."));
    assert!(!stdout.contains("YOUR SIZE RECOMMENDATIONS"));
}

#[test]
fn test_quiz_uses_configured_ranges_and_timing() {
    let (_dir, config) = setup_config(
        r#"
[timing]
transition_ms = 0
calculating_ms = 0

[validation]
weight = { min = 30, max = 200 }
"#,
    );

    let output = cli()
        .arg("--config")
        .arg(&config)
        .args(["quiz", "--json"])
        .write_stdin("\nm\n\n35\n\n1\n1\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Please enter a value"));
    let result = trailing_json(&stdout);
    assert_eq!(result["shoe_size_uk"], "7.5");
}

#[test]
fn test_quiz_pauses_for_calculation() {
    let (_dir, config) = setup_config(
        r#"
[timing]
transition_ms = 1
calculating_ms = 1
"#,
    );

    cli()
        .arg("--config")
        .arg(&config)
        .arg("quiz")
        .write_stdin("\nf\n\n\n\n2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculating your sizes..."))
        .stdout(predicate::str::contains("YOUR SIZE RECOMMENDATIONS"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, config) = setup_config("[defaults]\nweight = 10\n");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("heights")
        .assert()
        .failure()
        .stderr(predicate::str::contains("default weight 10 lies outside"));
}
