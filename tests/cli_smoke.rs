//! Smoke tests for the binary's argument handling and exit codes.
//! None of these reach an ollama server.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

#[allow(deprecated)]
fn translation_master() -> Command {
    Command::cargo_bin("translation-master").unwrap()
}

#[test]
fn help_lists_documented_flags() {
    translation_master()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input_dir"))
        .stdout(predicate::str::contains("--output_dir"))
        .stdout(predicate::str::contains("--output_dir_name"))
        .stdout(predicate::str::contains("--logging_path"))
        .stdout(predicate::str::contains("--pull"));
}

#[test]
fn missing_required_flag_fails() {
    translation_master()
        .args(["--input_dir", "src", "--output_dir", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--model"));
}

#[test]
fn missing_input_dir_exits_non_zero_without_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("out");
    let logs = temp.child("logs");

    translation_master()
        .current_dir(temp.path())
        // Unroutable endpoint: the run must fail before contacting it.
        .env("OLLAMA_HOST", "127.0.0.1:9")
        .args(["--input_dir", "missing", "--output_dir"])
        .arg(output.path())
        .args(["--model", "gemma3:1b", "--language", "fr", "--logging_path"])
        .arg(logs.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Aborting before any file was processed"))
        .stderr(predicate::str::contains("Path not found"));

    output.assert(predicate::path::missing());
    logs.assert(predicate::path::is_dir());
}
