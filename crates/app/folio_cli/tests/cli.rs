//! End-to-end tests for the `folio` binary in demo mode.

use assert_cmd::Command;
use predicates::prelude::*;

fn folio() -> Command {
    let mut cmd = Command::cargo_bin("folio").expect("folio binary");
    // A blank key keeps the assistant in demo mode even if a .env file is present.
    cmd.env("HUGGINGFACE_API_KEY", "").env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package_version() {
    folio()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn ask_answers_from_demo_table() {
    folio()
        .args(["ask", "Hello there"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Hello, adventurer!"));
}

#[test]
fn ask_answers_in_spanish() {
    folio()
        .args(["ask", "hola", "--lang", "es"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("¡Hola, aventurero!"));
}

#[test]
fn ask_json_reports_demo_flag() {
    folio()
        .args(["ask", "what projects?", "--context", "projects", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""demo":true"#))
        .stdout(predicate::str::contains(r#""success":true"#));
}

#[test]
fn blank_message_fails() {
    folio()
        .args(["ask", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Message is required"));
}

#[test]
fn unknown_language_is_rejected() {
    folio()
        .args(["ask", "hi", "--lang", "de"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported locale"));
}

#[test]
fn demo_mode_ignores_malformed_endpoint() {
    folio()
        .env("INFERENCE_API_URL", "not a url")
        .args(["ask", "Hello there"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Hello, adventurer!"));
}

#[test]
fn log_level_can_come_from_dotenv() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".env"), "RUST_LOG=info\n").expect("write .env");

    folio()
        .current_dir(dir.path())
        .args(["ask", "Hello there"])
        .assert()
        .success()
        .stderr(predicate::str::contains("answering from demo responses"));
}
