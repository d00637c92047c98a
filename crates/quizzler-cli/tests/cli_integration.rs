//! Integration tests for quizzler-cli
//!
//! These tests run the binary against an httpmock server.
//! Tests run serially because they share process environment.

use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the quizzler binary with an isolated session file
fn quizzler(session_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quizzler").unwrap();
    cmd.env("QUIZZLER_SESSION_PATH", session_dir.join("session.json"))
        .env_remove("QUIZZLER_API_URL")
        .env_remove("QUIZZLER_PASSWORD")
        .env_remove("QUIZZLER_TIMEOUT_SECS")
        .env("NO_COLOR", "1");
    cmd
}

fn auth_body(token: &str) -> serde_json::Value {
    json!({"token": token, "user": {"id": 1, "email": "ana@example.com"}})
}

/// Log in against `server` so the session file holds `token`
fn login(dir: &Path, server: &MockServer, token: &str) {
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/login");
        then.status(200).json_body(auth_body(token));
    });

    quizzler(dir)
        .args(["--api-url", &server.base_url(), "login", "ana@example.com", "--password", "pw"])
        .assert()
        .success();

    mock.assert();
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
#[serial]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    quizzler(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizzler"))
        .stdout(predicate::str::contains("COMMAND").or(predicate::str::contains("Commands")));
}

#[test]
#[serial]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    quizzler(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizzler"));
}

#[test]
#[serial]
fn test_subcommand_help() {
    let dir = TempDir::new().unwrap();
    for args in [
        ["deck", "--help"],
        ["card", "--help"],
        ["browse", "--help"],
        ["config", "--help"],
    ] {
        quizzler(dir.path())
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains(args[0]));
    }
}

#[test]
#[serial]
fn test_invalid_format_rejected() {
    let dir = TempDir::new().unwrap();
    quizzler(dir.path())
        .args(["--format", "yaml", "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

// =============================================================================
// Auth Command Tests
// =============================================================================

#[test]
#[serial]
fn test_login_writes_session_file() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    login(dir.path(), &server, "tok-123");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("session.json")).unwrap())
            .unwrap();
    assert_eq!(stored["token"], "tok-123");
    let stored_user: serde_json::Value =
        serde_json::from_str(stored["user"].as_str().unwrap()).unwrap();
    assert_eq!(stored_user, auth_body("tok-123")["user"]);

    quizzler(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("ana@example.com"))
        .stdout(predicate::str::contains("tok-123").not());
}

#[test]
#[serial]
fn test_login_failure_shows_server_message() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/login");
        then.status(401).json_body(json!({"error": "Invalid credentials"}));
    });

    quizzler(dir.path())
        .args(["--api-url", &server.base_url(), "login", "ana@example.com", "--password", "bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!dir.path().join("session.json").exists());
}

#[test]
#[serial]
fn test_logout_twice() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    login(dir.path(), &server, "tok-123");

    quizzler(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!dir.path().join("session.json").exists());

    quizzler(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
#[serial]
fn test_whoami_json_when_logged_out() {
    let dir = TempDir::new().unwrap();
    quizzler(dir.path())
        .args(["--format", "json", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"authenticated\": false"));
}

// =============================================================================
// Deck Command Tests
// =============================================================================

#[test]
#[serial]
fn test_deck_list_sends_token() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    login(dir.path(), &server, "tok-123");

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/decks")
            .header("authorization", "Bearer tok-123");
        then.status(200).json_body(json!([
            {"id": 1, "user_id": 1, "name": "Spanish", "description": "Verbs", "public": false, "card_count": 3}
        ]));
    });

    quizzler(dir.path())
        .args(["--api-url", &server.base_url(), "deck", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish"));

    mock.assert();
}

#[test]
#[serial]
fn test_expired_token_logs_out() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    login(dir.path(), &server, "tok-old");

    server.mock(|when, then| {
        when.method(GET).path("/api/decks");
        then.status(401).json_body(json!({"error": "Token expired"}));
    });

    quizzler(dir.path())
        .args(["--api-url", &server.base_url(), "deck", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Token expired"));

    assert!(!dir.path().join("session.json").exists());
}

#[test]
#[serial]
fn test_deck_create_json_output() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    login(dir.path(), &server, "tok-123");

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/decks")
            .json_body(json!({"name": "Kanji", "description": "N5", "public": true}));
        then.status(201)
            .json_body(json!({"id": 9, "user_id": 1, "name": "Kanji", "description": "N5", "public": true}));
    });

    quizzler(dir.path())
        .args([
            "--api-url",
            &server.base_url(),
            "--format",
            "json",
            "-q",
            "deck",
            "create",
            "Kanji",
            "--description",
            "N5",
            "--public",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 9"))
        .stdout(predicate::str::contains("Created deck").not());

    mock.assert();
}

// =============================================================================
// Card Command Tests
// =============================================================================

#[test]
#[serial]
fn test_card_import_from_file() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    login(dir.path(), &server, "tok-123");

    let file = dir.path().join("cards.tsv");
    std::fs::write(&file, "hola\thello\ngato\tcat\n").unwrap();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/decks/4/cards/import")
            .json_body(json!({"cards": [
                {"front": "hola", "back": "hello"},
                {"front": "gato", "back": "cat"}
            ]}));
        then.status(201).json_body(json!({"imported": 2}));
    });

    quizzler(dir.path())
        .args(["--api-url", &server.base_url(), "card", "import", "4"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 cards"));

    mock.assert();
}

#[test]
#[serial]
fn test_card_import_rejects_bad_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("cards.txt");
    std::fs::write(&file, "no tab here\n").unwrap();

    quizzler(dir.path())
        .args(["card", "import", "4"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("front<TAB>back"));
}

// =============================================================================
// Browse Command Tests
// =============================================================================

#[test]
#[serial]
fn test_browse_without_login() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/public-decks").header_missing("authorization");
        then.status(200).json_body(json!([
            {"id": 2, "user_id": 5, "name": "Capitals", "description": "", "public": true}
        ]));
    });

    quizzler(dir.path())
        .args(["--api-url", &server.base_url(), "browse", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Capitals"));

    mock.assert();
}

#[test]
#[serial]
fn test_browse_missing_deck() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/public-decks/99");
        then.status(404).json_body(json!({"error": "not here"}));
    });

    quizzler(dir.path())
        .args(["--api-url", &server.base_url(), "browse", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deck not found"));
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
#[serial]
fn test_config_show_sources() {
    let dir = TempDir::new().unwrap();
    quizzler(dir.path())
        .args(["--api-url", "http://example.test:9000", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.test:9000"))
        .stdout(predicate::str::contains("flag"))
        .stdout(predicate::str::contains("session.json"));
}
