//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the caller's home, keys, and data dir.
fn verbdrill(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("verbdrill").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("VERBDRILL_GEMINI_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("VERBDRILL_OPENAI_KEY")
        .env_remove("VERBDRILL_DATA_DIR");
    cmd
}

fn snapshot_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("data").join("verbdrill-verbs.json")
}

fn write_snapshot(dir: &TempDir, content: &str) {
    let path = snapshot_path(dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read_snapshot(dir: &TempDir) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(snapshot_path(dir)).unwrap();
    serde_json::from_str(&content).unwrap()
}

const MOCK_CONFIG: &str = r#"
default_provider = "offline"

[providers.offline]
type = "mock"
response = '''
```json
[
  {"base": "travel", "past": "travelled", "participle": "travelled", "meaning": "여행하다", "example": "We travelled by train.", "isIrregular": false},
  {"base": "fly", "past": "flew", "participle": "flown", "meaning": "날다", "example": "She has flown to Paris.", "isIrregular": true},
  {"base": "Go", "past": "went", "participle": "gone", "meaning": "가다", "example": "They went home.", "isIrregular": true}
]
```
'''
"#;

#[test]
fn list_shows_seed_collection() {
    let dir = TempDir::new().unwrap();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("went"))
        .stdout(predicate::str::contains("studied"))
        .stdout(predicate::str::contains("10 verbs in your collection."));
}

#[test]
fn list_json_emits_camel_case_records() {
    let dir = TempDir::new().unwrap();

    let output = verbdrill(dir.path())
        .args(["--data-dir", "data", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 10);
    assert_eq!(records[0]["base"], "go");
    assert_eq!(records[0]["isIrregular"], true);
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    write_snapshot(&dir, "{ not json");

    verbdrill(dir.path())
        .args(["--data-dir", "data", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 verbs in your collection."));
}

#[test]
fn data_dir_from_environment() {
    let dir = TempDir::new().unwrap();
    write_snapshot(
        &dir,
        r#"[{"id":"a","base":"run","past":"ran","participle":"run","meaning":"달리다","example":"","isIrregular":true}]"#,
    );

    verbdrill(dir.path())
        .env("VERBDRILL_DATA_DIR", dir.path().join("data"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ran"))
        .stdout(predicate::str::contains("1 verbs in your collection."));
}

#[test]
fn generate_without_key_is_configuration_error() {
    let dir = TempDir::new().unwrap();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "generate", "--topic", "travel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERBDRILL_GEMINI_KEY"));

    assert!(!snapshot_path(&dir).exists());
}

#[test]
fn generate_merges_new_verbs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("verbdrill.toml"), MOCK_CONFIG).unwrap();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "generate", "--topic", "travel", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flown"))
        .stdout(predicate::str::contains("Added 2 new verbs (1 skipped as duplicates)"));

    let records = read_snapshot(&dir);
    assert_eq!(records.len(), 12);
    assert_eq!(records[0]["base"], "travel");
    assert_eq!(records[1]["base"], "fly");
    assert!(!records[0]["id"].as_str().unwrap().is_empty());
}

#[test]
fn generate_twice_reports_nothing_new() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("verbdrill.toml"), MOCK_CONFIG).unwrap();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "generate", "--topic", "travel"])
        .assert()
        .success();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "generate", "--topic", "travel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in your collection"));

    assert_eq!(read_snapshot(&dir).len(), 12);
}

#[test]
fn generate_with_malformed_payload_fails_with_topic() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("verbdrill.toml"),
        r#"
default_provider = "offline"

[providers.offline]
type = "mock"
response = '[{"base": "fly", "past": "flew"}]'
"#,
    )
    .unwrap();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "generate", "--topic", "airports"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("airports"));

    assert!(!snapshot_path(&dir).exists());
}

#[test]
fn quiz_scores_answers_from_stdin() {
    let dir = TempDir::new().unwrap();
    write_snapshot(
        &dir,
        r#"[{"id":"q1","base":"go","past":"went","participle":"gone","meaning":"가다","example":"","isIrregular":true}]"#,
    );

    verbdrill(dir.path())
        .args(["--data-dir", "data", "quiz", "--seed", "7"])
        .write_stdin(" WENT \ngone\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] go (가다)"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Quiz complete! Score: 1/1"));
}

#[test]
fn quiz_regular_mode_with_no_matches_is_empty() {
    let dir = TempDir::new().unwrap();
    write_snapshot(
        &dir,
        r#"[{"id":"q1","base":"go","past":"went","participle":"gone","meaning":"가다","example":"","isIrregular":true}]"#,
    );

    verbdrill(dir.path())
        .args(["--data-dir", "data", "quiz", "--mode", "regular"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/0"));
}

#[test]
fn quiz_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();

    verbdrill(dir.path())
        .args(["--data-dir", "data", "quiz", "--mode", "phrasal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    verbdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created verbdrill.toml"));
    assert!(dir.path().join("verbdrill.toml").exists());

    verbdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn list_models_with_mock_provider() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("verbdrill.toml"), MOCK_CONFIG).unwrap();

    verbdrill(dir.path())
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: offline"))
        .stdout(predicate::str::contains("mock-model"));
}

#[test]
fn missing_config_file_is_error() {
    let dir = TempDir::new().unwrap();

    verbdrill(dir.path())
        .args(["--config", "nope.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
