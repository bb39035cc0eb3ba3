use crate::support::{numhist, TestBot};
use predicates::prelude::*;

// ============================================================================
// config tests
// ============================================================================

#[test]
fn test_config_redacts_token() {
    let bot = TestBot::new();

    bot.cmd()
        .env("BOT_TOKEN", "123:secret")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bot_token = \"***\""))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_config_json_shows_resolved_values() {
    let bot = TestBot::new();

    let output = bot
        .cmd()
        .env("ADMIN_IDS", "5, 6")
        .args(["--format", "json", "config"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["moderators"], serde_json::json!([5, 6]));
    assert_eq!(json["country_code"], "91");
    assert_eq!(json["history_limit"], 8);
    assert_eq!(
        json["database"],
        bot.db_path().to_string_lossy().as_ref()
    );
    assert!(json.get("bot_token").is_none());
}

#[test]
fn test_config_file_layers_under_env() {
    let bot = TestBot::new();
    let file = bot.dir().join("numhist.toml");
    std::fs::write(&file, "country_code = \"1\"\nhistory_limit = 3\nmoderators = [9]\n").unwrap();

    let output = bot
        .cmd()
        .arg("--config")
        .arg(&file)
        .args(["--format", "json", "config"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["country_code"], "1");
    assert_eq!(json["history_limit"], 3);
    // ADMIN_IDS from the environment replaces the file's list
    assert_eq!(json["moderators"], serde_json::json!([1000]));
}

#[test]
fn test_config_write_round_trips() {
    let bot = TestBot::new();
    let file = bot.dir().join("saved").join("numhist.toml");

    bot.cmd()
        .env("BOT_TOKEN", "123:secret")
        .arg("config")
        .arg("--write")
        .arg(&file)
        .assert()
        .success();

    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("123:secret"));

    numhist()
        .arg("--config")
        .arg(&file)
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bot_token\": \"***\""));
}

#[test]
fn test_config_invalid_file_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.toml");
    std::fs::write(&file, "history_limit = 0\n").unwrap();

    numhist()
        .arg("--config")
        .arg(&file)
        .arg("config")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("history_limit"));
}

#[test]
fn test_empty_admin_ids_keeps_file_moderators() {
    let bot = TestBot::new();
    let file = bot.dir().join("numhist.toml");
    std::fs::write(&file, "moderators = [9]\n").unwrap();

    let output = bot
        .cmd()
        .env("ADMIN_IDS", "")
        .arg("--config")
        .arg(&file)
        .args(["--format", "json", "config"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["moderators"], serde_json::json!([9]));
}
