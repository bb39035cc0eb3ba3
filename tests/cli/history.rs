use crate::support::{stdout_json, TestBot};
use predicates::prelude::*;

// ============================================================================
// history tests
// ============================================================================

#[test]
fn test_history_unknown_number() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["history", "9876543210"])
        .assert()
        .success()
        .stdout("❌ No history found.\n");
}

#[test]
fn test_history_invalid_number() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["history", "abc"])
        .assert()
        .success()
        .stdout("Invalid number\n");
}

#[test]
fn test_history_hides_pending_entries() {
    let bot = TestBot::new();
    bot.submit("9876543210", "call", "still pending");

    bot.cmd()
        .args(["history", "9876543210"])
        .assert()
        .success()
        .stdout("No approved public entries found!\n");
}

#[test]
fn test_history_shows_approved_entries() {
    let bot = TestBot::new();
    let id = bot.submit("9876543210", "call", "Unknown caller asked for OTP");
    bot.submit("9876543210", "note", "not yet approved");
    bot.approve(&id);

    bot.cmd()
        .args(["history", "+91", "98765", "43210"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("✅ History for +919876543210:"))
        .stdout(predicate::str::contains("• CALL ("))
        .stdout(predicate::str::contains("Unknown caller asked for OTP"))
        .stdout(predicate::str::contains("not yet approved").not());
}

#[test]
fn test_history_respects_configured_limit() {
    let bot = TestBot::new();
    for i in 0..3 {
        let id = bot.submit("9876543210", "note", &format!("n{i}"));
        bot.approve(&id);
    }

    let config = bot.dir().join("numhist.toml");
    std::fs::write(&config, "history_limit = 2\n").unwrap();

    bot.cmd()
        .arg("--config")
        .arg(&config)
        .args(["history", "9876543210"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nn1\n"))
        .stdout(predicate::str::contains("\nn2\n").not());
}

#[test]
fn test_history_json_reply() {
    let bot = TestBot::new();
    let id = bot.submit("9876543210", "business", "bank support line");
    bot.approve(&id);

    let output = bot
        .cmd()
        .args(["--format", "json", "history", "9876543210"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["data"]["found"], true);
    assert_eq!(json["data"]["entries"][0]["type"], "business");
    assert_eq!(
        json["data"]["entries"][0]["description"],
        "bank support line"
    );
}
