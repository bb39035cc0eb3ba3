use crate::support::{extract_entry_id, TestBot, MODERATOR};
use predicates::prelude::*;

// ============================================================================
// send tests
// ============================================================================

#[test]
fn test_send_start_prints_help() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["send", "--user-id", "1", "/start"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("📌 Number History Bot"))
        .stdout(predicate::str::contains("⚠️ All submissions go to moderation."));
}

#[test]
fn test_send_plain_text_is_ignored() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["send", "--user-id", "1", "hello"])
        .assert()
        .success()
        .stdout("");

    bot.cmd()
        .args(["--format", "json", "send", "--user-id", "1", "hello"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn test_send_private_only_commands_ignored_in_groups() {
    let bot = TestBot::new();

    bot.cmd()
        .args([
            "send",
            "--group",
            "--user-id",
            "1",
            "/addhistory 9876543210 | call | hi",
        ])
        .assert()
        .success()
        .stdout("");

    bot.cmd()
        .args(["send", "--group", "--user-id", "1", "/history 9876543210"])
        .assert()
        .success()
        .stdout("❌ No history found.\n");
}

#[test]
fn test_send_full_moderation_flow() {
    let bot = TestBot::new();

    let output = bot
        .cmd()
        .args([
            "send",
            "--user-id",
            "1",
            "/addhistory +91 98765 43210 | message | Lottery scam SMS",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = extract_entry_id(&output);

    // Non-moderators get no reply at all in chat
    bot.cmd()
        .args(["send", "--user-id", "1", &format!("/approve {id}")])
        .assert()
        .success()
        .stdout("");

    bot.cmd()
        .args([
            "send",
            "--user-id",
            MODERATOR,
            &format!("/approve@numhist_bot {id}"),
        ])
        .assert()
        .success()
        .stdout(format!("✅ Approved {id}\n"));

    bot.cmd()
        .args(["send", "--group", "--user-id", "2", "/history 98765 43210"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• MESSAGE ("))
        .stdout(predicate::str::contains("Lottery scam SMS"));
}

#[test]
fn test_send_uses_configured_country_code() {
    let bot = TestBot::new();

    bot.cmd()
        .env("NUMHIST_COUNTRY_CODE", "+44")
        .args([
            "--format",
            "json",
            "send",
            "--user-id",
            "1",
            "/addhistory 7700900000 | call | x",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phone\":\"+447700900000\""));
}

#[test]
fn test_send_store_failure_exits_with_data_error() {
    let bot = TestBot::new();
    bot.submit("9876543210", "call", "x");
    bot.connection()
        .execute("UPDATE entries SET type = 'fax'", [])
        .unwrap();

    bot.cmd()
        .args(["send", "--user-id", "1", "/history 9876543210"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corrupt record"));
}
