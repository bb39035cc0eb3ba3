use crate::support::{TestBot, MODERATOR};
use predicates::prelude::*;

// ============================================================================
// pending tests
// ============================================================================

#[test]
fn test_pending_empty() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["pending", "--user-id", MODERATOR])
        .assert()
        .success()
        .stdout("No entries awaiting moderation.\n");
}

#[test]
fn test_pending_lists_oldest_first_and_drops_approved() {
    let bot = TestBot::new();
    let first = bot.submit("9876543210", "call", "first");
    let second = bot.submit("9123456789", "business", "second");
    let third = bot.submit("9876543210", "note", "third");
    bot.approve(&second);

    bot.cmd()
        .args(["pending", "--user-id", MODERATOR])
        .assert()
        .success()
        .stdout(format!(
            "{first} | +919876543210 | CALL | first\n{third} | +919876543210 | NOTE | third\n"
        ));
}

#[test]
fn test_pending_requires_moderator() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["pending", "--user-id", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("/pending is restricted to moderators"));
}
