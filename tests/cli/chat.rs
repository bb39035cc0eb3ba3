use crate::support::TestBot;
use predicates::prelude::*;

// ============================================================================
// chat (terminal transport) tests
// ============================================================================

#[test]
fn test_chat_handles_each_line() {
    let bot = TestBot::new();

    let output = bot
        .cmd()
        .args(["chat", "--user-id", "1", "--user-name", "alice"])
        .write_stdin("/addhistory 9876543210 | call | hi\n\nhello\n/myuploads\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("✅ Submitted for moderation!\nEntry ID: "));
    assert!(stdout.contains(" | +919876543210 | approved: false"));
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_chat_json_prints_one_document_per_message() {
    let bot = TestBot::new();

    let output = bot
        .cmd()
        .args(["--format", "json", "chat", "--group", "--user-id", "1"])
        .write_stdin("/addhistory 9876543210 | call | hi\n/history 9876543210\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let lines: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].is_null());
    assert_eq!(lines[1]["reply"], "❌ No history found.");
}

#[test]
fn test_chat_store_failure_gets_generic_reply_and_continues() {
    let bot = TestBot::new();
    bot.submit("9876543210", "call", "x");
    bot.connection()
        .execute("UPDATE entries SET type = 'fax'", [])
        .unwrap();

    bot.cmd()
        .args(["chat", "--user-id", "1"])
        .write_stdin("/history 9876543210\n/start\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "⚠️ Something went wrong, please try again later.\n📌 Number History Bot",
        ))
        .stderr(predicate::str::contains("command failed"));
}

#[test]
fn test_chat_empty_input() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["chat", "--user-id", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_chat_survives_invalid_utf8_line() {
    let bot = TestBot::new();

    bot.cmd()
        .args(["chat", "--user-id", "1"])
        .write_stdin(&b"/start\n\xff\xfe bad\n/history 9876543210\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("📌 Number History Bot"))
        .stdout(predicate::str::ends_with("❌ No history found.\n"))
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[cfg(unix)]
#[test]
fn test_chat_ctrl_c_ends_idle_session() {
    use std::io::{BufRead, BufReader};
    use std::process::Stdio;
    use std::thread;
    use std::time::{Duration, Instant};

    let bot = TestBot::new();
    let mut child = crate::support::numhist_process()
        .arg("--db")
        .arg(bot.db_path())
        .args(["--log-level", "info", "chat", "--user-id", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Wait until the session is up and the handler is installed
    let stderr = child.stderr.take().unwrap();
    let mut lines = BufReader::new(stderr).lines();
    assert!(lines
        .by_ref()
        .any(|l| l.unwrap().contains("chat session started")));

    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    // stdin stays open: only the interrupt can end the session
    let deadline = Instant::now() + Duration::from_secs(5);
    let exit = loop {
        if let Some(exit) = child.try_wait().unwrap() {
            break exit;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("chat session still running after SIGINT");
        }
        thread::sleep(Duration::from_millis(50));
    };
    assert!(exit.success());
    drop(child.stdin.take());
}
