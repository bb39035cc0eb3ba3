use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::{tempdir, TempDir};

/// Moderator id configured by [`TestBot`]
pub const MODERATOR: &str = "1000";

/// Environment variables that would leak host settings into a test
const ISOLATED_ENV: &[&str] = &[
    "RUST_LOG",
    "NUMHIST_LOG",
    "BOT_TOKEN",
    "HISTORY_DB",
    "ADMIN_IDS",
    "NUMHIST_CONFIG",
    "NUMHIST_COUNTRY_CODE",
    "NUMHIST_USER_ID",
    "NUMHIST_USER_NAME",
];

/// Get a Command for numhist with a clean environment
pub fn numhist() -> Command {
    let mut cmd = cargo_bin_cmd!("numhist");
    for key in ISOLATED_ENV {
        cmd.env_remove(key);
    }
    cmd
}

/// A plain process handle for numhist, for tests that need to signal it
pub fn numhist_process() -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_numhist"));
    for key in ISOLATED_ENV {
        cmd.env_remove(key);
    }
    cmd
}

/// A temporary database with one configured moderator
pub struct TestBot {
    dir: TempDir,
}

impl TestBot {
    pub fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("history.db")
    }

    /// numhist pointed at this bot's database
    pub fn cmd(&self) -> Command {
        let mut cmd = numhist();
        cmd.arg("--db").arg(self.db_path()).env("ADMIN_IDS", MODERATOR);
        cmd
    }

    /// Submit an entry as user 1 and return its id
    pub fn submit(&self, number: &str, entry_type: &str, description: &str) -> String {
        let output = self
            .cmd()
            .args(["add-history", number, entry_type, description, "--user-id", "1"])
            .output()
            .unwrap();
        assert!(output.status.success());
        extract_entry_id(&output)
    }

    pub fn approve(&self, id: &str) {
        self.cmd()
            .args(["approve", id, "--user-id", MODERATOR])
            .assert()
            .success();
    }

    pub fn connection(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(self.db_path()).unwrap()
    }
}

/// Extract the entry id from an add-history reply
pub fn extract_entry_id(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .find_map(|l| l.strip_prefix("Entry ID: "))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Parse stdout as a single JSON document
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
