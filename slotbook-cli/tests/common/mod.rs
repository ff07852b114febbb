//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated data directory per test plus helpers for the
//! commands most tests run.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every variable the binary reads; cleared so the host cannot leak in.
const SLOTBOOK_VARS: &[&str] = &[
    "SLOTBOOK_DATA_DIR",
    "SLOTBOOK_BUSY_TIMEOUT",
    "SLOTBOOK_ACTOR",
    "SLOTBOOK_LOOKAHEAD_DAYS",
    "SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "SLOTBOOK_DISABLE_AUTOINIT",
    "SLOTBOOK_LOG_MODE",
    "SLOTBOOK_OUTPUT_FORMAT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the slotbook data directory (created on first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("slotbook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The binary with a scrubbed environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("slotbook").expect("Failed to find slotbook binary");
        for var in SLOTBOOK_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The binary with `--data-dir` and `--actor tester` set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--actor")
            .arg("tester");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the calendar database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("slotbook.db")
    }

    /// Write `<data dir>/config.yaml`.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Run `slotbook add` and return the printed slot.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn add(&self, date: &str, time: &str) -> String {
        let output = self
            .command()
            .args(["add", date, time])
            .output()
            .expect("Failed to run add command");

        assert!(
            output.status.success(),
            "Add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Run `slotbook delete`, expecting success.
    pub fn delete(&self, date: &str, time: &str) {
        self.command()
            .args(["delete", date, time])
            .assert()
            .success();
    }

    /// Run `slotbook list --format json` and return the parsed rows.
    pub fn list_json(&self, date: &str, include_voided: bool) -> Vec<serde_json::Value> {
        let mut cmd = self.command();
        cmd.args(["list", date, "--format", "json"]);
        if include_voided {
            cmd.arg("--include-voided");
        }
        let output = cmd.output().expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("List output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
