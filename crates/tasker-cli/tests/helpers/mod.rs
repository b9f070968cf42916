use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs the `tasker` binary against a throwaway database.
pub struct CliTestHarness {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("tasker.sqlite");
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// A command whose database is selected through the environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasker").expect("Failed to find tasker binary");
        cmd.env("TASKER_DATABASE_PATH", &self.db_path);
        cmd.env_remove("TASKER_LOG_LEVEL");
        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Creates a task entirely from flags so no prompt is shown.
    pub fn create(&self, name: &str, cadence: &str, start: &str) -> assert_cmd::assert::Assert {
        self.run_success(&["create", "--name", name, "--cadence", cadence, "--start", start])
    }
}
