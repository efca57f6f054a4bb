//! Common test utilities for qsubmit integration tests
//!
//! - running the binary with a clean environment
//! - fake scheduler binaries placed first on `PATH`

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The qsubmit binary with location/engine/log configuration removed from the environment
pub fn qsubmit() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qsubmit"));
    cmd.env_remove("QSUBMIT_LOCATION")
        .env_remove("QSUBMIT_ENGINE")
        .env_remove("QSUBMIT_LOG");
    cmd
}

/// A directory of fake scheduler commands
pub struct FakeScheduler {
    pub dir: TempDir,
}

impl FakeScheduler {
    pub fn new() -> Self {
        FakeScheduler {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Install an executable `name` that records its arguments (one per line)
    /// to `<name>.args`, prints `stdout` and exits with `code`.
    pub fn install(&self, name: &str, stdout: &str, code: i32) -> &Self {
        let script = format!(
            "#!/bin/sh\nfor a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{}'\nprintf '%s' '{}'\necho 'scheduler says no' >&2\nexit {}\n",
            self.args_file(name).display(),
            stdout,
            code
        );
        let path = self.dir.path().join(name);
        fs::write(&path, script).expect("Failed to write fake scheduler");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake scheduler executable");
        self
    }

    pub fn args_file(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{}.args", name))
    }

    /// Arguments the fake `name` was called with
    pub fn recorded_args(&self, name: &str) -> Vec<String> {
        fs::read_to_string(self.args_file(name))
            .expect("fake scheduler was not called")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// `PATH` with the fake commands first
    pub fn path_env(&self) -> String {
        prepend_path(self.dir.path())
    }
}

pub fn prepend_path(dir: &Path) -> String {
    match std::env::var("PATH") {
        Ok(path) => format!("{}:{}", dir.display(), path),
        Err(_) => dir.display().to_string(),
    }
}

/// Whether `args` contains `key` immediately followed by `value`
pub fn has_pair(args: &[String], key: &str, value: &str) -> bool {
    args.windows(2).any(|w| w[0] == key && w[1] == value)
}
