//! Test helpers for running the launcher against stub pipelines

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Serializes stub creation and execution.
///
/// Writing a script while another test thread forks can leave the write
/// handle open in the child, making exec fail with "Text file busy".
static EXEC_LOCK: Mutex<()> = Mutex::new(());

pub fn exec_lock() -> MutexGuard<'static, ()> {
    EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// A recipe directory containing a stub `enh.sh`
pub struct StubRecipe {
    dir: TempDir,
}

impl StubRecipe {
    /// Create a recipe directory whose `enh.sh` runs the given shell body
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_script(&dir.path().join("enh.sh"), body);
        Self { dir }
    }

    /// A recipe directory without any `enh.sh`
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn script(&self) -> PathBuf {
        self.dir.path().join("enh.sh")
    }

    /// Run the launcher binary from inside the recipe directory
    pub fn launch(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_enh_launch"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    /// Read a file the stub wrote into the recipe directory
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }
}

/// Write an executable `/bin/sh` script
pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Stub body that records each received argument on its own line
pub const RECORD_ARGS: &str = r#"for a in "$@"; do printf '%s\n' "$a"; done > args.txt"#;

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
