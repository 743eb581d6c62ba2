//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temp workspace with a data root laid out as `<root>/data/<OT|NT>/...`.
pub struct DataFixture {
    pub temp: TempDir,
}

impl DataFixture {
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn data_root(&self) -> PathBuf {
        self.root().join("data")
    }

    /// Write raw contents to `data/<testament>/<book>/<chapter>/<file>`.
    pub fn write_verse(&self, testament: &str, book: &str, chapter: &str, file: &str, body: &str) {
        let dir = self.data_root().join(testament).join(book).join(chapter);
        std::fs::create_dir_all(&dir).expect("create chapter dir");
        std::fs::write(dir.join(file), body.as_bytes()).expect("write verse file");
    }

    /// Run the `verses` binary with the fixture root as working directory.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_verses"))
            .args(args)
            .current_dir(self.root())
            .env_remove("RUST_LOG")
            .output()
            .expect("run verses")
    }
}

pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse stdout JSON")
}
