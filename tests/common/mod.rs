#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the todo-guard binary.
#[macro_export]
macro_rules! todo_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("todo-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.todo-guard.toml` in the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".todo-guard.toml", content);
    }

    /// A small project with one marker of each default severity class and a
    /// vendored directory that the default excludes skip.
    pub fn create_marker_project(&self) {
        self.create_file("src/a.ts", "let x = 1;\n// FIXME: urgent issue\n");
        self.create_file("src/b.rs", "fn main() {} // TODO: tidy up\n");
        self.create_file("docs/guide.md", "NOTE: read me\n");
        self.create_file("node_modules/dep/index.js", "// FIXME: vendored\n");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
