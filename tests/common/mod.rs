//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = GitFixture::new("upstream")
//!         .with_file("README.md", "# hello");
//!     fixture.commit_all("initial");
//!     // ... test code
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::GitFixture;
    #[allow(unused_imports)]
    pub use super::run_git;
}

/// Run a git command in `dir`, panicking on failure (test helper only).
pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git must be installed");
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        panic!("git {} failed: {}", args.join(" "), stderr);
    }
    String::from_utf8_lossy(&out.stdout).trim().to_owned()
}

/// A test fixture providing a real git repository inside a temporary
/// directory.
///
/// The repository lives in a named subdirectory so the rest of the temp
/// directory can hold overlay trees, output prefixes, and provisioned
/// targets, mirroring how the tool is invoked from a project root.
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
    repo: PathBuf,
}

impl GitFixture {
    /// Create a fixture with an initialized repository under `name`.
    ///
    /// Configures `user.email` and `user.name` so commits succeed
    /// without a global git config (common in CI environments).
    pub fn new(name: &str) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let repo = temp_dir.path().join(name);
        std::fs::create_dir_all(&repo).expect("Failed to create repo directory");
        run_git(&repo, &["init", "-b", "main"]);
        run_git(&repo, &["config", "user.email", "test@test.com"]);
        run_git(&repo, &["config", "user.name", "Test"]);
        Self { temp_dir, repo }
    }

    /// Add a file to the repository working tree (builder form).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.write_file(path, content);
        self
    }

    /// Write a file into the repository working tree, creating parent
    /// directories as needed.
    pub fn write_file(&self, path: &str, content: &str) {
        let full = self.repo.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(full, content).expect("Failed to write file");
    }

    /// Stage everything and commit, returning the new HEAD revision.
    pub fn commit_all(&self, message: &str) -> String {
        run_git(&self.repo, &["add", "."]);
        run_git(&self.repo, &["commit", "-m", message]);
        self.head_revision()
    }

    /// Current HEAD commit hash.
    pub fn head_revision(&self) -> String {
        run_git(&self.repo, &["rev-parse", "HEAD"])
    }

    /// Path to the git repository.
    pub fn repo_path(&self) -> &Path {
        &self.repo
    }

    /// Path to the surrounding temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
