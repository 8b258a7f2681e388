//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `repo-overlay` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum covering every anticipated failure mode,
//! providing clear and descriptive error messages.
//!
//! All errors are fatal by design: this is a build-time provisioning tool
//! where silent partial success is worse than an explicit abort. No error
//! is retried; the binary prints the diagnostic and exits non-zero.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing all possible errors. Each
//!   variant corresponds to a specific failure and carries the contextual
//!   information needed to name the offending path or command.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`,
//!   used throughout the library to simplify function signatures.

use thiserror::Error;

/// Main error type for repo-overlay operations
#[derive(Error, Debug)]
pub enum Error {
    /// Cloning or checking out the upstream snapshot failed.
    ///
    /// Includes the repository URL, the pinned revision, and the error
    /// output from the underlying git invocation.
    #[error("Provisioning error for {url}@{revision}: {message}")]
    Provision {
        url: String,
        revision: String,
        message: String,
    },

    /// A precondition for the requested operation does not hold.
    ///
    /// Raised for a dirty source working tree, a missing overlay
    /// directory, or a git reference that does not resolve.
    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    /// A changed path carries a diff status the generator cannot handle.
    ///
    /// Deletions, renames, and copies are unsupported; the message names
    /// the offending path and enumerates the accepted statuses.
    #[error(
        "Unsupported diff status `{status}` for \"{path}\": must be one of A (added), M (modified)"
    )]
    Classification { status: String, path: String },

    /// A line of `git diff --name-status` output did not match the
    /// expected `<status>\t<path>` shape.
    #[error("Malformed diff line: {line:?}")]
    MalformedDiff { line: String },

    /// A patch entry failed to apply onto the provisioned repository.
    #[error("Patch {patch} failed to apply: {stderr}")]
    PatchApply { patch: String, stderr: String },

    /// A verbatim copy into the target tree failed.
    #[error("Copy failed: {src} -> {dst}: {message}")]
    Copy {
        src: String,
        dst: String,
        message: String,
    },

    /// A git subprocess exited unsuccessfully.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_provision() {
        let error = Error::Provision {
            url: "https://github.com/example/upstream.git".to_string(),
            revision: "8e556d8e".to_string(),
            message: "could not resolve host".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Provisioning error"));
        assert!(display.contains("https://github.com/example/upstream.git"));
        assert!(display.contains("8e556d8e"));
        assert!(display.contains("could not resolve host"));
    }

    #[test]
    fn test_error_display_precondition() {
        let error = Error::Precondition {
            message: "You have unstaged changes. Please stash or commit them.".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Precondition failed"));
        assert!(display.contains("unstaged changes"));
    }

    #[test]
    fn test_error_display_classification_lists_allowed_statuses() {
        let error = Error::Classification {
            status: "D".to_string(),
            path: "src/removed.cxx".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unsupported diff status"));
        assert!(display.contains("src/removed.cxx"));
        assert!(display.contains("A (added)"));
        assert!(display.contains("M (modified)"));
    }

    #[test]
    fn test_error_display_patch_apply() {
        let error = Error::PatchApply {
            patch: "foo/bar.h.in.patch".to_string(),
            stderr: "error: patch does not apply".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("foo/bar.h.in.patch"));
        assert!(display.contains("does not apply"));
    }

    #[test]
    fn test_error_display_copy() {
        let error = Error::Copy {
            src: "patch/foo/CMakeLists.txt".to_string(),
            dst: "upstream/foo/CMakeLists.txt".to_string(),
            message: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Copy failed"));
        assert!(display.contains("patch/foo/CMakeLists.txt"));
        assert!(display.contains("upstream/foo/CMakeLists.txt"));
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "git rev-parse origin/main".to_string(),
            stderr: "unknown revision or path".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git command failed"));
        assert!(display.contains("rev-parse"));
        assert!(display.contains("unknown revision"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }
}
