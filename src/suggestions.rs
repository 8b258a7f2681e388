//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints. Errors should tell users what went wrong AND
//! how to fix it.

use std::path::Path;

/// Generate an error for when the overlay directory is not found.
///
/// Includes hints about where overlay files are expected and how to
/// point the tool elsewhere.
pub fn overlay_dir_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "No overlay found: {path}\n\n\
         hint: Patches must be stored in the overlay directory\n\
         hint: Use --overlay-dir to specify a different path",
        path = path.display()
    )
}
