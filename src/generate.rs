//! # Overlay Generation
//!
//! Derives an overlay tree from a working tree's divergence against a
//! reference commit, so that applying the overlay onto a clean checkout
//! of that reference reproduces the working tree's changes.
//!
//! ## Process
//!
//! 1. **Guard**: refuse to run when tracked files carry uncommitted
//!    modifications (the diff reference would be ambiguous), and verify
//!    the requested reference resolves to a real object.
//!
//! 2. **Scan**: parse `git diff --name-status <ref>` into
//!    [`DiffRecord`](crate::scan::DiffRecord)s. An empty change set ends
//!    the run successfully with no output.
//!
//! 3. **Emit**: per record, either copy the file verbatim into the
//!    output tree or capture a single-file diff with the `.patch`
//!    suffix appended:
//!
//!    | status   | category     | action                 |
//!    |----------|--------------|------------------------|
//!    | Modified | BuildConfig  | verbatim copy          |
//!    | Modified | NativeSource | single-file diff       |
//!    | Modified | Unknown      | skip with a warning    |
//!    | Added    | any          | verbatim copy          |
//!
//! Pre-existing files under the output root are never deleted; a
//! warning notes that stale entries from prior runs are left in place.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::classify::{categorize, ChangeCategory, PATCH_SUFFIX};
use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::overlay::copy_with_metadata;
use crate::scan::{self, DiffRecord, DiffStatus};

/// Counts of work performed by [`generate_overlay`], for CLI reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Total changed paths reported by the scanner.
    pub changes: usize,
    pub copied: usize,
    pub patched: usize,
    pub skipped: usize,
}

impl GenerateSummary {
    /// True when the scanner reported no changes at all.
    pub fn is_empty(&self) -> bool {
        self.changes == 0
    }
}

/// Generate an overlay tree under `output_root` from the divergence of
/// `repo_dir` against `reference`.
///
/// Fails fast, producing no output, when the working tree is dirty,
/// the reference does not resolve, or a changed path carries an
/// unsupported diff status.
pub fn generate_overlay(
    git: &dyn GitOperations,
    repo_dir: &Path,
    reference: &str,
    output_root: &Path,
) -> Result<GenerateSummary> {
    if git.has_uncommitted_changes(repo_dir)? {
        return Err(Error::Precondition {
            message: "You have unstaged changes. Please stash or commit them.".to_string(),
        });
    }

    git.rev_parse(reference, repo_dir).map_err(|_| Error::Precondition {
        message: format!("Git reference `{reference}` does not resolve to a known object"),
    })?;

    let raw = git.diff_name_status(reference, repo_dir)?;
    let records = scan::parse_name_status(&raw)?;

    let mut summary = GenerateSummary {
        changes: records.len(),
        ..GenerateSummary::default()
    };
    if records.is_empty() {
        return Ok(summary);
    }

    if output_root.exists() {
        warn!(
            "Output directory {} already exists, stale entries from prior runs are not removed",
            output_root.display()
        );
    }

    for record in &records {
        emit(git, repo_dir, reference, output_root, record, &mut summary)?;
    }
    Ok(summary)
}

fn emit(
    git: &dyn GitOperations,
    repo_dir: &Path,
    reference: &str,
    output_root: &Path,
    record: &DiffRecord,
    summary: &mut GenerateSummary,
) -> Result<()> {
    match (record.status, categorize(&record.path)) {
        (DiffStatus::Modified, ChangeCategory::NativeSource) => {
            let diff = git.diff_file(reference, &record.path, repo_dir)?;
            let output_path = append_patch_suffix(&output_root.join(&record.path));
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, diff)?;
            info!("Generated patch: {}", output_path.display());
            summary.patched += 1;
        }
        (DiffStatus::Modified, ChangeCategory::Unknown) => {
            warn!("Ignoring unknown file {}", record.path.display());
            summary.skipped += 1;
        }
        // Build configuration always replaces the upstream file, and an
        // added file has no pre-image to diff against.
        (DiffStatus::Modified, ChangeCategory::BuildConfig) | (DiffStatus::Added, _) => {
            let source = repo_dir.join(&record.path);
            let destination = output_root.join(&record.path);
            copy_with_metadata(&source, &destination)?;
            info!(
                "Copied: {} -> {}",
                source.display(),
                destination.display()
            );
            summary.copied += 1;
        }
    }
    Ok(())
}

/// Append the reserved patch suffix to a path.
fn append_patch_suffix(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(PATCH_SUFFIX);
    PathBuf::from(name)
}
