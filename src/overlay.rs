//! # Overlay Tree Walking and Application
//!
//! The overlay tree is a directory mirroring the upstream repository's
//! layout: files ending in the reserved `.patch` suffix hold unified
//! diffs authored against the pinned revision, all other files are
//! copied into the target tree byte-for-byte.
//!
//! ## Process
//!
//! 1. **Walk**: enumerate all regular files under the overlay root and
//!    sort them lexicographically by relative path. Patches are assumed
//!    independent, so order does not affect the result, but a
//!    deterministic order gives reproducible logs and sane diagnostics
//!    when an apply fails partway through.
//!
//! 2. **Apply**: per entry, either run the VCS diff-application
//!    primitive inside the target repository, or copy bytes and
//!    metadata (permission bits and modification time) to the target
//!    path, creating parent directories first.
//!
//! The first failure aborts the run. Nothing here is re-entrant-safe on
//! an already-patched tree; correctness depends on the provisioner
//! always starting from a clean snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use log::info;
use walkdir::WalkDir;

use crate::classify::{classify_overlay, OverlayKind, PATCH_SUFFIX};
use crate::error::{Error, Result};
use crate::git::GitOperations;

/// A single file of the overlay tree, classified by its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    /// Path relative to the overlay root.
    pub relative_path: PathBuf,
    pub kind: OverlayKind,
}

impl OverlayEntry {
    pub fn new(relative_path: PathBuf) -> Self {
        let kind = classify_overlay(&relative_path);
        Self {
            relative_path,
            kind,
        }
    }

    /// Path of the file this entry produces, relative to the target
    /// repository root.
    ///
    /// For a patch entry this is the relative path with the `.patch`
    /// suffix stripped; for a verbatim entry it is the relative path
    /// unchanged.
    pub fn target_path(&self) -> PathBuf {
        match self.kind {
            OverlayKind::Patch => {
                let name = self.relative_path.to_string_lossy();
                PathBuf::from(&name[..name.len() - PATCH_SUFFIX.len()])
            }
            OverlayKind::Verbatim => self.relative_path.clone(),
        }
    }
}

/// Counts of work performed by [`apply_overlay`], for CLI reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    pub patched: usize,
    pub copied: usize,
}

/// Enumerate all regular files under `overlay_root` as classified
/// entries, sorted lexicographically by relative path.
///
/// Directories and non-regular files are skipped.
pub fn walk_overlay(overlay_root: &Path) -> Result<Vec<OverlayEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(overlay_root) {
        let entry = entry.map_err(|e| Error::Path {
            message: format!("Failed to walk overlay directory: {e}"),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(overlay_root)
            .map_err(|_| Error::Path {
                message: format!("Failed to make path relative: {}", entry.path().display()),
            })?;
        entries.push(OverlayEntry::new(relative.to_path_buf()));
    }
    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(entries)
}

/// Apply every overlay entry onto the provisioned repository at
/// `repo_dir`, in walker order.
///
/// Aborts on the first failure: a patch that no longer applies signals
/// drift between the overlay and the pinned upstream revision, which
/// requires regeneration, not recovery.
pub fn apply_overlay(
    git: &dyn GitOperations,
    overlay_root: &Path,
    repo_dir: &Path,
) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();
    for entry in walk_overlay(overlay_root)? {
        let source = overlay_root.join(&entry.relative_path);
        match entry.kind {
            OverlayKind::Patch => {
                info!("Applying patch {}", entry.relative_path.display());
                git.apply_patch(&source, repo_dir)?;
                stats.patched += 1;
            }
            OverlayKind::Verbatim => {
                let destination = repo_dir.join(entry.target_path());
                info!(
                    "Copying file from {} to {}",
                    source.display(),
                    destination.display()
                );
                copy_with_metadata(&source, &destination)?;
                stats.copied += 1;
            }
        }
    }
    Ok(stats)
}

/// Copy `src` to `dst`, creating missing parent directories and
/// preserving permission bits and modification time.
///
/// Overwrites an existing destination unconditionally.
pub fn copy_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    let copy_error = |message: String| Error::Copy {
        src: src.display().to_string(),
        dst: dst.display().to_string(),
        message,
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| copy_error(e.to_string()))?;
    }

    // fs::copy carries the permission bits along with the bytes.
    fs::copy(src, dst).map_err(|e| copy_error(e.to_string()))?;

    let metadata = fs::metadata(src).map_err(|e| copy_error(e.to_string()))?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dst, mtime).map_err(|e| copy_error(e.to_string()))?;

    Ok(())
}
