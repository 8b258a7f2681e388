//! # Upstream Snapshot Provisioning
//!
//! Obtains a pristine copy of the upstream repository at the pinned
//! revision the overlay was authored against.
//!
//! Provisioning is destructive by contract: any prior copy at the target
//! location is removed before cloning, so every apply run starts from a
//! clean snapshot. There is no incremental update and no merge with prior
//! state; correctness of the overlay applier depends on this.
//!
//! Clone and checkout failures are fatal. This is a provisioning tool,
//! not a resilient sync daemon, so no retry is attempted.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::git::GitOperations;

/// The exact upstream baseline an overlay is authored against.
///
/// The overlay is only guaranteed to apply onto this revision; an apply
/// failure usually means the overlay and the snapshot have drifted apart
/// and the overlay needs regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    /// Clone URL of the upstream repository.
    pub url: String,
    /// Pinned revision (commit hash, tag, or branch).
    pub revision: String,
}

/// Produce a fresh, exclusively-owned working copy of `snapshot` at
/// `target_dir`, checked out exactly at the pinned revision.
///
/// Removes any existing directory at `target_dir` first.
pub fn provision(
    git: &dyn GitOperations,
    snapshot: &RepositorySnapshot,
    target_dir: &Path,
) -> Result<()> {
    if target_dir.exists() {
        info!("Removing existing repository at {}", target_dir.display());
        fs::remove_dir_all(target_dir)?;
    }

    info!(
        "Cloning {} at revision {} into {}",
        snapshot.url,
        snapshot.revision,
        target_dir.display()
    );

    git.clone_repo(&snapshot.url, target_dir)
        .map_err(|e| provision_error(snapshot, e))?;
    git.checkout(&snapshot.revision, target_dir)
        .map_err(|e| provision_error(snapshot, e))?;

    Ok(())
}

fn provision_error(snapshot: &RepositorySnapshot, cause: Error) -> Error {
    let message = match cause {
        Error::GitCommand { stderr, .. } => stderr,
        other => other.to_string(),
    };
    Error::Provision {
        url: snapshot.url.clone(),
        revision: snapshot.revision.clone(),
        message,
    }
}
