//! # Repo Overlay Library
//!
//! This library provides the core functionality for maintaining a
//! reproducible source overlay on top of a pinned upstream git
//! repository, without vendoring or forking the upstream tree itself.
//! It is designed to be used by the `repo-overlay` command-line tool but
//! can also be integrated into other applications.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::PathBuf;
//! use repo_overlay::classify::{self, ChangeCategory, OverlayKind};
//! use repo_overlay::overlay::OverlayEntry;
//!
//! // Overlay files are classified purely by their path.
//! let entry = OverlayEntry::new(PathBuf::from("foo/bar.h.in.patch"));
//! assert_eq!(entry.kind, OverlayKind::Patch);
//! assert_eq!(entry.target_path(), PathBuf::from("foo/bar.h.in"));
//!
//! // Changed paths are categorized by a suffix rule table.
//! let category = classify::categorize(&PathBuf::from("CMakeLists.txt"));
//! assert_eq!(category, ChangeCategory::BuildConfig);
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around two independent pipelines that share a
//! data model:
//!
//! - **Apply** (`repository`, `overlay`): provision a pristine copy of
//!   the upstream repository at the pinned revision, then walk the
//!   overlay tree and apply each entry: unified-diff patches through
//!   the VCS, everything else as a verbatim copy.
//! - **Generate** (`scan`, `generate`): compute the changed paths
//!   between a working tree and a reference commit, categorize each by
//!   the suffix rules in `classify`, and emit a copied file or a
//!   single-file diff into an output tree mirroring the source paths.
//!
//! All git invocations go through the `git::GitOperations` trait so the
//! concrete invocation mechanism is swappable, and tests can run both
//! pipelines without a real repository.
//!
//! Everything is sequential and fail-fast: the first error aborts the
//! run, and the only recovery path is re-running apply from scratch,
//! which re-provisions a clean snapshot.

pub mod classify;
pub mod defaults;
pub mod error;
pub mod generate;
pub mod git;
pub mod output;
pub mod overlay;
pub mod repository;
pub mod scan;
pub mod suggestions;
