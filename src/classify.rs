//! # Path Classification Rules
//!
//! Suffix-based classification for both pipelines, kept in one place as
//! explicit rule tables so the rulesets are independently testable.
//!
//! Two classifications live here:
//!
//! - **Overlay kind** (apply pipeline): a stored overlay file is either a
//!   unified-diff *patch* or a *verbatim* copy, decided purely by the
//!   reserved `.patch` suffix on its relative path. Content is never
//!   consulted.
//!
//! - **Change category** (generate pipeline): a changed path is build
//!   configuration, native source, or unknown, decided by a statically
//!   enumerated suffix table evaluated in order, first match wins.

use std::path::Path;

/// Reserved suffix marking an overlay file as a unified-diff patch.
pub const PATCH_SUFFIX: &str = ".patch";

/// How an overlay file is applied onto the target repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Unified diff applied with the VCS diff-application primitive.
    Patch,
    /// Byte-for-byte copy into the target tree.
    Verbatim,
}

/// Category of a changed path in the generate pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCategory {
    /// Build configuration: always replaced wholesale, never patched.
    BuildConfig,
    /// Native source: patched when modified, copied when added.
    NativeSource,
    /// Anything else: skipped with a warning when modified.
    Unknown,
}

/// Suffix rules mapping changed paths to categories, checked in order.
const CATEGORY_RULES: &[(&str, ChangeCategory)] = &[
    (".cmake", ChangeCategory::BuildConfig),
    ("CMakeLists.txt", ChangeCategory::BuildConfig),
    ("vtk.module", ChangeCategory::BuildConfig),
    (".h", ChangeCategory::NativeSource),
    (".cxx", ChangeCategory::NativeSource),
    (".h.in", ChangeCategory::NativeSource),
    (".cxx.in", ChangeCategory::NativeSource),
];

/// Classify an overlay file by its relative path.
///
/// A pure function of the path string: paths ending in [`PATCH_SUFFIX`]
/// are patches, everything else is copied verbatim.
pub fn classify_overlay(relative_path: &Path) -> OverlayKind {
    if path_str(relative_path).ends_with(PATCH_SUFFIX) {
        OverlayKind::Patch
    } else {
        OverlayKind::Verbatim
    }
}

/// Categorize a changed path by the suffix rule table.
pub fn categorize(path: &Path) -> ChangeCategory {
    let name = path_str(path);
    for (suffix, category) in CATEGORY_RULES {
        if name.ends_with(suffix) {
            return *category;
        }
    }
    ChangeCategory::Unknown
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
