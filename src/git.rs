use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Version-control operations needed by the two pipelines.
///
/// Every method takes the repository directory explicitly; nothing here
/// depends on the process working directory. The production
/// implementation is [`SystemGit`], which shells out to the `git`
/// command; tests substitute fakes to simulate clone, diff, and apply
/// behavior without touching the network or a real repository.
///
/// Using the system git command means authentication (SSH keys,
/// credential helpers, personal access tokens) works exactly as it does
/// on the user's command line.
pub trait GitOperations {
    /// Clone `url` into `target_dir`.
    ///
    /// A full clone: the pinned revision may be an arbitrary commit, so
    /// no `--depth` shortcut is taken.
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// Check out `revision` in the repository at `repo_dir`.
    fn checkout(&self, revision: &str, repo_dir: &Path) -> Result<()>;

    /// Resolve `reference` to an object id, failing if it does not exist.
    fn rev_parse(&self, reference: &str, repo_dir: &Path) -> Result<String>;

    /// Whether tracked files in `repo_dir` carry uncommitted modifications.
    fn has_uncommitted_changes(&self, repo_dir: &Path) -> Result<bool>;

    /// Raw `git diff --name-status <reference>` output.
    fn diff_name_status(&self, reference: &str, repo_dir: &Path) -> Result<String>;

    /// Unified diff of a single file against `reference`.
    fn diff_file(&self, reference: &str, path: &Path, repo_dir: &Path) -> Result<String>;

    /// Apply the unified diff stored in `patch_file` onto `repo_dir`.
    ///
    /// The diff's embedded paths are interpreted relative to the
    /// repository root.
    fn apply_patch(&self, patch_file: &Path, repo_dir: &Path) -> Result<()>;
}

/// [`GitOperations`] implementation backed by the system `git` binary.
///
/// The binary path comes from the `$GIT` environment variable when set
/// to a non-empty value (trimmed), falling back to `git`.
pub struct SystemGit {
    binary: String,
}

impl SystemGit {
    pub fn new() -> Self {
        let binary = match std::env::var("GIT") {
            Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => "git".to_string(),
        };
        Self { binary }
    }

    /// Path to the git binary this instance invokes.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run a git command in `dir` and return its stdout, or a
    /// [`Error::GitCommand`] carrying the command line and stderr.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::GitCommand {
                command: format!("{} {}", self.binary, args.join(" ")),
                stderr: e.to_string(),
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::GitCommand {
                command: format!("{} {}", self.binary, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitOperations for SystemGit {
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()> {
        let target = target_dir.to_string_lossy();
        // A relative target resolves against the invocation directory.
        self.run(Path::new("."), &["clone", url, &target])?;
        Ok(())
    }

    fn checkout(&self, revision: &str, repo_dir: &Path) -> Result<()> {
        self.run(repo_dir, &["checkout", revision])?;
        Ok(())
    }

    fn rev_parse(&self, reference: &str, repo_dir: &Path) -> Result<String> {
        let stdout = self.run(repo_dir, &["rev-parse", reference])?;
        Ok(stdout.trim().to_string())
    }

    fn has_uncommitted_changes(&self, repo_dir: &Path) -> Result<bool> {
        let stdout = self.run(repo_dir, &["diff", "--name-only"])?;
        Ok(!stdout.trim().is_empty())
    }

    fn diff_name_status(&self, reference: &str, repo_dir: &Path) -> Result<String> {
        self.run(repo_dir, &["diff", "--name-status", reference])
    }

    fn diff_file(&self, reference: &str, path: &Path, repo_dir: &Path) -> Result<String> {
        let path = path.to_string_lossy();
        // `--` so paths starting with `-` are treated as paths.
        self.run(repo_dir, &["diff", reference, "--", &path])
    }

    fn apply_patch(&self, patch_file: &Path, repo_dir: &Path) -> Result<()> {
        let absolute = if patch_file.is_absolute() {
            patch_file.to_path_buf()
        } else {
            std::env::current_dir()?.join(patch_file)
        };
        let patch = absolute.to_string_lossy();
        self.run(repo_dir, &["apply", &patch])
            .map_err(|e| match e {
                Error::GitCommand { stderr, .. } => Error::PatchApply {
                    patch: patch_file.display().to_string(),
                    stderr,
                },
                other => other,
            })?;
        Ok(())
    }
}
