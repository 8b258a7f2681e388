//! Apply command implementation
//!
//! The apply command executes the full apply pipeline:
//! 1. Provision a pristine checkout of the upstream repository at the
//!    pinned revision (any prior copy is destroyed first)
//! 2. Walk the overlay directory in deterministic order
//! 3. Apply each entry: unified-diff patches through git, everything
//!    else as a verbatim copy

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_overlay::defaults;
use repo_overlay::output::{emoji, OutputConfig};

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Clone URL of the upstream repository
    #[arg(long, value_name = "URL", env = "REPO_OVERLAY_URL")]
    pub url: String,

    /// Pinned upstream revision the overlay was authored against
    #[arg(long, value_name = "REV", env = "REPO_OVERLAY_REVISION")]
    pub revision: String,

    /// Directory containing the overlay's patch/copy files
    #[arg(long, value_name = "DIR", default_value = defaults::OVERLAY_DIR)]
    pub overlay_dir: PathBuf,

    /// Directory the upstream repository is provisioned into (destroyed first)
    #[arg(long, value_name = "DIR", default_value = defaults::TARGET_DIR)]
    pub target_dir: PathBuf,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, output: &OutputConfig) -> Result<()> {
    use repo_overlay::git::SystemGit;
    use repo_overlay::overlay;
    use repo_overlay::repository::{self, RepositorySnapshot};
    use std::time::Instant;

    let start_time = Instant::now();

    // Validate the overlay directory exists before touching the target
    if !args.overlay_dir.exists() {
        return Err(repo_overlay::suggestions::overlay_dir_not_found(
            &args.overlay_dir,
        ));
    }

    if !args.quiet {
        println!("{} Repo Overlay Apply", emoji(output, "🔍", "[APPLY]"));
        println!();
        println!(
            "Cloning {} at revision {} into {}...",
            args.url,
            args.revision,
            args.target_dir.display()
        );
    }

    let git = SystemGit::new();
    let snapshot = RepositorySnapshot {
        url: args.url.clone(),
        revision: args.revision.clone(),
    };

    let result = repository::provision(&git, &snapshot, &args.target_dir)
        .and_then(|()| overlay::apply_overlay(&git, &args.overlay_dir, &args.target_dir));

    match result {
        Ok(stats) => {
            if !args.quiet {
                let duration = start_time.elapsed();
                println!(
                    "{} Applied successfully in {:.2}s",
                    emoji(output, "✅", "[OK]"),
                    duration.as_secs_f64()
                );
                println!(
                    "   {} patches applied, {} files copied",
                    stats.patched, stats.copied
                );
                println!("   Patched tree at: {}", args.target_dir.display());
            }

            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Apply failed", emoji(output, "❌", "[FAIL]"));
                println!();
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ApplyArgs,
    }

    #[test]
    fn test_default_directories() {
        let cli = TestCli::parse_from(["test", "--url", "u", "--revision", "r"]);
        assert_eq!(cli.args.overlay_dir, PathBuf::from("patch"));
        assert_eq!(cli.args.target_dir, PathBuf::from("upstream"));
        assert!(!cli.args.quiet);
    }

    #[test]
    fn test_explicit_directories() {
        let cli = TestCli::parse_from([
            "test",
            "--url",
            "u",
            "--revision",
            "r",
            "--overlay-dir",
            "overlays/core",
            "--target-dir",
            "build/src",
        ]);
        assert_eq!(cli.args.overlay_dir, PathBuf::from("overlays/core"));
        assert_eq!(cli.args.target_dir, PathBuf::from("build/src"));
    }

    #[test]
    fn test_missing_overlay_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = ApplyArgs {
            url: "https://example.com/upstream.git".to_string(),
            revision: "deadbeef".to_string(),
            overlay_dir: temp.path().join("no-such-overlay"),
            target_dir: temp.path().join("upstream"),
            quiet: true,
        };
        let err = execute(args, &OutputConfig::from_env_and_flag("never")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("No overlay found"));
        // The target must not have been provisioned.
        assert!(!temp.path().join("upstream").exists());
    }
}
