//! # Generate Command Implementation
//!
//! This module implements the `generate` subcommand, which derives an
//! overlay tree from the working tree's divergence against a git
//! reference.
//!
//! ## Functionality
//!
//! - **Preconditions**: refuses to run on a dirty working tree or an
//!   unresolvable reference
//! - **Change Policy**: modified build configuration and added files are
//!   copied verbatim; modified native sources become single-file
//!   patches; other modified files are skipped with a warning
//! - **Exit Codes**: returns 0 on success, including the case where
//!   nothing changed and no output is produced
//!
//! The generated tree is the durable interchange format consumed by the
//! `apply` subcommand; it is written under the given prefix, mirroring
//! the source paths. Stale entries from prior runs are never removed.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_overlay::output::{emoji, OutputConfig};

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Git reference to compare against (e.g., origin/main, HEAD~1, commit-sha)
    #[arg(value_name = "GIT_REF")]
    pub git_ref: String,

    /// Output directory where overlay files will be generated
    #[arg(value_name = "PREFIX")]
    pub prefix: PathBuf,

    /// Source repository to scan
    ///
    /// If not provided, it defaults to the current working directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo_dir: PathBuf,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, output: &OutputConfig) -> Result<()> {
    use repo_overlay::generate;
    use repo_overlay::git::SystemGit;
    use std::time::Instant;

    let start_time = Instant::now();

    if !args.quiet {
        println!("{} Repo Overlay Generate", emoji(output, "🔍", "[GENERATE]"));
        println!();
    }

    let git = SystemGit::new();

    match generate::generate_overlay(&git, &args.repo_dir, &args.git_ref, &args.prefix) {
        Ok(summary) if summary.is_empty() => {
            if !args.quiet {
                println!("Nothing to do. Please check git ref.");
            }
            Ok(())
        }
        Ok(summary) => {
            if !args.quiet {
                let duration = start_time.elapsed();
                println!(
                    "{} Generated overlay in {:.2}s",
                    emoji(output, "✅", "[OK]"),
                    duration.as_secs_f64()
                );
                println!(
                    "   {} files copied, {} patches generated, {} skipped",
                    summary.copied, summary.patched, summary.skipped
                );
                println!("   Overlay written to: {}", args.prefix.display());
            }

            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Generate failed", emoji(output, "❌", "[FAIL]"));
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

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    #[test]
    fn test_positional_arguments() {
        let cli = TestCli::parse_from(["test", "origin/main", "patch_output"]);
        assert_eq!(cli.args.git_ref, "origin/main");
        assert_eq!(cli.args.prefix, PathBuf::from("patch_output"));
        assert_eq!(cli.args.repo_dir, PathBuf::from("."));
    }

    #[test]
    fn test_repo_dir_flag() {
        let cli = TestCli::parse_from([
            "test",
            "HEAD~1",
            "out",
            "--repo-dir",
            "checkouts/upstream",
        ]);
        assert_eq!(cli.args.repo_dir, PathBuf::from("checkouts/upstream"));
    }

    #[test]
    fn test_both_positionals_required() {
        assert!(TestCli::try_parse_from(["test", "origin/main"]).is_err());
        assert!(TestCli::try_parse_from(["test"]).is_err());
    }
}
