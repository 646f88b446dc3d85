use std::path::PathBuf;

use clap::{ArgAction, Parser};
use refls_core::{Mode, Options};

/// Abbreviation width used when `--abbrev` is given without a value.
const DEFAULT_ABBREV: usize = 8;

#[derive(Parser)]
#[command(
    name = "refls",
    about = "List, verify, and diff named references in a repository",
    version,
    // -h is --head, matching the command this tool descends from; help is
    // reachable via --help only.
    disable_help_flag = true,
)]
pub struct Cli {
    /// Only show tags (can be combined with --heads)
    #[arg(long)]
    pub tags: bool,

    /// Only show heads (can be combined with --tags)
    #[arg(long)]
    pub heads: bool,

    /// Stricter reference checking; requires an exact ref path
    #[arg(long)]
    pub verify: bool,

    /// Show the HEAD reference, even if it would be filtered out
    #[arg(short = 'h', long = "head")]
    pub head: bool,

    /// Dereference tags into object IDs
    #[arg(short = 'd', long)]
    pub dereference: bool,

    /// Only show the hash, optionally abbreviated to <n> digits
    #[arg(
        short = 's',
        long = "hash",
        value_name = "n",
        num_args = 0..=1,
        require_equals = true,
    )]
    pub hash: Option<Option<usize>>,

    /// Abbreviate hashes to <n> digits
    #[arg(long, value_name = "n", num_args = 0..=1, require_equals = true)]
    pub abbrev: Option<Option<usize>>,

    /// Do not print results to stdout (useful with --verify)
    #[arg(short, long)]
    pub quiet: bool,

    /// Show refs from stdin that aren't in the local repository
    #[arg(
        long = "exclude-existing",
        value_name = "pattern",
        num_args = 0..=1,
        require_equals = true,
    )]
    pub exclude_existing: Option<Option<String>>,

    /// Repository directory (or a directory containing .refls)
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Patterns (listing mode) or refs (--verify)
    #[arg(value_name = "pattern")]
    pub args: Vec<String>,
}

impl Cli {
    /// The execution mode selected by the flags. Exclude-existing takes
    /// precedence over verify, which takes precedence over listing.
    pub fn mode(&self) -> Mode {
        if let Some(pattern) = &self.exclude_existing {
            Mode::ExcludeExisting {
                pattern: pattern.clone(),
            }
        } else if self.verify {
            Mode::Verify {
                refs: self.args.clone(),
            }
        } else {
            Mode::Listing {
                patterns: self.args.clone(),
            }
        }
    }

    /// The immutable option set shared by all modes.
    pub fn options(&self) -> Options {
        let mut abbrev = match self.abbrev {
            None => 0,
            Some(None) => DEFAULT_ABBREV,
            Some(Some(n)) => n,
        };
        // --hash=n implies hash-only output and sets the width; a bare
        // --hash keeps whatever --abbrev chose (full length by default).
        if let Some(Some(n)) = self.hash {
            abbrev = n;
        }
        Options {
            show_head: self.head,
            heads_only: self.heads,
            tags_only: self.tags,
            dereference: self.dereference,
            hash_only: self.hash.is_some(),
            quiet: self.quiet,
            abbrev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_listing() {
        let cli = Cli::try_parse_from(["refls"]).unwrap();
        assert!(matches!(cli.mode(), Mode::Listing { patterns } if patterns.is_empty()));
    }

    #[test]
    fn parse_listing_patterns() {
        let cli = Cli::try_parse_from(["refls", "main", "v1.0"]).unwrap();
        if let Mode::Listing { patterns } = cli.mode() {
            assert_eq!(patterns, vec!["main", "v1.0"]);
        } else {
            panic!("wrong mode");
        }
    }

    #[test]
    fn parse_heads_and_tags() {
        let cli = Cli::try_parse_from(["refls", "--heads", "--tags"]).unwrap();
        let opts = cli.options();
        assert!(opts.heads_only);
        assert!(opts.tags_only);
    }

    #[test]
    fn parse_verify_mode() {
        let cli = Cli::try_parse_from(["refls", "--verify", "refs/heads/main"]).unwrap();
        if let Mode::Verify { refs } = cli.mode() {
            assert_eq!(refs, vec!["refs/heads/main"]);
        } else {
            panic!("wrong mode");
        }
    }

    #[test]
    fn parse_exclude_existing_without_pattern() {
        let cli = Cli::try_parse_from(["refls", "--exclude-existing"]).unwrap();
        assert!(matches!(
            cli.mode(),
            Mode::ExcludeExisting { pattern: None }
        ));
    }

    #[test]
    fn parse_exclude_existing_with_pattern() {
        let cli =
            Cli::try_parse_from(["refls", "--exclude-existing=refs/heads/"]).unwrap();
        if let Mode::ExcludeExisting { pattern } = cli.mode() {
            assert_eq!(pattern.as_deref(), Some("refs/heads/"));
        } else {
            panic!("wrong mode");
        }
    }

    #[test]
    fn exclude_existing_wins_over_verify() {
        let cli =
            Cli::try_parse_from(["refls", "--verify", "--exclude-existing"]).unwrap();
        assert!(matches!(cli.mode(), Mode::ExcludeExisting { .. }));
    }

    #[test]
    fn short_h_is_head_not_help() {
        let cli = Cli::try_parse_from(["refls", "-h"]).unwrap();
        assert!(cli.options().show_head);
    }

    #[test]
    fn parse_dereference_and_quiet() {
        let cli = Cli::try_parse_from(["refls", "-d", "-q"]).unwrap();
        let opts = cli.options();
        assert!(opts.dereference);
        assert!(opts.quiet);
    }

    #[test]
    fn bare_hash_is_full_length() {
        let cli = Cli::try_parse_from(["refls", "-s"]).unwrap();
        let opts = cli.options();
        assert!(opts.hash_only);
        assert_eq!(opts.abbrev, 0);
    }

    #[test]
    fn hash_with_width() {
        let cli = Cli::try_parse_from(["refls", "--hash=12"]).unwrap();
        let opts = cli.options();
        assert!(opts.hash_only);
        assert_eq!(opts.abbrev, 12);
    }

    #[test]
    fn bare_abbrev_uses_default_width() {
        let cli = Cli::try_parse_from(["refls", "--abbrev"]).unwrap();
        assert_eq!(cli.options().abbrev, DEFAULT_ABBREV);
    }

    #[test]
    fn abbrev_with_width() {
        let cli = Cli::try_parse_from(["refls", "--abbrev=16"]).unwrap();
        assert_eq!(cli.options().abbrev, 16);
    }

    #[test]
    fn hash_width_overrides_abbrev() {
        let cli = Cli::try_parse_from(["refls", "--abbrev=16", "--hash=6"]).unwrap();
        assert_eq!(cli.options().abbrev, 6);
    }
}
