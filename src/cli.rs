use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::IdentitySource;

#[derive(Parser)]
#[command(name = "git-punchcard")]
#[command(about = "Render per-author weekday/hour commit punch cards from git history")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Start from this commit or date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub since: Option<String>,

    #[arg(long, help = "End at this commit or date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub until: Option<String>,

    #[arg(long, value_enum, default_value_t = IdentitySource::Author, help = "Signature that identifies a commit's author")]
    pub identity: IdentitySource,

    #[arg(long, help = "Do not show a progress spinner")]
    pub no_progress: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the punch card to a PNG file
    Render {
        #[arg(short, long, default_value = "punchcard.png", help = "Output file (.png is appended when missing)")]
        output: PathBuf,
    },
    /// Print per-author commit counts by weekday and hour
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Render { output } => crate::punch::exec_render(self.common, output),
            Commands::Stats { json, ndjson } => crate::punch::exec_stats(self.common, json, ndjson),
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_args_before_subcommand() {
        let cli = <Cli as Parser>::try_parse_from([
            "git-punchcard",
            "--repo",
            "/tmp/repo",
            "--identity",
            "committer",
            "-vv",
            "render",
            "--output",
            "card",
        ])
        .unwrap();

        assert_eq!(cli.common.repo, Some(PathBuf::from("/tmp/repo")));
        assert_eq!(cli.common.identity, IdentitySource::Committer);
        assert_eq!(cli.common.verbose, 2);
        assert!(matches!(cli.command, Commands::Render { ref output } if output == &PathBuf::from("card")));
    }

    #[test]
    fn defaults() {
        let cli = <Cli as Parser>::try_parse_from(["git-punchcard", "render"]).unwrap();

        assert_eq!(cli.common.identity, IdentitySource::Author);
        assert!(!cli.common.no_progress);
        assert!(matches!(cli.command, Commands::Render { ref output } if output == &PathBuf::from("punchcard.png")));
    }

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(default_log_filter(0), "warn");
        assert_eq!(default_log_filter(1), "info");
        assert_eq!(default_log_filter(5), "debug");
    }
}
