use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for the `show` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "repo-profiler")]
#[command(
    author,
    version,
    about = "Rank workspace files by importance and write a deterministic project profile",
    long_about = "Analyzes a workspace (imports, scripts, CI, docs, git activity) and writes a \
    ranked project profile under .loom/ for AI coding assistants to orient themselves."
)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the analysis pipeline and write the profile artifacts
    Run(RunArgs),
    /// Check whether the persisted profile needs a recompute
    Check(CheckArgs),
    /// Summarize the persisted profile
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Workspace root to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Git activity horizon in days
    #[arg(long, default_value_t = 730)]
    pub window_days: u32,

    /// Also honor .gitignore patterns during the scan
    #[arg(long)]
    pub gitignore: bool,

    /// Run even when the existing profile is fresh
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Workspace root to check
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Workspace root holding the profile
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ShowFormat,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
