//! Command-line interface for hrdash.
//!
//! This module provides the CLI structure for the `hrdash` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AnalyticsCommand, BookmarkCommand, ConfigCommand, ListCommand, OutputFormat, ShowCommand,
    SortArg, SourceArgs,
};

/// hrdash - Browse employees, bookmark them and see department analytics
///
/// Employee records come from a users API (or a local JSON file) and are
/// enriched with demo HR data. Bookmarks are kept in a local database.
#[derive(Debug, Parser)]
#[command(name = "hrdash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees, with search, filters and paging
    List(ListCommand),

    /// Show one employee's profile
    Show(ShowCommand),

    /// Manage bookmarked employees
    #[command(subcommand)]
    Bookmark(BookmarkCommand),

    /// Show department analytics
    Analytics(AnalyticsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

impl Command {
    /// The `--source` override of data commands, if any.
    #[must_use]
    pub fn source(&self) -> Option<&PathBuf> {
        match self {
            Self::List(cmd) => cmd.source.source.as_ref(),
            Self::Show(cmd) => cmd.source.source.as_ref(),
            Self::Analytics(cmd) => cmd.source.source.as_ref(),
            Self::Bookmark(BookmarkCommand::List { source, .. }) => source.source.as_ref(),
            Self::Bookmark(BookmarkCommand::Toggle { .. }) | Self::Config(_) => None,
        }
    }
}
