//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::analytics::DepartmentOrder;
use crate::filter::EmployeeFilter;
use crate::model::EmployeeId;

/// Where employee records are read from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Read users from this JSON file instead of the API
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Case-insensitive match on name, email or department
    #[arg(short = 'S', long)]
    pub search: Option<String>,

    /// Only these departments (repeatable)
    #[arg(short, long = "department", value_name = "NAME")]
    pub departments: Vec<String>,

    /// Only these ratings (repeatable)
    #[arg(short, long = "rating", value_name = "N", value_parser = clap::value_parser!(i32).range(1..=5))]
    pub ratings: Vec<i32>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Employees per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Record source override
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListCommand {
    /// The filter described by the arguments.
    #[must_use]
    pub fn filter(&self) -> EmployeeFilter {
        EmployeeFilter::search(self.search.clone().unwrap_or_default())
            .with_departments(self.departments.iter().cloned())
            .with_ratings(self.ratings.iter().copied())
    }
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Employee id
    pub id: EmployeeId,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Record source override
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Bookmark commands.
#[derive(Debug, Subcommand)]
pub enum BookmarkCommand {
    /// Add or remove a bookmark
    Toggle {
        /// Employee id
        id: EmployeeId,
    },

    /// List bookmarked employees
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Record source override
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Analytics command arguments.
#[derive(Debug, Args)]
pub struct AnalyticsCommand {
    /// Department ordering
    #[arg(long, value_enum, default_value = "count")]
    pub sort: SortArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Record source override
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Department ordering argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortArg {
    /// Largest departments first
    #[default]
    Count,
    /// Best-rated departments first
    RatingDesc,
    /// Worst-rated departments first
    RatingAsc,
}

impl From<SortArg> for DepartmentOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Count => Self::EmployeeCountDesc,
            SortArg::RatingDesc => Self::AverageRatingDesc,
            SortArg::RatingAsc => Self::AverageRatingAsc,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
