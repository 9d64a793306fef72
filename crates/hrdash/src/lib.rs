//! `hrdash` - Core of an HR dashboard
//!
//! This library provides employee records (fetched from a users API and
//! enriched with demo HR data), a persistent bookmark set, per-department
//! analytics, and the search and rendering used by the `hrdash` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod bookmarks;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod provider;
pub mod report;
pub mod storage;

pub use analytics::{
    aggregate_by_department, generate_bookmark_trend, AnalyticsSummary, BookmarkTrendPoint,
    DepartmentAggregate, DepartmentOrder,
};
pub use bookmarks::{BookmarkStore, BOOKMARKS_KEY};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use filter::{paginate, EmployeeFilter, Page};
pub use logging::init_logging;
pub use model::{Employee, EmployeeId};
pub use provider::{Fetched, FileProvider, HttpProvider, RecordProvider, StaticProvider};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
