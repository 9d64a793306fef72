//! `SQLite` schema for hrdash local storage.
//!
//! There is a single schema version. Opening a database stamps it on fresh
//! files and refuses files written by a newer hrdash.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

/// Schema version written by this build.
pub const CURRENT_VERSION: i32 = 1;

/// Metadata key holding the schema version.
const VERSION_KEY: &str = "schema_version";

/// Key-value table backing local storage.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Metadata table (schema version and similar bookkeeping).
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Create the tables if needed and check the stored schema version.
///
/// # Errors
///
/// Returns an error if the tables cannot be created, or the stored version
/// is unreadable or newer than [`CURRENT_VERSION`].
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!("{CREATE_KV_TABLE};{CREATE_METADATA_TABLE};"))?;

    match stored_version(conn)? {
        None => {
            conn.execute(
                "INSERT INTO metadata (key, value) VALUES (?1, ?2)",
                (VERSION_KEY, CURRENT_VERSION.to_string()),
            )?;
            Ok(())
        }
        Some(version) if version > CURRENT_VERSION => Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        }),
        Some(_) => Ok(()),
    }
}

fn stored_version(conn: &Connection) -> Result<Option<i32>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    raw.map(|value| {
        value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        })
    })
    .transpose()
}
