//! Providers that need no network.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{decode_user_list, Enricher, Fetched, RecordProvider, SeededEnricher};
use crate::error::Result;
use crate::model::{Employee, EmployeeId};

/// Reads users from a JSON file shaped like the users API listing.
///
/// The file is re-read on every call, so edits show up without a restart.
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    enricher: SeededEnricher,
}

impl FileProvider {
    /// Provider over `path`, enriched from `seed` when set.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        Self::with_enricher(path, Enricher::default(), seed)
    }

    /// Provider over `path` with a specific enricher.
    #[must_use]
    pub fn with_enricher(path: impl Into<PathBuf>, enricher: Enricher, seed: Option<u64>) -> Self {
        Self {
            path: path.into(),
            enricher: SeededEnricher::new(enricher, seed),
        }
    }

    /// The file this provider reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Employee>> {
        debug!("Reading users from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        let payload = serde_json::from_str(&text)?;
        let users = decode_user_list(&self.path.to_string_lossy(), payload)?;
        Ok(self.enricher.enrich_all(users))
    }
}

#[async_trait]
impl RecordProvider for FileProvider {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_employees(&self) -> Fetched<Vec<Employee>> {
        Fetched::from_result(self.read_all().await, "employees")
    }

    async fn fetch_employee_by_id(&self, id: EmployeeId) -> Fetched<Option<Employee>> {
        Fetched::from_result(self.read_all().await, &format!("employee {id}"))
            .map(|employees| employees.into_iter().find(|e| e.id == id))
    }
}

/// Serves a fixed set of already-enriched employees.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    employees: Vec<Employee>,
}

impl StaticProvider {
    /// Provider over `employees`.
    #[must_use]
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

#[async_trait]
impl RecordProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_employees(&self) -> Fetched<Vec<Employee>> {
        Fetched::Data(self.employees.clone())
    }

    async fn fetch_employee_by_id(&self, id: EmployeeId) -> Fetched<Option<Employee>> {
        Fetched::Data(self.employees.iter().find(|e| e.id == id).cloned())
    }
}
