//! The dashboard views behind each CLI command.
//!
//! A [`Dashboard`] pairs a record provider with the bookmark store and
//! produces finished output for the binary to print.

use rand::Rng;
use tracing::{debug, info};

use crate::analytics::{
    aggregate_by_department, bookmark_trend, sort_departments, summarize, DepartmentOrder,
};
use crate::bookmarks::BookmarkStore;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::filter::{paginate, EmployeeFilter};
use crate::model::{Employee, EmployeeId};
use crate::provider::{Fetched, RecordProvider};
use crate::report;
use crate::storage::KeyValueStore;

/// Shown when the provider could not answer.
const UNAVAILABLE_NOTICE: &str = "Employee data is currently unavailable.";

/// Employee views over one provider and one bookmark store.
pub struct Dashboard<S> {
    provider: Box<dyn RecordProvider>,
    bookmarks: BookmarkStore<S>,
    page_size: usize,
}

impl<S> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("provider", &self.provider.name())
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Dashboard over `provider` and `bookmarks`, listing `page_size` per page.
    pub fn new(
        provider: Box<dyn RecordProvider>,
        bookmarks: BookmarkStore<S>,
        page_size: usize,
    ) -> Self {
        Self {
            provider,
            bookmarks,
            page_size,
        }
    }

    /// The bookmark store.
    #[must_use]
    pub fn bookmarks(&self) -> &BookmarkStore<S> {
        &self.bookmarks
    }

    async fn employees(&self) -> Fetched<Vec<Employee>> {
        debug!(provider = self.provider.name(), "Fetching employees");
        self.provider.fetch_employees().await
    }

    /// One page of employees passing `filter`.
    ///
    /// `page_size` overrides the configured page size.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn list(
        &self,
        filter: &EmployeeFilter,
        page: usize,
        page_size: Option<usize>,
        format: OutputFormat,
    ) -> Result<String> {
        let Fetched::Data(employees) = self.employees().await else {
            return Ok(UNAVAILABLE_NOTICE.to_string());
        };

        let matching = filter.apply(&employees);
        debug!(
            total = employees.len(),
            matching = matching.len(),
            active_filters = filter.active_filter_count(),
            "Filtered employees"
        );
        let page = paginate(&matching, page, page_size.unwrap_or(self.page_size));
        report::render_employees(&page, |id| self.bookmarks.is_bookmarked(id), format)
    }

    /// The profile of employee `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn show(&self, id: EmployeeId, format: OutputFormat) -> Result<String> {
        match self.provider.fetch_employee_by_id(id).await {
            Fetched::Data(Some(employee)) => {
                report::render_profile(&employee, self.bookmarks.is_bookmarked(id), format)
            }
            Fetched::Data(None) => Ok(format!("No employee with id {id}.")),
            Fetched::Unavailable { .. } => Ok(UNAVAILABLE_NOTICE.to_string()),
        }
    }

    /// Flip the bookmark on `id` and describe the outcome.
    pub fn toggle_bookmark(&mut self, id: EmployeeId) -> String {
        let bookmarked = self.bookmarks.toggle(id);
        let mut message = if bookmarked {
            format!("Bookmarked employee {id}.")
        } else {
            format!("Removed bookmark for employee {id}.")
        };
        if self.bookmarks.is_dirty() {
            message.push_str(" (not saved; see log)");
        }
        message
    }

    /// Every bookmarked employee the provider knows, in one page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn bookmarked(&self, format: OutputFormat) -> Result<String> {
        if self.bookmarks.is_empty() && format != OutputFormat::Json {
            return Ok("No bookmarked employees.".to_string());
        }
        let Fetched::Data(employees) = self.employees().await else {
            return Ok(UNAVAILABLE_NOTICE.to_string());
        };

        let marked = self.bookmarks.filter_bookmarked(&employees);
        let page = paginate(&marked, 1, marked.len());
        report::render_employees(&page, |id| self.bookmarks.is_bookmarked(id), format)
    }

    /// Department table, bookmark trend and headline numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn analytics<R>(
        &self,
        order: DepartmentOrder,
        format: OutputFormat,
        rng: &mut R,
    ) -> Result<String>
    where
        R: Rng + ?Sized,
    {
        let Fetched::Data(employees) = self.employees().await else {
            return Ok(UNAVAILABLE_NOTICE.to_string());
        };

        let mut departments = aggregate_by_department(&employees, rng);
        sort_departments(&mut departments, order);
        let trend = bookmark_trend(rng);
        let summary = summarize(&departments, &trend);
        info!(
            departments = departments.len(),
            employees = summary.total_employees,
            "Computed analytics"
        );

        if format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "departments": departments,
                "bookmarkTrend": trend,
                "summary": summary,
            }))?);
        }

        Ok(format!(
            "{}\n{}\nBookmark trend\n{}",
            report::render_summary(&summary, format)?,
            report::render_departments(&departments, format)?,
            report::render_trend(&trend, format)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_employee;
    use crate::provider::StaticProvider;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct OfflineProvider;

    #[async_trait]
    impl RecordProvider for OfflineProvider {
        fn name(&self) -> &'static str {
            "offline"
        }

        async fn fetch_employees(&self) -> Fetched<Vec<Employee>> {
            Fetched::Unavailable {
                reason: "offline".to_string(),
            }
        }

        async fn fetch_employee_by_id(&self, _id: EmployeeId) -> Fetched<Option<Employee>> {
            Fetched::Unavailable {
                reason: "offline".to_string(),
            }
        }
    }

    fn dashboard() -> Dashboard<MemoryStore> {
        let staff = vec![
            test_employee(1, "Sales", 3),
            test_employee(2, "Sales", 3),
            test_employee(3, "HR", 5),
        ];
        Dashboard::new(
            Box::new(StaticProvider::new(staff)),
            BookmarkStore::load(MemoryStore::new()),
            2,
        )
    }

    fn offline() -> Dashboard<MemoryStore> {
        Dashboard::new(
            Box::new(OfflineProvider),
            BookmarkStore::load(MemoryStore::new()),
            8,
        )
    }

    #[tokio::test]
    async fn test_list_paginates_with_configured_size() {
        let dash = dashboard();

        let out = dash
            .list(&EmployeeFilter::default(), 2, None, OutputFormat::Plain)
            .await
            .unwrap();
        assert!(out.contains("#3 First3 Last3"));
        assert!(out.contains("Page 2 of 2 (3 employees)"));
    }

    #[tokio::test]
    async fn test_list_applies_filter_and_override() {
        let dash = dashboard();
        let filter = EmployeeFilter::default().with_departments(["Sales"]);

        let out = dash
            .list(&filter, 1, Some(10), OutputFormat::Plain)
            .await
            .unwrap();
        assert!(out.contains("Page 1 of 1 (2 employees)"));
        assert!(!out.contains("First3"));
    }

    #[tokio::test]
    async fn test_toggle_then_bookmarked_listing() {
        let mut dash = dashboard();

        assert_eq!(dash.toggle_bookmark(3), "Bookmarked employee 3.");
        let out = dash.bookmarked(OutputFormat::Plain).await.unwrap();
        assert!(out.starts_with("* #3 First3 Last3"));

        assert_eq!(dash.toggle_bookmark(3), "Removed bookmark for employee 3.");
        let out = dash.bookmarked(OutputFormat::Plain).await.unwrap();
        assert_eq!(out, "No bookmarked employees.");
    }

    #[tokio::test]
    async fn test_show() {
        let mut dash = dashboard();
        dash.toggle_bookmark(1);

        let out = dash.show(1, OutputFormat::Plain).await.unwrap();
        assert!(out.starts_with("First1 Last1 (#1) [bookmarked]"));

        let missing = dash.show(99, OutputFormat::Plain).await.unwrap();
        assert_eq!(missing, "No employee with id 99.");
    }

    #[tokio::test]
    async fn test_analytics_text() {
        let dash = dashboard();
        let mut rng = StdRng::seed_from_u64(42);

        let out = dash
            .analytics(DepartmentOrder::EmployeeCountDesc, OutputFormat::Plain, &mut rng)
            .await
            .unwrap();
        assert!(out.contains("Average rating:   3.67"));
        assert!(out.contains("Sales: 2 employees, average 3.00"));
        assert!(out.contains("HR: 1 employees, average 5.00"));
        assert!(out.find("Sales:").unwrap() < out.find("HR:").unwrap());
        assert!(out.contains("Bookmark trend"));
    }

    #[tokio::test]
    async fn test_analytics_json() {
        let dash = dashboard();
        let mut rng = StdRng::seed_from_u64(42);

        let out = dash
            .analytics(DepartmentOrder::AverageRatingDesc, OutputFormat::Json, &mut rng)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["departments"][0]["name"], "HR");
        assert_eq!(value["bookmarkTrend"].as_array().unwrap().len(), 6);
        assert_eq!(value["summary"]["totalEmployees"], 3);
    }

    #[tokio::test]
    async fn test_unavailable_provider_shows_notice() {
        let mut dash = offline();
        let mut rng = StdRng::seed_from_u64(1);

        let listing = dash
            .list(&EmployeeFilter::default(), 1, None, OutputFormat::Table)
            .await
            .unwrap();
        assert_eq!(listing, UNAVAILABLE_NOTICE);
        assert_eq!(dash.show(1, OutputFormat::Plain).await.unwrap(), UNAVAILABLE_NOTICE);
        assert_eq!(
            dash.analytics(DepartmentOrder::default(), OutputFormat::Plain, &mut rng)
                .await
                .unwrap(),
            UNAVAILABLE_NOTICE
        );

        dash.toggle_bookmark(4);
        assert_eq!(
            dash.bookmarked(OutputFormat::Plain).await.unwrap(),
            UNAVAILABLE_NOTICE
        );
        assert_eq!(dash.bookmarks().ids(), &[4]);
    }
}
