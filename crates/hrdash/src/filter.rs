//! Search, filtering and pagination of employee listings.

use serde::Serialize;

use crate::model::Employee;

/// Employees per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Criteria narrowing an employee listing.
///
/// Every criterion left empty matches everything. Department and rating
/// lists are any-of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of name, email or department.
    pub search_term: String,
    /// Exact department names.
    pub departments: Vec<String>,
    /// Accepted ratings.
    pub ratings: Vec<i32>,
}

impl EmployeeFilter {
    /// Filter with only a search term.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    /// Also require one of `departments`.
    #[must_use]
    pub fn with_departments<I, D>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    /// Also require one of `ratings`.
    #[must_use]
    pub fn with_ratings(mut self, ratings: impl IntoIterator<Item = i32>) -> Self {
        self.ratings = ratings.into_iter().collect();
        self
    }

    /// Whether `employee` passes every criterion.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.matches_search(employee)
            && (self.departments.is_empty()
                || self.departments.iter().any(|d| d == employee.department()))
            && (self.ratings.is_empty() || self.ratings.contains(&employee.rating()))
    }

    fn matches_search(&self, employee: &Employee) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        employee.full_name().to_lowercase().contains(&term)
            || employee.email.to_lowercase().contains(&term)
            || employee.department().to_lowercase().contains(&term)
    }

    /// The employees passing the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }

    /// Department and rating criteria in use, each counted once.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.departments.is_empty()) + usize::from(!self.ratings.is_empty())
    }

    /// Whether any criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && self.active_filter_count() == 0
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// Items across all pages.
    pub total_items: usize,
}

/// Slice `items` into pages of `page_size` and return page `page`.
///
/// Pages are 1-based and clamped to `[1, total_pages]`. An empty input yields
/// a single empty page. A zero `page_size` falls back to
/// [`DEFAULT_PAGE_SIZE`].
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let total_pages = items.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items: items.len(),
    }
}
