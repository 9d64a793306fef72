//! Text and JSON rendering for the CLI.
//!
//! Each `render_*` function produces the complete output of one view in the
//! requested [`OutputFormat`]. Plain output is one line per item; table output
//! aligns columns; JSON goes through serde.

use std::fmt;

use serde::Serialize;

use crate::analytics::{AnalyticsSummary, BookmarkTrendPoint, DepartmentAggregate};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::filter::Page;
use crate::model::{Employee, EmployeeId};

/// Shown in place of an average that cannot be displayed.
pub const NOT_AVAILABLE: &str = "n/a";

/// One line of an employee listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    /// Employee id.
    pub id: EmployeeId,
    /// "First Last".
    pub name: String,
    /// Email address.
    pub email: String,
    /// Department label.
    pub department: String,
    /// Rating, 0 when absent.
    pub rating: i32,
    /// Whether the employee is bookmarked.
    pub bookmarked: bool,
}

impl EmployeeRow {
    /// Row for `employee`, marked when `is_bookmarked` says so.
    #[must_use]
    pub fn new(employee: &Employee, is_bookmarked: impl Fn(EmployeeId) -> bool) -> Self {
        Self {
            id: employee.id,
            name: employee.full_name(),
            email: employee.email.clone(),
            department: employee.department().to_string(),
            rating: employee.rating(),
            bookmarked: is_bookmarked(employee.id),
        }
    }
}

/// Format an average rating, [`NOT_AVAILABLE`] when it is not finite.
#[must_use]
pub fn format_average(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Render a page of employees, marking those `is_bookmarked` accepts.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_employees(
    page: &Page<&Employee>,
    is_bookmarked: impl Fn(EmployeeId) -> bool,
    format: OutputFormat,
) -> Result<String> {
    let rows: Vec<EmployeeRow> = page
        .items
        .iter()
        .map(|e| EmployeeRow::new(e, &is_bookmarked))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Page {
            items: rows,
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
        })?),
        OutputFormat::Plain => Ok(format!(
            "{}{}",
            PlainRows(&rows),
            PageFooter(page.page, page.total_pages, page.total_items)
        )),
        OutputFormat::Table => Ok(format!(
            "{}{}",
            EmployeeTable(&rows),
            PageFooter(page.page, page.total_pages, page.total_items)
        )),
    }
}

/// Render one employee's profile.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_profile(employee: &Employee, bookmarked: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(employee)?),
        OutputFormat::Plain | OutputFormat::Table => Ok(Profile {
            employee,
            bookmarked,
        }
        .to_string()),
    }
}

/// Render department aggregates in the order given.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_departments(aggregates: &[DepartmentAggregate], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(aggregates)?),
        OutputFormat::Plain => Ok(aggregates
            .iter()
            .map(|d| {
                format!(
                    "{}: {} employees, average {}, trend {:+.2}\n",
                    d.name,
                    d.employee_count,
                    format_average(d.average_rating),
                    d.performance_trend
                )
            })
            .collect()),
        OutputFormat::Table => Ok(DepartmentTable(aggregates).to_string()),
    }
}

/// Render the bookmark trend.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_trend(points: &[BookmarkTrendPoint], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(points)?),
        OutputFormat::Plain => Ok(points
            .iter()
            .map(|p| format!("{}: {}\n", p.month, p.count))
            .collect()),
        OutputFormat::Table => Ok(points
            .iter()
            .map(|p| format!("{:<4} {:>3} {}\n", p.month, p.count, "#".repeat(p.count as usize)))
            .collect()),
    }
}

/// Render the headline numbers.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_summary(summary: &AnalyticsSummary, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(summary)?);
    }

    let department = |d: Option<&DepartmentAggregate>| {
        d.map_or_else(
            || NOT_AVAILABLE.to_string(),
            |d| format!("{} ({})", d.name, format_average(d.average_rating)),
        )
    };

    Ok(format!(
        "Employees:        {}\n\
         Average rating:   {}\n\
         Highest rated:    {}\n\
         Lowest rated:     {}\n\
         Bookmarks (6 mo): {}\n",
        summary.total_employees,
        format_average(summary.overall_average),
        department(summary.highest_rated.as_ref()),
        department(summary.lowest_rated.as_ref()),
        summary.bookmark_total
    ))
}

fn marker(bookmarked: bool) -> char {
    if bookmarked {
        '*'
    } else {
        ' '
    }
}

struct PlainRows<'a>(&'a [EmployeeRow]);

impl fmt::Display for PlainRows<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No employees found.");
        }
        for row in self.0 {
            writeln!(
                f,
                "{} #{} {} <{}> {}, rating {}",
                marker(row.bookmarked),
                row.id,
                row.name,
                row.email,
                row.department,
                row.rating
            )?;
        }
        Ok(())
    }
}

struct EmployeeTable<'a>(&'a [EmployeeRow]);

impl fmt::Display for EmployeeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No employees found.");
        }

        let name_width = column_width("Name", self.0.iter().map(|r| r.name.as_str()));
        let email_width = column_width("Email", self.0.iter().map(|r| r.email.as_str()));
        let dept_width = column_width("Department", self.0.iter().map(|r| r.department.as_str()));

        writeln!(
            f,
            "  {:>4}  {:<name_width$}  {:<email_width$}  {:<dept_width$}  Rating",
            "ID", "Name", "Email", "Department"
        )?;
        writeln!(
            f,
            "  {}",
            "-".repeat(4 + name_width + email_width + dept_width + 6 + 8)
        )?;
        for row in self.0 {
            writeln!(
                f,
                "{} {:>4}  {:<name_width$}  {:<email_width$}  {:<dept_width$}  {}",
                marker(row.bookmarked),
                row.id,
                row.name,
                row.email,
                row.department,
                row.rating
            )?;
        }
        Ok(())
    }
}

struct PageFooter(usize, usize, usize);

impl fmt::Display for PageFooter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(page, total_pages, total_items) = *self;
        writeln!(f)?;
        writeln!(f, "Page {page} of {total_pages} ({total_items} employees)")
    }
}

struct DepartmentTable<'a>(&'a [DepartmentAggregate]);

impl fmt::Display for DepartmentTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No departments.");
        }

        let width = column_width("Department", self.0.iter().map(|d| d.name.as_str()));
        writeln!(
            f,
            "{:<width$}  {:>9}  {:>7}  {:>6}",
            "Department", "Employees", "Average", "Trend"
        )?;
        writeln!(f, "{}", "-".repeat(width + 30))?;
        for d in self.0 {
            writeln!(
                f,
                "{:<width$}  {:>9}  {:>7}  {:>+6.2}",
                d.name,
                d.employee_count,
                format_average(d.average_rating),
                d.performance_trend
            )?;
        }
        Ok(())
    }
}

struct Profile<'a> {
    employee: &'a Employee,
    bookmarked: bool,
}

impl fmt::Display for Profile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.employee;
        let bookmark = if self.bookmarked { " [bookmarked]" } else { "" };

        writeln!(f, "{} (#{}){bookmark}", e.full_name(), e.id)?;
        writeln!(f, "  Email:      {}", e.email)?;
        writeln!(f, "  Phone:      {}", e.phone)?;
        writeln!(f, "  Age:        {}", e.age)?;
        writeln!(f, "  Department: {}", e.department())?;
        if let Some(title) = e.title() {
            writeln!(f, "  Title:      {title}")?;
        }
        if let Some(company) = &e.company {
            writeln!(f, "  Company:    {}", company.name)?;
        }
        if !e.address.city.is_empty() {
            writeln!(f, "  Location:   {}, {}", e.address.city, e.address.state)?;
        }
        writeln!(f, "  Rating:     {}/5", e.rating())?;

        if !e.performance_history.is_empty() {
            writeln!(f)?;
            writeln!(f, "Performance history")?;
            for review in &e.performance_history {
                writeln!(
                    f,
                    "  {}  {}/5  {}: {}",
                    review.date, review.rating, review.reviewed_by, review.comments
                )?;
            }
        }

        if !e.projects.is_empty() {
            writeln!(f)?;
            writeln!(f, "Projects")?;
            for project in &e.projects {
                let end = project
                    .end_date
                    .map_or_else(|| "now".to_string(), |d| d.to_string());
                writeln!(
                    f,
                    "  {} ({}), {} to {}, {}, {}%",
                    project.name,
                    project.role,
                    project.start_date,
                    end,
                    project.status,
                    project.contribution
                )?;
            }
        }

        if !e.feedback.is_empty() {
            writeln!(f)?;
            writeln!(f, "Feedback")?;
            for entry in &e.feedback {
                writeln!(
                    f,
                    "  {}  [{}] {}: {}",
                    entry.date, entry.kind, entry.from, entry.message
                )?;
            }
        }

        Ok(())
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summarize;
    use crate::filter::paginate;
    use crate::model::test_employee;
    use std::collections::HashSet;

    fn aggregate(name: &str, count: usize, average: f64) -> DepartmentAggregate {
        DepartmentAggregate {
            name: name.to_string(),
            employee_count: count,
            average_rating: average,
            performance_trend: 0.25,
        }
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(3.666), "3.67");
        assert_eq!(format_average(4.0), "4.00");
        assert_eq!(format_average(f64::NAN), NOT_AVAILABLE);
    }

    #[test]
    fn test_render_employees_plain_marks_bookmarks() {
        let staff = vec![test_employee(1, "Sales", 4), test_employee(2, "HR", 3)];
        let refs: Vec<&Employee> = staff.iter().collect();
        let page = paginate(&refs, 1, 8);

        let out = render_employees(&page, |id| id == 2, OutputFormat::Plain).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("  #1 First1 Last1"));
        assert!(lines[1].starts_with("* #2 First2 Last2"));
        assert!(lines[1].contains("HR, rating 3"));
        assert!(out.contains("Page 1 of 1 (2 employees)"));
    }

    #[test]
    fn test_employee_row_asks_membership_per_id() {
        let marked: HashSet<EmployeeId> = [3, 8].into_iter().collect();
        let lookup = |id| marked.contains(&id);

        assert!(EmployeeRow::new(&test_employee(3, "Sales", 4), lookup).bookmarked);
        assert!(!EmployeeRow::new(&test_employee(4, "Sales", 4), lookup).bookmarked);
    }

    #[test]
    fn test_render_employees_table() {
        let staff = vec![test_employee(10, "Engineering", 5)];
        let refs: Vec<&Employee> = staff.iter().collect();
        let page = paginate(&refs, 1, 8);

        let out = render_employees(&page, |_| false, OutputFormat::Table).unwrap();
        assert!(out.contains("Department"));
        assert!(out.contains("employee10@example.com"));
    }

    #[test]
    fn test_render_employees_empty() {
        let page = paginate::<&Employee>(&[], 1, 8);
        let out = render_employees(&page, |_| false, OutputFormat::Plain).unwrap();
        assert!(out.starts_with("No employees found."));
    }

    #[test]
    fn test_render_employees_json() {
        let staff = vec![test_employee(1, "Sales", 4)];
        let refs: Vec<&Employee> = staff.iter().collect();
        let page = paginate(&refs, 1, 8);

        let out = render_employees(&page, |id| id == 1, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["items"][0]["bookmarked"], true);
        assert_eq!(value["items"][0]["department"], "Sales");
        assert_eq!(value["totalPages"], 1);
    }

    #[test]
    fn test_render_departments_non_renderable_average() {
        let aggregates = vec![aggregate("Sales", 2, 3.0), aggregate("Ghost", 0, f64::NAN)];

        let plain = render_departments(&aggregates, OutputFormat::Plain).unwrap();
        assert!(plain.contains("Sales: 2 employees, average 3.00, trend +0.25"));
        assert!(plain.contains("Ghost: 0 employees, average n/a"));

        let table = render_departments(&aggregates, OutputFormat::Table).unwrap();
        assert!(table.contains("n/a"));
        assert!(!table.contains("NaN"));
    }

    #[test]
    fn test_render_departments_json_nan_is_null() {
        let out = render_departments(&[aggregate("Ghost", 0, f64::NAN)], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value[0]["averageRating"].is_null());
        assert_eq!(value[0]["employeeCount"], 0);
    }

    #[test]
    fn test_render_trend() {
        let points = vec![
            BookmarkTrendPoint {
                month: "Sep".to_string(),
                count: 5,
            },
            BookmarkTrendPoint {
                month: "Oct".to_string(),
                count: 12,
            },
        ];

        let plain = render_trend(&points, OutputFormat::Plain).unwrap();
        assert_eq!(plain, "Sep: 5\nOct: 12\n");

        let table = render_trend(&points, OutputFormat::Table).unwrap();
        assert!(table.contains("#####"));
    }

    #[test]
    fn test_render_summary() {
        let aggregates = vec![aggregate("Sales", 2, 3.0), aggregate("HR", 1, 5.0)];
        let summary = summarize(&aggregates, &[]);

        let out = render_summary(&summary, OutputFormat::Plain).unwrap();
        assert!(out.contains("Employees:        3"));
        assert!(out.contains("Average rating:   3.67"));
        assert!(out.contains("Highest rated:    HR (5.00)"));
        assert!(out.contains("Lowest rated:     Sales (3.00)"));
    }

    #[test]
    fn test_render_summary_empty() {
        let summary = summarize(&[], &[]);
        let out = render_summary(&summary, OutputFormat::Table).unwrap();
        assert!(out.contains("Average rating:   n/a"));
        assert!(out.contains("Highest rated:    n/a"));
    }

    #[test]
    fn test_render_profile() {
        let mut employee = test_employee(5, "Finance", 4);
        employee.phone = "+91 555 0100".to_string();

        let out = render_profile(&employee, true, OutputFormat::Plain).unwrap();
        assert!(out.starts_with("First5 Last5 (#5) [bookmarked]"));
        assert!(out.contains("Department: Finance"));
        assert!(out.contains("Rating:     4/5"));
        assert!(!out.contains("Projects"));

        let json = render_profile(&employee, false, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["performanceRating"], 4);
    }
}
