//! Department analytics.
//!
//! Groups employee records by department and averages their ratings. Two of
//! the values produced here are simulated rather than measured: each
//! department's `performance_trend` and the whole bookmark trend series are
//! random placeholder data drawn from the caller's random source. They are
//! demo figures and do not reflect history or the real bookmark store.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Employee;

/// Three-letter month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of points in the bookmark trend.
pub const TREND_MONTHS: usize = 6;

/// Smallest simulated monthly bookmark count.
pub const TREND_MIN_COUNT: u32 = 5;

/// Largest simulated monthly bookmark count.
pub const TREND_MAX_COUNT: u32 = 24;

/// Per-department statistics derived from a snapshot of employee records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAggregate {
    /// Department label.
    pub name: String,
    /// Number of records in the department.
    pub employee_count: usize,
    /// Mean rating rounded to two decimals. NaN when `employee_count` is 0.
    pub average_rating: f64,
    /// Simulated trend in [-1, 1], rounded to two decimals.
    pub performance_trend: f64,
}

impl DepartmentAggregate {
    /// Whether the average can be displayed.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.average_rating.is_finite()
    }
}

/// One month of the simulated bookmark trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkTrendPoint {
    /// Month label from [`MONTH_LABELS`].
    pub month: String,
    /// Simulated bookmark count.
    pub count: u32,
}

/// Ordering applied by callers before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentOrder {
    /// Largest departments first.
    #[default]
    EmployeeCountDesc,
    /// Best-rated departments first.
    AverageRatingDesc,
    /// Worst-rated departments first.
    AverageRatingAsc,
}

/// Headline numbers for the analytics view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Total employees across departments.
    pub total_employees: usize,
    /// Employee-weighted mean rating. NaN when there are no employees.
    pub overall_average: f64,
    /// Department with the best average rating.
    pub highest_rated: Option<DepartmentAggregate>,
    /// Department with the worst average rating.
    pub lowest_rated: Option<DepartmentAggregate>,
    /// Sum of the simulated bookmark trend.
    pub bookmark_total: u32,
}

/// Group `records` by department and compute per-department statistics.
///
/// Departments appear in order of first occurrence, but callers must not
/// rely on that; use [`sort_departments`] for display order. Only departments
/// present in the input are emitted. Ratings are not range-checked.
pub fn aggregate_by_department<R>(records: &[Employee], rng: &mut R) -> Vec<DepartmentAggregate>
where
    R: Rng + ?Sized,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, usize, i64)> = Vec::new();

    for record in records {
        let department = record.department();
        let slot = *index.entry(department).or_insert_with(|| {
            groups.push((department, 0, 0));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1 += 1;
        group.2 += i64::from(record.rating());
    }

    groups
        .into_iter()
        .map(|(name, count, total)| DepartmentAggregate {
            name: name.to_string(),
            employee_count: count,
            average_rating: average(total, count),
            performance_trend: round2(rng.gen_range(-1.0..=1.0)),
        })
        .collect()
}

/// Employee-weighted mean of the department averages.
///
/// NaN when the aggregates hold no employees; callers must check before
/// displaying it.
#[must_use]
pub fn overall_average(aggregates: &[DepartmentAggregate]) -> f64 {
    let (weighted, total) = aggregates
        .iter()
        .filter(|dept| dept.employee_count > 0)
        .fold((0.0_f64, 0_usize), |(weighted, total), dept| {
            (
                weighted + dept.average_rating * count_as_f64(dept.employee_count),
                total + dept.employee_count,
            )
        });
    weighted / count_as_f64(total)
}

/// Sort aggregates for display.
pub fn sort_departments(aggregates: &mut [DepartmentAggregate], order: DepartmentOrder) {
    match order {
        DepartmentOrder::EmployeeCountDesc => {
            aggregates.sort_by(|a, b| b.employee_count.cmp(&a.employee_count));
        }
        DepartmentOrder::AverageRatingDesc => {
            aggregates.sort_by(|a, b| compare_ratings(b, a));
        }
        DepartmentOrder::AverageRatingAsc => {
            aggregates.sort_by(compare_ratings);
        }
    }
}

/// Simulated bookmark counts for the six months ending at `today`'s month,
/// oldest first.
///
/// Placeholder data: counts are drawn from `rng` and have no relation to the
/// bookmark store.
pub fn generate_bookmark_trend<R>(today: NaiveDate, rng: &mut R) -> Vec<BookmarkTrendPoint>
where
    R: Rng + ?Sized,
{
    let current = today.month0() as usize;
    let mut points: Vec<BookmarkTrendPoint> = (0..TREND_MONTHS)
        .map(|back| BookmarkTrendPoint {
            month: MONTH_LABELS[(current + 12 - back) % 12].to_string(),
            count: rng.gen_range(TREND_MIN_COUNT..=TREND_MAX_COUNT),
        })
        .collect();
    points.reverse();
    points
}

/// [`generate_bookmark_trend`] for the local current date.
pub fn bookmark_trend<R>(rng: &mut R) -> Vec<BookmarkTrendPoint>
where
    R: Rng + ?Sized,
{
    generate_bookmark_trend(Local::now().date_naive(), rng)
}

/// Headline numbers over already-computed aggregates.
///
/// Departments with non-renderable averages are skipped when picking the
/// highest and lowest rated.
#[must_use]
pub fn summarize(aggregates: &[DepartmentAggregate], trend: &[BookmarkTrendPoint]) -> AnalyticsSummary {
    let renderable = aggregates.iter().filter(|d| d.is_renderable());
    let highest_rated = renderable
        .clone()
        .max_by(|a, b| compare_ratings(a, b))
        .cloned();
    let lowest_rated = renderable.min_by(|a, b| compare_ratings(a, b)).cloned();

    AnalyticsSummary {
        total_employees: aggregates.iter().map(|d| d.employee_count).sum(),
        overall_average: overall_average(aggregates),
        highest_rated,
        lowest_rated,
        bookmark_total: trend.iter().map(|p| p.count).sum(),
    }
}

fn compare_ratings(a: &DepartmentAggregate, b: &DepartmentAggregate) -> Ordering {
    a.average_rating
        .partial_cmp(&b.average_rating)
        .unwrap_or(Ordering::Equal)
}

fn average(total: i64, count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let total = total as f64;
    round2(total / count_as_f64(count))
}

#[allow(clippy::cast_precision_loss)]
fn count_as_f64(count: usize) -> f64 {
    count as f64
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
