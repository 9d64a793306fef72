//! Employee record types.
//!
//! These mirror the JSON shape served by the record provider (camelCase field
//! names). The analytics and bookmark code only look at `id`, the department
//! and the performance rating; the rest rides along for display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of an employee record.
pub type EmployeeId = i64;

/// Department label used when a record carries no company information.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Postal address of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Street line.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
}

/// Employer information attached to an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Department within the company.
    pub department: String,
    /// Job title.
    pub title: String,
}

/// A yearly performance review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    /// Review number within the employee's history.
    pub id: u32,
    /// Review date.
    pub date: NaiveDate,
    /// Rating given.
    pub rating: i32,
    /// Reviewer's name.
    pub reviewed_by: String,
    /// Review summary.
    pub comments: String,
}

/// Lifecycle of a project assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Finished.
    Completed,
    /// Under way.
    InProgress,
    /// Not started yet.
    Planned,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Planned => write!(f, "planned"),
        }
    }
}

/// A project the employee worked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project number within the employee's list.
    pub id: u32,
    /// Project name.
    pub name: String,
    /// Role on the project.
    pub role: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date, only set for completed projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Current status.
    pub status: ProjectStatus,
    /// Contribution in percent.
    pub contribution: u8,
}

/// Tone of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Positive feedback.
    Praise,
    /// Something to work on.
    Improvement,
    /// Neutral remark.
    General,
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Praise => write!(f, "praise"),
            Self::Improvement => write!(f, "improvement"),
            Self::General => write!(f, "general"),
        }
    }
}

/// A feedback entry left by a colleague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Entry number within the employee's list.
    pub id: u32,
    /// When the feedback was given.
    pub date: NaiveDate,
    /// Who gave it.
    pub from: String,
    /// Tone of the feedback.
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    /// Feedback text.
    pub message: String,
}

/// An employee record as served by the record provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Age in years.
    #[serde(default)]
    pub age: u32,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Avatar URL.
    #[serde(default)]
    pub image: String,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
    /// Employer information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    /// Current performance rating, nominally 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_rating: Option<i32>,
    /// Past reviews, newest first.
    #[serde(default)]
    pub performance_history: Vec<PerformanceReview>,
    /// Project assignments.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Colleague feedback.
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

impl Employee {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Department label, [`UNKNOWN_DEPARTMENT`] when no company is attached.
    #[must_use]
    pub fn department(&self) -> &str {
        self.company
            .as_ref()
            .map_or(UNKNOWN_DEPARTMENT, |c| c.department.as_str())
    }

    /// Job title, if known.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.title.as_str())
    }

    /// Performance rating, 0 when absent. Not range-checked.
    #[must_use]
    pub fn rating(&self) -> i32 {
        self.performance_rating.unwrap_or(0)
    }
}

/// Minimal record for unit tests across the crate.
#[cfg(test)]
pub(crate) fn test_employee(id: EmployeeId, department: &str, rating: i32) -> Employee {
    Employee {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("employee{id}@example.com"),
        age: 30,
        phone: String::new(),
        image: String::new(),
        address: Address::default(),
        company: Some(Company {
            name: "Acme Inc.".to_string(),
            department: department.to_string(),
            title: "Analyst".to_string(),
        }),
        performance_rating: Some(rating),
        performance_history: Vec::new(),
        projects: Vec::new(),
        feedback: Vec::new(),
    }
}
