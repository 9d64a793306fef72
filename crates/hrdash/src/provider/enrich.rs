//! Synthetic enrichment of raw user records.
//!
//! The users API only knows names, contact details and an employer name.
//! Everything HR-specific (department, title, rating, reviews, projects,
//! feedback) is demo data generated here from the caller's random source.

use chrono::{Datelike, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::model::{
    Address, Company, Employee, EmployeeId, Feedback, FeedbackKind, PerformanceReview, Project,
    ProjectStatus,
};

/// Departments an employee can be assigned to.
pub const DEPARTMENTS: [&str; 8] = [
    "Engineering",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Product",
    "Customer Support",
    "Operations",
];

/// Company name used when the raw record has none.
pub const DEFAULT_COMPANY: &str = "Acme Inc.";

const FIRST_NAMES: [&str; 20] = [
    "Arjun", "Priya", "Rahul", "Neha", "Vikram", "Anjali", "Arun", "Meera", "Karthik", "Divya",
    "Rajesh", "Anita", "Suresh", "Kavita", "Amit", "Pooja", "Deepak", "Sunita", "Sanjay", "Ritu",
];

const LAST_NAMES: [&str; 15] = [
    "Patel", "Kumar", "Singh", "Shah", "Sharma", "Verma", "Gupta", "Malhotra", "Kapoor", "Mehta",
    "Reddy", "Joshi", "Nair", "Iyer", "Rao",
];

const REVIEW_COMMENTS: [&str; 10] = [
    "Consistently meets expectations and delivers quality work.",
    "Exceeds expectations in most areas. A valuable team member.",
    "Shows great potential but needs improvement in meeting deadlines.",
    "Outstanding performance and leadership skills.",
    "Needs improvement in communication and teamwork.",
    "Strong technical skills but could improve in documentation.",
    "Great team player who consistently supports colleagues.",
    "Shows initiative and drives projects forward effectively.",
    "Needs to work on time management and prioritization.",
    "Excellent problem-solving abilities and creative thinking.",
];

const PROJECT_NAMES: [&str; 10] = [
    "Website Redesign",
    "Mobile App Development",
    "Data Migration",
    "Cloud Infrastructure",
    "Marketing Campaign",
    "Product Launch",
    "Customer Research",
    "Process Optimization",
    "Compliance Update",
    "Security Audit",
];

const PROJECT_ROLES: [&str; 7] = [
    "Team Lead",
    "Developer",
    "Designer",
    "Analyst",
    "Coordinator",
    "Consultant",
    "Subject Matter Expert",
];

const PRAISE: [&str; 5] = [
    "Excellent collaboration skills demonstrated during the project.",
    "Went above and beyond to help the team meet deadlines.",
    "Provided innovative solutions to complex problems.",
    "Demonstrated great leadership in challenging situations.",
    "Consistently delivers high-quality work.",
];

const IMPROVEMENT: [&str; 5] = [
    "Could improve communication with stakeholders.",
    "Needs to focus more on documentation.",
    "Should work on time management skills.",
    "Would benefit from more detailed planning.",
    "Could improve technical knowledge in specific areas.",
];

const GENERAL: [&str; 5] = [
    "Consistent contributor to team success.",
    "Works well under pressure.",
    "Good team player who supports colleagues.",
    "Demonstrates good problem-solving abilities.",
    "Adapts well to changing priorities.",
];

/// Job titles available in `department`.
#[must_use]
pub fn job_titles(department: &str) -> &'static [&'static str] {
    match department {
        "Engineering" => &[
            "Software Engineer",
            "Frontend Developer",
            "Backend Developer",
            "DevOps Engineer",
            "QA Engineer",
        ],
        "Marketing" => &[
            "Marketing Specialist",
            "Content Manager",
            "SEO Specialist",
            "Social Media Manager",
            "Brand Strategist",
        ],
        "Sales" => &[
            "Sales Representative",
            "Account Executive",
            "Sales Manager",
            "Business Development",
            "Sales Analyst",
        ],
        "Human Resources" => &[
            "HR Specialist",
            "Recruiter",
            "HR Manager",
            "Talent Acquisition",
            "HR Coordinator",
        ],
        "Finance" => &[
            "Financial Analyst",
            "Accountant",
            "Finance Manager",
            "Payroll Specialist",
            "Financial Controller",
        ],
        "Product" => &[
            "Product Manager",
            "Product Designer",
            "UX Designer",
            "Product Analyst",
            "Product Owner",
        ],
        "Customer Support" => &[
            "Support Specialist",
            "Customer Success Manager",
            "Support Engineer",
            "Customer Advocate",
            "Support Lead",
        ],
        "Operations" => &[
            "Operations Manager",
            "Logistics Coordinator",
            "Operations Analyst",
            "Facilities Manager",
            "Supply Chain Specialist",
        ],
        _ => &["Employee"],
    }
}

/// A user record as served by the users API, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    /// Unique identifier.
    pub id: EmployeeId,
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
    /// Employer, only the name is used.
    #[serde(default)]
    pub company: Option<RawCompany>,
}

/// Employer block of a raw user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawCompany {
    /// Company name.
    pub name: Option<String>,
}

/// Turns raw users into employee records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enricher {
    today: NaiveDate,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl Enricher {
    /// Enricher that dates generated history relative to `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Build an employee from `raw`, filling in the HR fields from `rng`.
    ///
    /// Names are replaced with names from a fixed pool.
    pub fn enrich<R>(&self, raw: RawUser, rng: &mut R) -> Employee
    where
        R: Rng + ?Sized,
    {
        let department = pick(&DEPARTMENTS, rng);
        let company_name = raw
            .company
            .and_then(|c| c.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

        Employee {
            id: raw.id,
            first_name: pick(&FIRST_NAMES, rng).to_string(),
            last_name: pick(&LAST_NAMES, rng).to_string(),
            email: raw.email,
            age: raw.age,
            phone: raw.phone,
            image: raw.image,
            address: raw.address,
            company: Some(Company {
                name: company_name,
                department: department.to_string(),
                title: pick(job_titles(department), rng).to_string(),
            }),
            performance_rating: Some(rng.gen_range(1..=5)),
            performance_history: self.performance_history(rng),
            projects: self.projects(rng),
            feedback: self.feedback(rng),
        }
    }

    /// Three yearly reviews dated June 15, newest first.
    fn performance_history<R>(&self, rng: &mut R) -> Vec<PerformanceReview>
    where
        R: Rng + ?Sized,
    {
        (0..3)
            .map(|i| PerformanceReview {
                id: i + 1,
                date: ymd(self.today.year() - i32::try_from(i).unwrap_or(0), 6, 15),
                rating: rng.gen_range(1..=5),
                reviewed_by: person_name(rng),
                comments: pick(&REVIEW_COMMENTS, rng).to_string(),
            })
            .collect()
    }

    /// Two to four projects started within the last three years.
    fn projects<R>(&self, rng: &mut R) -> Vec<Project>
    where
        R: Rng + ?Sized,
    {
        const STATUSES: [ProjectStatus; 3] = [
            ProjectStatus::Completed,
            ProjectStatus::InProgress,
            ProjectStatus::Planned,
        ];

        let count: u32 = rng.gen_range(2..=4);
        (1..=count)
            .map(|id| {
                let start_year = self.today.year() - rng.gen_range(0..3);
                let start_month = rng.gen_range(1..=12);
                let status = *pick(&STATUSES, rng);

                // Completed projects finish in their start year or, sometimes, the next.
                let end_date = (status == ProjectStatus::Completed).then(|| {
                    if rng.gen_bool(0.3) {
                        ymd(start_year + 1, rng.gen_range(1..=12), 15)
                    } else {
                        ymd(start_year, rng.gen_range(start_month..=12), 15)
                    }
                });

                Project {
                    id,
                    name: pick(&PROJECT_NAMES, rng).to_string(),
                    role: pick(&PROJECT_ROLES, rng).to_string(),
                    start_date: ymd(start_year, start_month, 1),
                    end_date,
                    status,
                    contribution: rng.gen_range(60..=99),
                }
            })
            .collect()
    }

    /// Three to six feedback entries from this year or last.
    fn feedback<R>(&self, rng: &mut R) -> Vec<Feedback>
    where
        R: Rng + ?Sized,
    {
        const KINDS: [FeedbackKind; 3] = [
            FeedbackKind::Praise,
            FeedbackKind::Improvement,
            FeedbackKind::General,
        ];

        let count: u32 = rng.gen_range(3..=6);
        (1..=count)
            .map(|id| {
                let kind = *pick(&KINDS, rng);
                let messages: &[&str] = match kind {
                    FeedbackKind::Praise => &PRAISE,
                    FeedbackKind::Improvement => &IMPROVEMENT,
                    FeedbackKind::General => &GENERAL,
                };
                Feedback {
                    id,
                    date: ymd(
                        self.today.year() - rng.gen_range(0..2),
                        rng.gen_range(1..=12),
                        rng.gen_range(1..=28),
                    ),
                    from: person_name(rng),
                    kind,
                    message: pick(messages, rng).to_string(),
                }
            })
            .collect()
    }
}

fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> &'a T
where
    R: Rng + ?Sized,
{
    // Every pool above is a non-empty constant.
    items.choose(rng).unwrap_or(&items[0])
}

fn person_name<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    format!("{} {}", pick(&FIRST_NAMES, rng), pick(&LAST_NAMES, rng))
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
