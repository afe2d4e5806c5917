//! Domain models for reports and semester tags.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    MemberStatistics,
    EventOutcomes,
    ActivityTracking,
    ClubLeadership,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportKind::MemberStatistics => "Member Statistics",
            ReportKind::EventOutcomes => "Event Outcomes",
            ReportKind::ActivityTracking => "Activity Tracking",
            ReportKind::ClubLeadership => "Club Leadership",
        };
        write!(f, "{}", label)
    }
}

/// An immutable snapshot generated from live data. Regenerating over the
/// same inputs produces a new report with its own ID; stored content is
/// never recomputed or updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub kind: ReportKind,
    /// JSON document rendered at generation time
    pub content: String,
    /// Semester tag, e.g. "2026-Spring"
    pub semester: String,
    pub club_id: String,
    pub author_id: String,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Generate a unique report ID.
    /// Format: report::<uuid>
    pub fn generate_id() -> String {
        format!("report::{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SemesterParseError {
    #[error("Semester must look like '2026-Spring' or '2026-Fall'")]
    InvalidFormat,
    #[error("Semester year is out of range")]
    InvalidYear,
    #[error("Unknown term '{0}', expected 'Spring' or 'Fall'")]
    UnknownTerm(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Spring,
    Fall,
}

/// A semester tag such as "2026-Spring".
///
/// Spring runs January 1 through June 30, Fall runs July 1 through
/// December 31; the windows partition the year so every event date falls
/// into exactly one semester. Only [`Semester::parse`] builds values, so
/// the year always sits inside the range it validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semester {
    year: i32,
    term: Term,
}

impl Semester {
    pub fn parse(tag: &str) -> Result<Self, SemesterParseError> {
        let (year_part, term_part) = tag
            .split_once('-')
            .ok_or(SemesterParseError::InvalidFormat)?;
        let year: i32 = year_part
            .parse()
            .map_err(|_| SemesterParseError::InvalidFormat)?;
        if !(1970..=9999).contains(&year) {
            return Err(SemesterParseError::InvalidYear);
        }
        let term = match term_part {
            "Spring" => Term::Spring,
            "Fall" => Term::Fall,
            other => return Err(SemesterParseError::UnknownTerm(other.to_string())),
        };
        Ok(Semester { year, term })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn term(&self) -> Term {
        self.term
    }

    /// First day of the semester.
    pub fn start(&self) -> NaiveDate {
        let month = match self.term {
            Term::Spring => 1,
            Term::Fall => 7,
        };
        NaiveDate::from_ymd_opt(self.year, month, 1).expect("first day of term is valid")
    }

    /// First day after the semester.
    pub fn end_exclusive(&self) -> NaiveDate {
        match self.term {
            Term::Spring => NaiveDate::from_ymd_opt(self.year, 7, 1),
            Term::Fall => NaiveDate::from_ymd_opt(self.year + 1, 1, 1),
        }
        .expect("first day after term is valid")
    }

    pub fn contains(&self, moment: DateTime<Utc>) -> bool {
        let day = moment.date_naive();
        self.start() <= day && day < self.end_exclusive()
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let term = match self.term {
            Term::Spring => "Spring",
            Term::Fall => "Fall",
        };
        write!(f, "{}-{}", self.year, term)
    }
}
