//! Exam model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Grade stored for an exam that has not been passed yet.
pub const PENDING: u8 = 0;

/// Lowest passing grade.
pub const MIN_PASSING: u8 = 18;

/// Highest plain grade; honors are averaged at this value.
pub const MAX_GRADE: u8 = 30;

/// Sentinel grade for maximum honors ("30L").
pub const HONORS: u8 = 31;

/// Date format used for input and for the records file (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Represents a single exam in the student's record book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Exam name (e.g., "Analisi Matematica I")
    pub name: String,

    /// Credit weight (CFU)
    #[serde(rename = "CFU")]
    pub credits: u32,

    /// Grade: 0 while pending, otherwise 18..=31 where 31 is honors
    #[serde(default)]
    pub grade: u8,

    /// Date the exam was passed, if recorded
    #[serde(default, with = "dmy_date")]
    pub date: Option<NaiveDate>,
}

impl ExamRecord {
    /// Create a new exam with no grade yet
    ///
    /// # Arguments
    /// * `name` - Exam name
    /// * `credits` - Credit weight (CFU)
    #[must_use]
    pub const fn new(name: String, credits: u32) -> Self {
        Self {
            name,
            credits,
            grade: PENDING,
            date: None,
        }
    }

    /// Create an exam that already carries a grade and optional date
    #[must_use]
    pub const fn graded(name: String, credits: u32, grade: u8, date: Option<NaiveDate>) -> Self {
        Self {
            name,
            credits,
            grade,
            date,
        }
    }

    /// Whether the exam has been passed
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.grade > PENDING
    }

    /// Whether the exam was passed with honors
    #[must_use]
    pub const fn is_honors(&self) -> bool {
        self.grade == HONORS
    }

    /// Grade used for averaging: honors count as a plain 30
    #[must_use]
    pub const fn averaging_grade(&self) -> u8 {
        if self.grade == HONORS {
            MAX_GRADE
        } else {
            self.grade
        }
    }

    /// Assign a grade and date
    pub fn assign(&mut self, grade: u8, date: Option<NaiveDate>) {
        self.grade = grade;
        self.date = date;
    }

    /// Clear grade and date, returning the exam to pending
    pub fn clear(&mut self) {
        self.grade = PENDING;
        self.date = None;
    }

    /// Reason the record cannot be averaged, if any
    #[must_use]
    pub fn defect(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name is empty")
        } else if self.credits == 0 {
            Some("credits must be positive")
        } else if self.grade != PENDING && !(MIN_PASSING..=HONORS).contains(&self.grade) {
            Some("grade must be 0 or between 18 and 31")
        } else {
            None
        }
    }
}

/// Serde adapter for `Option<NaiveDate>` stored as `"DD-MM-YYYY"` or `null`
mod dmy_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
