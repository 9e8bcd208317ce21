//! Record state model: the exam list plus the grading parameters

use super::ExamRecord;
use serde::{Deserialize, Serialize};

/// Discount-credit budget written on first run.
pub const DEFAULT_DISCOUNT_CREDITS: u32 = 9;

/// Institution-specific knobs of the starting-grade formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Years beyond the nominal course duration
    #[serde(rename = "fuori_corso", default)]
    pub delay_years: u32,

    /// Lowest-graded credits left out of the filtered average
    #[serde(rename = "cfu_off", default = "default_discount_credits")]
    pub discount_credits: u32,

    /// Extra-credit factor (alpha) added to the coefficient
    #[serde(rename = "alpha", default)]
    pub bonus_coefficient: f64,
}

const fn default_discount_credits() -> u32 {
    DEFAULT_DISCOUNT_CREDITS
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            delay_years: 0,
            discount_credits: DEFAULT_DISCOUNT_CREDITS,
            bonus_coefficient: 0.0,
        }
    }
}

/// Partial update of [`Parameters`]; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterUpdate {
    /// New delay years
    pub delay_years: Option<u32>,
    /// New discount-credit budget
    pub discount_credits: Option<u32>,
    /// New bonus coefficient
    pub bonus_coefficient: Option<f64>,
}

impl ParameterUpdate {
    /// Whether the update changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.delay_years.is_none()
            && self.discount_credits.is_none()
            && self.bonus_coefficient.is_none()
    }
}

impl Parameters {
    /// Apply a partial update in place
    pub fn apply(&mut self, update: &ParameterUpdate) {
        if let Some(years) = update.delay_years {
            self.delay_years = years;
        }
        if let Some(credits) = update.discount_credits {
            self.discount_credits = credits;
        }
        if let Some(alpha) = update.bonus_coefficient {
            self.bonus_coefficient = alpha;
        }
    }
}

/// Everything persisted in the records file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordState {
    /// Exams in storage order
    #[serde(default)]
    pub exams: Vec<ExamRecord>,

    /// Grading parameters, stored next to the exam list
    #[serde(flatten)]
    pub parameters: Parameters,
}

impl RecordState {
    /// Create a state from exams and parameters
    #[must_use]
    pub const fn new(exams: Vec<ExamRecord>, parameters: Parameters) -> Self {
        Self { exams, parameters }
    }

    /// Sort exams by date ascending; undated exams go last in their current order
    pub fn sort_by_date(&mut self) {
        self.exams.sort_by_key(|e| (e.date.is_none(), e.date));
    }

    /// Exams still waiting for a grade
    pub fn pending(&self) -> impl Iterator<Item = &ExamRecord> {
        self.exams.iter().filter(|e| !e.is_graded())
    }

    /// Exams that already have a grade
    pub fn graded(&self) -> impl Iterator<Item = &ExamRecord> {
        self.exams.iter().filter(|e| e.is_graded())
    }

    /// Total credits earned with graded exams
    #[must_use]
    pub fn completed_credits(&self) -> u64 {
        self.graded().map(|e| u64::from(e.credits)).sum()
    }

    /// First exam that breaks the record invariants, with the reason
    #[must_use]
    pub fn first_defect(&self) -> Option<(&ExamRecord, &'static str)> {
        self.exams
            .iter()
            .find_map(|exam| exam.defect().map(|reason| (exam, reason)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32, m: u32, y: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_default_parameters() {
        let params = Parameters::default();
        assert_eq!(params.delay_years, 0);
        assert_eq!(params.discount_credits, 9);
        assert!(params.bonus_coefficient.abs() < f64::EPSILON);
    }

    #[test]
    fn test_sort_by_date_puts_undated_last() {
        let mut state = RecordState::new(
            vec![
                ExamRecord::new("Pending A".to_string(), 6),
                ExamRecord::graded("Late".to_string(), 6, 25, date(10, 9, 2024)),
                ExamRecord::graded("Undated".to_string(), 6, 28, None),
                ExamRecord::graded("Early".to_string(), 9, 30, date(1, 2, 2023)),
                ExamRecord::new("Pending B".to_string(), 6),
            ],
            Parameters::default(),
        );

        state.sort_by_date();
        let names: Vec<&str> = state.exams.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Early", "Late", "Pending A", "Undated", "Pending B"]
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut params = Parameters::default();
        params.apply(&ParameterUpdate {
            discount_credits: Some(12),
            ..Default::default()
        });

        assert_eq!(params.discount_credits, 12);
        assert_eq!(params.delay_years, 0);
    }

    #[test]
    fn test_state_uses_flat_file_layout() {
        let json = r#"{
            "exams": [{"name": "Analisi I", "CFU": 9, "grade": 31, "date": "20-01-2023"}],
            "fuori_corso": 1,
            "cfu_off": 6,
            "alpha": 0.02
        }"#;

        let state: RecordState = serde_json::from_str(json).unwrap();
        assert_eq!(state.exams.len(), 1);
        assert_eq!(state.parameters.delay_years, 1);
        assert_eq!(state.parameters.discount_credits, 6);
        assert!((state.parameters.bonus_coefficient - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_completed_credits() {
        let state = RecordState::new(
            vec![
                ExamRecord::graded("A".to_string(), 6, 24, None),
                ExamRecord::new("B".to_string(), 9),
                ExamRecord::graded("C".to_string(), 12, 30, None),
            ],
            Parameters::default(),
        );
        assert_eq!(state.completed_credits(), 18);
        assert_eq!(state.pending().count(), 1);
    }

    #[test]
    fn test_completed_credits_does_not_overflow() {
        let state = RecordState::new(
            vec![
                ExamRecord::graded("A".to_string(), u32::MAX, 24, None),
                ExamRecord::graded("B".to_string(), u32::MAX, 30, None),
            ],
            Parameters::default(),
        );
        assert_eq!(state.completed_credits(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_first_defect_names_the_exam() {
        let state = RecordState::new(
            vec![
                ExamRecord::graded("Analisi".to_string(), 6, 28, None),
                ExamRecord::graded("Fisica".to_string(), 0, 24, None),
            ],
            Parameters::default(),
        );
        let (exam, reason) = state.first_defect().unwrap();
        assert_eq!(exam.name, "Fisica");
        assert_eq!(reason, "credits must be positive");
        assert!(RecordState::default().first_defect().is_none());
    }
}
