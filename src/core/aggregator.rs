//! Weighted averages and starting-grade computation

use crate::core::models::{ExamRecord, Parameters};

/// Name given to the hypothetical exam added by [`simulate_added_exam`].
pub const SIMULATED_EXAM_NAME: &str = "Simulation";

/// Raw and credit-discounted weighted averages on the source scale
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedAverages {
    /// Average over every graded exam with full credits
    pub raw: f64,
    /// Average after the lowest-graded credits are discounted
    pub filtered: f64,
}

/// Grading scales used to convert an average into a starting grade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Target scale (graduation grade out of 110)
    pub target: f64,
    /// Source scale (exam grades out of 30)
    pub source: f64,
}

impl Scale {
    /// Create a scale pair
    #[must_use]
    pub const fn new(target: f64, source: f64) -> Self {
        Self { target, source }
    }

    /// Convert a source-scale value to the target scale
    #[must_use]
    pub fn convert(&self, value: f64) -> f64 {
        if self.source.abs() < f64::EPSILON {
            return 0.0;
        }
        value * self.target / self.source
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(110.0, 30.0)
    }
}

/// Bonus terms of the starting-grade multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Institution-specific bonus
    pub alpha: f64,
    /// Honors bonus
    pub gamma: f64,
    /// On-time graduation bonus
    pub delta: f64,
}

impl Coefficients {
    /// Multiplier `k = 1 + alpha + gamma + delta`
    #[must_use]
    pub fn k(&self) -> f64 {
        1.0 + self.alpha + self.gamma + self.delta
    }
}

/// Full breakdown of a starting-grade computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartingGrade {
    /// Averages on the source scale
    pub averages: WeightedAverages,
    /// Averages converted to the target scale
    pub scaled: WeightedAverages,
    /// Exams passed with honors
    pub honors_count: usize,
    /// Bonus terms
    pub coefficients: Coefficients,
    /// Starting grade from the raw average
    pub raw: f64,
    /// Starting grade from the filtered average
    pub filtered: f64,
}

/// Compute the raw and filtered weighted averages of the graded exams.
///
/// Honors count as 30. The discount budget is spent on the lowest-graded
/// exams first: an exam whose credits fit in the remaining budget is left
/// out of the filtered set, the first one that does not fit contributes
/// only its credits in excess of the budget, and later exams contribute
/// in full. An empty contributing set averages to 0.
#[must_use]
pub fn compute_weighted_averages(exams: &[ExamRecord], discount_credits: u32) -> WeightedAverages {
    let mut graded: Vec<(u8, u32)> = exams
        .iter()
        .filter(|e| e.is_graded())
        .map(|e| (e.averaging_grade(), e.credits))
        .collect();
    graded.sort_by_key(|&(grade, _)| grade);

    WeightedAverages {
        raw: weighted_mean(&graded),
        filtered: weighted_mean(&discount_lowest(&graded, discount_credits)),
    }
}

/// Spend `budget` credits on `(grade, credits)` pairs sorted by ascending grade
fn discount_lowest(sorted: &[(u8, u32)], mut budget: u32) -> Vec<(u8, u32)> {
    let mut kept = Vec::with_capacity(sorted.len());
    for &(grade, credits) in sorted {
        if budget == 0 {
            kept.push((grade, credits));
        } else if credits <= budget {
            budget -= credits;
        } else {
            kept.push((grade, credits - budget));
            budget = 0;
        }
    }
    kept
}

fn weighted_mean(entries: &[(u8, u32)]) -> f64 {
    let total_credits: u64 = entries.iter().map(|&(_, c)| u64::from(c)).sum();
    if total_credits == 0 {
        return 0.0;
    }
    let weighted: u64 = entries
        .iter()
        .map(|&(g, c)| u64::from(g) * u64::from(c))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = weighted as f64 / total_credits as f64;
    mean
}

/// Honors bonus: 0.01 for two or more honors, 0.005 for one
#[must_use]
pub const fn honors_bonus(honors_count: usize) -> f64 {
    match honors_count {
        0 => 0.0,
        1 => 0.005,
        _ => 0.01,
    }
}

/// On-time bonus: 0.01 on time, 0.005 one year late, nothing afterwards
#[must_use]
pub const fn on_time_bonus(delay_years: u32) -> f64 {
    match delay_years {
        0 => 0.01,
        1 => 0.005,
        _ => 0.0,
    }
}

/// Compute the starting graduation grade for a set of exams.
///
/// Both averages are converted to `scale.target` and multiplied by
/// `1 + alpha + gamma + delta`. Values are not rounded.
#[must_use]
pub fn compute_starting_grade(
    exams: &[ExamRecord],
    parameters: &Parameters,
    scale: Scale,
) -> StartingGrade {
    let averages = compute_weighted_averages(exams, parameters.discount_credits);
    let scaled = WeightedAverages {
        raw: scale.convert(averages.raw),
        filtered: scale.convert(averages.filtered),
    };

    let honors_count = exams.iter().filter(|e| e.is_honors()).count();
    let coefficients = Coefficients {
        alpha: parameters.bonus_coefficient,
        gamma: honors_bonus(honors_count),
        delta: on_time_bonus(parameters.delay_years),
    };
    let k = coefficients.k();

    StartingGrade {
        averages,
        scaled,
        honors_count,
        coefficients,
        raw: scaled.raw * k,
        filtered: scaled.filtered * k,
    }
}

/// Starting grade as if one more exam had been passed.
///
/// The hypothetical exam is added to a transient copy; `exams` is untouched.
#[must_use]
pub fn simulate_added_exam(
    exams: &[ExamRecord],
    grade: u8,
    credits: u32,
    parameters: &Parameters,
    scale: Scale,
) -> StartingGrade {
    let mut transient = exams.to_vec();
    transient.push(ExamRecord::graded(
        SIMULATED_EXAM_NAME.to_string(),
        credits,
        grade,
        None,
    ));
    compute_starting_grade(&transient, parameters, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::exam::HONORS;

    fn exam(grade: u8, credits: u32) -> ExamRecord {
        ExamRecord::graded(format!("E{grade}-{credits}"), credits, grade, None)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_graded_exams() {
        let exams = vec![
            ExamRecord::new("A".to_string(), 6),
            ExamRecord::new("B".to_string(), 9),
        ];
        assert_eq!(
            compute_weighted_averages(&exams, 0),
            WeightedAverages::default()
        );
        assert_eq!(compute_weighted_averages(&[], 5), WeightedAverages::default());
    }

    #[test]
    fn test_raw_average() {
        let exams = vec![exam(30, 6), exam(24, 9)];
        let avg = compute_weighted_averages(&exams, 0);
        assert!(approx(avg.raw, 26.4));
        assert!(approx(avg.filtered, 26.4));
    }

    #[test]
    fn test_partial_discount_of_lowest_exam() {
        let exams = vec![exam(30, 6), exam(24, 9)];
        let avg = compute_weighted_averages(&exams, 6);
        assert!(approx(avg.raw, 26.4));
        assert!(approx(avg.filtered, 28.0));
    }

    #[test]
    fn test_full_exclusion_then_partial() {
        // 6 credits at 20 excluded, then 3 of the 6 at 25 discounted
        let exams = vec![exam(28, 6), exam(20, 6), exam(25, 6)];
        let avg = compute_weighted_averages(&exams, 9);
        let expected = (25.0 * 3.0 + 28.0 * 6.0) / 9.0;
        assert!(approx(avg.filtered, expected));
    }

    #[test]
    fn test_discount_exceeding_total_credits() {
        let exams = vec![exam(30, 6), exam(24, 9)];
        let avg = compute_weighted_averages(&exams, 15);
        assert!(approx(avg.filtered, 0.0));
        let avg = compute_weighted_averages(&exams, 40);
        assert!(approx(avg.filtered, 0.0));
        assert!(approx(avg.raw, 26.4));
    }

    #[test]
    fn test_discounted_credits_match_budget() {
        let sorted = [(19, 6), (22, 12), (27, 9), (30, 6)];
        let total: u32 = sorted.iter().map(|&(_, c)| c).sum();
        for budget in [0, 3, 6, 10, 18, 24, 33, 50] {
            let kept: u32 = discount_lowest(&sorted, budget).iter().map(|&(_, c)| c).sum();
            assert_eq!(total - kept, budget.min(total), "budget {budget}");
        }
    }

    #[test]
    fn test_honors_average_as_thirty() {
        let with_honors = vec![exam(HONORS, 6), exam(24, 6)];
        let with_thirty = vec![exam(30, 6), exam(24, 6)];
        assert_eq!(
            compute_weighted_averages(&with_honors, 3),
            compute_weighted_averages(&with_thirty, 3)
        );
    }

    #[test]
    fn test_averaging_does_not_mutate_records() {
        let exams = vec![exam(HONORS, 6), exam(24, 9)];
        let before = exams.clone();
        let _ = compute_weighted_averages(&exams, 6);
        let _ = compute_starting_grade(&exams, &Parameters::default(), Scale::default());
        assert_eq!(exams, before);
        assert_eq!(exams[0].grade, HONORS);
    }

    #[test]
    fn test_pending_exams_are_ignored() {
        let exams = vec![exam(30, 6), ExamRecord::new("Pending".to_string(), 12), exam(24, 9)];
        let avg = compute_weighted_averages(&exams, 0);
        assert!(approx(avg.raw, 26.4));
    }

    #[test]
    fn test_coefficient_example() {
        let exams = vec![exam(HONORS, 6), exam(HONORS, 6), exam(27, 12)];
        let params = Parameters {
            delay_years: 0,
            discount_credits: 0,
            bonus_coefficient: 0.02,
        };
        let result = compute_starting_grade(&exams, &params, Scale::default());

        assert_eq!(result.honors_count, 2);
        assert!(approx(result.coefficients.k(), 1.04));
        let avg = (30.0 * 12.0 + 27.0 * 12.0) / 24.0;
        assert!(approx(result.raw, avg * 110.0 / 30.0 * 1.04));
    }

    #[test]
    fn test_bonus_tables() {
        assert!(approx(honors_bonus(0), 0.0));
        assert!(approx(honors_bonus(1), 0.005));
        assert!(approx(honors_bonus(5), 0.01));
        assert!(approx(on_time_bonus(0), 0.01));
        assert!(approx(on_time_bonus(1), 0.005));
        assert!(approx(on_time_bonus(3), 0.0));
    }

    #[test]
    fn test_monotonic_in_bonus_coefficient() {
        let exams = vec![exam(26, 9), exam(29, 6)];
        let mut params = Parameters::default();
        let low = compute_starting_grade(&exams, &params, Scale::default());
        params.bonus_coefficient = 0.03;
        let high = compute_starting_grade(&exams, &params, Scale::default());
        assert!(high.raw > low.raw);
        assert!(high.filtered > low.filtered);
    }

    #[test]
    fn test_monotonic_in_honors_count() {
        let none = vec![exam(30, 6), exam(30, 6), exam(25, 6)];
        let one = vec![exam(HONORS, 6), exam(30, 6), exam(25, 6)];
        let two = vec![exam(HONORS, 6), exam(HONORS, 6), exam(25, 6)];
        let params = Parameters::default();
        let g0 = compute_starting_grade(&none, &params, Scale::default());
        let g1 = compute_starting_grade(&one, &params, Scale::default());
        let g2 = compute_starting_grade(&two, &params, Scale::default());
        assert!(g1.raw > g0.raw);
        assert!(g2.raw > g1.raw);
    }

    #[test]
    fn test_simulation_leaves_input_untouched() {
        let exams = vec![exam(24, 9)];
        let before = exams.clone();
        let params = Parameters {
            discount_credits: 0,
            ..Parameters::default()
        };

        let simulated = simulate_added_exam(&exams, 30, 6, &params, Scale::default());
        assert_eq!(exams, before);
        assert!(approx(simulated.averages.raw, 26.4));
    }

    #[test]
    fn test_custom_scale() {
        let exams = vec![exam(27, 6)];
        let params = Parameters {
            delay_years: 2,
            discount_credits: 0,
            bonus_coefficient: 0.0,
        };
        let result = compute_starting_grade(&exams, &params, Scale::new(100.0, 30.0));
        assert!(approx(result.raw, 90.0));
        assert!(approx(Scale::new(110.0, 0.0).convert(27.0), 0.0));
    }
}
