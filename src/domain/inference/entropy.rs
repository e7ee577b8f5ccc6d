//! Entropy / information-gain estimator.
//!
//! Pure functions over score views. Entropy here is a heuristic measure of how
//! spread out the active candidates' clamped scores are, not a calibrated
//! posterior.

use super::{Score, Weight};

/// Shannon entropy (bits) of the active candidates' scores.
///
/// Negative scores are clamped to zero. When the clamped total is zero the
/// distribution is treated as uniform.
///
/// # Edge Cases
/// - No active candidates: `0.0`
/// - One active candidate: `0.0`
/// - All clamped scores zero: `log2(active_count)`
pub fn entropy(scores: &[Score]) -> f64 {
    let clamped: Vec<f64> = scores
        .iter()
        .filter_map(Score::value)
        .map(|value| value.max(0.0))
        .collect();

    if clamped.is_empty() {
        return 0.0;
    }

    let total: f64 = clamped.iter().sum();
    if total == 0.0 {
        return (clamped.len() as f64).log2();
    }

    -clamped
        .iter()
        .map(|value| value / total)
        .filter(|p| *p > 0.0)
        .map(|p| p * p.log2())
        .sum::<f64>()
}

/// Hypothetical scores after an answer, one weight per candidate.
///
/// Candidates without a matching weight are left unchanged.
pub fn simulate_answer(scores: &[Score], weights: &[Weight]) -> Vec<Score> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| match weights.get(i) {
            Some(weight) => score.absorb(*weight),
            None => *score,
        })
        .collect()
}

/// Expected entropy reduction of a question.
///
/// `outcomes` holds one weight vector per possible answer. The resulting
/// entropies are averaged unweighted across answers.
pub fn information_gain(scores: &[Score], outcomes: &[Vec<Weight>]) -> f64 {
    let current = entropy(scores);
    if outcomes.is_empty() {
        return current;
    }

    let total: f64 = outcomes
        .iter()
        .map(|weights| entropy(&simulate_answer(scores, weights)))
        .sum();

    current - total / outcomes.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn entropy_of_nothing_is_zero() {
        assert_eq!(entropy(&[]), 0.0);
        assert_eq!(entropy(&[Score::Eliminated, Score::Eliminated]), 0.0);
    }

    #[test]
    fn entropy_of_single_active_candidate_is_zero() {
        assert_eq!(entropy(&[Score::Active(5.0), Score::Eliminated]), 0.0);
        assert_eq!(entropy(&[Score::Active(0.0)]), 0.0);
    }

    #[test]
    fn entropy_with_zero_scores_is_uniform() {
        let scores = [Score::Active(0.0), Score::Active(0.0)];
        assert!((entropy(&scores) - 1.0).abs() < EPS);
    }

    #[test]
    fn negative_scores_are_clamped() {
        let scores = [Score::Active(-3.0), Score::Active(-1.0), Score::Active(0.0)];
        assert!((entropy(&scores) - 3f64.log2()).abs() < EPS);

        let scores = [Score::Active(4.0), Score::Active(-2.0)];
        assert!(entropy(&scores).abs() < EPS);
    }

    #[test]
    fn entropy_of_skewed_distribution() {
        // p = [0.75, 0.25]
        let scores = [Score::Active(3.0), Score::Active(1.0)];
        let expected = -(0.75f64 * 0.75f64.log2() + 0.25f64 * 0.25f64.log2());
        assert!((entropy(&scores) - expected).abs() < EPS);
    }

    #[test]
    fn simulate_does_not_touch_input() {
        let scores = vec![Score::Active(1.0), Score::Active(2.0)];
        let simulated = simulate_answer(&scores, &[Weight::Evidence(3.0), Weight::Eliminate]);
        assert_eq!(simulated, vec![Score::Active(4.0), Score::Eliminated]);
        assert_eq!(scores, vec![Score::Active(1.0), Score::Active(2.0)]);
    }

    #[test]
    fn gain_of_perfect_splitter_is_one_bit() {
        let scores = [Score::Active(0.0), Score::Active(0.0)];
        let outcomes = vec![
            vec![Weight::Evidence(5.0), Weight::Eliminate],
            vec![Weight::Eliminate, Weight::Evidence(5.0)],
        ];
        assert!((information_gain(&scores, &outcomes) - 1.0).abs() < EPS);
    }

    #[test]
    fn gain_of_uninformative_question_is_zero() {
        let scores = [Score::Active(1.0), Score::Active(1.0)];
        let outcomes = vec![vec![Weight::NEUTRAL; 2], vec![Weight::NEUTRAL; 2]];
        assert!(information_gain(&scores, &outcomes).abs() < EPS);
    }

    #[test]
    fn gain_averages_answers_unweighted() {
        // Yes leaves one candidate (0 bits), No leaves both uniform (1 bit).
        let scores = [Score::Active(0.0), Score::Active(0.0)];
        let outcomes = vec![
            vec![Weight::NEUTRAL, Weight::Eliminate],
            vec![Weight::NEUTRAL, Weight::NEUTRAL],
        ];
        assert!((information_gain(&scores, &outcomes) - 0.5).abs() < EPS);
    }

    #[test]
    fn gain_without_outcomes_is_current_entropy() {
        let scores = [Score::Active(0.0); 4];
        assert!((information_gain(&scores, &[]) - 2.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_equal_scores_have_log2_entropy(k in 1usize..32, value in 0.0f64..100.0) {
            let scores = vec![Score::Active(value); k];
            prop_assert!((entropy(&scores) - (k as f64).log2()).abs() < 1e-9);
        }

        #[test]
        fn prop_entropy_is_bounded(values in proptest::collection::vec(-50.0f64..50.0, 1..20)) {
            let scores: Vec<Score> = values.iter().map(|v| Score::Active(*v)).collect();
            let h = entropy(&scores);
            prop_assert!(h >= -1e-9);
            prop_assert!(h <= (scores.len() as f64).log2() + 1e-9);
        }
    }
}
