//! Score Store and Elimination Tracker.

use serde::{Deserialize, Serialize};

use super::Weight;

/// Per-candidate score state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Score {
    /// Accumulated evidence.
    Active(f64),
    /// Disqualified; carries no magnitude.
    Eliminated,
}

impl Score {
    /// Numeric score of an active candidate.
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Active(value) => Some(*value),
            Score::Eliminated => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Score::Active(_))
    }

    /// Applies a weight without any elimination bookkeeping.
    ///
    /// Used for hypothetical score views: an elimination marker disqualifies,
    /// evidence adds to active candidates and is ignored for eliminated ones.
    pub fn absorb(self, weight: Weight) -> Score {
        match (self, weight) {
            (_, Weight::Eliminate) => Score::Eliminated,
            (Score::Active(value), Weight::Evidence(w)) => Score::Active(value + w),
            (Score::Eliminated, Weight::Evidence(_)) => Score::Eliminated,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::Active(0.0)
    }
}

/// Scores, elimination counters and prior-score snapshots, indexed by
/// candidate position.
///
/// # Invariants
///
/// - `scores[i]` is `Eliminated` iff `eliminations[i] > 0`
/// - `snapshots[i]` is `Some` only while `eliminations[i] > 0`
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    scores: Vec<Score>,
    eliminations: Vec<u32>,
    snapshots: Vec<Option<f64>>,
}

impl ScoreBoard {
    /// Creates a board with every candidate active at zero.
    pub fn new(candidate_count: usize) -> Self {
        Self {
            scores: vec![Score::default(); candidate_count],
            eliminations: vec![0; candidate_count],
            snapshots: vec![None; candidate_count],
        }
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn score(&self, index: usize) -> Option<Score> {
        self.scores.get(index).copied()
    }

    pub fn elimination_count(&self, index: usize) -> Option<u32> {
        self.eliminations.get(index).copied()
    }

    pub fn prior_score(&self, index: usize) -> Option<f64> {
        self.snapshots.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Applies one candidate's weight for a newly given answer.
    pub fn apply(&mut self, index: usize, weight: Weight) {
        match weight {
            Weight::Eliminate => {
                if self.eliminations[index] == 0 {
                    self.snapshots[index] = self.scores[index].value();
                    self.scores[index] = Score::Eliminated;
                }
                self.eliminations[index] += 1;
            }
            Weight::Evidence(w) => {
                if let Score::Active(value) = self.scores[index] {
                    self.scores[index] = Score::Active(value + w);
                }
            }
        }
    }

    /// Reverses [`ScoreBoard::apply`] for a retracted answer.
    pub fn revert(&mut self, index: usize, weight: Weight) {
        match weight {
            Weight::Eliminate => {
                if self.eliminations[index] == 0 {
                    return;
                }
                self.eliminations[index] -= 1;
                if self.eliminations[index] == 0 {
                    let restored = self.snapshots[index].take().unwrap_or(0.0);
                    self.scores[index] = Score::Active(restored);
                }
            }
            Weight::Evidence(w) => {
                if let Score::Active(value) = self.scores[index] {
                    self.scores[index] = Score::Active(value - w);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_matches_update_rule() {
        assert_eq!(Score::Active(1.0).absorb(Weight::Evidence(2.0)), Score::Active(3.0));
        assert_eq!(Score::Active(1.0).absorb(Weight::Eliminate), Score::Eliminated);
        assert_eq!(Score::Eliminated.absorb(Weight::Evidence(5.0)), Score::Eliminated);
    }

    #[test]
    fn new_board_is_all_active_at_zero() {
        let board = ScoreBoard::new(3);
        assert_eq!(board.scores(), &[Score::Active(0.0); 3]);
        assert_eq!(board.elimination_count(2), Some(0));
        assert_eq!(board.elimination_count(3), None);
    }

    #[test]
    fn elimination_snapshots_score_and_counts() {
        let mut board = ScoreBoard::new(1);
        board.apply(0, Weight::Evidence(4.0));
        board.apply(0, Weight::Eliminate);

        assert_eq!(board.score(0), Some(Score::Eliminated));
        assert_eq!(board.elimination_count(0), Some(1));
        assert_eq!(board.prior_score(0), Some(4.0));
    }

    #[test]
    fn evidence_is_ignored_while_eliminated() {
        let mut board = ScoreBoard::new(1);
        board.apply(0, Weight::Eliminate);
        board.apply(0, Weight::Evidence(10.0));
        board.revert(0, Weight::Evidence(10.0));
        board.revert(0, Weight::Eliminate);

        assert_eq!(board.score(0), Some(Score::Active(0.0)));
    }

    #[test]
    fn double_elimination_needs_two_reverts() {
        let mut board = ScoreBoard::new(1);
        board.apply(0, Weight::Evidence(2.0));
        board.apply(0, Weight::Eliminate);
        board.apply(0, Weight::Evidence(7.0));
        board.apply(0, Weight::Eliminate);
        assert_eq!(board.elimination_count(0), Some(2));

        board.revert(0, Weight::Eliminate);
        assert_eq!(board.score(0), Some(Score::Eliminated));
        assert_eq!(board.elimination_count(0), Some(1));
        assert_eq!(board.prior_score(0), Some(2.0));

        board.revert(0, Weight::Evidence(7.0));
        board.revert(0, Weight::Eliminate);
        assert_eq!(board.score(0), Some(Score::Active(2.0)));
        assert_eq!(board.elimination_count(0), Some(0));
        assert_eq!(board.prior_score(0), None);
    }

    #[test]
    fn revert_elimination_on_active_candidate_is_noop() {
        let mut board = ScoreBoard::new(1);
        board.apply(0, Weight::Evidence(1.5));
        board.revert(0, Weight::Eliminate);
        assert_eq!(board.score(0), Some(Score::Active(1.5)));
        assert_eq!(board.elimination_count(0), Some(0));
    }

    #[test]
    fn score_serializes_as_tagged_variant() {
        let json = serde_json::to_value(Score::Active(2.5)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "active", "value": 2.5}));
        let json = serde_json::to_value(Score::Eliminated).unwrap();
        assert_eq!(json, serde_json::json!({"status": "eliminated"}));
    }
}
