use super::composition::Composition;
use crate::error::AppError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredComposition {
    pub composition: Composition,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    /// Highest win rate first.
    pub recommended: Vec<ScoredComposition>,
    /// Lowest win rate first.
    pub worst: Vec<ScoredComposition>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.recommended.is_empty() && self.worst.is_empty()
    }
}

/// Keeps the top and bottom `k` scored compositions.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    k: usize,
}

impl Ranker {
    pub fn new(k: usize) -> Self {
        Ranker { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Pairs compositions with the scorer's parallel output and ranks them.
    pub fn rank(
        &self,
        compositions: Vec<Composition>,
        probabilities: Vec<f64>,
    ) -> Result<Ranking, AppError> {
        if compositions.len() != probabilities.len() {
            return Err(AppError::ScorerContract(format!(
                "{} compositions scored with {} probabilities",
                compositions.len(),
                probabilities.len()
            )));
        }

        let scored = compositions
            .into_iter()
            .zip(probabilities)
            .map(|(composition, win_rate)| ScoredComposition {
                composition,
                win_rate,
            })
            .collect();

        self.rank_scored(scored)
    }

    pub fn rank_scored(&self, mut scored: Vec<ScoredComposition>) -> Result<Ranking, AppError> {
        if let Some(bad) = scored
            .iter()
            .find(|s| !s.win_rate.is_finite() || !(0.0..=1.0).contains(&s.win_rate))
        {
            return Err(AppError::ScorerContract(format!(
                "win rate {} for [{}] is outside [0, 1]",
                bad.win_rate, bad.composition
            )));
        }

        // stable: equal win rates keep scorer order
        scored.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));

        let worst = scored.iter().take(self.k).cloned().collect();
        let recommended = scored.iter().rev().take(self.k).cloned().collect();

        Ok(Ranking { recommended, worst })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(i: usize) -> Composition {
        Composition::new((0..5).map(|j| format!("C{}-{}", i, j))).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        let ranking = Ranker::new(10).rank(vec![], vec![]).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn orders_and_truncates() {
        let comps: Vec<_> = (0..12).map(comp).collect();
        let probs: Vec<f64> = (0..12).map(|i| (i as f64 * 7.0 % 12.0) / 12.0).collect();
        let ranking = Ranker::new(10).rank(comps, probs).unwrap();

        assert_eq!(ranking.recommended.len(), 10);
        assert_eq!(ranking.worst.len(), 10);
        assert!(ranking
            .recommended
            .windows(2)
            .all(|w| w[0].win_rate >= w[1].win_rate));
        assert!(ranking.worst.windows(2).all(|w| w[0].win_rate <= w[1].win_rate));
        assert_eq!(ranking.recommended[0].win_rate, 11.0 / 12.0);
        assert_eq!(ranking.worst[0].win_rate, 0.0);
    }

    #[test]
    fn single_entry_is_both_best_and_worst() {
        let ranking = Ranker::new(10).rank(vec![comp(0)], vec![0.42]).unwrap();
        assert_eq!(ranking.recommended, ranking.worst);
        assert_eq!(ranking.recommended.len(), 1);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = Ranker::new(10).rank(vec![comp(0), comp(1)], vec![0.5]).unwrap_err();
        assert!(matches!(err, AppError::ScorerContract(_)));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        for bad in [1.5, -0.1, f64::NAN] {
            let err = Ranker::new(10).rank(vec![comp(0)], vec![bad]).unwrap_err();
            assert!(matches!(err, AppError::ScorerContract(_)));
        }
    }
}
