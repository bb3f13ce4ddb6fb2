use super::composition::{combination_count, enumerate, Composition, TEAM_SIZE};
use super::pool::CandidatePool;
use super::ranker::{Ranker, Ranking, ScoredComposition};
use super::scorer::WinRateScorer;
use crate::api::models::TeamWinRate;
use crate::api::TeamPredictionService;
use crate::champions::Localizer;
use crate::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The prediction service accepts between 5 and 15 champions.
pub const MAX_POOL_SIZE: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Fewer than five champions: nothing to rank. Not an error.
    Insufficient { pool_size: usize },
    Ranked(Ranking),
}

/// One enumerate/score/rank pass over a pool. Stateless between calls.
pub trait Recommender: Send + Sync {
    fn recommend(&self, pool: &CandidatePool) -> Result<Recommendation, AppError>;
}

/// Canonical pool, or the reason there is nothing to score.
fn prepare_pool(
    pool: &CandidatePool,
    localizer: &dyn Localizer,
) -> Result<Result<CandidatePool, Recommendation>, AppError> {
    let pool = pool.canonicalized(localizer);
    if pool.len() < TEAM_SIZE {
        debug!(pool_size = pool.len(), "pool too small to build a team");
        return Ok(Err(Recommendation::Insufficient {
            pool_size: pool.len(),
        }));
    }
    if pool.len() > MAX_POOL_SIZE {
        return Err(AppError::PoolTooLarge(pool.len(), MAX_POOL_SIZE));
    }
    Ok(Ok(pool))
}

/// Enumerates teams locally and scores them with one batch call.
pub struct LocalRecommender {
    scorer: Arc<dyn WinRateScorer>,
    localizer: Arc<dyn Localizer>,
    ranker: Ranker,
}

impl LocalRecommender {
    pub fn new(scorer: Arc<dyn WinRateScorer>, localizer: Arc<dyn Localizer>, top_k: usize) -> Self {
        LocalRecommender {
            scorer,
            localizer,
            ranker: Ranker::new(top_k),
        }
    }
}

impl Recommender for LocalRecommender {
    fn recommend(&self, pool: &CandidatePool) -> Result<Recommendation, AppError> {
        let pool = match prepare_pool(pool, self.localizer.as_ref())? {
            Ok(pool) => pool,
            Err(insufficient) => return Ok(insufficient),
        };

        let started = Instant::now();
        let compositions: Vec<Composition> = enumerate(&pool).collect();
        debug_assert_eq!(compositions.len(), combination_count(pool.len(), TEAM_SIZE));

        // A scorer error ends the pass here: no partial ranking.
        let probabilities = self.scorer.batch_predict(&compositions)?;
        let ranking = self.ranker.rank(compositions, probabilities)?;

        info!(
            pool_size = pool.len(),
            teams = combination_count(pool.len(), TEAM_SIZE),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scored compositions"
        );
        Ok(Recommendation::Ranked(ranking))
    }
}

/// Delegates enumeration and scoring to the prediction service, which
/// returns its best and worst teams already ranked.
pub struct RemoteRecommender<S> {
    service: S,
    localizer: Arc<dyn Localizer>,
    ranker: Ranker,
}

impl<S: TeamPredictionService> RemoteRecommender<S> {
    pub fn new(service: S, localizer: Arc<dyn Localizer>, top_k: usize) -> Self {
        RemoteRecommender {
            service,
            localizer,
            ranker: Ranker::new(top_k),
        }
    }
}

fn to_scored(teams: Vec<TeamWinRate>) -> Result<Vec<ScoredComposition>, AppError> {
    teams
        .into_iter()
        .map(|t| {
            let composition = Composition::new(t.team)
                .map_err(|e| AppError::ScorerContract(format!("service returned {}", e)))?;
            Ok(ScoredComposition {
                composition,
                win_rate: t.win_rate,
            })
        })
        .collect()
}

impl<S: TeamPredictionService> Recommender for RemoteRecommender<S> {
    fn recommend(&self, pool: &CandidatePool) -> Result<Recommendation, AppError> {
        let pool = match prepare_pool(pool, self.localizer.as_ref())? {
            Ok(pool) => pool,
            Err(insufficient) => return Ok(insufficient),
        };

        let started = Instant::now();
        let heroes = pool.to_vec();
        let top = to_scored(self.service.predict_team(&heroes)?)?;
        let bottom = to_scored(self.service.predict_worst_team(&heroes)?)?;

        let recommended = self.ranker.rank_scored(top)?.recommended;
        let worst = self.ranker.rank_scored(bottom)?.worst;

        info!(
            pool_size = pool.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "remote ranking received"
        );
        Ok(Recommendation::Ranked(Ranking { recommended, worst }))
    }
}
