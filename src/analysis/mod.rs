//! Composition recommendation: pool -> teams -> win rates -> ranking.

pub mod composition;
pub mod pool;
pub mod ranker;
pub mod recommender;
pub mod scorer;

pub use composition::{combination_count, enumerate, Composition, TEAM_SIZE};
pub use pool::CandidatePool;
pub use ranker::{Ranker, Ranking, ScoredComposition};
pub use recommender::{LocalRecommender, Recommendation, Recommender, RemoteRecommender, MAX_POOL_SIZE};
pub use scorer::{ChampionStats, StatsTableScorer, WinRateScorer};
