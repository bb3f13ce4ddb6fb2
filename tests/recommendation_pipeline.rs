//! End-to-end checks of pool -> enumerate -> score -> rank.

use hexaram::analysis::{
    combination_count, enumerate, CandidatePool, ChampionStats, Composition, LocalRecommender,
    Ranker, Recommendation, Recommender, StatsTableScorer, WinRateScorer,
};
use hexaram::champions::IdentityLocalizer;
use hexaram::AppError;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const ROSTER: [&str; 16] = [
    "Ahri", "Ashe", "Brand", "Garen", "Jinx", "Karma", "Lux", "Malphite", "Nami", "Orianna",
    "Pyke", "Rell", "Sona", "Teemo", "Veigar", "Ziggs",
];

fn roster_table() -> StatsTableScorer {
    let table: HashMap<String, ChampionStats> = ROSTER
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), ChampionStats::new(200, 80 + i as u32 * 3)))
        .collect();
    StatsTableScorer::new(table)
}

/// Wraps a scorer and remembers every batch it was handed.
struct Spy<S> {
    inner: S,
    calls: AtomicUsize,
    batches: Mutex<Vec<Vec<Composition>>>,
}

impl<S> Spy<S> {
    fn new(inner: S) -> Self {
        Spy {
            inner,
            calls: AtomicUsize::new(0),
            batches: Mutex::new(Vec::new()),
        }
    }
}

impl<S: WinRateScorer> WinRateScorer for Spy<S> {
    fn batch_predict(&self, compositions: &[Composition]) -> Result<Vec<f64>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(compositions.to_vec());
        self.inner.batch_predict(compositions)
    }
}

fn recommender(scorer: Arc<dyn WinRateScorer>) -> LocalRecommender {
    LocalRecommender::new(scorer, Arc::new(IdentityLocalizer), 10)
}

fn pool_strategy(max: usize) -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(ROSTER.to_vec(), 0..=max)
}

proptest! {
    #[test]
    fn enumeration_covers_every_subset_once(names in pool_strategy(15)) {
        let pool = CandidatePool::from_names(&names);
        let teams: Vec<Composition> = enumerate(&pool).collect();

        if names.len() < 5 {
            prop_assert!(teams.is_empty());
        } else {
            prop_assert_eq!(teams.len(), combination_count(names.len(), 5));
        }

        let distinct: HashSet<&Composition> = teams.iter().collect();
        prop_assert_eq!(distinct.len(), teams.len());
        for team in &teams {
            prop_assert_eq!(team.members().len(), 5);
            prop_assert!(team.members().iter().all(|m| pool.contains(m)));
            prop_assert!(team.members().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn ranking_is_sorted_and_bounded(names in pool_strategy(12)) {
        let pool = CandidatePool::from_names(&names);
        let result = recommender(Arc::new(roster_table())).recommend(&pool).unwrap();

        match result {
            Recommendation::Insufficient { pool_size } => {
                prop_assert!(names.len() < 5);
                prop_assert_eq!(pool_size, names.len());
            }
            Recommendation::Ranked(ranking) => {
                let expected = combination_count(names.len(), 5).min(10);
                prop_assert_eq!(ranking.recommended.len(), expected);
                prop_assert_eq!(ranking.worst.len(), expected);
                prop_assert!(ranking.recommended.windows(2).all(|w| w[0].win_rate >= w[1].win_rate));
                prop_assert!(ranking.worst.windows(2).all(|w| w[0].win_rate <= w[1].win_rate));
                prop_assert!(ranking.recommended[0].win_rate >= ranking.worst[0].win_rate);
            }
        }
    }

    #[test]
    fn scoring_preserves_order(names in pool_strategy(9)) {
        let pool = CandidatePool::from_names(&names);
        let teams: Vec<Composition> = enumerate(&pool).collect();
        let scorer = roster_table();
        let batch = scorer.batch_predict(&teams).unwrap();
        prop_assert_eq!(batch.len(), teams.len());
        for (team, p) in teams.iter().zip(&batch) {
            let single = scorer.batch_predict(std::slice::from_ref(team)).unwrap();
            prop_assert_eq!(single[0], *p);
            prop_assert!((0.0..=1.0).contains(p));
        }
    }

    #[test]
    fn same_input_same_ranking(names in pool_strategy(10)) {
        let pool = CandidatePool::from_names(&names);
        let r = recommender(Arc::new(roster_table()));
        prop_assert_eq!(r.recommend(&pool).unwrap(), r.recommend(&pool).unwrap());
    }
}

#[test]
fn five_champions_make_one_team() {
    let spy = Arc::new(Spy::new(roster_table()));
    let pool = CandidatePool::from_names(["Lux", "Ahri", "Garen", "Jinx", "Nami"]);
    let result = recommender(spy.clone()).recommend(&pool).unwrap();

    assert_eq!(spy.calls.load(Ordering::SeqCst), 1);
    let batches = spy.batches.lock().unwrap();
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].members(), ["Ahri", "Garen", "Jinx", "Lux", "Nami"]);

    let Recommendation::Ranked(ranking) = result else {
        panic!("expected a ranking");
    };
    assert_eq!(ranking.recommended.len(), 1);
    assert_eq!(ranking.recommended[0], ranking.worst[0]);
}

#[test]
fn six_champions_never_rank_more_than_six() {
    let pool = CandidatePool::from_names(["Lux", "Ahri", "Garen", "Jinx", "Nami", "Sona"]);
    let Recommendation::Ranked(ranking) = recommender(Arc::new(roster_table()))
        .recommend(&pool)
        .unwrap()
    else {
        panic!("expected a ranking");
    };
    assert_eq!(ranking.recommended.len(), 6);
    assert_eq!(ranking.worst.len(), 6);
}

#[test]
fn full_pool_of_fifteen_scores_3003_teams() {
    let spy = Arc::new(Spy::new(roster_table()));
    let pool = CandidatePool::from_names(&ROSTER[..15]);
    recommender(spy.clone()).recommend(&pool).unwrap();
    assert_eq!(spy.batches.lock().unwrap()[0].len(), 3003);
}

#[test]
fn unknown_champion_aborts_before_ranking() {
    let spy = Arc::new(Spy::new(roster_table()));
    let pool = CandidatePool::from_names(["Lux", "Ahri", "Garen", "Jinx", "Yuumi"]);
    let err = recommender(spy.clone()).recommend(&pool).unwrap_err();

    match err {
        AppError::UnknownChampion(name) => assert_eq!(name, "Yuumi"),
        other => panic!("expected UnknownChampion, got {:?}", other),
    }
    assert_eq!(spy.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn ranker_keeps_scorer_order_for_ties() {
    let teams: Vec<Composition> = enumerate(&CandidatePool::from_names(&ROSTER[..6])).collect();
    let probabilities = vec![0.5; teams.len()];
    let ranking = Ranker::new(10).rank(teams.clone(), probabilities).unwrap();
    assert_eq!(ranking.worst[0].composition, teams[0]);
    assert_eq!(ranking.recommended[0].composition, teams[5]);
}
