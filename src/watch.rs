//! Background refresh loop.
//!
//! A poller thread watches the session; each time the candidate pool changes
//! it starts a scoring thread. Both post [`RefreshEvent`]s on one channel and
//! the main loop keeps only the newest. Scoring threads are never cancelled,
//! so a slow result for an old pool can land after a newer one and replace
//! it.

use crate::analysis::{CandidatePool, Recommendation, Recommender};
use crate::session::{SessionOrigin, SessionProvider};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum RefreshEvent {
    /// No session from any source.
    NoData,
    /// Pool changed and a scoring pass started.
    Scoring {
        pool: CandidatePool,
        origin: SessionOrigin,
    },
    Finished {
        pool: CandidatePool,
        recommendation: Recommendation,
    },
    Failed {
        pool: CandidatePool,
        error: String,
    },
}

pub struct Watcher {
    provider: Arc<SessionProvider>,
    recommender: Arc<dyn Recommender>,
    interval: Duration,
    max_polls: Option<usize>,
}

impl Watcher {
    pub fn new(
        provider: Arc<SessionProvider>,
        recommender: Arc<dyn Recommender>,
        interval: Duration,
    ) -> Self {
        Watcher {
            provider,
            recommender,
            interval,
            max_polls: None,
        }
    }

    /// Stop polling after `polls` session reads.
    pub fn max_polls(mut self, polls: usize) -> Self {
        self.max_polls = Some(polls);
        self
    }

    /// Starts the poller. The receiver closes once polling has stopped and
    /// every scoring thread has reported.
    pub fn spawn(self) -> (Receiver<RefreshEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || self.run(tx));
        (rx, handle)
    }

    fn run(self, tx: Sender<RefreshEvent>) {
        let mut last_pool: Option<CandidatePool> = None;
        let mut had_data = true;
        let mut polls = 0;

        loop {
            polls += 1;

            match self.provider.fetch() {
                None => {
                    if had_data && tx.send(RefreshEvent::NoData).is_err() {
                        return;
                    }
                    had_data = false;
                    last_pool = None;
                }
                Some((session, origin)) => {
                    had_data = true;
                    let pool = session.candidate_pool();
                    if last_pool.as_ref() != Some(&pool) {
                        debug!(pool_size = pool.len(), %origin, "candidate pool changed");
                        last_pool = Some(pool.clone());
                        if tx
                            .send(RefreshEvent::Scoring {
                                pool: pool.clone(),
                                origin,
                            })
                            .is_err()
                        {
                            return;
                        }
                        self.score_in_background(pool, tx.clone());
                    }
                }
            }

            if self.max_polls.is_some_and(|max| polls >= max) {
                info!(polls, "watch finished");
                return;
            }
            thread::sleep(self.interval);
        }
    }

    fn score_in_background(&self, pool: CandidatePool, tx: Sender<RefreshEvent>) {
        let recommender = Arc::clone(&self.recommender);
        thread::spawn(move || {
            let event = match recommender.recommend(&pool) {
                Ok(recommendation) => RefreshEvent::Finished {
                    pool,
                    recommendation,
                },
                Err(e) => {
                    warn!(error = %e, "scoring failed");
                    RefreshEvent::Failed {
                        pool,
                        error: e.to_string(),
                    }
                }
            };
            // receiver gone means the user quit
            let _ = tx.send(event);
        });
    }
}

/// The single result slot the main loop renders from. Last writer wins.
#[derive(Debug, Default)]
pub struct LatestResult {
    current: Option<RefreshEvent>,
    received: usize,
}

impl LatestResult {
    pub fn apply(&mut self, event: RefreshEvent) -> &RefreshEvent {
        self.received += 1;
        self.current.insert(event)
    }

    pub fn current(&self) -> Option<&RefreshEvent> {
        self.current.as_ref()
    }

    pub fn received(&self) -> usize {
        self.received
    }
}
