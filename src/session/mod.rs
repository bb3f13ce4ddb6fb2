//! Where candidate pools come from: the live game client, the cached last
//! session, or a session file on disk.

pub mod client;
pub mod models;
pub mod resolver;

use crate::cache::SessionCache;
use models::SessionPool;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

pub use client::{LiveSessionClient, LocalSessionFile, LockfileInfo};
pub use resolver::resolve_session;

/// Something that can produce the current champion-select session.
/// Fails softly: `None` means no data, never an error.
pub trait SessionSource: Send + Sync {
    fn fetch_live_data(&self) -> Option<SessionPool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Live,
    Cached,
    Local,
}

impl fmt::Display for SessionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionOrigin::Live => "live client",
            SessionOrigin::Cached => "cached session",
            SessionOrigin::Local => "local session file",
        };
        f.write_str(label)
    }
}

/// Tries the live client, then the cache, then the local file.
/// Live sessions are written to the cache as they arrive.
pub struct SessionProvider {
    live: Option<Box<dyn SessionSource>>,
    local: Option<Box<dyn SessionSource>>,
    cache_path: Option<PathBuf>,
    cache_max_age_mins: u64,
}

impl SessionProvider {
    pub fn new(cache_max_age_mins: u64) -> Self {
        SessionProvider {
            live: None,
            local: None,
            cache_path: None,
            cache_max_age_mins,
        }
    }

    pub fn with_live(mut self, source: impl SessionSource + 'static) -> Self {
        self.live = Some(Box::new(source));
        self
    }

    pub fn with_local(mut self, source: impl SessionSource + 'static) -> Self {
        self.local = Some(Box::new(source));
        self
    }

    pub fn with_cache(mut self, path: PathBuf) -> Self {
        self.cache_path = Some(path);
        self
    }

    pub fn fetch(&self) -> Option<(SessionPool, SessionOrigin)> {
        if let Some(pool) = self.fetch_live() {
            return Some((pool, SessionOrigin::Live));
        }
        if let Some(pool) = self.fetch_cached() {
            return Some((pool, SessionOrigin::Cached));
        }
        self.local
            .as_ref()
            .and_then(|source| source.fetch_live_data())
            .filter(|pool| !pool.is_empty())
            .map(|pool| (pool, SessionOrigin::Local))
    }

    fn fetch_live(&self) -> Option<SessionPool> {
        let pool = self
            .live
            .as_ref()?
            .fetch_live_data()
            .filter(|pool| !pool.is_empty())?;

        if let Some(path) = &self.cache_path {
            if let Err(e) = SessionCache::new(pool.clone()).save(path) {
                warn!(error = %e, "failed to cache live session");
            }
        }
        Some(pool)
    }

    fn fetch_cached(&self) -> Option<SessionPool> {
        let path = self.cache_path.as_ref()?;
        match SessionCache::load(path) {
            Ok(Some(cache)) if !cache.is_stale(self.cache_max_age_mins) => Some(cache.session),
            Ok(Some(cache)) => {
                debug!(saved_at = %cache.saved_at, "cached session is stale");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session cache");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    struct Fixed(Option<SessionPool>);

    impl SessionSource for Fixed {
        fn fetch_live_data(&self) -> Option<SessionPool> {
            self.0.clone()
        }
    }

    fn pool(names: &[&str]) -> SessionPool {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        SessionPool {
            selected: vec![],
            candidates: names.clone(),
            all_pool: names,
        }
    }

    #[test]
    fn live_session_wins_and_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("last_session.json");
        let provider = SessionProvider::new(30)
            .with_live(Fixed(Some(pool(&["Ahri"]))))
            .with_local(Fixed(Some(pool(&["Lux"]))))
            .with_cache(cache_path.clone());

        let (found, origin) = provider.fetch().unwrap();
        assert_eq!(origin, SessionOrigin::Live);
        assert_eq!(found.all_pool, vec!["Ahri"]);

        let cached = SessionCache::load(&cache_path).unwrap().unwrap();
        assert_eq!(cached.session, found);
    }

    #[test]
    fn falls_back_to_fresh_cache_then_local() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("last_session.json");
        SessionCache::new(pool(&["Garen"])).save(&cache_path).unwrap();

        let provider = SessionProvider::new(30)
            .with_live(Fixed(None))
            .with_local(Fixed(Some(pool(&["Lux"]))))
            .with_cache(cache_path.clone());
        let (found, origin) = provider.fetch().unwrap();
        assert_eq!(origin, SessionOrigin::Cached);
        assert_eq!(found.all_pool, vec!["Garen"]);

        let mut stale = SessionCache::new(pool(&["Garen"]));
        stale.saved_at = Utc::now() - Duration::hours(2);
        stale.save(&cache_path).unwrap();
        let (found, origin) = provider.fetch().unwrap();
        assert_eq!(origin, SessionOrigin::Local);
        assert_eq!(found.all_pool, vec!["Lux"]);
    }

    #[test]
    fn nothing_anywhere_is_none() {
        let provider = SessionProvider::new(30)
            .with_live(Fixed(None))
            .with_local(Fixed(Some(SessionPool::default())));
        assert!(provider.fetch().is_none());
    }
}
