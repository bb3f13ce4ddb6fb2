use super::models::{ChampSelectSession, SessionChampion, SessionPool};
use crate::analysis::CandidatePool;
use crate::champions::{ChampionRegistry, UNKNOWN_CHAMPION};
use tracing::warn;

fn resolve_ids(champions: &[SessionChampion], registry: &ChampionRegistry) -> Vec<String> {
    champions
        .iter()
        .filter(|c| c.champion_id > 0)
        .map(|c| {
            let name = registry.name_for_id(c.champion_id);
            if name == UNKNOWN_CHAMPION {
                warn!(champion_id = c.champion_id, "champion id not in mapping");
            }
            name.to_string()
        })
        .collect()
}

/// Turns raw session ids into names. Unresolved ids stay visible as the
/// sentinel here; [`SessionPool::candidate_pool`] drops them.
pub fn resolve_session(session: &ChampSelectSession, registry: &ChampionRegistry) -> SessionPool {
    let selected = resolve_ids(&session.my_team, registry);
    let candidates = resolve_ids(&session.bench_champions, registry);
    let all_pool = selected.iter().chain(candidates.iter()).cloned().collect();

    SessionPool {
        selected,
        candidates,
        all_pool,
    }
}

impl SessionPool {
    pub fn candidate_pool(&self) -> CandidatePool {
        CandidatePool::from_names(&self.all_pool)
    }

    pub fn is_empty(&self) -> bool {
        self.all_pool.is_empty()
    }
}
