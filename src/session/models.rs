use serde::{Deserialize, Serialize};

// GET /lol-champ-select/v1/session (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectSession {
    #[serde(default)]
    pub my_team: Vec<SessionChampion>,
    #[serde(default)]
    pub bench_champions: Vec<SessionChampion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionChampion {
    // 0 while a player has not picked yet
    #[serde(default)]
    pub champion_id: i64,
}

/// Champion names resolved from one champion-select session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPool {
    pub selected: Vec<String>,
    pub candidates: Vec<String>,
    /// `selected` followed by `candidates`.
    pub all_pool: Vec<String>,
}
