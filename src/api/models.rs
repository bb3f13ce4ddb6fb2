use serde::{Deserialize, Serialize};

// POST body for both prediction routes
#[derive(Debug, Serialize)]
pub struct HeroesRequest<'a> {
    pub heroes: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamWinRate {
    pub team: Vec<String>,
    pub win_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct TopTeamsResponse {
    #[serde(default)]
    pub top_teams: Option<Vec<TeamWinRate>>,
}

#[derive(Debug, Deserialize)]
pub struct WorstTeamsResponse {
    #[serde(default)]
    pub worst_teams: Option<Vec<TeamWinRate>>,
}

// Body of 4xx/5xx replies
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
