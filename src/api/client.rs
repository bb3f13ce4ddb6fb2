use crate::config::Config;
use crate::error::AppError;
use crate::rate_limit::RequestThrottle;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints::{self, PREDICT_TEAM, PREDICT_WORST_TEAM, USER_AGENT};
use super::models::*;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);
const MAX_RETRIES: u32 = 3;

/// Server-side ranking of every 5-champion team in a pool.
pub trait TeamPredictionService: Send + Sync {
    fn predict_team(&self, heroes: &[String]) -> Result<Vec<TeamWinRate>, AppError>;
    fn predict_worst_team(&self, heroes: &[String]) -> Result<Vec<TeamWinRate>, AppError>;
}

pub struct PredictionApiClient {
    base_url: String,
    agent: ureq::Agent,
    throttle: RequestThrottle,
}

impl PredictionApiClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        PredictionApiClient {
            base_url: config.api_base.clone(),
            agent,
            throttle: RequestThrottle::per_second(config.api_requests_per_second),
        }
    }

    fn execute_request(&self, endpoint: &str, heroes: &[String]) -> Result<String, AppError> {
        let url = endpoints::url(&self.base_url, endpoint);
        let mut retry_count = 0;

        loop {
            self.throttle.acquire();
            debug!(%url, heroes = heroes.len(), "POST prediction request");

            let response = self.agent.post(&url).send_json(HeroesRequest { heroes });

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::ScorerUnavailable(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!(wait_ms, "prediction service rate limited, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let body = resp.into_string().unwrap_or_default();
                    return Err(classify_error(code, &body));
                }
                Err(e) => {
                    return Err(AppError::ScorerUnavailable(e.to_string()));
                }
            }
        }
    }
}

impl TeamPredictionService for PredictionApiClient {
    fn predict_team(&self, heroes: &[String]) -> Result<Vec<TeamWinRate>, AppError> {
        let body = self.execute_request(PREDICT_TEAM, heroes)?;
        parse_top_teams(&body)
    }

    fn predict_worst_team(&self, heroes: &[String]) -> Result<Vec<TeamWinRate>, AppError> {
        let body = self.execute_request(PREDICT_WORST_TEAM, heroes)?;
        parse_worst_teams(&body)
    }
}

/// Maps a non-200 reply to an error. The service reports names its model
/// cannot resolve as a 500 whose message mentions the champion name.
pub fn classify_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string());

    if message.contains("英雄名稱") {
        return AppError::UnknownChampion(message);
    }
    AppError::ScorerUnavailable(format!("status {}: {}", status, message))
}

pub fn parse_top_teams(body: &str) -> Result<Vec<TeamWinRate>, AppError> {
    let parsed: TopTeamsResponse =
        serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))?;
    match parsed.top_teams {
        Some(teams) if !teams.is_empty() => Ok(teams),
        _ => Err(AppError::ScorerUnavailable(
            "response is missing top_teams".to_string(),
        )),
    }
}

pub fn parse_worst_teams(body: &str) -> Result<Vec<TeamWinRate>, AppError> {
    let parsed: WorstTeamsResponse =
        serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))?;
    match parsed.worst_teams {
        Some(teams) if !teams.is_empty() => Ok(teams),
        _ => Err(AppError::ScorerUnavailable(
            "response is missing worst_teams".to_string(),
        )),
    }
}
