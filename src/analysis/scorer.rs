use super::composition::Composition;
use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Maps compositions to predicted win rates in one batch call.
///
/// Results are in input order, each in [0, 1]. An unrecognized champion
/// fails the whole batch with [`AppError::UnknownChampion`].
pub trait WinRateScorer: Send + Sync {
    fn batch_predict(&self, compositions: &[Composition]) -> Result<Vec<f64>, AppError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ChampionStats {
    pub games: u32,
    pub wins: u32,
}

impl ChampionStats {
    pub fn new(games: u32, wins: u32) -> Self {
        ChampionStats { games, wins }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    /// Laplace-smoothed win rate, never exactly 0 or 1.
    pub fn smoothed_win_rate(&self) -> f64 {
        (self.wins as f64 + 1.0) / (self.games as f64 + 2.0)
    }
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Offline scorer over a per-champion games/wins table.
///
/// A team's win rate is the logistic of its members' mean log-odds, so five
/// average champions predict 50% and the result stays inside [0, 1].
#[derive(Debug, Clone, Default)]
pub struct StatsTableScorer {
    table: HashMap<String, ChampionStats>,
}

impl StatsTableScorer {
    pub fn new(table: HashMap<String, ChampionStats>) -> Self {
        StatsTableScorer { table }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read stats table {}: {}", path.display(), e))
        })?;
        let table: HashMap<String, ChampionStats> = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse stats table: {}", e)))?;

        if let Some((name, _)) = table.iter().find(|(_, s)| s.wins > s.games) {
            return Err(AppError::ConfigError(format!(
                "stats table lists more wins than games for {}",
                name
            )));
        }

        debug!(champions = table.len(), path = %path.display(), "stats table loaded");
        Ok(Self::new(table))
    }

    pub fn get(&self, name: &str) -> Option<ChampionStats> {
        self.table.get(name).copied()
    }

    fn predict_one(&self, composition: &Composition) -> Result<f64, AppError> {
        let mut total = 0.0;
        for member in composition.members() {
            let stats = self
                .table
                .get(member)
                .ok_or_else(|| AppError::UnknownChampion(member.clone()))?;
            total += logit(stats.smoothed_win_rate());
        }
        let p = sigmoid(total / composition.members().len() as f64);
        Ok(p.clamp(0.0, 1.0))
    }
}

impl WinRateScorer for StatsTableScorer {
    fn batch_predict(&self, compositions: &[Composition]) -> Result<Vec<f64>, AppError> {
        compositions.iter().map(|c| self.predict_one(c)).collect()
    }
}
