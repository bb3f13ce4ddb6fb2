use crate::error::AppError;
use crate::session::models::SessionPool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The last champion-select session seen from the live client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCache {
    pub saved_at: DateTime<Utc>,
    pub session: SessionPool,
}

impl SessionCache {
    pub fn new(session: SessionPool) -> Self {
        SessionCache {
            saved_at: Utc::now(),
            session,
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hexaram")
            .join("last_session.json")
    }

    /// `Ok(None)` when nothing has been cached yet.
    pub fn load(path: &Path) -> Result<Option<Self>, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| AppError::JsonError(format!("Failed to parse cache: {}", e))),
            Err(_) => Ok(None),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize cache: {}", e)))?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.saved_at);
        age.num_minutes() > max_age_mins as i64
    }
}
