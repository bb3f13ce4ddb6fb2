use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.pinkyjelly.work";
pub const DEFAULT_LOCKFILE: &str = "C:/Riot Games/League of Legends/lockfile";
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub lockfile_path: PathBuf,
    /// Directory holding champion_mapping.json, chinese_mapping.json,
    /// local_session.json and the champion_images/ icons.
    pub data_dir: PathBuf,
    pub stats_file: PathBuf,
    pub top_k: usize,
    pub api_requests_per_second: u32,
    pub cache_max_age_mins: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            lockfile_path: PathBuf::from(DEFAULT_LOCKFILE),
            stats_file: data_dir.join("champion_stats.json"),
            data_dir,
            top_k: DEFAULT_TOP_K,
            api_requests_per_second: 2,
            cache_max_age_mins: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(base) = env::var("HEXARAM_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(path) = env::var("HEXARAM_LOCKFILE") {
            config.lockfile_path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("HEXARAM_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
            config.stats_file = config.data_dir.join("champion_stats.json");
        }
        if let Ok(path) = env::var("HEXARAM_STATS_FILE") {
            config.stats_file = PathBuf::from(path);
        }

        config.top_k = parse_var("HEXARAM_TOP_K", config.top_k)?;
        config.api_requests_per_second =
            parse_var("HEXARAM_API_RPS", config.api_requests_per_second)?;
        config.cache_max_age_mins =
            parse_var("HEXARAM_CACHE_MAX_AGE_MINS", config.cache_max_age_mins)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.top_k == 0 {
            return Err(AppError::ConfigError(
                "HEXARAM_TOP_K must be at least 1".to_string(),
            ));
        }
        if self.api_requests_per_second == 0 {
            return Err(AppError::ConfigError(
                "HEXARAM_API_RPS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
