use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown champion: {0}")]
    UnknownChampion(String),

    #[error("Prediction service unavailable: {0}")]
    ScorerUnavailable(String),

    #[error("Scorer returned an invalid result: {0}")]
    ScorerContract(String),

    #[error("Invalid composition: {0}")]
    InvalidComposition(String),

    #[error("Too many champions in pool: {0} (the predictor accepts at most {1})")]
    PoolTooLarge(usize, usize),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Failed to read lockfile: {0}")]
    Lockfile(String),

    #[error("Champion select session unavailable: {0}")]
    SessionUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
