// Prediction service routes, relative to the configured API base.

pub const PREDICT_TEAM: &str = "/predict/predict_team";
pub const PREDICT_WORST_TEAM: &str = "/predict/predict_worst_team";

pub const USER_AGENT: &str = concat!("hexaram/", env!("CARGO_PKG_VERSION"));

pub fn url(base: &str, endpoint: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), endpoint)
}
