use super::models::{ChampSelectSession, SessionPool};
use super::resolver::resolve_session;
use super::SessionSource;
use crate::champions::ChampionRegistry;
use crate::error::AppError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const SESSION_ENDPOINT: &str = "/lol-champ-select/v1/session";
const SESSION_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection details the game client writes to its lockfile:
/// `LeagueClient:<pid>:<port>:<password>:<protocol>`.
#[derive(Debug, Clone, PartialEq)]
pub struct LockfileInfo {
    pub port: u16,
    pub password: String,
    pub protocol: String,
}

impl LockfileInfo {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let parts: Vec<&str> = content.trim().split(':').collect();
        if parts.len() < 5 {
            return Err(AppError::Lockfile(format!(
                "expected 5 fields, found {}",
                parts.len()
            )));
        }

        let port = parts[2]
            .parse()
            .map_err(|_| AppError::Lockfile(format!("invalid port: {}", parts[2])))?;

        Ok(LockfileInfo {
            port,
            password: parts[3].to_string(),
            protocol: parts[4].to_string(),
        })
    }

    pub fn read(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Lockfile(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn session_url(&self) -> String {
        format!("{}://127.0.0.1:{}{}", self.protocol, self.port, SESSION_ENDPOINT)
    }

    pub fn auth_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("riot:{}", self.password)))
    }
}

/// Reads champion select from the running game client.
pub struct LiveSessionClient {
    lockfile_path: PathBuf,
    registry: Arc<ChampionRegistry>,
    agent: ureq::Agent,
}

impl LiveSessionClient {
    pub fn new(lockfile_path: PathBuf, registry: Arc<ChampionRegistry>) -> Result<Self, AppError> {
        // The client serves a self-signed certificate on loopback.
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|e| AppError::SessionUnavailable(format!("TLS setup failed: {}", e)))?;

        let agent = ureq::AgentBuilder::new()
            .timeout(SESSION_TIMEOUT)
            .tls_connector(Arc::new(tls))
            .build();

        Ok(LiveSessionClient {
            lockfile_path,
            registry,
            agent,
        })
    }

    /// `Ok(None)` when the client is up but not in champion select.
    pub fn get_champ_select_session(&self) -> Result<Option<ChampSelectSession>, AppError> {
        let lock_info = LockfileInfo::read(&self.lockfile_path)?;
        let url = lock_info.session_url();
        debug!(%url, "requesting champ select session");

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &lock_info.auth_header())
            .call();

        match response {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| AppError::HttpError(e.to_string()))?;
                serde_json::from_str(&body)
                    .map(Some)
                    .map_err(|e| AppError::JsonError(e.to_string()))
            }
            Err(ureq::Error::Status(code, _)) => {
                debug!(status = code, "no champ select session");
                Ok(None)
            }
            Err(e) => Err(AppError::SessionUnavailable(e.to_string())),
        }
    }
}

impl SessionSource for LiveSessionClient {
    fn fetch_live_data(&self) -> Option<SessionPool> {
        match self.get_champ_select_session() {
            Ok(Some(session)) => Some(resolve_session(&session, &self.registry)),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "live session unavailable");
                None
            }
        }
    }
}

/// Session JSON saved on disk, same shape as the live endpoint.
pub struct LocalSessionFile {
    path: PathBuf,
    registry: Arc<ChampionRegistry>,
}

impl LocalSessionFile {
    pub fn new(path: PathBuf, registry: Arc<ChampionRegistry>) -> Self {
        LocalSessionFile { path, registry }
    }

    pub fn load(&self) -> Result<SessionPool, AppError> {
        let content = fs::read_to_string(&self.path)?;
        let session: ChampSelectSession = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse local session: {}", e)))?;
        Ok(resolve_session(&session, &self.registry))
    }
}

impl SessionSource for LocalSessionFile {
    fn fetch_live_data(&self) -> Option<SessionPool> {
        match self.load() {
            Ok(pool) => Some(pool),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "local session not loaded");
                None
            }
        }
    }
}
