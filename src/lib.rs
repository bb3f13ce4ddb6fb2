//! hexaram - ARAM champion-select companion
//!
//! Reads the champion-select session from the local game client, enumerates
//! every 5-champion team in the candidate pool, scores the teams by
//! predicted win rate and ranks them.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod champions;
pub mod config;
pub mod display;
pub mod error;
pub mod rate_limit;
pub mod session;
pub mod watch;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
