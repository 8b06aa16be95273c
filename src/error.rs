//! Errors for the fallible edges of the dashboard (settings I/O, network transport).
//!
//! The binding core itself (dispatch, relay, sinks) never fails; see [`crate::dispatch`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid broadcast endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Broadcast transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
