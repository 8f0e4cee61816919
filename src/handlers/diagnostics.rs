// Diagnostic probe
// Reports backend liveness and database reachability without ever failing

use std::fmt;

use axum::{extract::State, Json};
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use super::AppState;
use crate::{
    config::EnvPresence,
    db::{DatabaseHandle, HandleError},
};

/// Longest error excerpt echoed back by the probe.
pub const ERROR_EXCERPT_CHARS: usize = 50;

/// Most collection names listed by the probe.
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Outcome of one diagnostic check. Only rendered to text when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok(String),
    Warning(String),
    Error(String),
}

impl Status {
    pub fn ok(text: impl Into<String>) -> Self {
        Self::Ok(text.into())
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::Warning(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }

    fn presence(set: bool) -> Self {
        if set {
            Self::ok("Set")
        } else {
            Self::error("Not Set")
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok(text) => write!(f, "✅ {}", text),
            Status::Warning(text) => write!(f, "⚠️  {}", text),
            Status::Error(text) => write!(f, "❌ {}", text),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    #[serde(rename = "Connected")]
    Connected,
    #[serde(rename = "Not Connected")]
    NotConnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub backend: Status,
    pub database: Status,
    pub database_url: Status,
    pub database_name: Status,
    pub connection_status: ConnectionStatus,
    pub collections: Vec<String>,
}

/// GET /test
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticReport> {
    let report = probe(&state.db, EnvPresence::from_env()).await;
    info!(
        "Diagnostic probe finished: database={}, collections={}",
        report.database,
        report.collections.len()
    );
    Json(report)
}

/// Runs every check. Failures only change the text of the affected field.
pub async fn probe(handle: &DatabaseHandle, env: EnvPresence) -> DiagnosticReport {
    let mut report = DiagnosticReport {
        backend: Status::ok("Running"),
        database: Status::error("Not Available"),
        database_url: Status::presence(env.database_url),
        database_name: Status::presence(env.database_name),
        connection_status: ConnectionStatus::NotConnected,
        collections: Vec::new(),
    };

    match handle.resolve().await {
        Ok(Some(store)) => {
            report.database = Status::ok("Available");
            report.connection_status = ConnectionStatus::Connected;

            match store.list_collection_names().await {
                Ok(names) => {
                    report.collections = names.into_iter().take(MAX_LISTED_COLLECTIONS).collect();
                    report.database = Status::ok("Connected & Working");
                }
                Err(e) => {
                    warn!("Listing collections failed: {}", e);
                    report.database =
                        Status::warning(format!("Connected but Error: {}", excerpt(&e.to_string())));
                }
            }
        }
        Ok(None) => {
            report.database = Status::warning("Available but not initialized");
        }
        Err(HandleError::ModuleNotFound) => {
            report.database =
                Status::error("Database module not found (set DATABASE_URL and DATABASE_NAME)");
        }
        Err(e) => {
            warn!("Resolving the database handle failed: {}", e);
            report.database = Status::error(format!("Error: {}", excerpt(&e.to_string())));
        }
    }

    report
}

/// First `ERROR_EXCERPT_CHARS` characters of `message`, no ellipsis.
pub fn excerpt(message: &str) -> String {
    message.chars().take(ERROR_EXCERPT_CHARS).collect()
}
