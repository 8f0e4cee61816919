use std::env;
use std::fmt;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub expose_internal_errors: bool,
    pub database: DatabaseSettings,
}

/// Connection parameters for the document store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

/// What the environment says about database support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSettings {
    /// Neither `DATABASE_URL` nor `DATABASE_NAME` is set: no database support at all.
    Disabled,
    /// Only one of the two variables is set, so the handle exists but stays empty.
    Incomplete,
    Configured(DatabaseConfig),
}

/// Presence of the database variables. Values are never kept here.
/// Read per request by the diagnostic probe, not snapshotted at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl EnvPresence {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).is_some_and(|value| !value.trim().is_empty());
        Self {
            database_url: set("DATABASE_URL"),
            database_name: set("DATABASE_NAME"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let environment = match env::var("ENV").unwrap_or_else(|_| "local".to_string()).as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Local,
        };

        let expose_internal_errors = match env::var("EXPOSE_INTERNAL_ERRORS") {
            Ok(value) => parse_flag(&value)
                .context("EXPOSE_INTERNAL_ERRORS must be one of: true, false, 1, 0, yes, no")?,
            Err(_) => environment.is_local(),
        };

        let database = DatabaseSettings::from_values(
            non_empty_var("DATABASE_URL"),
            non_empty_var("DATABASE_NAME"),
        );

        // Validate configuration values
        Self::validate_config(port)?;

        Ok(Config {
            port,
            environment,
            expose_internal_errors,
            database,
        })
    }

    fn validate_config(port: u16) -> Result<()> {
        if port == 0 {
            anyhow::bail!("PORT must be greater than 0");
        }

        Ok(())
    }
}

impl DatabaseSettings {
    pub fn from_values(url: Option<String>, name: Option<String>) -> Self {
        match (url, name) {
            (Some(url), Some(name)) => DatabaseSettings::Configured(DatabaseConfig { url, name }),
            (None, None) => DatabaseSettings::Disabled,
            _ => DatabaseSettings::Incomplete,
        }
    }
}

// The URL usually embeds credentials, so only the database name is printed.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Local)
    }
}

/// An empty variable counts as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("invalid boolean value '{}'", other),
    }
}
