//! Server settings.
//!
//! Sources, later ones winning: built-in defaults, optional `config/server.toml`,
//! then `LIVE_TRAINING_*` environment variables (`__` separates nested keys,
//! `LIVE_TRAINING_CORS_ORIGINS` is a comma-separated list).

use std::net::SocketAddr;

use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use shared::access::EntryPoints;

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    /// Absent means in-memory repositories (development only).
    #[serde(default)]
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub login_path: String,
    pub not_found_path: String,
    pub sessions_path: String,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config/server").required(false))
            .add_source(
                Environment::with_prefix("LIVE_TRAINING")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, AppError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")
            .and_then(|b| b.set_default("database_max_connections", 5))
            .and_then(|b| b.set_default("jwt_secret", ""))
            .and_then(|b| b.set_default("login_path", "/login"))
            .and_then(|b| b.set_default("not_found_path", "/not-found"))
            .and_then(|b| b.set_default("sessions_path", "/sessions"))
            .map_err(config_error)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let settings: Settings = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::Configuration("jwt_secret must be set".to_string()));
        }
        self.socket_addr()?;
        for (key, path) in [
            ("login_path", &self.login_path),
            ("not_found_path", &self.not_found_path),
            ("sessions_path", &self.sessions_path),
        ] {
            if !path.starts_with('/') {
                return Err(AppError::Configuration(format!("{key} must start with '/', got `{path}`")));
            }
        }
        if self.database_max_connections == 0 {
            return Err(AppError::Configuration("database_max_connections must be positive".to_string()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        self.bind_addr
            .parse()
            .map_err(|e| AppError::Configuration(format!("invalid bind_addr `{}`: {e}", self.bind_addr)))
    }

    pub fn entry_points(&self) -> EntryPoints {
        EntryPoints {
            login_path: self.login_path.clone(),
            not_found_path: self.not_found_path.clone(),
            sessions_path: self.sessions_path.clone(),
        }
    }
}

fn config_error(err: config::ConfigError) -> AppError {
    AppError::Configuration(err.to_string())
}
