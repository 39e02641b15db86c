//! Application configuration.
//!
//! Every field has a default, so an empty JSON object is a complete
//! configuration for the student app.

use crate::navigation::{ConfigViolation, NavigationGuard, RoutePaths};
use crate::routing::RouteTable;
use crate::session::{PasswordPolicy, SessionProvider};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid navigation configuration: {0:?}")]
    Invalid(Vec<ConfigViolation>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub navigation: NavigationConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub paths: RoutePaths,
    pub routes: RouteTable,
    /// Screen shown before the session resolves.
    pub start_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            paths: RoutePaths::default(),
            routes: RouteTable::default(),
            start_path: "/".to_string(),
        }
    }
}

impl NavigationConfig {
    /// Build a validated guard.
    pub fn build_guard(&self) -> Result<NavigationGuard, ConfigError> {
        NavigationGuard::builder()
            .paths(self.paths.clone())
            .routes(self.routes.clone())
            .build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub password_policy: PasswordPolicy,
}

impl SessionConfig {
    pub fn provider(&self) -> SessionProvider {
        SessionProvider::with_policy(self.password_policy.clone())
    }
}
