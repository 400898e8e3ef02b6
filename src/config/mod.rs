//! Runtime settings for the HTTP server.
//!
//! Populated by the CLI (flags and environment) in `main`; everything else
//! takes a [`ServerConfig`] rather than reading the environment itself.

use std::path::PathBuf;

use crate::consts::{DEFAULT_BIND, PLACES_SEARCH_URL, default_db_path};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `0.0.0.0:8080`.
    pub bind: String,
    pub api_key: Option<String>,
    pub places_url: String,
    pub db_path: PathBuf,
    /// `None` or `"*"` allows any origin.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            api_key: None,
            places_url: PLACES_SEARCH_URL.to_string(),
            db_path: default_db_path(),
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// The provider key, if one was given and is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// The single allowed origin, or `None` when any origin is allowed.
    pub fn cors_origin(&self) -> Option<&str> {
        self.cors_origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty() && *origin != "*")
    }
}
