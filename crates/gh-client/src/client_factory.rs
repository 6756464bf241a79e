//! Authenticated client construction
//!
//! Resolves the API token for a GitHub host and builds an `OctocrabClient`
//! pointing at the right API base URL (github.com or GitHub Enterprise).

use crate::{OctocrabClient, DEFAULT_HOST};
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;
use std::sync::Arc;

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
///
/// A `.env` file in the working directory is loaded first when
/// `GITHUB_TOKEN` is not already set.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new() -> Self {
        if std::env::var("GITHUB_TOKEN").is_err() {
            match dotenvy::dotenv() {
                Ok(path) => debug!("Loaded .env file from: {:?}", path),
                Err(_) => debug!(".env file not found, relying on environment variables"),
            }
        }

        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
            .filter(|token| !token.is_empty());

        Self { default_token }
    }

    /// Create a resolver with a fixed default token, ignoring the environment
    pub fn with_default_token(token: impl Into<String>) -> Self {
        Self {
            default_token: Some(token.into()),
        }
    }

    /// Name of the host-specific token variable, e.g. `GITHUB_TOKEN_GHE_EXAMPLE_COM`
    pub fn env_key(host: &str) -> String {
        format!(
            "GITHUB_TOKEN_{}",
            host.replace(['.', '-'], "_").to_uppercase()
        )
    }

    /// Name of the variable a user should set to authenticate against `host`
    pub fn expected_variable(host: Option<&str>) -> String {
        match host {
            Some(h) if h != DEFAULT_HOST => Self::env_key(h),
            _ => "GITHUB_TOKEN".to_string(),
        }
    }

    /// Get a token for the given host
    ///
    /// # Arguments
    ///
    /// * `host` - The GitHub host (None = github.com)
    pub fn get_token(&self, host: Option<&str>) -> Option<String> {
        let host = host.unwrap_or(DEFAULT_HOST);

        let env_key = Self::env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            if !token.is_empty() {
                debug!("Using token from env var {} for host {}", env_key, host);
                return Some(token);
            }
        }

        if host == DEFAULT_HOST {
            if let Some(ref token) = self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Some(token.clone());
            }
        }

        None
    }
}

/// API base URL for a host
pub fn api_base_url(host: Option<&str>) -> String {
    match host {
        Some(h) if h != DEFAULT_HOST => format!("https://{}/api/v3", h),
        _ => "https://api.github.com".to_string(),
    }
}

/// Build an authenticated client for the given host
///
/// # Arguments
///
/// * `host` - The GitHub host (None = github.com)
/// * `token` - Personal access token
pub fn build_client(host: Option<&str>, token: String) -> Result<OctocrabClient> {
    let effective_host = host.unwrap_or(DEFAULT_HOST);
    info!("Creating GitHub client for host: {}", effective_host);

    let mut builder = Octocrab::builder().personal_token(token);

    if matches!(host, Some(h) if h != DEFAULT_HOST) {
        let uri = api_base_url(host);
        builder = builder.base_uri(&uri).context("Failed to set base URI")?;
    }

    let octocrab = builder.build().context("Failed to build Octocrab client")?;
    Ok(OctocrabClient::new(Arc::new(octocrab)))
}
