use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{RepoTarget, SourceConfig};
use crate::error::{ReleaseStatsError, Result};
use crate::github::ReleaseSource;

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Release source backed by the GitHub REST API
///
/// Only the first page of releases is requested; no authentication is sent.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
}

impl GitHubClient {
    /// Build a client from source settings
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ReleaseStatsError::config(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(GitHubClient {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Use an existing HTTP client, e.g. one with custom proxy or TLS settings
    pub fn with_http(http: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        GitHubClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Release listing URL for a repository
    pub fn releases_url(&self, target: &RepoTarget) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_base, target.owner, target.repo
        )
    }
}

#[async_trait]
impl ReleaseSource for GitHubClient {
    async fn fetch(&self, target: &RepoTarget) -> Result<Vec<Value>> {
        let url = self.releases_url(target);
        debug!(repo = %target, %url, "Fetching releases");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(repo = %target, error = %e, "Release request failed");
            ReleaseStatsError::fetch(target.to_string(), format!("request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(repo = %target, %status, "Release request returned non-success status");
            return Err(ReleaseStatsError::fetch(
                target.to_string(),
                format!("HTTP {}", status),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            ReleaseStatsError::fetch(target.to_string(), format!("invalid JSON body: {}", e))
        })?;

        match body {
            Value::Array(items) => {
                debug!(repo = %target, count = items.len(), "Fetched releases");
                Ok(items)
            }
            other => Err(ReleaseStatsError::fetch(
                target.to_string(),
                format!("expected a JSON array, got {}", json_kind(&other)),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
