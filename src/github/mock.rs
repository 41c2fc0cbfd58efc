use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::RepoTarget;
use crate::error::{ReleaseStatsError, Result};
use crate::github::ReleaseSource;

/// Mock release source for testing without network access
pub struct MockReleaseSource {
    releases: HashMap<RepoTarget, Vec<Value>>,
    failures: HashMap<RepoTarget, String>,
}

impl MockReleaseSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        MockReleaseSource {
            releases: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// Serve these payloads for a repository
    pub fn add_releases(&mut self, target: RepoTarget, payloads: Vec<Value>) {
        self.releases.insert(target, payloads);
    }

    /// Make fetching a repository fail with the given reason
    pub fn fail_with(&mut self, target: RepoTarget, reason: impl Into<String>) {
        self.failures.insert(target, reason.into());
    }
}

impl Default for MockReleaseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReleaseSource for MockReleaseSource {
    async fn fetch(&self, target: &RepoTarget) -> Result<Vec<Value>> {
        if let Some(reason) = self.failures.get(target) {
            return Err(ReleaseStatsError::fetch(target.to_string(), reason.clone()));
        }
        self.releases
            .get(target)
            .cloned()
            .ok_or_else(|| ReleaseStatsError::fetch(target.to_string(), "HTTP 404 Not Found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_serves_payloads() {
        let target = RepoTarget::new("o", "r");
        let mut source = MockReleaseSource::new();
        source.add_releases(target.clone(), vec![json!({"id": 1})]);

        let payloads = source.fetch(&target).await.unwrap();
        assert_eq!(payloads, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn test_mock_unknown_repository_fails() {
        let source = MockReleaseSource::default();
        let err = source.fetch(&RepoTarget::new("o", "none")).await.unwrap_err();
        assert!(matches!(err, ReleaseStatsError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_mock_configured_failure() {
        let target = RepoTarget::new("o", "r");
        let mut source = MockReleaseSource::new();
        source.add_releases(target.clone(), vec![]);
        source.fail_with(target.clone(), "connection reset");

        let err = source.fetch(&target).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
