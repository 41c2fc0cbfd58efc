//! Release source abstraction layer
//!
//! This module provides a trait-based abstraction over the hosting service's
//! release listing, so the aggregation pipeline can run against the real API
//! or against canned payloads in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [ReleaseSource] trait. Implementations:
//!
//! - [client::GitHubClient]: fetches `GET /repos/{owner}/{repo}/releases` with `reqwest`
//! - [mock::MockReleaseSource]: in-memory payloads for testing
//!
//! Payloads are returned as untyped JSON values; turning them into
//! [crate::domain::Release] is the normalizer's job, not the source's.

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::MockReleaseSource;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::RepoTarget;
use crate::error::Result;

/// Source of raw release payloads for a repository
///
/// ## Error Handling
///
/// Any transport failure or non-success response must be reported as
/// [crate::error::ReleaseStatsError::Fetch] naming the repository.
/// Sources never retry.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the release payloads of `target`, in the order the service lists them
    async fn fetch(&self, target: &RepoTarget) -> Result<Vec<Value>>;
}
