//! Summarization provider contract and the three concrete tiers.
//!
//! Every backend implements [`SummaryProvider`]: given document text and a
//! length band, return a trimmed summary or a classified error. Providers
//! hold no mutable state across calls and never retry internally; retry and
//! fallback semantics belong exclusively to the orchestrator in
//! [`crate::summarizer`].

pub mod cloud;
pub mod extractive;
pub mod local;
pub(crate) mod prompt;

use crate::summarizer::SummaryLength;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// One level in the fallback chain, ordered by descending quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTier {
    /// Remote LLM completion API.
    Cloud,
    /// Locally hosted LLM runtime.
    Local,
    /// Deterministic extractive algorithm, the terminal fallback.
    Extractive,
}

impl std::fmt::Display for ProviderTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cloud => "cloud",
            Self::Local => "local",
            Self::Extractive => "extractive",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by a provider for a single attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider was unreachable or did not answer in time.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// Provider answered but its output was unusable.
    #[error("provider returned unusable output: {0}")]
    Invalid(String),
}

/// Interface implemented by every summarization backend.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Tier this provider occupies in the chain.
    fn tier(&self) -> ProviderTier;

    /// Produce a summary of `text` sized to `length`.
    ///
    /// Implementations must be cancel-safe: the orchestrator drops the
    /// in-flight future when the tier deadline expires.
    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ProviderError>;
}
