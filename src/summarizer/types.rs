//! Core data types and error definitions for the summarization chain.

use crate::provider::ProviderTier;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Desired size band for a generated summary.
///
/// Each provider maps the band to its own parameters: the LLM tiers derive a
/// prompt instruction and a generation token budget, the extractive tier a
/// sentence count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    /// One to two sentences covering only the most important points.
    Short,
    /// Roughly one short paragraph.
    Medium,
    /// Multiple paragraphs covering all significant points.
    Long,
}

impl SummaryLength {
    /// Instruction fragment inserted into the LLM prompt.
    pub(crate) fn instruction(self) -> &'static str {
        match self {
            Self::Short => {
                "Provide a concise summary in 1-2 sentences highlighting only the most important points."
            }
            Self::Medium => {
                "Provide a comprehensive summary in one short paragraph covering the main topics and key details."
            }
            Self::Long => {
                "Provide a detailed summary with multiple paragraphs, covering all significant points, arguments, conclusions, and supporting details."
            }
        }
    }

    /// Generation token budget passed to the LLM tiers.
    pub(crate) fn max_tokens(self) -> u32 {
        match self {
            Self::Short => 200,
            Self::Medium => 500,
            Self::Long => 1000,
        }
    }

    /// Number of sentences the extractive tier selects.
    pub(crate) fn sentence_count(self) -> usize {
        match self {
            Self::Short => 1,
            Self::Medium => 3,
            Self::Long => 6,
        }
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        };
        f.write_str(name)
    }
}

/// How a single tier attempt concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    /// The tier produced a usable summary.
    Succeeded,
    /// The tier was unreachable or exceeded its deadline.
    Unavailable,
    /// The tier responded but its output was unusable.
    Invalid,
}

/// Recorded outcome of one tier during one request.
///
/// Tiers that are not registered (disabled or missing credentials) leave no
/// record; only invoked tiers appear in [`SummaryResult::attempts`].
#[derive(Clone, Debug, Serialize)]
pub struct ProviderAttempt {
    /// Tier that was invoked.
    pub provider: ProviderTier,
    /// How the invocation concluded.
    pub outcome: AttemptOutcome,
    /// Wall-clock time spent in the invocation, deadline included.
    pub latency: Duration,
}

/// Immutable result of a completed summarization request.
#[derive(Clone, Debug, Serialize)]
pub struct SummaryResult {
    /// The generated summary, trimmed and non-empty.
    pub summary_text: String,
    /// Tier that produced the summary.
    pub provider_used: ProviderTier,
    /// True unless the summary came from the cloud tier.
    pub degraded: bool,
    /// Ordered record of every tier invoked for this request.
    pub attempts: Vec<ProviderAttempt>,
}

/// Errors surfaced to callers of the summarization chain.
///
/// Provider-level failures never appear here; they are absorbed by the
/// fallback cascade and recorded as attempt metadata instead.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Input text was empty or whitespace-only. No provider is attempted.
    #[error("document text is empty after trimming")]
    EmptyText,
    /// Every registered tier failed. Unreachable for non-empty input because
    /// the extractive tier cannot fail on it; kept so the orchestrator never
    /// has to panic.
    #[error("all summarization tiers failed")]
    Exhausted,
}
