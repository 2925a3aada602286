//! Summarization fallback chain: request types and the orchestrator.

mod service;
pub mod types;

pub use service::Summarizer;
pub use types::{
    AttemptOutcome, ProviderAttempt, SummarizeError, SummaryLength, SummaryResult,
};
