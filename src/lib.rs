#![deny(missing_docs)]

//! Core library for the docsum summarization service.
//!
//! Given extracted document text and a desired length, the chain tries a
//! cloud LLM, then a local LLM runtime, then a deterministic extractive
//! algorithm, and always returns a summary for non-empty input.

/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization metrics helpers.
pub mod metrics;
/// Provider contract and the three concrete tiers.
pub mod provider;
/// Fallback orchestrator and its request/result types.
pub mod summarizer;
