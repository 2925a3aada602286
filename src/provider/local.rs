//! Local LLM tier backed by an Ollama-compatible runtime.
//!
//! Lower trust and quality than the cloud tier but still abstractive; the
//! orchestrator only reaches for it once the cloud tier is skipped or has
//! failed. Speaks the `/api/generate` protocol directly over HTTP.

use crate::provider::prompt::build_summary_prompt;
use crate::provider::{ProviderError, ProviderTier, SummaryProvider};
use crate::summarizer::SummaryLength;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Adapter for a local inference endpoint.
pub struct LocalProvider {
    http: Client,
    endpoint: String,
    model: String,
}

impl LocalProvider {
    /// Build a local provider for the given runtime endpoint and model.
    pub fn new(endpoint: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("docsum/local")
            .build()
            .expect("Failed to construct reqwest::Client for local provider");
        Self {
            http,
            endpoint,
            model,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummaryProvider for LocalProvider {
    fn tier(&self) -> ProviderTier {
        ProviderTier::Local
    }

    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_summary_prompt(text, length),
            "stream": false,
            "options": {
                "temperature": 0.3,
                "num_predict": length.max_tokens(),
            }
        });

        let response = self
            .http
            .post(self.generate_url())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                ProviderError::Unavailable(format!(
                    "failed to reach local runtime at {}: {error}",
                    self.endpoint
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Invalid(format!(
                "local runtime returned {status}: {body}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|error| {
            ProviderError::Invalid(format!("failed to decode generate response: {error}"))
        })?;

        if !body.done {
            return Err(ProviderError::Invalid(
                "local runtime response incomplete (streaming not supported)".into(),
            ));
        }

        let summary = body.response.trim();
        if summary.is_empty() {
            return Err(ProviderError::Invalid(
                "local runtime returned an empty response".into(),
            ));
        }

        Ok(summary.to_string())
    }
}
