//! Cloud LLM tier backed by an OpenAI-style chat-completions API.

use crate::provider::prompt::{SYSTEM_MESSAGE, build_summary_prompt};
use crate::provider::{ProviderError, ProviderTier, SummaryProvider};
use crate::summarizer::SummaryLength;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Adapter for a remote chat-completions endpoint.
///
/// Construction requires a credential: a missing key means the tier is never
/// registered with the orchestrator, not that requests fail at runtime. The
/// adapter never retries; a failed call is classified and handed back to the
/// fallback chain.
pub struct CloudProvider {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl CloudProvider {
    /// Build a cloud provider for the given endpoint, credential, and model.
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("docsum/cloud")
            .build()
            .expect("Failed to construct reqwest::Client for cloud provider");
        Self {
            http,
            endpoint,
            api_key,
            model,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl SummaryProvider for CloudProvider {
    fn tier(&self) -> ProviderTier {
        ProviderTier::Cloud
    }

    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_MESSAGE },
                { "role": "user", "content": build_summary_prompt(text, length) }
            ],
            "max_tokens": length.max_tokens(),
            // Lower temperature for consistent summaries.
            "temperature": 0.3,
        });

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                ProviderError::Unavailable(format!(
                    "failed to reach cloud endpoint {}: {error}",
                    self.endpoint
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Invalid(format!(
                "cloud endpoint returned {status}: {body}"
            )));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|error| {
            ProviderError::Invalid(format!("failed to decode completion response: {error}"))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Invalid("completion contained no choices".into()))?;

        let summary = content.trim();
        if summary.is_empty() {
            return Err(ProviderError::Invalid(
                "completion contained empty content".into(),
            ));
        }

        Ok(summary.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn provider_for(server: &MockServer) -> CloudProvider {
        CloudProvider::new(server.base_url(), "sk-test".into(), "gpt-4o-mini".into())
    }

    #[tokio::test]
    async fn returns_trimmed_completion_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test");
                then.status(200).json_body(json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "  A tidy summary.  " } }
                    ]
                }));
            })
            .await;

        let summary = provider_for(&server)
            .summarize("Some document text.", SummaryLength::Medium)
            .await
            .expect("summary");

        mock.assert();
        assert_eq!(summary, "A tidy summary.");
    }

    #[tokio::test]
    async fn error_status_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).body("rate limited");
            })
            .await;

        let error = provider_for(&server)
            .summarize("Some document text.", SummaryLength::Short)
            .await
            .expect_err("error status");
        assert!(matches!(error, ProviderError::Invalid(message) if message.contains("429")));
    }

    #[tokio::test]
    async fn malformed_payload_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).body("not json");
            })
            .await;

        let error = provider_for(&server)
            .summarize("Some document text.", SummaryLength::Short)
            .await
            .expect_err("malformed body");
        assert!(matches!(error, ProviderError::Invalid(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let error = provider_for(&server)
            .summarize("Some document text.", SummaryLength::Short)
            .await
            .expect_err("no choices");
        assert!(matches!(error, ProviderError::Invalid(message) if message.contains("choices")));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let provider = CloudProvider::new(
            "http://127.0.0.1:1".into(),
            "sk-test".into(),
            "gpt-4o-mini".into(),
        );
        let error = provider
            .summarize("Some document text.", SummaryLength::Short)
            .await
            .expect_err("connection refused");
        assert!(matches!(error, ProviderError::Unavailable(_)));
    }
}
