//! Fallback orchestrator coordinating the provider chain.

use crate::{
    config::Config,
    metrics::{MetricsSnapshot, SummaryMetrics},
    provider::{
        ProviderError, ProviderTier, SummaryProvider, cloud::CloudProvider,
        extractive::ExtractiveProvider, local::LocalProvider,
    },
    summarizer::types::{
        AttemptOutcome, ProviderAttempt, SummarizeError, SummaryLength, SummaryResult,
    },
};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct RegisteredTier {
    provider: Box<dyn SummaryProvider>,
    timeout: Option<Duration>,
}

/// Coordinates the cloud → local → extractive fallback chain.
///
/// Tiers are registered once at construction from the read-only [`Config`]
/// and tried strictly in order for every request: quality and cost decrease
/// down the chain, so an early success must short-circuit the rest. The
/// service holds no per-request state, making concurrent `summarize` calls
/// safe without coordination. Construct it once near process start and share
/// it through an `Arc` if multiple surfaces need it.
pub struct Summarizer {
    tiers: Vec<RegisteredTier>,
    metrics: Arc<SummaryMetrics>,
}

impl Summarizer {
    /// Register tiers according to configuration.
    ///
    /// The cloud tier joins only when enabled and holding a credential, the
    /// local tier when enabled, and the extractive tier unconditionally —
    /// it is the mechanism that keeps the chain total.
    pub fn from_config(config: &Config) -> Self {
        let mut tiers = Vec::new();

        match (config.cloud_enabled, config.cloud_api_key.as_ref()) {
            (true, Some(api_key)) => {
                tiers.push(RegisteredTier {
                    provider: Box::new(CloudProvider::new(
                        config.cloud_endpoint.clone(),
                        api_key.clone(),
                        config.cloud_model.clone(),
                    )),
                    timeout: Some(config.cloud_timeout),
                });
            }
            (true, None) => {
                tracing::info!("Cloud tier has no credential; skipping registration");
            }
            (false, _) => {
                tracing::info!("Cloud tier disabled by configuration");
            }
        }

        if config.local_enabled {
            tiers.push(RegisteredTier {
                provider: Box::new(LocalProvider::new(
                    config.local_endpoint.clone(),
                    config.local_model.clone(),
                )),
                timeout: Some(config.local_timeout),
            });
        } else {
            tracing::info!("Local tier disabled by configuration");
        }

        tiers.push(RegisteredTier {
            provider: Box::new(ExtractiveProvider::new()),
            timeout: None,
        });

        tracing::debug!(tiers = tiers.len(), "Summarizer chain assembled");
        Self {
            tiers,
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    #[cfg(test)]
    fn with_tiers(tiers: Vec<(Box<dyn SummaryProvider>, Option<Duration>)>) -> Self {
        Self {
            tiers: tiers
                .into_iter()
                .map(|(provider, timeout)| RegisteredTier { provider, timeout })
                .collect(),
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    /// Summarize `text` to the requested length band.
    ///
    /// Tiers are invoked one at a time under their configured deadline. A
    /// tier failure is recorded as attempt metadata and absorbed by falling
    /// through to the next tier; the only error a caller can observe is
    /// [`SummarizeError::EmptyText`], raised before any tier runs.
    pub async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<SummaryResult, SummarizeError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummarizeError::EmptyText);
        }

        let mut attempts = Vec::new();
        for tier in &self.tiers {
            let tier_name = tier.provider.tier();
            let started = Instant::now();
            let outcome = self.invoke_tier(tier, trimmed, length).await;
            let latency = started.elapsed();

            match outcome {
                Ok(summary_text) => {
                    attempts.push(ProviderAttempt {
                        provider: tier_name,
                        outcome: AttemptOutcome::Succeeded,
                        latency,
                    });
                    let degraded = tier_name != ProviderTier::Cloud;
                    self.metrics
                        .record_summary(degraded, tier_name == ProviderTier::Extractive);
                    tracing::info!(
                        provider = %tier_name,
                        degraded,
                        attempts = attempts.len(),
                        latency_ms = latency.as_millis() as u64,
                        "Summary generated"
                    );
                    return Ok(SummaryResult {
                        summary_text,
                        provider_used: tier_name,
                        degraded,
                        attempts,
                    });
                }
                Err(error) => {
                    let recorded = match &error {
                        ProviderError::Unavailable(_) => AttemptOutcome::Unavailable,
                        ProviderError::Invalid(_) => AttemptOutcome::Invalid,
                    };
                    tracing::warn!(
                        provider = %tier_name,
                        error = %error,
                        latency_ms = latency.as_millis() as u64,
                        "Tier failed; falling through"
                    );
                    attempts.push(ProviderAttempt {
                        provider: tier_name,
                        outcome: recorded,
                        latency,
                    });
                }
            }
        }

        // Unreachable for non-empty input: the extractive tier is total on it.
        Err(SummarizeError::Exhausted)
    }

    async fn invoke_tier(
        &self,
        tier: &RegisteredTier,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ProviderError> {
        match tier.timeout {
            Some(deadline) => {
                match tokio::time::timeout(deadline, tier.provider.summarize(text, length)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Unavailable(format!(
                        "tier deadline of {}ms expired",
                        deadline.as_millis()
                    ))),
                }
            }
            None => tier.provider.summarize(text, length).await,
        }
    }

    /// Return the current summarization metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum StubBehavior {
        Succeed(&'static str),
        Unavailable,
        Invalid,
        Hang,
    }

    struct StubProvider {
        tier: ProviderTier,
        behavior: StubBehavior,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn boxed(tier: ProviderTier, behavior: StubBehavior) -> Box<Self> {
            Box::new(Self {
                tier,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SummaryProvider for StubProvider {
        fn tier(&self) -> ProviderTier {
            self.tier
        }

        async fn summarize(
            &self,
            _text: &str,
            _length: SummaryLength,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                StubBehavior::Succeed(summary) => Ok((*summary).to_string()),
                StubBehavior::Unavailable => {
                    Err(ProviderError::Unavailable("stub offline".into()))
                }
                StubBehavior::Invalid => Err(ProviderError::Invalid("stub gibberish".into())),
                StubBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!("hanging stub should be cancelled by the tier deadline")
                }
            }
        }
    }

    const TEXT: &str = "The report covers quarterly results. Revenue grew steadily.";

    #[tokio::test]
    async fn cloud_success_short_circuits_the_chain() {
        let summarizer = Summarizer::with_tiers(vec![
            (
                StubProvider::boxed(ProviderTier::Cloud, StubBehavior::Succeed("cloud summary")),
                None,
            ),
            (
                StubProvider::boxed(ProviderTier::Local, StubBehavior::Succeed("local summary")),
                None,
            ),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        let result = summarizer
            .summarize(TEXT, SummaryLength::Medium)
            .await
            .expect("result");

        assert_eq!(result.summary_text, "cloud summary");
        assert_eq!(result.provider_used, ProviderTier::Cloud);
        assert!(!result.degraded);
        assert_eq!(result.attempts.len(), 1);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::Succeeded);
    }

    #[tokio::test]
    async fn cloud_failure_falls_through_to_local() {
        let summarizer = Summarizer::with_tiers(vec![
            (
                StubProvider::boxed(ProviderTier::Cloud, StubBehavior::Unavailable),
                None,
            ),
            (
                StubProvider::boxed(ProviderTier::Local, StubBehavior::Succeed("local summary")),
                None,
            ),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        let result = summarizer
            .summarize(TEXT, SummaryLength::Medium)
            .await
            .expect("result");

        assert_eq!(result.provider_used, ProviderTier::Local);
        assert!(result.degraded);
        assert_eq!(result.attempts.len(), 2);
        assert_eq!(result.attempts[0].provider, ProviderTier::Cloud);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::Unavailable);
        assert_eq!(result.attempts[1].provider, ProviderTier::Local);
        assert_eq!(result.attempts[1].outcome, AttemptOutcome::Succeeded);
    }

    #[tokio::test]
    async fn chain_bottoms_out_at_extractive() {
        let summarizer = Summarizer::with_tiers(vec![
            (
                StubProvider::boxed(ProviderTier::Cloud, StubBehavior::Invalid),
                None,
            ),
            (
                StubProvider::boxed(ProviderTier::Local, StubBehavior::Unavailable),
                None,
            ),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        let result = summarizer
            .summarize(TEXT, SummaryLength::Short)
            .await
            .expect("result");

        assert_eq!(result.provider_used, ProviderTier::Extractive);
        assert!(result.degraded);
        assert!(!result.summary_text.is_empty());
        assert_eq!(result.attempts.len(), 3);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::Invalid);
        assert_eq!(result.attempts[1].outcome, AttemptOutcome::Unavailable);
        assert_eq!(result.attempts[2].outcome, AttemptOutcome::Succeeded);
    }

    #[tokio::test]
    async fn unregistered_tier_leaves_no_attempt_record() {
        // A chain without a cloud tier mirrors a disabled/credential-less config.
        let summarizer = Summarizer::with_tiers(vec![
            (
                StubProvider::boxed(ProviderTier::Local, StubBehavior::Succeed("local summary")),
                None,
            ),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        let result = summarizer
            .summarize(TEXT, SummaryLength::Medium)
            .await
            .expect("result");

        assert_eq!(result.attempts.len(), 1);
        assert_eq!(result.attempts[0].provider, ProviderTier::Local);
        assert!(result.degraded);
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_tier_runs() {
        let cloud = StubProvider::boxed(ProviderTier::Cloud, StubBehavior::Succeed("unused"));
        let summarizer = Summarizer::with_tiers(vec![
            (cloud, None),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        let error = summarizer
            .summarize("   \n ", SummaryLength::Short)
            .await
            .expect_err("empty input");
        assert!(matches!(error, SummarizeError::EmptyText));
        assert_eq!(summarizer.metrics_snapshot().summaries_completed, 0);
    }

    #[tokio::test]
    async fn deadline_expiry_counts_as_unavailable() {
        let summarizer = Summarizer::with_tiers(vec![
            (
                StubProvider::boxed(ProviderTier::Cloud, StubBehavior::Hang),
                Some(Duration::from_millis(50)),
            ),
            (
                StubProvider::boxed(ProviderTier::Local, StubBehavior::Succeed("local summary")),
                None,
            ),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        let result = summarizer
            .summarize(TEXT, SummaryLength::Medium)
            .await
            .expect("result");

        assert_eq!(result.provider_used, ProviderTier::Local);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::Unavailable);
    }

    #[tokio::test]
    async fn metrics_track_degraded_and_extractive_outcomes() {
        let summarizer = Summarizer::with_tiers(vec![
            (
                StubProvider::boxed(ProviderTier::Cloud, StubBehavior::Unavailable),
                None,
            ),
            (
                StubProvider::boxed(ProviderTier::Local, StubBehavior::Invalid),
                None,
            ),
            (Box::new(ExtractiveProvider::new()), None),
        ]);

        summarizer
            .summarize(TEXT, SummaryLength::Short)
            .await
            .expect("result");

        let snapshot = summarizer.metrics_snapshot();
        assert_eq!(snapshot.summaries_completed, 1);
        assert_eq!(snapshot.summaries_degraded, 1);
        assert_eq!(snapshot.extractive_fallbacks, 1);
    }
}
