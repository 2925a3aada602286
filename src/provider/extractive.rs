//! Deterministic extractive summarization, the terminal fallback tier.
//!
//! No network, no model, no shared state: sentences are scored by how much
//! of the document's significant vocabulary they carry, the top scorers are
//! selected according to the length band, and the selection is reassembled
//! in original document order so the output reads coherently. The only
//! failure mode is empty input, which the orchestrator rejects before any
//! tier runs, making this tier total in practice.

use crate::provider::{ProviderError, ProviderTier, SummaryProvider};
use crate::summarizer::SummaryLength;
use async_trait::async_trait;
use std::collections::HashMap;

/// Frequency-based sentence extraction provider.
#[derive(Debug, Default)]
pub struct ExtractiveProvider;

impl ExtractiveProvider {
    /// Construct the extractive provider.
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SummaryProvider for ExtractiveProvider {
    fn tier(&self) -> ProviderTier {
        ProviderTier::Extractive
    }

    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ProviderError> {
        let summary = extract_summary(text, length.sentence_count())?;
        Ok(summary)
    }
}

/// Select the `target` highest-scoring sentences and rejoin them in document order.
fn extract_summary(text: &str, target: usize) -> Result<String, ProviderError> {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() {
        return Err(ProviderError::Invalid(
            "no document text provided for summarization".into(),
        ));
    }

    let sentences = split_sentences(&normalized);
    if sentences.is_empty() {
        return Err(ProviderError::Invalid(
            "document contains no sentences".into(),
        ));
    }

    let frequencies = word_frequencies(&normalized);
    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| (index, score_sentence(sentence, &frequencies)))
        .collect();

    // Highest score first; earlier sentence wins ties so output is stable.
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let take = target.clamp(1, sentences.len());
    let mut selected: Vec<usize> = ranked.into_iter().take(take).map(|(index, _)| index).collect();
    selected.sort_unstable();

    let summary = selected
        .into_iter()
        .map(|index| sentences[index].as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(summary)
}

/// Collapse runs of whitespace so sentence boundaries are predictable.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split on sentence terminators, keeping the terminator with its sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trailing = current.trim();
    if !trailing.is_empty() {
        sentences.push(trailing.to_string());
    }

    sentences
}

/// Count occurrences of significant words across the whole document.
///
/// Words are lowercased and stripped of non-alphanumeric characters; anything
/// three characters or shorter is treated as connective tissue and skipped.
fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in text.split_whitespace() {
        let normalized = normalize_word(word);
        if normalized.len() > 3 {
            *frequencies.entry(normalized).or_insert(0) += 1;
        }
    }
    frequencies
}

/// Sum of document frequencies for a sentence's words, normalized by its length.
fn score_sentence(sentence: &str, frequencies: &HashMap<String, usize>) -> f64 {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let raw: usize = words
        .iter()
        .map(|word| frequencies.get(&normalize_word(word)).copied().unwrap_or(0))
        .sum();

    raw as f64 / words.len() as f64
}

fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|ch| ch.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}
