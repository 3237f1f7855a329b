//! Batch analysis client.
//!
//! One call per batch: build the prompt, ask the generator for JSON, strip an
//! optional code fence, then keep only the array elements that carry every
//! required field. Elements failing validation are dropped without error, so
//! the output may be shorter than the input and is never re-aligned to it.

use crate::error::AnalysisError;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::prompts::build_prompt;
use crate::types::{AnalysisResult, Keyword, Sentiment};
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use std::time::Instant;
use tracing::{debug, error, info};

/// Sampling temperature for every analysis call
pub const ANALYSIS_TEMPERATURE: f64 = 0.2;

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("fence pattern is valid")
});

/// Remove an optional ```lang ... ``` wrapper. Unwrapped text is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCE.captures(trimmed).and_then(|c| c.get(2)) {
        Some(body) if !body.as_str().is_empty() => body.as_str().trim(),
        _ => trimmed,
    }
}

/// Parse fence-stripped model output into validated records
pub fn parse_results(text: &str) -> Result<Vec<AnalysisResult>, AnalysisError> {
    let parsed: Value = serde_json::from_str(text)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    let items = match parsed {
        Value::Array(items) => items,
        _ => {
            return Err(AnalysisError::MalformedResponse(
                "API response is not a JSON array as expected.".to_string(),
            ))
        }
    };

    let total = items.len();
    let results: Vec<AnalysisResult> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let result = validate_item(item);
            if result.is_none() {
                debug!("Dropping malformed element {} of {}", index, total);
            }
            result
        })
        .collect();

    Ok(results)
}

/// Per-field check of one array element
fn validate_item(item: &Value) -> Option<AnalysisResult> {
    let original_text = non_empty_str(item.get("originalText"))?;
    let sentiment = sentiment_of(item.get("sentiment"))?;
    // Zero is a valid confidence, only presence as a number matters
    let confidence = item.get("confidence")?.as_f64()?;
    let keywords = item.get("keywords")?.as_array()?;
    let explanation = non_empty_str(item.get("explanation"))?;

    let keywords = keywords
        .iter()
        .filter_map(|k| {
            Some(Keyword {
                word: non_empty_str(k.get("word"))?,
                sentiment: sentiment_of(k.get("sentiment"))?,
            })
        })
        .collect();

    Some(AnalysisResult {
        original_text,
        sentiment,
        confidence,
        keywords,
        explanation,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn sentiment_of(value: Option<&Value>) -> Option<Sentiment> {
    value.and_then(Value::as_str)?.parse().ok()
}

/// Analysis client over any [`TextGenerator`]
#[derive(Clone)]
pub struct SentimentAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl SentimentAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Analyse a batch with exactly one generator call. Empty input returns
    /// an empty list without calling out.
    pub async fn analyze_batch(
        &self,
        texts: &[String],
    ) -> Result<Vec<AnalysisResult>, AnalysisError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let request = GenerationRequest::json(build_prompt(texts), ANALYSIS_TEMPERATURE);

        let outcome = match self.generator.generate(&request).await {
            Ok(raw) => parse_results(strip_code_fence(&raw)),
            Err(e) => Err(AnalysisError::from(e)),
        };

        match &outcome {
            Ok(results) => info!(
                "Analyzed {} texts: kept {}, dropped {} ({} ms)",
                texts.len(),
                results.len(),
                texts.len().saturating_sub(results.len()),
                started.elapsed().as_millis()
            ),
            Err(e) => error!("Error analyzing sentiment: {}", e),
        }
        outcome
    }
}
