//! Result records returned by the analysis client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment label assigned by the model. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels in display order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Chart and badge colour (hex)
    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#22c55e",
            Sentiment::Negative => "#ef4444",
            Sentiment::Neutral => "#eab308",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment label: {}", other)),
        }
    }
}

/// A word flagged by the model as driving the classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub sentiment: Sentiment,
}

/// One analysed input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The input exactly as the model echoed it back
    pub original_text: String,
    pub sentiment: Sentiment,
    /// Intended to lie in [0, 1]; not validated
    pub confidence: f64,
    pub keywords: Vec<Keyword>,
    pub explanation: String,
}

impl AnalysisResult {
    /// Keyword words joined for flat display
    pub fn keyword_list(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.word.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Confidence as a percentage with one decimal, e.g. "95.0"
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}", self.confidence * 100.0)
    }
}

/// Per-sentiment counts over a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

impl SentimentSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.sentiment {
                Sentiment::Positive => summary.positive += 1,
                Sentiment::Negative => summary.negative += 1,
                Sentiment::Neutral => summary.neutral += 1,
            }
        }
        summary.total = results.len();
        summary
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// Share of the total, 0.0 for an empty list
    pub fn proportion(&self, sentiment: Sentiment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(sentiment) as f64 / self.total as f64
    }

    /// Whole-percent label used on chart slices
    pub fn percent_label(&self, sentiment: Sentiment) -> String {
        format!("{:.0}%", self.proportion(sentiment) * 100.0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
