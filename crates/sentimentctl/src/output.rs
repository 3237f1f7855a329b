//! Terminal rendering of summaries and result cards

use owo_colors::OwoColorize;
use sentiment_common::{AnalysisResult, Sentiment, SentimentSummary};
use std::fmt::Write;

/// Width used to wrap quoted texts and explanations
pub const WRAP_WIDTH: usize = 78;

/// Sentiment label, colored when `color` is set
pub fn paint(text: &str, sentiment: Sentiment, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match sentiment {
        Sentiment::Positive => text.green().bold().to_string(),
        Sentiment::Negative => text.red().bold().to_string(),
        Sentiment::Neutral => text.yellow().bold().to_string(),
    }
}

/// Per-label counts and percentages
pub fn summary_block(summary: &SentimentSummary, color: bool) -> String {
    let mut out = String::new();
    let title = format!("Analysis Summary ({} texts)", summary.total);
    if color {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{}", title);
    }

    for sentiment in Sentiment::ALL {
        let _ = writeln!(
            out,
            "  {:<9} {:>4}  {}",
            paint(sentiment.as_str(), sentiment, color),
            summary.count(sentiment),
            summary.percent_label(sentiment)
        );
    }
    out
}

/// One result card
pub fn card_block(index: usize, result: &AnalysisResult, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}. {} ({}% confidence)",
        index,
        paint(result.sentiment.as_str(), result.sentiment, color),
        result.confidence_percent()
    );

    for line in textwrap::wrap(&format!("\"{}\"", result.original_text), WRAP_WIDTH - 3) {
        let _ = writeln!(out, "   {}", line);
    }

    let keywords = if result.keywords.is_empty() {
        "No specific keywords identified.".to_string()
    } else {
        result
            .keywords
            .iter()
            .map(|k| paint(&k.word, k.sentiment, color))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(out, "   Keywords: {}", keywords);

    let explanation = format!("Explanation: {}", result.explanation);
    for line in textwrap::wrap(&explanation, WRAP_WIDTH - 3) {
        let _ = writeln!(out, "   {}", line);
    }
    out
}

/// Summary followed by every card, in result order
pub fn report(results: &[AnalysisResult], color: bool) -> String {
    let summary = SentimentSummary::from_results(results);
    let mut out = summary_block(&summary, color);
    for (i, result) in results.iter().enumerate() {
        out.push('\n');
        out.push_str(&card_block(i + 1, result, color));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_common::Keyword;

    fn result(text: &str, sentiment: Sentiment, keywords: Vec<Keyword>) -> AnalysisResult {
        AnalysisResult {
            original_text: text.to_string(),
            sentiment,
            confidence: 0.95,
            keywords,
            explanation: "Short reason.".to_string(),
        }
    }

    #[test]
    fn test_plain_paint_has_no_escapes() {
        assert_eq!(paint("Positive", Sentiment::Positive, false), "Positive");
        assert!(paint("Positive", Sentiment::Positive, true).contains('\u{1b}'));
    }

    #[test]
    fn test_card_block() {
        let card = card_block(
            1,
            &result(
                "Great service!",
                Sentiment::Positive,
                vec![Keyword {
                    word: "Great".to_string(),
                    sentiment: Sentiment::Positive,
                }],
            ),
            false,
        );
        assert!(card.starts_with("1. Positive (95.0% confidence)\n"));
        assert!(card.contains("   \"Great service!\"\n"));
        assert!(card.contains("   Keywords: Great\n"));
        assert!(card.contains("   Explanation: Short reason.\n"));
    }

    #[test]
    fn test_card_without_keywords() {
        let card = card_block(3, &result("Meh.", Sentiment::Neutral, vec![]), false);
        assert!(card.contains("Keywords: No specific keywords identified."));
    }

    #[test]
    fn test_report_counts_and_order() {
        let results = vec![
            result("Great service!", Sentiment::Positive, vec![]),
            result("Terrible wait times.", Sentiment::Negative, vec![]),
        ];
        let text = report(&results, false);

        assert!(text.starts_with("Analysis Summary (2 texts)\n"));
        assert!(text.contains("Positive     1  50%"));
        assert!(text.contains("Negative     1  50%"));
        assert!(text.contains("Neutral      0  0%"));
        let first = text.find("1. Positive").unwrap();
        let second = text.find("2. Negative").unwrap();
        assert!(first < second);
    }
}
