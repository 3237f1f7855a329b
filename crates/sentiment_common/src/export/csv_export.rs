use crate::error::ExportError;
use crate::types::AnalysisResult;
use csv::{Terminator, WriterBuilder};

pub const CSV_HEADERS: [&str; 5] = [
    "Original Text",
    "Sentiment",
    "Confidence",
    "Keywords",
    "Explanation",
];

/// One header row plus one row per result. Fields with a comma, quote or
/// newline are quoted with inner quotes doubled.
pub fn to_csv(results: &[AnalysisResult]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for result in results {
        let confidence = result.confidence.to_string();
        let keywords = result.keyword_list();
        writer.write_record([
            result.original_text.as_str(),
            result.sentiment.as_str(),
            confidence.as_str(),
            keywords.as_str(),
            result.explanation.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    // No trailing newline after the last row
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Keyword, Sentiment};

    fn result(text: &str, explanation: &str) -> AnalysisResult {
        AnalysisResult {
            original_text: text.to_string(),
            sentiment: Sentiment::Positive,
            confidence: 0.95,
            keywords: vec![
                Keyword { word: "great".into(), sentiment: Sentiment::Positive },
                Keyword { word: "fast".into(), sentiment: Sentiment::Positive },
            ],
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn test_header_and_plain_row() {
        let csv = to_csv(&[result("Nice", "Upbeat tone")]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Original Text,Sentiment,Confidence,Keywords,Explanation"
        );
        assert_eq!(lines.next().unwrap(), "Nice,Positive,0.95,\"great, fast\",Upbeat tone");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = to_csv(&[result("Nice", r#"Said "wow", loudly"#)]).unwrap();
        assert!(csv.ends_with(r#""Said ""wow"", loudly""#));
    }

    #[test]
    fn test_newline_field_is_quoted() {
        let csv = to_csv(&[result("line one\nline two", "x")]).unwrap();
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_empty_list_is_header_only() {
        assert_eq!(
            to_csv(&[]).unwrap(),
            "Original Text,Sentiment,Confidence,Keywords,Explanation"
        );
    }
}
