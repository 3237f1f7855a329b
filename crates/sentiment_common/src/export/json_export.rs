use crate::error::ExportError;
use crate::types::AnalysisResult;

/// Pretty-printed array, two-space indent, fields in model order
pub fn to_json(results: &[AnalysisResult]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    #[test]
    fn test_pretty_output_and_field_order() {
        let results = vec![AnalysisResult {
            original_text: "Fine".to_string(),
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
            keywords: vec![],
            explanation: "Flat".to_string(),
        }];
        let json = to_json(&results).unwrap();
        let expected = "[\n  {\n    \"originalText\": \"Fine\",\n    \"sentiment\": \"Neutral\",\n    \"confidence\": 0.5,\n    \"keywords\": [],\n    \"explanation\": \"Flat\"\n  }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_parses_back() {
        let json = to_json(&[]).unwrap();
        assert_eq!(json, "[]");
        let back: Vec<AnalysisResult> = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }
}
