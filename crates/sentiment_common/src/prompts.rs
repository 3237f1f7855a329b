//! Prompt text for the batch sentiment call.

/// Shape every element of the returned array must follow
pub const RESULT_SCHEMA: &str = r#"{
    "originalText": "The original text being analyzed",
    "sentiment": "Positive" | "Negative" | "Neutral",
    "confidence": 0.95,
    "keywords": [
      {"word": "amazing", "sentiment": "Positive"}
    ],
    "explanation": "A brief explanation of why this sentiment was assigned."
  }"#;

/// Build the single prompt for a batch. The texts are embedded verbatim as
/// a JSON array.
pub fn build_prompt(texts: &[String]) -> String {
    // Serializing a slice of strings cannot fail
    let texts_json = serde_json::to_string(texts).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are an expert sentiment analysis AI. Analyze the following array of texts:\n\
         {texts_json}\n\n\
         Return the analysis as a single JSON array, where each object corresponds to a text in the input array.\n\
         Each object in the array MUST strictly follow this structure:\n\
         {RESULT_SCHEMA}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_texts_as_json_array() {
        let texts = vec!["Great service!".to_string(), "He said \"no\"".to_string()];
        let prompt = build_prompt(&texts);
        assert!(prompt.contains(r#"["Great service!","He said \"no\""]"#));
    }

    #[test]
    fn test_prompt_carries_schema_fields() {
        let prompt = build_prompt(&["x".to_string()]);
        for field in ["originalText", "sentiment", "confidence", "keywords", "explanation"] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains(r#""Positive" | "Negative" | "Neutral""#));
    }
}
