//! End-to-end checks of the batch analysis contract against a fake model.

use sentiment_common::dashboard::{Dashboard, DashboardPhase};
use sentiment_common::export::{export, to_csv, ExportFormat};
use sentiment_common::input::InputArea;
use sentiment_common::llm_client::FakeGenerator;
use sentiment_common::{AnalysisError, AnalysisResult, Keyword, Sentiment, SentimentAnalyzer};
use serde_json::json;
use std::sync::Arc;

fn item(text: &str, sentiment: &str, confidence: f64) -> serde_json::Value {
    json!({
        "originalText": text,
        "sentiment": sentiment,
        "confidence": confidence,
        "keywords": [{"word": text.split_whitespace().next().unwrap_or(text), "sentiment": sentiment}],
        "explanation": format!("{} tone", sentiment),
    })
}

fn analyzer_returning(raw: String) -> (Arc<FakeGenerator>, SentimentAnalyzer) {
    let fake = Arc::new(FakeGenerator::always(raw));
    let analyzer = SentimentAnalyzer::new(fake.clone());
    (fake, analyzer)
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_well_formed_response_preserves_length_and_text() {
    let inputs = texts(&["I love it", "It broke on day two", "Arrived on Tuesday"]);
    let body = json!([
        item(&inputs[0], "Positive", 0.97),
        item(&inputs[1], "Negative", 0.91),
        item(&inputs[2], "Neutral", 0.66),
    ]);
    let (_, analyzer) = analyzer_returning(body.to_string());

    let results = analyzer.analyze_batch(&inputs).await.unwrap();

    assert_eq!(results.len(), inputs.len());
    for (result, input) in results.iter().zip(&inputs) {
        assert_eq!(&result.original_text, input);
    }
}

#[tokio::test]
async fn test_fenced_and_plain_responses_parse_identically() {
    let inputs = texts(&["Great service!", "Terrible wait times."]);
    let body = serde_json::to_string_pretty(&json!([
        item(&inputs[0], "Positive", 0.95),
        item(&inputs[1], "Negative", 0.88),
    ]))
    .unwrap();

    let (_, plain) = analyzer_returning(body.clone());
    let (_, fenced) = analyzer_returning(format!("```json\n{}\n```", body));
    let (_, bare_fence) = analyzer_returning(format!("```\n{}\n```", body));

    let expected = plain.analyze_batch(&inputs).await.unwrap();
    assert_eq!(fenced.analyze_batch(&inputs).await.unwrap(), expected);
    assert_eq!(bare_fence.analyze_batch(&inputs).await.unwrap(), expected);
}

#[tokio::test]
async fn test_missing_explanation_drops_only_that_element() {
    let inputs = texts(&["one", "two", "three", "four"]);
    let mut broken = item("three", "Neutral", 0.5);
    broken.as_object_mut().unwrap().remove("explanation");
    let body = json!([
        item("one", "Positive", 0.9),
        item("two", "Negative", 0.8),
        broken,
        item("four", "Neutral", 0.7),
    ]);
    let (_, analyzer) = analyzer_returning(body.to_string());

    let results = analyzer.analyze_batch(&inputs).await.unwrap();

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.original_text != "three"));
}

#[tokio::test]
async fn test_object_response_is_malformed_and_dashboard_errors() {
    let (_, analyzer) = analyzer_returning(json!({"results": []}).to_string());
    let mut dashboard = Dashboard::new();
    let ticket = dashboard.begin().unwrap();

    let outcome = analyzer.analyze_batch(&texts(&["anything"])).await;
    assert!(matches!(outcome, Err(AnalysisError::MalformedResponse(_))));

    assert!(dashboard.resolve(ticket, outcome));
    match dashboard.phase() {
        DashboardPhase::Error(message) => assert!(!message.is_empty()),
        other => panic!("expected error phase, got {:?}", other),
    }
    assert!(dashboard.results().is_empty());
}

#[tokio::test]
async fn test_blank_input_never_calls_model() {
    let (fake, analyzer) = analyzer_returning("[]".to_string());
    let mut input = InputArea::new();
    input.set_text("   \n\t\n  ");
    let dashboard = Dashboard::new();

    if let Some(lines) = input.submission(dashboard.is_loading()) {
        analyzer.analyze_batch(&lines).await.unwrap();
    }
    assert_eq!(fake.call_count(), 0);

    analyzer.analyze_batch(&[]).await.unwrap();
    assert_eq!(fake.call_count(), 0);
    assert!(dashboard.results().is_empty());
}

#[tokio::test]
async fn test_two_review_scenario_summary_and_order() {
    let mut input = InputArea::new();
    input.set_text("Great service!\nTerrible wait times.");
    let body = json!([
        item("Great service!", "Positive", 0.95),
        item("Terrible wait times.", "Negative", 0.88),
    ]);
    let (fake, analyzer) = analyzer_returning(body.to_string());
    let mut dashboard = Dashboard::new();

    let lines = input.submission(dashboard.is_loading()).unwrap();
    let ticket = dashboard.begin().unwrap();
    let outcome = analyzer.analyze_batch(&lines).await;
    dashboard.resolve(ticket, outcome);

    let summary = dashboard.summary();
    assert_eq!(summary.count(Sentiment::Positive), 1);
    assert_eq!(summary.count(Sentiment::Negative), 1);
    assert_eq!(summary.count(Sentiment::Neutral), 0);

    let cards: Vec<&str> = dashboard
        .results()
        .iter()
        .map(|r| r.original_text.as_str())
        .collect();
    assert_eq!(cards, vec!["Great service!", "Terrible wait times."]);
    assert_eq!(fake.call_count(), 1);
    // The input survives for a retry
    assert_eq!(input.text(), "Great service!\nTerrible wait times.");
}

#[test]
fn test_csv_round_trip_through_reader() {
    let explanation = r#"Mixed: "fast", but pricey"#;
    let result = AnalysisResult {
        original_text: "Quick, \"cheap\" delivery".to_string(),
        sentiment: Sentiment::Neutral,
        confidence: 0.61,
        keywords: vec![
            Keyword { word: "Quick".into(), sentiment: Sentiment::Positive },
            Keyword { word: "cheap".into(), sentiment: Sentiment::Neutral },
        ],
        explanation: explanation.to_string(),
    };

    let text = to_csv(std::slice::from_ref(&result)).unwrap();
    assert!(text.contains(r#""Mixed: ""fast"", but pricey""#));

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[4], "Explanation");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], result.original_text);
    assert_eq!(&records[0][3], "Quick, cheap");
    assert_eq!(&records[0][4], explanation);
}

#[test]
fn test_every_format_exports_current_list() {
    let results = vec![AnalysisResult {
        original_text: "Fine".into(),
        sentiment: Sentiment::Neutral,
        confidence: 0.5,
        keywords: vec![],
        explanation: "Flat".into(),
    }];
    let json = export(ExportFormat::Json, &results).unwrap();
    let back: Vec<AnalysisResult> = serde_json::from_slice(&json).unwrap();
    assert_eq!(back, results);

    let pdf = export(ExportFormat::Pdf, &results).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}
