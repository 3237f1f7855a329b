//! Server-rendered dashboard page.
//!
//! Self-contained HTML with inline CSS. While an analysis is in flight the
//! page refreshes itself until the call resolves.

use crate::chart::{legend_html, pie_svg};
use sentiment_common::{
    AnalysisResult, Dashboard, DashboardPhase, ExportFormat, InputArea, Sentiment,
};
use std::fmt::Write;

const STYLE: &str = r#"
body { margin: 0; background: #0f172a; color: #e2e8f0; font-family: system-ui, sans-serif; }
header { padding: 1rem 2rem; border-bottom: 1px solid #334155; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
section, .panel { background: #1e293b; border: 1px solid #334155; border-radius: .5rem; padding: 1.5rem; margin-bottom: 2rem; }
textarea { width: 100%; height: 12rem; background: #0f172a; color: #e2e8f0; border: 1px solid #475569; border-radius: .375rem; padding: .75rem; box-sizing: border-box; }
.actions { display: flex; gap: .75rem; justify-content: flex-end; flex-wrap: wrap; margin-top: 1rem; }
button, .button { padding: .5rem 1rem; border: 0; border-radius: .375rem; color: white; font-weight: 600; cursor: pointer; text-decoration: none; }
button:disabled { opacity: .5; cursor: not-allowed; }
.analyze { background: #0284c7; } .clear { background: #dc2626; } .upload { background: #475569; } .export { background: #334155; }
.alert { background: rgba(127, 29, 29, .5); border: 1px solid #b91c1c; color: #fca5a5; padding: .75rem 1rem; border-radius: .5rem; }
.counts { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; text-align: center; }
.count { padding: 1rem; border-radius: .5rem; background: #0f172a; }
.count strong { display: block; font-size: 2rem; }
.summary { display: grid; grid-template-columns: 2fr 1fr; gap: 1.5rem; }
.card { background: #1e293b; border: 1px solid #334155; border-radius: .5rem; padding: 1rem 1.5rem; margin-bottom: 1rem; }
.badge { padding: .125rem .625rem; border-radius: 9999px; font-size: .875rem; font-weight: 600; color: #0f172a; }
.keyword { display: inline-block; padding: .125rem .5rem; margin: .125rem; border-radius: .375rem; background: #0f172a; }
.bar { height: .5rem; background: #334155; border-radius: 9999px; overflow: hidden; }
.bar span { display: block; height: 100%; }
.legend { list-style: none; padding: 0; display: flex; gap: 1rem; justify-content: center; }
.swatch { display: inline-block; width: .75rem; height: .75rem; margin-right: .375rem; border-radius: 2px; }
.muted { color: #94a3b8; font-size: .875rem; }
.placeholder { text-align: center; padding: 4rem 1.5rem; color: #94a3b8; }
footer { text-align: center; padding: 1rem; color: #64748b; font-size: .875rem; }
"#;

/// Escape text for HTML element and attribute content
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full dashboard page
pub fn page(dashboard: &Dashboard, input: &InputArea) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Sentiment Analysis Dashboard</title>\n");
    if dashboard.is_loading() {
        html.push_str("<meta http-equiv=\"refresh\" content=\"2\">\n");
    }
    let _ = write!(html, "<style>{}</style>\n</head>\n<body>\n", STYLE);
    html.push_str("<header><h1>Sentiment Analysis Dashboard</h1></header>\n<main>\n");
    html.push_str(&input_section(input, dashboard.is_loading()));
    html.push_str(&results_section(dashboard));
    html.push_str("</main>\n<footer>Powered by Google Gemini.</footer>\n</body>\n</html>\n");
    html
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

/// Text field, upload and clear controls
pub fn input_section(input: &InputArea, is_loading: bool) -> String {
    let mut html = String::from("<section>\n<h2>Enter Text for Analysis</h2>\n");
    html.push_str(
        "<p>Enter one or more pieces of text below, with each entry on a new line. \
         You can also upload a .txt or .csv file.</p>\n",
    );

    let _ = write!(
        html,
        r#"<form method="post" action="/analyze">
<textarea name="text" placeholder="e.g., The customer service was excellent!..."{disabled}>{text}</textarea>
<div class="actions"><button class="analyze" type="submit"{disabled}>{label}</button></div>
</form>
"#,
        disabled = disabled(is_loading),
        text = html_escape(input.text()),
        label = if is_loading { "Analyzing..." } else { "Analyze Text" }
    );

    let _ = write!(
        html,
        r#"<div class="actions">
<form method="post" action="/upload" enctype="multipart/form-data">
<input type="file" name="file" accept=".txt,.csv"{disabled}>
<button class="upload" type="submit"{disabled}>Upload File</button>
</form>
<form method="post" action="/clear"><button class="clear" type="submit"{clear_disabled}>Clear</button></form>
</div>
"#,
        disabled = disabled(is_loading),
        clear_disabled = disabled(is_loading || input.text().is_empty())
    );

    if let Some(file) = input.selected_file() {
        let _ = writeln!(html, "<p>Loaded file: {}</p>", html_escape(file));
    }
    html.push_str("</section>\n");
    html
}

/// Loading, error, placeholder or populated results
pub fn results_section(dashboard: &Dashboard) -> String {
    match dashboard.phase() {
        DashboardPhase::Loading => {
            "<section class=\"placeholder\">Loading results...</section>\n".to_string()
        }
        DashboardPhase::Error(message) => format!(
            "<div class=\"alert\" role=\"alert\"><strong>Error: </strong><span>{}</span></div>\n",
            html_escape(message)
        ),
        DashboardPhase::Idle if dashboard.results().is_empty() => placeholder(),
        DashboardPhase::Idle => populated(dashboard),
    }
}

fn placeholder() -> String {
    "<section class=\"placeholder\"><h3>Ready for Analysis</h3>\
     <p>Enter some text or upload a file above to see the sentiment analysis.</p></section>\n"
        .to_string()
}

fn populated(dashboard: &Dashboard) -> String {
    let summary = dashboard.summary();
    let mut html = String::from("<div class=\"summary\">\n<div class=\"panel\">\n");
    let _ = write!(
        html,
        "<h2>Analysis Summary</h2>\n<p>Overall sentiment distribution for {} texts.</p>\n",
        summary.total
    );
    if let Some(at) = dashboard.completed_at() {
        let _ = writeln!(
            html,
            "<p class=\"muted\">Last analyzed {}</p>",
            at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    html.push_str("<div class=\"actions\">");
    for format in ExportFormat::ALL {
        let _ = write!(
            html,
            r#"<a class="button export" href="/export/{}" download="{}">Export {}</a>"#,
            format.extension(),
            format.file_name(),
            format.label()
        );
    }
    html.push_str("</div>\n<div class=\"counts\">");
    for sentiment in Sentiment::ALL {
        let _ = write!(
            html,
            r#"<div class="count"><strong style="color:{}">{}</strong>{}</div>"#,
            sentiment.color(),
            summary.count(sentiment),
            sentiment
        );
    }
    html.push_str("</div>\n</div>\n<div class=\"panel\">");
    html.push_str(&pie_svg(&summary));
    html.push_str(&legend_html(&summary));
    html.push_str("</div>\n</div>\n<h2>Detailed Results</h2>\n");

    for result in dashboard.results() {
        html.push_str(&card(result));
    }
    html
}

/// One detail card
pub fn card(result: &AnalysisResult) -> String {
    let color = result.sentiment.color();
    let mut html = String::from("<article class=\"card\">\n");
    let _ = write!(
        html,
        "<blockquote>\"{}\"</blockquote>\n<span class=\"badge\" style=\"background:{}\">{}</span>\n",
        html_escape(&result.original_text),
        color,
        result.sentiment
    );
    let _ = write!(
        html,
        "<p>Confidence: {}%</p>\n<div class=\"bar\"><span style=\"width:{:.1}%;background:{}\"></span></div>\n",
        result.confidence_percent(),
        (result.confidence * 100.0).clamp(0.0, 100.0),
        color
    );

    html.push_str("<p>Keywords: ");
    if result.keywords.is_empty() {
        html.push_str("<em>No specific keywords identified.</em>");
    }
    for keyword in &result.keywords {
        let _ = write!(
            html,
            r#"<span class="keyword" style="color:{}">{}</span>"#,
            keyword.sentiment.color(),
            html_escape(&keyword.word)
        );
    }
    html.push_str("</p>\n");
    let _ = write!(
        html,
        "<p>Explanation: {}</p>\n</article>\n",
        html_escape(&result.explanation)
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_common::{AnalysisError, Keyword};

    fn result(text: &str, sentiment: Sentiment) -> AnalysisResult {
        AnalysisResult {
            original_text: text.to_string(),
            sentiment,
            confidence: 0.95,
            keywords: vec![Keyword {
                word: "great".to_string(),
                sentiment,
            }],
            explanation: "Because <reasons>".to_string(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(html_escape(r#"<b>"x" & 'y'</b>"#), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_placeholder_when_empty() {
        let html = page(&Dashboard::new(), &InputArea::new());
        assert!(html.contains("Ready for Analysis"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_loading_disables_controls_and_refreshes() {
        let mut dashboard = Dashboard::new();
        dashboard.begin().unwrap();
        let html = page(&dashboard, &InputArea::new());
        assert!(html.contains("Loading results..."));
        assert!(html.contains("Analyzing..."));
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_error_banner_without_results() {
        let mut dashboard = Dashboard::new();
        let ticket = dashboard.begin().unwrap();
        dashboard.resolve(ticket, Err(AnalysisError::MalformedResponse("bad".into())));
        let html = results_section(&dashboard);
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Failed to analyze sentiment. Details: bad"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_populated_cards_in_order_with_counts() {
        let mut dashboard = Dashboard::new();
        let ticket = dashboard.begin().unwrap();
        dashboard.resolve(
            ticket,
            Ok(vec![
                result("Great service!", Sentiment::Positive),
                result("Terrible wait times.", Sentiment::Negative),
            ]),
        );
        let html = results_section(&dashboard);

        assert_eq!(html.matches("<article").count(), 2);
        let first = html.find("Great service!").unwrap();
        let second = html.find("Terrible wait times.").unwrap();
        assert!(first < second);
        assert!(html.contains("Overall sentiment distribution for 2 texts."));
        assert!(html.contains("/export/pdf"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Last analyzed "));
    }

    #[test]
    fn test_card_escapes_model_text() {
        let html = card(&result("<script>", Sentiment::Neutral));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Because &lt;reasons&gt;"));
        assert!(html.contains("Confidence: 95.0%"));
    }

    #[test]
    fn test_input_text_round_trips_into_textarea() {
        let mut input = InputArea::new();
        input.set_text("a & b");
        let html = input_section(&input, false);
        assert!(html.contains(">a &amp; b</textarea>"));
    }
}
