//! Inline SVG pie chart of the sentiment distribution.

use sentiment_common::{Sentiment, SentimentSummary};
use std::f64::consts::PI;
use std::fmt::Write;

const SIZE: f64 = 220.0;
const RADIUS: f64 = 80.0;

fn point(angle: f64, radius: f64) -> (f64, f64) {
    let c = SIZE / 2.0;
    (c + radius * angle.cos(), c + radius * angle.sin())
}

/// One slice per non-zero label, clockwise from twelve o'clock, each with a
/// whole-percent label. Empty summaries render nothing.
pub fn pie_svg(summary: &SentimentSummary) -> String {
    if summary.is_empty() {
        return String::new();
    }

    let c = SIZE / 2.0;
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" viewBox="0 0 {s} {s}" width="{s}" height="{s}" role="img" aria-label="Sentiment distribution">"#,
        s = SIZE
    );

    let mut start = -PI / 2.0;
    for sentiment in Sentiment::ALL {
        let share = summary.proportion(sentiment);
        if share <= 0.0 {
            continue;
        }

        if share >= 1.0 {
            let _ = write!(
                svg,
                r#"<circle cx="{c}" cy="{c}" r="{r}" fill="{fill}"><title>{name}</title></circle>"#,
                r = RADIUS,
                fill = sentiment.color(),
                name = sentiment
            );
        } else {
            let end = start + share * 2.0 * PI;
            let (x1, y1) = point(start, RADIUS);
            let (x2, y2) = point(end, RADIUS);
            let large_arc = if share > 0.5 { 1 } else { 0 };
            let _ = write!(
                svg,
                r#"<path d="M{c:.2},{c:.2} L{x1:.2},{y1:.2} A{r},{r} 0 {large_arc} 1 {x2:.2},{y2:.2} Z" fill="{fill}"><title>{name}: {count}</title></path>"#,
                r = RADIUS,
                fill = sentiment.color(),
                name = sentiment,
                count = summary.count(sentiment)
            );
        }

        let mid = start + share * PI;
        let (lx, ly) = if share >= 1.0 { (c, c) } else { point(mid, RADIUS * 0.5) };
        let _ = write!(
            svg,
            r#"<text x="{lx:.2}" y="{ly:.2}" fill="white" text-anchor="middle" dominant-baseline="central">{label}</text>"#,
            label = summary.percent_label(sentiment)
        );
        start += share * 2.0 * PI;
    }

    svg.push_str("</svg>");
    svg
}

/// Colour legend matching the chart
pub fn legend_html(summary: &SentimentSummary) -> String {
    let mut html = String::from(r#"<ul class="legend">"#);
    for sentiment in Sentiment::ALL {
        if summary.count(sentiment) == 0 {
            continue;
        }
        let _ = write!(
            html,
            r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
            sentiment.color(),
            sentiment
        );
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(positive: usize, negative: usize, neutral: usize) -> SentimentSummary {
        SentimentSummary {
            positive,
            negative,
            neutral,
            total: positive + negative + neutral,
        }
    }

    #[test]
    fn test_empty_summary_has_no_chart() {
        assert!(pie_svg(&SentimentSummary::default()).is_empty());
    }

    #[test]
    fn test_one_path_per_present_label() {
        let svg = pie_svg(&summary(1, 1, 0));
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("#22c55e"));
        assert!(svg.contains("#ef4444"));
        assert!(!svg.contains("#eab308"));
        assert_eq!(svg.matches(">50%<").count(), 2);
    }

    #[test]
    fn test_single_label_is_full_circle() {
        let svg = pie_svg(&summary(0, 0, 3));
        assert!(svg.contains("<circle"));
        assert!(svg.contains(">100%<"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_large_arc_flag_for_majority() {
        let svg = pie_svg(&summary(3, 1, 0));
        assert!(svg.contains(" 0 1 1 "));
    }

    #[test]
    fn test_legend_lists_present_labels() {
        let html = legend_html(&summary(2, 0, 1));
        assert!(html.contains("Positive"));
        assert!(html.contains("Neutral"));
        assert!(!html.contains("Negative"));
    }
}
