use std::fmt::Write;

use super::Assessment;

const NEUTRAL_METER_CLASS: &str = "neutral";

/// Escapes text for insertion into element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn progress_markup() -> String {
    "<p>Checking…</p>".to_string()
}

pub fn error_markup(message: &str) -> String {
    format!(
        "<div class=\"result-card\"><p class=\"error-message\">{}</p></div>",
        escape_html(message)
    )
}

pub fn assessment_markup(assessment: &Assessment) -> String {
    let classification = assessment.classification();
    let score = assessment.safety_score;
    let card_class = if classification.css_class.is_empty() {
        "result-card".to_string()
    } else {
        format!("result-card {}", classification.css_class)
    };
    let meter_class = if classification.css_class.is_empty() {
        NEUTRAL_METER_CLASS
    } else {
        classification.css_class
    };

    let mut html = String::new();
    let _ = write!(html, "<div class=\"{card_class}\">");
    html.push_str("<h3>Predicted Risk Level</h3>");
    let _ = write!(
        html,
        "<div class=\"risk-level\">{}</div>",
        escape_html(assessment.risk_level.label())
    );
    let _ = write!(
        html,
        "<div class=\"safety-score\">Safety Score: {score} / 100</div>"
    );
    html.push_str("<div class=\"safety-meter-wrap\">");
    html.push_str("<div class=\"safety-meter-label\">Safety meter</div>");
    let _ = write!(
        html,
        "<div class=\"safety-meter-track\"><div class=\"safety-meter-fill {meter_class}\" style=\"width:{score}%\"></div></div>"
    );
    html.push_str("</div>");
    let _ = write!(
        html,
        "<p class=\"recommendation\">{}</p>",
        escape_html(&assessment.recommendation)
    );

    if !assessment.confidence_breakdown.is_empty() {
        html.push_str("<ul class=\"confidence-list\">");
        for entry in &assessment.confidence_breakdown {
            let _ = write!(
                html,
                "<li>{}: {}%</li>",
                escape_html(&entry.label),
                entry.percent
            );
        }
        html.push_str("</ul>");
    }

    if !assessment.reasons.is_empty() {
        html.push_str("<strong>Reasoning</strong><ul class=\"reasons-list\">");
        for reason in &assessment.reasons {
            let _ = write!(html, "<li>{}</li>", escape_html(reason));
        }
        html.push_str("</ul>");
    }

    html.push_str("</div>");
    html
}
