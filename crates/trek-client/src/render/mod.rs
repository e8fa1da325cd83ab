//! Pure mapping from a prediction payload to the displayed assessment.

mod markup;
mod text;

pub use markup::{assessment_markup, error_markup, escape_html, progress_markup};
pub use text::{assessment_text, error_text, sanitize_terminal_text, TextStyle};

use protocol::RiskLevel;
use serde::Serialize;
use serde_json::{Map, Value};

pub const NEUTRAL_SCORE: u8 = 50;
pub const SAFE_RECOMMENDATION: &str =
    "Route conditions look safe. Proceed with normal precautions.";
pub const MODERATE_RECOMMENDATION: &str =
    "Some risks detected. Trek carefully and monitor weather.";
pub const HIGH_RECOMMENDATION: &str = "High risk detected. Avoid trekking in current conditions.";
pub const UNKNOWN_RECOMMENDATION: &str = "Review the factors below before deciding.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub css_class: &'static str,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfidenceEntry {
    pub label: String,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub risk_level: RiskLevel,
    pub safety_score: u8,
    pub recommendation: String,
    pub confidence_breakdown: Vec<ConfidenceEntry>,
    pub reasons: Vec<String>,
}

impl Assessment {
    pub fn classification(&self) -> Classification {
        classify(&self.risk_level)
    }
}

pub fn classify(level: &RiskLevel) -> Classification {
    match level {
        RiskLevel::Safe => Classification {
            css_class: "safe",
            recommendation: SAFE_RECOMMENDATION,
        },
        RiskLevel::ModerateRisk => Classification {
            css_class: "moderate",
            recommendation: MODERATE_RECOMMENDATION,
        },
        RiskLevel::HighRisk => Classification {
            css_class: "high",
            recommendation: HIGH_RECOMMENDATION,
        },
        RiskLevel::Unknown(_) => Classification {
            css_class: "",
            recommendation: UNKNOWN_RECOMMENDATION,
        },
    }
}

/// Safety score in `[0, 100]` from the `Safe` probability, or the neutral
/// score when it is missing or not a number.
pub fn score(confidence: Option<&Map<String, Value>>) -> u8 {
    confidence
        .and_then(|map| map.get(RiskLevel::SAFE_LABEL))
        .and_then(Value::as_f64)
        .map_or(NEUTRAL_SCORE, percent)
}

/// One entry per numeric label, in the order the service listed them.
pub fn confidence_breakdown(confidence: Option<&Map<String, Value>>) -> Vec<ConfidenceEntry> {
    let Some(map) = confidence else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(label, value)| {
            value.as_f64().map(|probability| ConfidenceEntry {
                label: label.clone(),
                percent: percent(probability),
            })
        })
        .collect()
}

pub fn render(response: &Value) -> Assessment {
    let risk_level = response
        .get("risk_level")
        .and_then(Value::as_str)
        .map_or_else(|| RiskLevel::Unknown(String::new()), RiskLevel::from_label);
    let confidence = response.get("confidence").and_then(Value::as_object);
    let reasons = response
        .get("reasons")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(reason_text).collect())
        .unwrap_or_default();
    let recommendation = classify(&risk_level).recommendation.to_string();

    Assessment {
        safety_score: score(confidence),
        confidence_breakdown: confidence_breakdown(confidence),
        risk_level,
        recommendation,
        reasons,
    }
}

// Probabilities come from across a trust boundary; clamp before narrowing.
fn percent(probability: f64) -> u8 {
    let scaled = (probability * 100.0).round();
    if scaled.is_nan() {
        return NEUTRAL_SCORE;
    }
    scaled.clamp(0.0, 100.0) as u8
}

fn reason_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
