use crossterm::style::{StyledContent, Stylize};
use protocol::RiskLevel;
use std::fmt::Write;

use super::Assessment;

const RULE: &str = "-----------------------------------";
const METER_CELLS: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub color: bool,
}

pub fn assessment_text(assessment: &Assessment, style: TextStyle) -> String {
    let label = sanitize_terminal_text(assessment.risk_level.label());
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Predicted Risk Level: {}",
        paint(&assessment.risk_level, &label, style)
    );
    let _ = writeln!(out, "Safety Score: {} / 100", assessment.safety_score);
    let _ = writeln!(out, "Safety meter: {}", meter(assessment.safety_score));
    let _ = writeln!(out, "{}", assessment.recommendation);

    if !assessment.confidence_breakdown.is_empty() {
        let _ = writeln!(out, "Confidence:");
        for entry in &assessment.confidence_breakdown {
            let _ = writeln!(
                out,
                "  {}: {}%",
                sanitize_terminal_text(&entry.label),
                entry.percent
            );
        }
    }

    if !assessment.reasons.is_empty() {
        let _ = writeln!(out, "\nReasoning:");
        for reason in &assessment.reasons {
            let _ = writeln!(out, "- {}", sanitize_terminal_text(reason));
        }
    }
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn error_text(message: &str, style: TextStyle) -> String {
    let message = sanitize_terminal_text(message);
    if style.color {
        format!("Error: {}\n", message.red())
    } else {
        format!("Error: {message}\n")
    }
}

/// Flattens service text to one printable line: ANSI sequences are removed and
/// other control characters become spaces.
pub fn sanitize_terminal_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            match chars.peek().copied() {
                Some('[') => {
                    chars.next();
                    for seq_ch in chars.by_ref() {
                        if ('@'..='~').contains(&seq_ch) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(seq_ch) = chars.next() {
                        if seq_ch == '\u{7}' {
                            break;
                        }
                        if seq_ch == '\u{1b}' {
                            if chars.peek() == Some(&'\\') {
                                chars.next();
                            }
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }
        if ch.is_control() {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

fn meter(score: u8) -> String {
    let filled = (usize::from(score) * METER_CELLS + 50) / 100;
    let filled = filled.min(METER_CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(METER_CELLS - filled))
}

fn paint(level: &RiskLevel, label: &str, style: TextStyle) -> String {
    if !style.color {
        return label.to_string();
    }
    let styled: StyledContent<&str> = match level {
        RiskLevel::Safe => label.green(),
        RiskLevel::ModerateRisk => label.yellow(),
        RiskLevel::HighRisk => label.red(),
        RiskLevel::Unknown(_) => return label.to_string(),
    };
    styled.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use serde_json::json;

    const PLAIN: TextStyle = TextStyle { color: false };

    #[test]
    fn card_lists_score_confidence_and_reasons() {
        let text = assessment_text(
            &render(&json!({
                "risk_level": "High_Risk",
                "confidence": {"High_Risk": 0.75, "Safe": 0.25},
                "reasons": ["Steep slope increases fall risk"],
            })),
            PLAIN,
        );
        assert!(text.contains("Predicted Risk Level: High_Risk\n"));
        assert!(text.contains("Safety Score: 25 / 100\n"));
        assert!(text.contains("Safety meter: [#####---------------]\n"));
        assert!(text.contains("Confidence:\n  High_Risk: 75%\n  Safe: 25%\n"));
        assert!(text.contains("Reasoning:\n- Steep slope increases fall risk\n"));
    }

    #[test]
    fn empty_reasons_omit_reasoning_section() {
        let text = assessment_text(&render(&json!({"risk_level": "High_Risk"})), PLAIN);
        assert!(text.contains("High risk detected. Avoid trekking in current conditions.\n"));
        assert!(!text.contains("Reasoning:"));
        assert!(!text.contains("generally safe"));
        assert!(!text.contains("Confidence:"));
    }

    #[test]
    fn sanitize_strips_escape_sequences_and_controls() {
        assert_eq!(
            sanitize_terminal_text("\u{1b}[31mred\u{1b}[0m text"),
            "red text"
        );
        assert_eq!(
            sanitize_terminal_text("\u{1b}]0;title\u{7}after"),
            "after"
        );
        assert_eq!(sanitize_terminal_text("line1\nline2\tend"), "line1 line2 end");
    }

    #[test]
    fn meter_rounds_to_cells() {
        assert_eq!(meter(0), "[--------------------]");
        assert_eq!(meter(100), "[####################]");
        assert_eq!(meter(92), "[##################--]");
    }

    #[test]
    fn color_only_applies_to_known_levels() {
        let style = TextStyle { color: true };
        let colored = paint(&RiskLevel::Safe, "Safe", style);
        assert!(colored.contains('\u{1b}'));
        let plain = paint(&RiskLevel::Unknown("Odd".to_string()), "Odd", style);
        assert_eq!(plain, "Odd");
    }

    #[test]
    fn error_text_is_sanitized() {
        assert_eq!(
            error_text("bad\u{1b}[2J input", PLAIN),
            "Error: bad input\n"
        );
    }
}
