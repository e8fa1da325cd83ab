use serde_json::json;

use crate::config::OutputFormat;
use crate::orchestrator::View;
use crate::render::{
    assessment_markup, assessment_text, error_markup, error_text, progress_markup, TextStyle,
};

/// Renders the result region for one output surface.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    pub format: OutputFormat,
    pub style: TextStyle,
}

impl Presenter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self {
            format,
            style: TextStyle { color },
        }
    }

    pub fn show(&self, view: &View) -> String {
        match (self.format, view) {
            (_, View::Empty) => String::new(),
            (OutputFormat::Text, View::InProgress) => "Checking…\n".to_string(),
            (OutputFormat::Text, View::Assessment(assessment)) => {
                assessment_text(assessment, self.style)
            }
            (OutputFormat::Text, View::Error(message)) => error_text(message, self.style),
            (OutputFormat::Html, View::InProgress) => line(progress_markup()),
            (OutputFormat::Html, View::Assessment(assessment)) => {
                line(assessment_markup(assessment))
            }
            (OutputFormat::Html, View::Error(message)) => line(error_markup(message)),
            (OutputFormat::Json, View::InProgress) => line(json!({"state": "submitting"}).to_string()),
            (OutputFormat::Json, View::Assessment(assessment)) => {
                line(json!({"assessment": assessment}).to_string())
            }
            (OutputFormat::Json, View::Error(message)) => {
                line(json!({"error": message}).to_string())
            }
        }
    }
}

fn line(mut text: String) -> String {
    text.push('\n');
    text
}
