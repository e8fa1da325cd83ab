use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Optional TOML file read by the client CLI.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub api_base: Option<String>,
    pub predict_path: Option<String>,
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}
