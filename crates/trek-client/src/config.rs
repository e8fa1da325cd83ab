use anyhow::Context;
pub use protocol::config::{ClientConfig, OutputFormat, DEFAULT_API_BASE};
use protocol::PREDICT_BY_LOCATION_PATH;
use std::path::Path;

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub predict_path: String,
    pub format: OutputFormat,
    pub color: bool,
}

impl Settings {
    pub fn resolve(
        overrides: Overrides,
        file: Option<ClientConfig>,
        color_capable: bool,
    ) -> anyhow::Result<Self> {
        let file = file.unwrap_or_default();
        let settings = Self {
            api_base: overrides
                .api_base
                .or(file.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            predict_path: file
                .predict_path
                .unwrap_or_else(|| PREDICT_BY_LOCATION_PATH.to_string()),
            format: overrides.format.or(file.format).unwrap_or_default(),
            color: !overrides.no_color && file.color.unwrap_or(true) && color_capable,
        };
        validate_settings(&settings)?;
        Ok(settings)
    }
}

fn validate_settings(settings: &Settings) -> anyhow::Result<()> {
    let base = settings.api_base.trim();
    if base.is_empty() {
        anyhow::bail!("api_base must not be empty");
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        anyhow::bail!("api_base must start with http:// or https:// (got {})", base);
    }
    if settings.predict_path.trim().is_empty() {
        anyhow::bail!("predict_path must not be empty");
    }
    Ok(())
}

pub fn load_client_config(path: &Path) -> anyhow::Result<ClientConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ClientConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(input: &str) -> ClientConfig {
        toml::from_str(input).unwrap()
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = Settings::resolve(Overrides::default(), None, true).unwrap();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.predict_path, "/predict-by-location");
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(settings.color);
    }

    #[test]
    fn flags_win_over_file() {
        let overrides = Overrides {
            api_base: Some("http://flag:1".to_string()),
            format: Some(OutputFormat::Json),
            no_color: false,
        };
        let settings = Settings::resolve(
            overrides,
            Some(file("api_base = \"http://file:2\"\nformat = \"html\"")),
            true,
        )
        .unwrap();
        assert_eq!(settings.api_base, "http://flag:1");
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn file_wins_over_defaults() {
        let settings = Settings::resolve(
            Overrides::default(),
            Some(file(
                "api_base = \"https://trek.example\"\npredict_path = \"/v2/predict\"\ncolor = false",
            )),
            true,
        )
        .unwrap();
        assert_eq!(settings.api_base, "https://trek.example");
        assert_eq!(settings.predict_path, "/v2/predict");
        assert!(!settings.color);
    }

    #[test]
    fn color_needs_capable_output() {
        let settings = Settings::resolve(Overrides::default(), None, false).unwrap();
        assert!(!settings.color);
        let overrides = Overrides {
            no_color: true,
            ..Overrides::default()
        };
        assert!(!Settings::resolve(overrides, None, true).unwrap().color);
    }

    #[test]
    fn rejects_non_http_base() {
        let overrides = Overrides {
            api_base: Some("127.0.0.1:8000".to_string()),
            ..Overrides::default()
        };
        assert!(Settings::resolve(overrides, None, true).is_err());
    }

    #[test]
    fn rejects_blank_predict_path() {
        assert!(Settings::resolve(
            Overrides::default(),
            Some(file("predict_path = \"  \"")),
            true
        )
        .is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_client_config(Path::new("/nonexistent/trek-safety.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
