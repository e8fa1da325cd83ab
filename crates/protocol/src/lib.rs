use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod detail;

pub const PREDICT_BY_LOCATION_PATH: &str = "/predict-by-location";
pub const HEALTH_PATH: &str = "/";

/// Body of `POST /predict-by-location`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionRequest {
    pub location: String,
}

impl PredictionRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Risk classes the prediction service is known to emit.
///
/// Anything else is carried as `Unknown` with the raw label so it can still be
/// displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Safe,
    ModerateRisk,
    HighRisk,
    Unknown(String),
}

impl RiskLevel {
    pub const SAFE_LABEL: &'static str = "Safe";
    pub const MODERATE_LABEL: &'static str = "Moderate_Risk";
    pub const HIGH_LABEL: &'static str = "High_Risk";

    pub fn from_label(label: &str) -> Self {
        match label {
            Self::SAFE_LABEL => Self::Safe,
            Self::MODERATE_LABEL => Self::ModerateRisk,
            Self::HIGH_LABEL => Self::HighRisk,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Safe => Self::SAFE_LABEL,
            Self::ModerateRisk => Self::MODERATE_LABEL,
            Self::HighRisk => Self::HIGH_LABEL,
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw))
    }
}

/// Service descriptor returned by `GET /`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDescriptor {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub predict_by_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(RiskLevel::from_label("Safe"), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_label("Moderate_Risk"), RiskLevel::ModerateRisk);
        assert_eq!(RiskLevel::from_label("High_Risk"), RiskLevel::HighRisk);
    }

    #[test]
    fn unknown_label_is_kept_verbatim() {
        let level = RiskLevel::from_label("high_risk");
        assert_eq!(level, RiskLevel::Unknown("high_risk".to_string()));
        assert_eq!(level.label(), "high_risk");
        assert!(!level.is_known());
    }

    #[test]
    fn request_serializes_location_only() {
        let json = serde_json::to_string(&PredictionRequest::new("Everest Base Camp"))
            .expect("serialize");
        assert_eq!(json, r#"{"location":"Everest Base Camp"}"#);
    }

    #[test]
    fn risk_level_deserializes_from_any_string() {
        let level: RiskLevel = serde_json::from_str(r#""Extreme""#).expect("deserialize");
        assert_eq!(level, RiskLevel::Unknown("Extreme".to_string()));
    }

    #[test]
    fn service_descriptor_tolerates_missing_fields() {
        let info: ServiceDescriptor =
            serde_json::from_str(r#"{"service":"Trek Safety AI","app":"/app/"}"#)
                .expect("deserialize");
        assert_eq!(info.service.as_deref(), Some("Trek Safety AI"));
        assert!(info.docs.is_none());
    }
}
