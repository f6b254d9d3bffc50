use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned risk category.
///
/// Parsed case-insensitively from the wire. Anything other than the three
/// known levels is kept verbatim so it can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("low") {
            RiskLevel::Low
        } else if trimmed.eq_ignore_ascii_case("medium") {
            RiskLevel::Medium
        } else if trimmed.eq_ignore_ascii_case("high") {
            RiskLevel::High
        } else {
            RiskLevel::Unrecognized(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RiskLevel::parse(&raw))
    }
}

/// Body of a successful `POST /predict`.
///
/// Unknown fields are ignored. `risk_level` and `confidence` are required;
/// the free-text fields default to empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub risk_level: RiskLevel,
    /// Percentage in `[0, 100]`.
    pub confidence: f64,
    #[serde(default)]
    pub prediction: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub doctor_recommendation: String,
}
