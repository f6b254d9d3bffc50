//! Mapping from a prediction result to what the user sees.
//!
//! The mapping is total: an unrecognised risk level falls back to a neutral
//! style and the `❓` icon instead of failing.

use serde::Serialize;

use crate::models::result::{RiskLevel, ScreeningResult};

pub const UNKNOWN_ICON: &str = "❓";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStyle {
    Low,
    Medium,
    High,
    Neutral,
}

impl RiskStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            RiskStyle::Low => "risk-low",
            RiskStyle::Medium => "risk-medium",
            RiskStyle::High => "risk-high",
            RiskStyle::Neutral => "risk-unknown",
        }
    }
}

/// A result ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPresentation {
    pub icon: &'static str,
    pub style: RiskStyle,
    pub label: String,
    /// Clamped to `[0, 100]`.
    pub confidence: f64,
    pub prediction: String,
    pub message: String,
    pub recommendation: String,
}

impl ResultPresentation {
    /// Confidence as shown on screen, e.g. `87.5%`.
    pub fn confidence_text(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

pub fn icon_and_style(level: &RiskLevel) -> (&'static str, RiskStyle) {
    match level {
        RiskLevel::Low => ("✅", RiskStyle::Low),
        RiskLevel::Medium => ("⚠️", RiskStyle::Medium),
        RiskLevel::High => ("🚨", RiskStyle::High),
        RiskLevel::Unrecognized(_) => (UNKNOWN_ICON, RiskStyle::Neutral),
    }
}

/// Icon for a raw risk-level string.
pub fn risk_icon(level: &str) -> &'static str {
    icon_and_style(&RiskLevel::parse(level)).0
}

pub fn present(result: &ScreeningResult) -> ResultPresentation {
    let (icon, style) = icon_and_style(&result.risk_level);
    let confidence = if result.confidence.is_nan() {
        0.0
    } else {
        result.confidence.clamp(0.0, 100.0)
    };

    ResultPresentation {
        icon,
        style,
        label: match &result.risk_level {
            RiskLevel::Unrecognized(raw) if raw.trim().is_empty() => "Unknown".to_string(),
            level => level.to_string(),
        },
        confidence,
        prediction: result.prediction.clone(),
        message: result.message.clone(),
        recommendation: result.doctor_recommendation.clone(),
    }
}
