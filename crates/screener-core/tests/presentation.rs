use screener_core::models::result::{RiskLevel, ScreeningResult};
use screener_core::presentation::{present, risk_icon, RiskStyle};

fn result(level: &str, confidence: f64) -> ScreeningResult {
    ScreeningResult {
        risk_level: RiskLevel::parse(level),
        confidence,
        prediction: "prediction".to_string(),
        message: "message".to_string(),
        doctor_recommendation: "recommendation".to_string(),
    }
}

#[test]
fn risk_icon_mapping_is_total() {
    assert_eq!(risk_icon("Low"), "✅");
    assert_eq!(risk_icon("Medium"), "⚠️");
    assert_eq!(risk_icon("High"), "🚨");
    assert_eq!(risk_icon("Unknown"), "❓");
    assert_eq!(risk_icon(""), "❓");
}

#[test]
fn known_levels_get_their_style() {
    assert_eq!(present(&result("Low", 10.0)).style, RiskStyle::Low);
    assert_eq!(present(&result("medium", 50.0)).style, RiskStyle::Medium);
    assert_eq!(present(&result("HIGH", 90.0)).style.class_name(), "risk-high");
}

#[test]
fn unknown_level_degrades_to_neutral() {
    let shown = present(&result("Borderline", 55.0));
    assert_eq!(shown.icon, "❓");
    assert_eq!(shown.style, RiskStyle::Neutral);
    assert_eq!(shown.style.class_name(), "risk-unknown");
    assert_eq!(shown.label, "Borderline");

    assert_eq!(present(&result("  ", 55.0)).label, "Unknown");
}

#[test]
fn confidence_is_clamped_for_display() {
    assert_eq!(present(&result("Low", 130.0)).confidence, 100.0);
    assert_eq!(present(&result("Low", -4.0)).confidence, 0.0);
    assert_eq!(present(&result("Low", 87.46)).confidence_text(), "87.5%");
}

#[test]
fn text_fields_carry_through() {
    let shown = present(&result("High", 80.0));
    assert_eq!(shown.prediction, "prediction");
    assert_eq!(shown.message, "message");
    assert_eq!(shown.recommendation, "recommendation");
}
