//! Turns an analysis payload of unknown shape into a render-ready view.
//!
//! Risk tiers are matched by case-insensitive substring in a fixed order:
//! `low`, then `moderate`/`medium`, then `high`. The first match wins, so
//! "Low but trending high" is Low. Matching is not token based, so values like
//! "lowered" or "highball" also match.

use serde_json::Value;

use crate::models::{AnalysisResponse, ClassifiedAnalysis, RiskTier};

const UNKNOWN_LABEL: &str = "Unknown";

/// Classify a raw payload. Never fails; missing or malformed fields fall back
/// to defaults.
pub fn classify(payload: &Value) -> ClassifiedAnalysis {
    classify_response(&AnalysisResponse::from_payload(payload))
}

pub fn classify_response(response: &AnalysisResponse) -> ClassifiedAnalysis {
    let (tier, tier_label) = classify_risk(response.risk_level.as_deref());

    ClassifiedAnalysis {
        summary_text: response.patient_summary.clone(),
        indicators: response.key_clinical_indicators.clone().unwrap_or_default(),
        tier,
        tier_label,
    }
}

/// Map a free-text risk level to a tier and its display label
pub fn classify_risk(risk_level: Option<&str>) -> (RiskTier, String) {
    let level = risk_level.unwrap_or_default().to_lowercase();

    let tier = if level.contains("low") {
        RiskTier::Low
    } else if level.contains("moderate") || level.contains("medium") {
        RiskTier::Moderate
    } else if level.contains("high") {
        RiskTier::High
    } else {
        RiskTier::Unrecognized
    };

    let label = match tier.label() {
        Some(label) => label.to_string(),
        None => risk_level
            .filter(|raw| !raw.is_empty())
            .unwrap_or(UNKNOWN_LABEL)
            .to_string(),
    };

    (tier, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tier_of(risk_level: &str) -> (RiskTier, String) {
        let analysis = classify(&json!({ "risk_level": risk_level }));
        (analysis.tier, analysis.tier_label)
    }

    #[test]
    fn full_payload_passes_fields_through() {
        let analysis = classify(&json!({
            "patient_summary": "52 year old male with poorly controlled diabetes",
            "key_clinical_indicators": ["HbA1c 9.2%", "BP 150/95"],
            "risk_level": "High"
        }));

        assert_eq!(
            analysis.summary_text.as_deref(),
            Some("52 year old male with poorly controlled diabetes")
        );
        assert_eq!(analysis.indicators, vec!["HbA1c 9.2%", "BP 150/95"]);
        assert_eq!(analysis.tier, RiskTier::High);
        assert_eq!(analysis.tier_label, "High Risk");
    }

    #[test]
    fn recognized_tiers_use_fixed_labels() {
        assert_eq!(tier_of("low"), (RiskTier::Low, "Low Risk".to_string()));
        assert_eq!(
            tier_of("Moderate"),
            (RiskTier::Moderate, "Moderate Risk".to_string())
        );
        assert_eq!(
            tier_of("medium"),
            (RiskTier::Moderate, "Moderate Risk".to_string())
        );
        assert_eq!(tier_of("HIGH"), (RiskTier::High, "High Risk".to_string()));
    }

    #[test]
    fn low_takes_precedence_over_high() {
        assert_eq!(tier_of("Low but trending high").0, RiskTier::Low);
    }

    #[test]
    fn moderate_takes_precedence_over_high() {
        assert_eq!(tier_of("medium-high").0, RiskTier::Moderate);
    }

    // Substring matching is kept as-is: these are not token matches.
    #[test]
    fn substring_quirk_matches_inside_words() {
        assert_eq!(tier_of("lowered cholesterol").0, RiskTier::Low);
        assert_eq!(tier_of("highball").0, RiskTier::High);
        assert_eq!(tier_of("Follow-up").0, RiskTier::Low);
    }

    #[test]
    fn unrecognized_keeps_original_casing() {
        assert_eq!(
            tier_of("Severe"),
            (RiskTier::Unrecognized, "Severe".to_string())
        );
    }

    #[test]
    fn missing_or_empty_risk_level_is_unknown() {
        let empty = classify(&json!({}));
        assert_eq!(empty.tier, RiskTier::Unrecognized);
        assert_eq!(empty.tier_label, "Unknown");

        assert_eq!(tier_of("").1, "Unknown");

        let null = classify(&json!({ "risk_level": null }));
        assert_eq!(null.tier_label, "Unknown");
    }

    #[test]
    fn empty_payload_gets_defaults() {
        let analysis = classify(&json!({}));
        assert_eq!(analysis.summary_text, None);
        assert!(analysis.indicators.is_empty());
    }

    #[test]
    fn missing_indicators_become_empty_list() {
        let analysis = classify(&json!({ "patient_summary": "x" }));
        assert_eq!(analysis.summary_text.as_deref(), Some("x"));
        assert!(analysis.indicators.is_empty());
    }

    #[test]
    fn tolerates_non_object_payloads() {
        for payload in [Value::Null, json!([1, 2]), json!("ok"), json!(3.5)] {
            let analysis = classify(&payload);
            assert_eq!(analysis.tier, RiskTier::Unrecognized);
            assert_eq!(analysis.tier_label, "Unknown");
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let payload = json!({ "risk_level": "Moderate to High" });
        assert_eq!(classify(&payload), classify(&payload));
    }
}
