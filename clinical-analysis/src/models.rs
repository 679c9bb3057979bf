use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClassifiedError;

/// Body of the outbound `POST /analyze` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Fields the analysis service is expected to return.
///
/// Nothing enforces this shape on the wire, so every field is optional and
/// [`AnalysisResponse::from_payload`] drops anything of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub patient_summary: Option<String>,
    pub key_clinical_indicators: Option<Vec<String>>,
    pub risk_level: Option<String>,
}

impl AnalysisResponse {
    pub fn from_payload(payload: &Value) -> Self {
        let patient_summary = payload["patient_summary"].as_str().map(str::to_string);

        let key_clinical_indicators = payload["key_clinical_indicators"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            });

        let risk_level = payload["risk_level"].as_str().map(str::to_string);

        Self {
            patient_summary,
            key_clinical_indicators,
            risk_level,
        }
    }
}

/// Normalized three-level risk classification, plus a catch-all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Unrecognized,
}

impl RiskTier {
    /// Display label for the recognized tiers
    pub fn label(&self) -> Option<&'static str> {
        match self {
            RiskTier::Low => Some("Low Risk"),
            RiskTier::Moderate => Some("Moderate Risk"),
            RiskTier::High => Some("High Risk"),
            RiskTier::Unrecognized => None,
        }
    }
}

/// Render-ready view of an analysis payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedAnalysis {
    pub summary_text: Option<String>,
    pub indicators: Vec<String>,
    pub tier: RiskTier,
    pub tier_label: String,
}

/// A successful analysis: the payload as received plus its classified view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub raw: Value,
    pub analysis: ClassifiedAnalysis,
}

/// Lifecycle of the current submission
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(ClassifiedError),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        )
    }
}
