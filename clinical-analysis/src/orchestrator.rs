//! RequestOrchestrator – owns the submission lifecycle for one UI session.
//!
//! Each [`RequestOrchestrator::submit`] call validates the note, moves the
//! shared state slot to `InFlight`, performs exactly one backend call and
//! settles the slot to `Succeeded` or `Failed`. Every transition is published
//! on a `watch` channel so a renderer can redraw on change.
//!
//! The orchestrator does not queue or deduplicate. Callers are expected to
//! hold off while a submission is in flight; if they don't, each call runs
//! independently and whichever settles last owns the slot.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    classifier::classify,
    client::{AnalysisBackend, HttpAnalysisClient},
    config::AnalysisConfig,
    error::{ConfigError, Result, SubmitError},
    models::{AnalysisRequest, AnalysisResult, SubmissionState},
};

pub struct RequestOrchestrator {
    backend: Arc<dyn AnalysisBackend>,
    state: watch::Sender<SubmissionState>,
}

impl RequestOrchestrator {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self { backend, state }
    }

    /// Orchestrator backed by [`HttpAnalysisClient`] for the given configuration
    pub fn from_config(config: &AnalysisConfig) -> std::result::Result<Self, ConfigError> {
        let client = HttpAnalysisClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Submit a clinical note for analysis and return the terminal state.
    ///
    /// Blank input is rejected with [`SubmitError::EmptyInput`] without a
    /// network call and without touching the current state.
    pub async fn submit(&self, text: &str) -> Result<SubmissionState> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        // Entering InFlight replaces any previous result or error.
        self.state.send_replace(SubmissionState::InFlight);
        info!(chars = text.chars().count(), "Submitting clinical note for analysis");

        let request = AnalysisRequest {
            text: text.to_string(),
        };

        let settled = match self.backend.analyze(&request).await {
            Ok(raw) => {
                let analysis = classify(&raw);
                info!(indicators = analysis.indicators.len(), "Analysis succeeded");
                debug!(tier = ?analysis.tier, label = %analysis.tier_label, "Risk classified");
                SubmissionState::Succeeded(AnalysisResult { raw, analysis })
            }
            Err(error) => {
                warn!(kind = ?error.kind, status = ?error.status, "Analysis failed: {}", error);
                SubmissionState::Failed(error)
            }
        };

        self.state.send_replace(settled.clone());
        Ok(settled)
    }
}
