pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;

// Re-export commonly used types
pub use classifier::{classify, classify_response, classify_risk};
pub use client::{AnalysisBackend, HttpAnalysisClient};
pub use config::AnalysisConfig;
pub use error::{ClassifiedError, ConfigError, ErrorKind, Result, SubmitError};
pub use models::{
    AnalysisRequest, AnalysisResponse, AnalysisResult, ClassifiedAnalysis, RiskTier,
    SubmissionState,
};
pub use orchestrator::RequestOrchestrator;
