use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::AnalysisConfig,
    error::{ClassifiedError, ConfigError},
    models::AnalysisRequest,
};

/// Outbound analysis call. Implementations perform exactly one request per
/// invocation and classify every failure.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, ClassifiedError>;
}

/// Why an exchange failed, before it is turned into a user-facing message
#[derive(Debug)]
enum TransportFailure {
    TimedOut,
    Status { status: StatusCode, body: Value },
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        TransportFailure::Transport(e)
    }
}

impl From<TransportFailure> for ClassifiedError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::TimedOut => ClassifiedError::timeout(),
            TransportFailure::Status { status, body } => {
                ClassifiedError::server(status.as_u16(), &server_detail(status, &body))
            }
            TransportFailure::Transport(e) => {
                if e.is_timeout() {
                    ClassifiedError::timeout()
                } else if e.is_connect() || e.is_request() {
                    ClassifiedError::network_unreachable()
                } else {
                    ClassifiedError::unknown()
                }
            }
        }
    }
}

/// Server-supplied `message` field, or the reason phrase for the status.
///
/// Any truthy scalar counts as a message: non-empty strings, non-zero
/// numbers and `true`. Objects, arrays and falsy values fall back to the
/// reason phrase.
fn server_detail(status: StatusCode, body: &Value) -> String {
    let message = match &body["message"] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    };

    message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string()
    })
}

/// Success body as JSON, or as a plain string when it does not parse
fn success_payload(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// `AnalysisBackend` that POSTs JSON to the configured analysis service
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpAnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, request: &AnalysisRequest) -> Result<Value, TransportFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            return Err(TransportFailure::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(success_payload(&bytes))
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, ClassifiedError> {
        debug!(endpoint = %self.endpoint, timeout_ms = self.timeout.as_millis() as u64, "Sending analysis request");

        // Dropping the exchange on expiry aborts the in-flight request.
        match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result.map_err(ClassifiedError::from),
            Err(_) => Err(TransportFailure::TimedOut.into()),
        }
    }
}
