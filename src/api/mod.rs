// src/api/mod.rs
//! Synchronous HTTP client for the two backend endpoints.
//!
//! The backend owns all real logic (log parsing, anomaly detection); this
//! client only shuttles JSON. It is cheap to clone, so request threads each
//! carry their own copy.
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::model::{AnalysisResult, DataResponse};

/// What went wrong talking to the backend.
///
/// The UI collapses all of these into one generic status string; the
/// distinction exists for the log and for tests.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("failed to parse backend response: {0}")]
    Parse(String),
}

/// Request body for `POST /api/analyze`.
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    method: &'a str,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    /// Fetch the parsed log dataset and the process id -> name mapping.
    pub fn load_data(&self) -> Result<DataResponse, ApiError> {
        let url = format!("{}/api/load_data", self.base_url);
        let response = ureq::get(&url)
            .timeout(self.timeout)
            .call()
            .map_err(classify)?;

        response
            .into_json::<DataResponse>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Run an analysis method on the backend's currently loaded dataset.
    ///
    /// `method` is opaque here; the backend decides what it means (the
    /// reference backend understands `isolation_forest`).
    pub fn analyze(&self, method: &str) -> Result<AnalysisResult, ApiError> {
        let url = format!("{}/api/analyze", self.base_url);
        let response = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(AnalyzeRequest { method })
            .map_err(classify)?;

        response
            .into_json::<AnalysisResult>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

fn classify(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(code, _) => ApiError::Status(code),
        ureq::Error::Transport(transport) => ApiError::Network(transport.to_string()),
    }
}
