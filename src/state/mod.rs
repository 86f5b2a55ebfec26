// src/state/mod.rs
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::api::ApiError;
use crate::chart::ChartView;
use crate::model::{AnalysisResult, DataResponse, LogPoint, ProcessMapping};

pub type RequestToken = u64;

/// What a finished request thread reports back over its channel.
#[derive(Debug)]
pub enum RequestOutcome {
    Load(Result<DataResponse, ApiError>),
    Analyze(Result<AnalysisResult, ApiError>),
}

/// An in-flight backend request. The spawning side keeps the receiver here
/// and polls it every frame.
pub struct PendingRequest {
    pub token: RequestToken,
    pub rx: Receiver<RequestOutcome>,
}

// Core application state
pub struct AppState {
    // Dataset, replaced wholesale on each successful load
    pub points: Vec<LogPoint>,
    pub process_mapping: ProcessMapping,

    // The singleton chart view
    pub chart: Option<ChartView>,

    // Minimal UI state
    pub status: String,
    pub warning: Option<String>,

    // Request tracking. A response is applied only when its token still
    // matches the most recently issued one, so a late response can never
    // overwrite newer state.
    last_token: RequestToken,
    pending: Vec<PendingRequest>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            process_mapping: ProcessMapping::new(),
            chart: None,
            status: "No data loaded.".to_string(),
            warning: None,
            last_token: 0,
            pending: Vec::new(),
        }
    }

    /// Start a data load: sets the status line and hands out a fresh token
    /// for the request thread.
    pub fn begin_load(&mut self) -> RequestToken {
        self.status = "Loading data...".to_string();
        self.issue_token()
    }

    /// Start an analysis run, or bail out with a blocking warning when no
    /// data has been loaded yet. No token is consumed in the empty case.
    pub fn begin_analyze(&mut self, method: &str) -> Option<RequestToken> {
        if self.points.is_empty() {
            self.warning = Some("Please load data first!".to_string());
            return None;
        }

        self.status = format!("Running {}...", method);
        Some(self.issue_token())
    }

    pub fn track(&mut self, request: PendingRequest) {
        self.pending.push(request);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drain finished request channels and apply their outcomes.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        let mut still_pending = Vec::new();

        for request in self.pending.drain(..) {
            match request.rx.try_recv() {
                Ok(outcome) => completed.push((request.token, outcome)),
                Err(TryRecvError::Empty) => still_pending.push(request),
                Err(TryRecvError::Disconnected) => {
                    log::warn!("request {} dropped without a result", request.token);
                }
            }
        }

        self.pending = still_pending;
        for (token, outcome) in completed {
            self.apply(token, outcome);
        }
    }

    /// Apply one request outcome. Outcomes from superseded requests are
    /// dropped, never merged into newer state.
    pub fn apply(&mut self, token: RequestToken, outcome: RequestOutcome) {
        if token != self.last_token {
            log::debug!(
                "dropping stale response (token {}, latest {})",
                token,
                self.last_token
            );
            return;
        }

        match outcome {
            RequestOutcome::Load(Ok(data)) => self.apply_load(data),
            RequestOutcome::Load(Err(e)) => {
                log::error!("load_data failed: {}", e);
                self.status = "Error loading data.".to_string();
            }
            RequestOutcome::Analyze(Ok(result)) => self.apply_analysis(result),
            RequestOutcome::Analyze(Err(e)) => {
                log::error!("analyze failed: {}", e);
                self.status = "Analysis failed.".to_string();
            }
        }
    }

    fn apply_load(&mut self, data: DataResponse) {
        self.points = data.points;
        self.process_mapping = data.process_mapping;
        // Replaces any previous chart; the old instance is dropped here.
        self.chart = Some(ChartView::new(&self.points, self.process_mapping.clone()));
        self.status = format!("Loaded {} log entries.", self.points.len());
    }

    fn apply_analysis(&mut self, result: AnalysisResult) {
        match result {
            AnalysisResult::Anomaly { labels } => {
                let Some(chart) = self.chart.as_mut() else {
                    log::warn!("analysis result arrived with no chart to color");
                    self.status = "Analysis failed.".to_string();
                    return;
                };
                match chart.apply_anomaly_labels(&labels) {
                    Ok(()) => self.status = "Analysis complete.".to_string(),
                    Err(e) => {
                        log::error!("rejecting analysis result: {}", e);
                        self.status = "Analysis failed.".to_string();
                    }
                }
            }
            // Forward-compatible no-op for analysis types we don't render.
            AnalysisResult::Unknown => {
                self.status = "Analysis complete.".to_string();
            }
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        self.last_token += 1;
        self.last_token
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
