//! Fetch dispatch boundary.
//!
//! The engine's contract ends at "fetch is eligible, here are the
//! parameters": the sink receives the computed parameters and a per-target
//! generation number, and whatever asynchronous collaborator sits behind it
//! is responsible for the actual data loading. Generations increase
//! monotonically per target so a collaborator can drop responses that were
//! superseded while in flight.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One eligible fetch, ready to hand to the data-loading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Component that should re-fetch.
    pub target: String,
    /// Monotonically increasing per-target counter; stale responses carry
    /// a lower generation than the latest dispatched one.
    pub generation: u64,
    /// Opaque parameters computed by the target's meta.
    pub params: Value,
}

/// Receives eligible fetch requests.
///
/// Dispatch is fire-and-forget from the engine's point of view: no await,
/// no retry, no cancellation.
pub trait FetchSink {
    fn dispatch(&mut self, request: FetchRequest);
}

/// Default sink: logs the computed parameters and does nothing else.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl FetchSink for LoggingSink {
    fn dispatch(&mut self, request: FetchRequest) {
        debug!(
            component = %request.target,
            generation = request.generation,
            params = %request.params,
            "fetch parameters computed"
        );
    }
}

/// Sink that records every dispatched request, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything dispatched so far.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Drains the recorded requests.
    pub fn take(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }
}

impl FetchSink for RecordingSink {
    fn dispatch(&mut self, request: FetchRequest) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }
    }
}
