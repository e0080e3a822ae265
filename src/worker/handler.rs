//! Zellij worker that answers file searches.
//!
//! The worker runs on its own thread. Every request is answered with exactly
//! one response so the plugin never waits on a lost request.

use crate::app::RequestId;
use crate::domain::{FileEntry, SearchRequestParams};
use crate::worker::index::{FileIndex, WalkIndex};
use crate::worker::{SearchScope, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker state, holding the index backend.
#[derive(Serialize, Deserialize)]
pub struct FileSeekWorker {
    #[serde(skip, default = "default_index")]
    index: Box<dyn FileIndex>,
}

fn default_index() -> Box<dyn FileIndex> {
    Box::new(WalkIndex::new())
}

impl Default for FileSeekWorker {
    fn default() -> Self {
        Self { index: default_index() }
    }
}

impl FileSeekWorker {
    /// Creates a worker backed by a custom index.
    #[must_use]
    pub fn with_index(index: Box<dyn FileIndex>) -> Self {
        Self { index }
    }

    fn handle_search(&self, request_id: RequestId, params: &SearchRequestParams, scope: &SearchScope) -> WorkerResponse {
        match self.index.search(params, scope) {
            Ok(files) => {
                tracing::debug!(request_id = %request_id, result_count = files.len(), "search completed");
                WorkerResponse::SearchCompleted { request_id, files: truncate(files, params.limit) }
            }
            Err(e) => {
                tracing::debug!(request_id = %request_id, error = %e, "search failed");
                WorkerResponse::SearchFailed { request_id, message: e.to_string() }
            }
        }
    }

    /// Attaches the sender's trace context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::SearchFiles { request_id, params, scope, .. } => {
                self.handle_search(request_id, &params, &scope)
            }
        }
    }
}

/// Enforces the result cap even for an index that ignores it.
fn truncate(mut files: Vec<FileEntry>, limit: usize) -> Vec<FileEntry> {
    files.truncate(limit);
    files
}

fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    observability::init_tracing(&Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for FileSeekWorker {
    /// Decodes a [`WorkerMessage`], runs it, and posts the response back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error { message: format!("malformed request: {e}") }
            }
        };

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage { name: message, payload, worker_name: None }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}
