//! Plugin/worker protocol.
//!
//! Messages cross the thread boundary as JSON. Requests carry the sender's
//! [`TraceContext`] so worker spans join the plugin's trace.

use crate::app::RequestId;
use crate::domain::{FileEntry, SearchRequestParams};
use crate::infrastructure::HOST_ROOT;
use serde::{Deserialize, Serialize};

/// Trace and parent span ids of the span that sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current span.
    ///
    /// `None` when no OpenTelemetry layer is installed or the span is not
    /// sampled, which is the normal case in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    search_files(SearchFiles { request_id: RequestId, params: SearchRequestParams, scope: SearchScope }),
}

/// Directory names skipped by the walk unless configured otherwise.
pub const DEFAULT_IGNORED_DIRS: [&str; 3] = [".git", "node_modules", "target"];

/// Where a search runs: the walk root and the directory names to skip.
///
/// Travels with every request because the worker has no access to the
/// plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchScope {
    /// Sandbox path the walk starts from.
    pub root: String,

    /// Directory names never descended into.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            root: HOST_ROOT.to_string(),
            ignore: DEFAULT_IGNORED_DIRS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Messages sent from the plugin to the file index worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Runs one file search.
    SearchFiles {
        /// Echoed in the response so the plugin can discard stale results.
        request_id: RequestId,

        params: SearchRequestParams,

        scope: SearchScope,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached by the sender, if any.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::SearchFiles { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The search finished; `files` is in index order and respects the limit.
    SearchCompleted {
        request_id: RequestId,
        files: Vec<FileEntry>,
    },

    /// The index could not run the search.
    SearchFailed {
        request_id: RequestId,
        message: String,
    },

    /// A message could not be processed at all (for example, malformed JSON).
    Error {
        /// Human-readable error message.
        message: String,
    },
}
