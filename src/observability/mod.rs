//! Tracing with OpenTelemetry spans exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → RotatingFile
//! ```
//!
//! Spans land in `fileseek-otlp.json` in the plugin data directory, one OTLP
//! JSON document per line. The file rotates at 10 MB and keeps three
//! timestamped backups. The filter comes from the `trace_level` option.

mod exporter;
mod init;
mod rotating_file;

pub use exporter::{file_tracer_provider, FileSpanExporter};
pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
pub use rotating_file::RotatingFile;
