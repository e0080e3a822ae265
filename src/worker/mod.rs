//! Background worker answering file searches.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `index`: the [`FileIndex`] seam and the filesystem walk backend
//! - `handler`: the Zellij worker entry point

pub mod handler;
pub mod index;
pub mod messages;

pub use handler::FileSeekWorker;
pub use index::{FileIndex, WalkIndex};
pub use messages::{SearchScope, TraceContext, WorkerMessage, WorkerResponse, DEFAULT_IGNORED_DIRS};
