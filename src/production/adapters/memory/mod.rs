//! In-memory adapter implementations for tests and local development.

mod completion;
mod gateway;

pub use completion::{NullCompletionSink, RecordingCompletionSink};
pub use gateway::InMemoryProductionBackend;
