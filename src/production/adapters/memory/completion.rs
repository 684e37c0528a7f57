//! Completion sink adapters for tests and headless callers.

use std::sync::Mutex;

use crate::production::ports::{CompletionSink, TaskCompletion};

/// Completion sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCompletionSink;

impl CompletionSink for NullCompletionSink {
    fn task_completed(&self, _completion: &TaskCompletion) {}
}

/// Completion sink that records every event for later inspection.
#[derive(Debug, Default)]
pub struct RecordingCompletionSink {
    events: Mutex<Vec<TaskCompletion>>,
}

impl RecordingCompletionSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event received so far.
    #[must_use]
    pub fn events(&self) -> Vec<TaskCompletion> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl CompletionSink for RecordingCompletionSink {
    fn task_completed(&self, completion: &TaskCompletion) {
        if let Ok(mut events) = self.events.lock() {
            events.push(completion.clone());
        }
    }
}
