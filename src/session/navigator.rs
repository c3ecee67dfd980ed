//! Navigation seam used by the session context to redirect.

use std::sync::Mutex;

/// Source of the current path and sink for client-side redirects.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
}

/// Navigator for a single server-rendered page load. Redirects are recorded
/// and turned into an HTTP response by the page handler.
pub struct RecordingNavigator {
    path: String,
    pushes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), pushes: Mutex::new(Vec::new()) }
    }

    /// Every path pushed so far, oldest first.
    #[must_use]
    pub fn pushes(&self) -> Vec<String> {
        self.pushes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recent redirect, if any.
    #[must_use]
    pub fn pending_redirect(&self) -> Option<String> {
        self.pushes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn push(&self, path: &str) {
        tracing::debug!(from = %self.path, to = %path, "session redirect");
        self.pushes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(path.to_owned());
    }
}

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;
