//! Extractor registration side-channel.
//!
//! Collaborators outside the engine sometimes need to know which columns a
//! compiled engine consumes, typically to build a column filter for the
//! store read. A context that wants that visibility passes an
//! [`ExtractorSink`] into compilation; every constructed extractor is
//! appended to it, once per compiled rule. The list is accumulate-only: this
//! engine never removes or clears entries.

use std::sync::{Arc, Mutex, PoisonError};

use crate::extract::CellExtractor;

/// Capability to receive the extractors an engine compiles.
pub trait ExtractorSink: Send + Sync {
    /// Record one compiled extractor. Called only during engine compilation.
    fn register(&self, extractor: Arc<dyn CellExtractor>);
}

/// Process-lifetime, mutex-guarded, accumulate-only extractor list.
///
/// Appends happen only while engines compile; concurrent compilations are
/// serialized by the mutex, and a reader never observes a partially appended
/// entry.
#[derive(Clone, Default)]
pub struct SharedExtractorList {
    extractors: Arc<Mutex<Vec<Arc<dyn CellExtractor>>>>,
}

impl SharedExtractorList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of extractors registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A point-in-time copy of the registered extractors, in registration
    /// order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn CellExtractor>> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn CellExtractor>>> {
        // The list is append-only, so a poisoned guard still holds a
        // consistent vector.
        self.extractors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExtractorSink for SharedExtractorList {
    fn register(&self, extractor: Arc<dyn CellExtractor>) {
        self.lock().push(extractor);
    }
}
