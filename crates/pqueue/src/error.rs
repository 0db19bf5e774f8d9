//! Error types for queue operations.

use thiserror::Error;

/// Contract violations on an [`IndexedPriorityQueue`](crate::IndexedPriorityQueue).
///
/// None of these occur when the queue is used correctly. Callers that treat
/// an empty queue as a normal condition should check `is_empty()` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    /// Operation needs at least one element.
    #[error("invalid operation: queue is empty")]
    EmptyQueue,

    /// Handle refers to an element that has already been removed.
    #[error("invalid operation: stale handle")]
    StaleHandle,

    /// Handle was issued by a different queue.
    #[error("invalid operation: handle belongs to another queue")]
    ForeignHandle,
}
