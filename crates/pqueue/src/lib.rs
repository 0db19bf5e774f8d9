//! Indexed priority queue.
//!
//! A binary max-heap that hands out stable [`Handle`]s, so any element (not
//! only the maximum) can be removed or re-positioned in O(log n).
//!
//! # Layout
//!
//! ```text
//! handles ──► slots: Vec<Slot>          heap: Vec<Node<T>>
//!             ┌──────────────────┐      ┌─────────────────────┐
//!             │ position, gen    │ ───► │ value, slot         │  heap order
//!             └──────────────────┘      └─────────────────────┘
//! ```
//!
//! A handle names a slot and the generation it was issued under. Moving a
//! node only rewrites the slot's position; removing it bumps the generation,
//! so stale handles are rejected instead of aliasing a reused slot.
//!
//! Ordering is supplied by the caller as `Fn(&T, &T) -> Ordering`, where
//! `Greater` means the first argument has priority over the second. Tie-break
//! chains belong inside that function.

mod error;
mod queue;

pub use error::InvalidOperation;
pub use queue::{EvictionHook, Handle, IndexedPriorityQueue};
