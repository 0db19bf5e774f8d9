//! Core abstractions for the scheduling simulator.
//!
//! - [`Action`]: what a tick produced, for the runner to record
//! - [`Sampler`]: source of every random draw
//! - [`StateMachine`]: a deterministic, I/O-free tick procedure

mod action;
mod traits;

pub use action::Action;
pub use traits::{Sampler, StateMachine};
