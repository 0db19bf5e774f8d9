//! Core types for the scheduling simulator.
//!
//! Identifiers, priorities and the simulated process record shared by every
//! other crate in the workspace.

mod identifiers;
mod process;

pub use identifiers::{InvalidPriority, Pid, Priority, Tick, TokenId};
pub use process::Process;
