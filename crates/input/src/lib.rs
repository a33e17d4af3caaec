//! Input: per-tick snapshots of directional keys, pointer and quit request.
//!
//! # Invariants
//! - The core reads input once per tick through a snapshot, never raw events.

pub mod snapshot;

pub use snapshot::{InputSnapshot, InputSource, Pointer, ScriptedInput};

pub fn crate_info() -> &'static str {
    "isogo-input v0.1.0"
}
