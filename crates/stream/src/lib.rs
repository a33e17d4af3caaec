//! Streaming: tile generation, the visibility window, and the frame clock.
//!
//! # Invariants
//! - Generation only ever runs for unmaterialized coordinates.
//! - A materialized occupied tile is a render member iff it lies within the
//!   render distance of the observer, recomputed on every scan.
//! - Scans never alter stored tile state beyond first materialization.

mod clock;
mod generation;
mod window;

pub use clock::{Clock, FPS_WINDOW, FrameTimer};
pub use generation::{EMPTY_ODDS, GenerationPolicy};
pub use window::{RenderMembership, ScanDelta, StreamConfig, StreamStats, WorldStreamer};

pub fn crate_info() -> &'static str {
    "isogo-stream v0.1.0"
}
