//! Rendering Adapter: isometric projection and renderer-agnostic collaborators.
//!
//! # Invariants
//! - Renderer cannot mutate world truth directly.
//! - Screen positions derive from tile coordinates and the observer position
//!   on every draw, never cached across ticks.
//!
//! The registry and audio traits are stable; swap in a real backend without
//! changing consumers.

mod audio;
mod projection;
mod renderer;

pub use audio::{AudioLog, AudioSink};
pub use projection::{Projection, ProjectionConfig};
pub use renderer::{Placement, RenderRegistry, TextRegistry, placements};

pub fn crate_info() -> &'static str {
    "isogo-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
