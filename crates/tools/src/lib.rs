//! Developer Tooling: read-only world inspector.
//!
//! # Invariants
//! - Tools never mutate world state.

mod inspector;

pub use inspector::{TileInfo, WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "isogo-tools v0.1.0"
}
