//! In-World Interaction: progressive destruction of tiles under the pointer.
//!
//! # Invariants
//! - Progress only grows while a tile is continuously hovered and held.
//! - A destroyed tile leaves render membership in the same tick and stays empty.
//! - Every destruction plays the tile's sound; non-empty items reach the
//!   inventory in destruction order.

mod destroy;

pub use destroy::{DEFAULT_RATE, Destroyed, Destruction, DestructionConfig, DestructionScene};

pub fn crate_info() -> &'static str {
    "isogo-author v0.1.0"
}
