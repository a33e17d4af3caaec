//! Shared value types for the isogo tile world.
//!
//! Everything here is plain data: coordinates, screen rectangles, and the
//! opaque handles that tie a tile to its appearance, sound and yielded item.

mod types;

pub use types::{AppearanceId, CategoryId, Heading, ItemId, ScreenRect, SoundId, TileCoord};
