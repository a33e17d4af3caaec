//! Content pipeline: the category catalog and a memoizing asset resolver.
//!
//! Categories are configured once at startup and compiled into an immutable
//! table. Asset identifiers resolve to content-addressed handles; the
//! renderer and audio backends consume handles, never raw file paths.
//!
//! # Invariants
//! - Each asset identifier reaches the loader at most once.
//! - Category attributes are read once per category, never per tile.
//! - Missing assets and malformed catalogs fail at startup.

mod cache;
mod catalog;

pub use cache::{AssetCache, AssetError, AssetLoader, DirLoader, NameHashLoader, Palette, PaletteEntry};
pub use catalog::{Catalog, CatalogDef, CatalogError, Category, CategoryDef, EMPTY_ITEM};

pub fn crate_info() -> &'static str {
    "isogo-assets v0.1.0"
}
