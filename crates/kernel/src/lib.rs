//! World Kernel: authoritative tile memory and the moving observer.
//!
//! # Invariants
//! - A coordinate is materialized at most once and never re-rolled.
//! - `Occupied -> Empty` is the only live transition, and it is one-way.
//! - All state mutations flow through explicit operations and are logged.

pub mod observer;
pub mod store;

pub use observer::{DEFAULT_STEP, Observer};
pub use store::{
    MaterializedAs, OccupiedTile, StoreError, TileEvent, TileKind, TileState, TileStore,
};
