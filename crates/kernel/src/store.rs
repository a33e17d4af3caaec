use isogo_common::{AppearanceId, CategoryId, ItemId, SoundId, TileCoord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload of a tile that holds a destructible object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupiedTile {
    pub category: CategoryId,
    pub appearance: AppearanceId,
    pub sound: SoundId,
    /// Progress units needed to destroy the object.
    pub durability: f32,
    /// Item appended to the inventory on destruction, if any.
    pub item: Option<ItemId>,
    /// Accumulated progress under a continuously held pointer.
    pub progress: f32,
}

impl OccupiedTile {
    pub fn new(
        category: CategoryId,
        appearance: AppearanceId,
        sound: SoundId,
        durability: f32,
        item: Option<ItemId>,
    ) -> Self {
        Self {
            category,
            appearance,
            sound,
            durability,
            item,
            progress: 0.0,
        }
    }

    /// Whether the accumulated progress has reached the durability threshold.
    pub fn is_spent(&self) -> bool {
        self.progress >= self.durability
    }
}

/// Materialized state of a tile. An absent entry means the tile is unmaterialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TileState {
    /// Permanently empty; never rendered and never re-rolled.
    Empty,
    Occupied(OccupiedTile),
}

impl TileState {
    pub fn kind(&self) -> TileKind {
        match self {
            Self::Empty => TileKind::Empty,
            Self::Occupied(_) => TileKind::Occupied,
        }
    }

    pub fn as_occupied(&self) -> Option<&OccupiedTile> {
        match self {
            Self::Occupied(tile) => Some(tile),
            Self::Empty => None,
        }
    }
}

/// Payload-free view of a coordinate's lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Unmaterialized,
    Empty,
    Occupied,
}

/// An event record produced by every mutation to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TileEvent {
    /// A coordinate was materialized for the first time.
    Materialized { coord: TileCoord, kind: MaterializedAs },
    /// An occupied tile was destroyed and is now permanently empty.
    Destroyed {
        coord: TileCoord,
        item: Option<ItemId>,
    },
}

/// What a coordinate materialized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterializedAs {
    Empty,
    Occupied(CategoryId),
}

/// Errors from store mutations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("tile {0} is already materialized")]
    AlreadyMaterialized(TileCoord),
}

/// Sparse, authoritative memory of every materialized tile.
///
/// Coordinates only ever move forward through their lifecycle:
/// unmaterialized, then `Empty` or `Occupied`, and `Occupied` to `Empty` on
/// destruction. The store never evicts, so it grows with the explored area.
///
/// Uses BTreeMap for deterministic iteration and hashing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileStore {
    tiles: BTreeMap<TileCoord, TileState>,
    destroyed: usize,
    /// Mutations since the last `drain_events`.
    #[serde(skip)]
    event_log: Vec<TileEvent>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tile. `None` means unmaterialized.
    pub fn get(&self, coord: TileCoord) -> Option<&TileState> {
        self.tiles.get(&coord)
    }

    /// Lifecycle stage of a coordinate.
    pub fn kind(&self, coord: TileCoord) -> TileKind {
        self.tiles
            .get(&coord)
            .map_or(TileKind::Unmaterialized, TileState::kind)
    }

    pub fn is_materialized(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Borrow an occupied tile's payload.
    pub fn occupied(&self, coord: TileCoord) -> Option<&OccupiedTile> {
        self.tiles.get(&coord).and_then(TileState::as_occupied)
    }

    /// Mutably borrow an occupied tile's payload (for progress updates).
    pub fn occupied_mut(&mut self, coord: TileCoord) -> Option<&mut OccupiedTile> {
        match self.tiles.get_mut(&coord) {
            Some(TileState::Occupied(tile)) => Some(tile),
            _ => None,
        }
    }

    /// Materialize a coordinate. Fails if it already holds any state.
    pub fn put(&mut self, coord: TileCoord, state: TileState) -> Result<(), StoreError> {
        if self.tiles.contains_key(&coord) {
            return Err(StoreError::AlreadyMaterialized(coord));
        }
        let kind = match &state {
            TileState::Empty => MaterializedAs::Empty,
            TileState::Occupied(tile) => MaterializedAs::Occupied(tile.category),
        };
        self.tiles.insert(coord, state);
        self.event_log.push(TileEvent::Materialized { coord, kind });
        Ok(())
    }

    /// Transition an occupied tile to `Empty`, returning its former payload.
    ///
    /// Calling this on a coordinate that is not occupied is a benign no-op
    /// (a late or duplicate destruction) and returns `None`.
    pub fn mark_destroyed(&mut self, coord: TileCoord) -> Option<OccupiedTile> {
        if self.kind(coord) != TileKind::Occupied {
            tracing::debug!(%coord, kind = ?self.kind(coord), "ignoring destroy of non-occupied tile");
            return None;
        }
        let Some(TileState::Occupied(tile)) = self.tiles.insert(coord, TileState::Empty) else {
            return None;
        };
        self.destroyed += 1;
        self.event_log.push(TileEvent::Destroyed {
            coord,
            item: tile.item.clone(),
        });
        Some(tile)
    }

    /// Number of materialized coordinates (empty or occupied).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of coordinates currently holding an object.
    pub fn occupied_count(&self) -> usize {
        self.tiles
            .values()
            .filter(|s| matches!(s, TileState::Occupied(_)))
            .count()
    }

    /// Number of tiles destroyed so far.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Read-only access to all materialized tiles (deterministic order).
    pub fn tiles(&self) -> &BTreeMap<TileCoord, TileState> {
        &self.tiles
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<TileEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[TileEvent] {
        &self.event_log
    }

    /// Compute a deterministic hash of the materialized content.
    ///
    /// Destruction progress is transient and excluded.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (coord, state) in &self.tiles {
            mix(&mut h, &coord.x.to_le_bytes());
            mix(&mut h, &coord.y.to_le_bytes());
            match state {
                TileState::Empty => mix(&mut h, &[0]),
                TileState::Occupied(tile) => {
                    mix(&mut h, &[1]);
                    mix(&mut h, &tile.category.0.to_le_bytes());
                    mix(&mut h, &tile.appearance.0.to_le_bytes());
                    mix(&mut h, &tile.sound.0.to_le_bytes());
                    mix(&mut h, &tile.durability.to_le_bytes());
                    if let Some(item) = &tile.item {
                        mix(&mut h, item.as_str().as_bytes());
                    }
                }
            }
        }
        h
    }
}
