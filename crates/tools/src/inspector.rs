use isogo_common::{ItemId, TileCoord};
use isogo_kernel::{Observer, TileKind, TileStore};
use isogo_stream::RenderMembership;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the tile store for debugging and
/// headless run reports.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(
        store: &TileStore,
        membership: &RenderMembership,
        observer: &Observer,
    ) -> WorldSummary {
        let occupied = store.occupied_count();
        let p = observer.position();
        WorldSummary {
            materialized: store.len(),
            occupied,
            empty: store.len() - occupied,
            destroyed: store.destroyed_count(),
            visible: membership.len(),
            inventory: observer.inventory().len(),
            observer: [p.x, p.y],
            state_hash: store.state_hash(),
        }
    }

    /// Details of one coordinate, or `None` if it is unmaterialized.
    pub fn inspect_tile(store: &TileStore, coord: TileCoord) -> Option<TileInfo> {
        let state = store.get(coord)?;
        let tile = state.as_occupied();
        Some(TileInfo {
            coord,
            kind: state.kind(),
            durability: tile.map(|t| t.durability),
            progress: tile.map(|t| t.progress),
            item: tile.and_then(|t| t.item.clone()),
        })
    }

    /// Inventory item counts, sorted by item.
    pub fn inventory_counts(observer: &Observer) -> Vec<(ItemId, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for item in observer.inventory() {
            *counts.entry(item.clone()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub materialized: usize,
    pub occupied: usize,
    pub empty: usize,
    pub destroyed: usize,
    pub visible: usize,
    pub inventory: usize,
    pub observer: [f32; 2],
    pub state_hash: u64,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tiles={} occupied={} empty={} destroyed={} visible={} inventory={} observer=({:.2}, {:.2}) hash={:#x}",
            self.materialized,
            self.occupied,
            self.empty,
            self.destroyed,
            self.visible,
            self.inventory,
            self.observer[0],
            self.observer[1],
            self.state_hash,
        )
    }
}

/// Detailed info about a single materialized tile.
#[derive(Debug, Clone)]
pub struct TileInfo {
    pub coord: TileCoord,
    pub kind: TileKind,
    pub durability: Option<f32>,
    pub progress: Option<f32>,
    pub item: Option<ItemId>,
}

impl std::fmt::Display for TileInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile {} {:?}", self.coord, self.kind)?;
        if let (Some(d), Some(p)) = (self.durability, self.progress) {
            write!(f, " progress={p:.1}/{d:.1}")?;
        }
        if let Some(item) = &self.item {
            write!(f, " item={item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isogo_common::{AppearanceId, CategoryId, SoundId};
    use isogo_kernel::{OccupiedTile, TileState};

    fn flower() -> TileState {
        TileState::Occupied(OccupiedTile::new(
            CategoryId(1),
            AppearanceId(1),
            SoundId(1),
            40.0,
            Some(ItemId::new("flower")),
        ))
    }

    #[test]
    fn summary_empty_world() {
        let summary = WorldInspector::summary(
            &TileStore::new(),
            &RenderMembership::new(),
            &Observer::default(),
        );
        assert_eq!(summary.materialized, 0);
        assert_eq!(summary.visible, 0);
    }

    #[test]
    fn summary_counts_tiles() {
        let mut store = TileStore::new();
        store.put(TileCoord::new(0, 0), flower()).unwrap();
        store.put(TileCoord::new(0, 1), flower()).unwrap();
        store.put(TileCoord::new(1, 0), TileState::Empty).unwrap();
        store.mark_destroyed(TileCoord::new(0, 1));
        let mut membership = RenderMembership::new();
        membership.add(TileCoord::new(0, 0));

        let summary = WorldInspector::summary(&store, &membership, &Observer::default());
        assert_eq!(summary.materialized, 3);
        assert_eq!(summary.occupied, 1);
        assert_eq!(summary.empty, 2);
        assert_eq!(summary.destroyed, 1);
        assert_eq!(summary.visible, 1);
    }

    #[test]
    fn inspect_tile_found() {
        let mut store = TileStore::new();
        store.put(TileCoord::new(2, 2), flower()).unwrap();
        let info = WorldInspector::inspect_tile(&store, TileCoord::new(2, 2)).unwrap();
        assert_eq!(info.kind, TileKind::Occupied);
        assert_eq!(info.durability, Some(40.0));
        assert!(info.to_string().contains("item=flower"));
    }

    #[test]
    fn inspect_tile_not_found() {
        assert!(WorldInspector::inspect_tile(&TileStore::new(), TileCoord::new(9, 9)).is_none());
    }

    #[test]
    fn inventory_counts_group_items() {
        let mut observer = Observer::default();
        observer.collect(ItemId::new("stone"));
        observer.collect(ItemId::new("flower"));
        observer.collect(ItemId::new("stone"));
        let counts = WorldInspector::inventory_counts(&observer);
        assert_eq!(
            counts,
            vec![(ItemId::new("flower"), 1), (ItemId::new("stone"), 2)]
        );
    }

    #[test]
    fn summary_display() {
        let summary = WorldInspector::summary(
            &TileStore::new(),
            &RenderMembership::new(),
            &Observer::default(),
        );
        let s = format!("{summary}");
        assert!(s.contains("tiles=0"));
    }
}
