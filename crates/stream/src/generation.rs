use isogo_assets::Palette;
use isogo_common::TileCoord;
use isogo_kernel::{OccupiedTile, StoreError, TileState, TileStore};
use rand::Rng;

/// One in `EMPTY_ODDS` rolls leaves a tile permanently empty.
pub const EMPTY_ODDS: u32 = 5;

/// Decides what permanent content an unmaterialized coordinate receives.
#[derive(Debug, Clone)]
pub struct GenerationPolicy {
    palette: Palette,
}

impl GenerationPolicy {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Roll fresh content for one tile.
    ///
    /// A roll of 0 in `[0, EMPTY_ODDS)` yields `Empty`. Otherwise a category
    /// is drawn from the weighted spawn table, and its appearance and sound
    /// variants are each drawn uniformly from the category's pool.
    /// `Palette::resolve` guarantees every spawn slot has an entry.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> TileState {
        if rng.gen_range(0..EMPTY_ODDS) == 0 {
            return TileState::Empty;
        }
        let slot = rng.gen_range(0..self.palette.spawn_table().len());
        let entry = self.palette.spawn_entry(slot);
        let appearance = entry.appearances()[rng.gen_range(0..entry.appearances().len())];
        let sound = entry.sounds()[rng.gen_range(0..entry.sounds().len())];
        TileState::Occupied(OccupiedTile::new(
            entry.category,
            appearance,
            sound,
            entry.durability,
            entry.item.clone(),
        ))
    }

    /// Roll content for `coord` and store it.
    ///
    /// Callers only invoke this for unmaterialized coordinates; a
    /// materialized one is rejected by the store and left untouched.
    pub fn materialize<R: Rng + ?Sized>(
        &self,
        store: &mut TileStore,
        coord: TileCoord,
        rng: &mut R,
    ) -> Result<(), StoreError> {
        if store.is_materialized(coord) {
            return Err(StoreError::AlreadyMaterialized(coord));
        }
        let state = self.roll(rng);
        tracing::trace!(%coord, kind = ?state.kind(), "materializing tile");
        store.put(coord, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isogo_assets::{AssetCache, CatalogDef, NameHashLoader};
    use isogo_kernel::TileKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn policy() -> GenerationPolicy {
        let catalog = CatalogDef::default().compile().unwrap();
        let mut cache = AssetCache::new(NameHashLoader);
        GenerationPolicy::new(Palette::resolve(&catalog, &mut cache).unwrap())
    }

    #[test]
    fn roughly_one_in_five_tiles_is_empty() {
        let policy = policy();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let rolls = 10_000;
        let empty = (0..rolls)
            .filter(|_| matches!(policy.roll(&mut rng), TileState::Empty))
            .count();
        let share = empty as f64 / rolls as f64;
        assert!((0.17..0.23).contains(&share), "empty share {share}");
    }

    #[test]
    fn occupied_tiles_take_category_attributes() {
        let policy = policy();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            if let TileState::Occupied(tile) = policy.roll(&mut rng) {
                let entry = policy.palette().entry(tile.category).unwrap();
                assert_eq!(tile.durability, entry.durability);
                assert_eq!(tile.item, entry.item);
                assert!(entry.appearances().contains(&tile.appearance));
                assert!(entry.sounds().contains(&tile.sound));
                assert_eq!(tile.progress, 0.0);
            }
        }
    }

    #[test]
    fn spawn_table_repetition_weights_categories() {
        let policy = policy();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..12_000 {
            if let TileState::Occupied(tile) = policy.roll(&mut rng) {
                *counts.entry(tile.category).or_insert(0usize) += 1;
            }
        }
        // grass x3, flower x2, stone x1
        let mut sorted: Vec<usize> = counts.values().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted.len(), 3);
        assert!(sorted[0] < sorted[1] && sorted[1] < sorted[2]);
    }

    #[test]
    fn materialize_rejects_existing_coord() {
        let policy = policy();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut store = TileStore::new();
        let c = TileCoord::new(2, -3);
        policy.materialize(&mut store, c, &mut rng).unwrap();
        let before = store.get(c).cloned();

        assert_eq!(
            policy.materialize(&mut store, c, &mut rng),
            Err(StoreError::AlreadyMaterialized(c))
        );
        assert_eq!(store.get(c).cloned(), before);
        assert_ne!(store.kind(c), TileKind::Unmaterialized);
    }

    #[test]
    fn same_seed_same_world() {
        let policy = policy();
        let mut a = TileStore::new();
        let mut b = TileStore::new();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        for x in -5..5 {
            for y in -5..5 {
                policy.materialize(&mut a, TileCoord::new(x, y), &mut rng_a).unwrap();
                policy.materialize(&mut b, TileCoord::new(x, y), &mut rng_b).unwrap();
            }
        }
        assert_eq!(a.state_hash(), b.state_hash());
    }
}
