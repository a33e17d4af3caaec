use glam::Vec2;
use isogo_common::{ItemId, TileCoord};
use isogo_input::Pointer;
use isogo_kernel::{Observer, TileStore};
use isogo_render::{AudioSink, Projection};
use isogo_stream::RenderMembership;
use serde::{Deserialize, Serialize};

/// Progress units gained per second of continuous hold.
pub const DEFAULT_RATE: f32 = 81.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestructionConfig {
    /// Progress units per second while held over a tile.
    pub rate: f32,
}

impl Default for DestructionConfig {
    fn default() -> Self {
        Self { rate: DEFAULT_RATE }
    }
}

/// A tile destroyed during one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Destroyed {
    pub coord: TileCoord,
    pub item: Option<ItemId>,
}

/// World state the destruction pass reads and mutates.
pub struct DestructionScene<'a> {
    pub store: &'a mut TileStore,
    pub membership: &'a mut RenderMembership,
    pub observer: &'a mut Observer,
}

/// Progressive destruction of visible tiles under a held pointer.
///
/// Each visible tile is evaluated on its own: hovered and held accrues
/// `rate / fps` progress, anything else resets progress to zero. Reaching the
/// tile's durability destroys it within the same pass.
#[derive(Debug, Clone, Default)]
pub struct Destruction {
    pub config: DestructionConfig,
}

impl Destruction {
    pub fn new(config: DestructionConfig) -> Self {
        Self { config }
    }

    /// Resolve the pointer against every render member for one tick.
    ///
    /// With an unusable `fps` (zero before a rate estimate exists) hovered
    /// tiles keep their progress unchanged for the tick.
    pub fn resolve(
        &self,
        scene: DestructionScene<'_>,
        projection: &Projection,
        pointer: Pointer,
        fps: f32,
        audio: &mut dyn AudioSink,
    ) -> Vec<Destroyed> {
        let DestructionScene {
            store,
            membership,
            observer,
        } = scene;
        let rate_known = fps.is_finite() && fps > 0.0;
        let at = observer.position();
        let visible: Vec<TileCoord> = membership.iter().collect();
        let mut destroyed = Vec::new();

        for coord in visible {
            let Some(tile) = store.occupied_mut(coord) else {
                continue;
            };
            if !is_hovered(projection, coord, at, pointer) {
                tile.progress = 0.0;
                continue;
            }
            if !rate_known {
                continue;
            }
            tile.progress += self.config.rate / fps;
            if !tile.is_spent() {
                continue;
            }

            let Some(payload) = store.mark_destroyed(coord) else {
                continue;
            };
            membership.remove(coord);
            audio.play(payload.sound);
            if let Some(item) = &payload.item {
                observer.collect(item.clone());
            }
            tracing::debug!(%coord, item = ?payload.item, "tile destroyed");
            destroyed.push(Destroyed {
                coord,
                item: payload.item,
            });
        }
        destroyed
    }
}

fn is_hovered(projection: &Projection, coord: TileCoord, observer: Vec2, pointer: Pointer) -> bool {
    pointer.held && projection.tile_rect(coord, observer).contains(pointer.position)
}
