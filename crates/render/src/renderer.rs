use glam::Vec2;
use isogo_common::{AppearanceId, ScreenRect, TileCoord};
use std::collections::BTreeMap;

use crate::projection::Projection;

/// Renderer-side registry of drawable tiles.
///
/// The registry mirrors render membership through `add`/`remove` deltas and
/// projects every registered tile afresh on each `draw_all`. It never
/// mutates world truth.
pub trait RenderRegistry {
    /// The output type produced by one draw.
    type Output;

    fn add(&mut self, coord: TileCoord, appearance: AppearanceId);

    fn remove(&mut self, coord: TileCoord);

    /// Draw every registered tile as seen from `observer`.
    fn draw_all(&mut self, projection: &Projection, observer: Vec2) -> Self::Output;
}

/// One sprite placed on screen during a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub coord: TileCoord,
    pub appearance: AppearanceId,
    pub rect: ScreenRect,
}

/// Back-to-front placements for all registered tiles that overlap the viewport.
pub fn placements<'a>(
    sprites: impl IntoIterator<Item = (&'a TileCoord, &'a AppearanceId)>,
    projection: &Projection,
    observer: Vec2,
) -> Vec<Placement> {
    let mut out: Vec<Placement> = sprites
        .into_iter()
        .map(|(coord, appearance)| Placement {
            coord: *coord,
            appearance: *appearance,
            rect: projection.tile_rect(*coord, observer),
        })
        .filter(|p| projection.on_screen(&p.rect))
        .collect();
    // Painter's order: higher on screen is further away.
    out.sort_by(|a, b| a.rect.y.total_cmp(&b.rect.y).then(a.rect.x.total_cmp(&b.rect.x)));
    out
}

/// Text registry: renders the registered tiles as a human-readable listing.
///
/// Useful for headless runs, logging, and testing the registry interface.
#[derive(Debug, Default)]
pub struct TextRegistry {
    sprites: BTreeMap<TileCoord, AppearanceId>,
    frames: u64,
}

impl TextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.sprites.contains_key(&coord)
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderRegistry for TextRegistry {
    type Output = String;

    fn add(&mut self, coord: TileCoord, appearance: AppearanceId) {
        self.sprites.insert(coord, appearance);
    }

    fn remove(&mut self, coord: TileCoord) {
        self.sprites.remove(&coord);
    }

    fn draw_all(&mut self, projection: &Projection, observer: Vec2) -> String {
        self.frames += 1;
        let placed = placements(&self.sprites, projection, observer);
        let mut out = format!(
            "=== Frame {} observer=({:.2}, {:.2}) registered={} on_screen={} ===\n",
            self.frames,
            observer.x,
            observer.y,
            self.sprites.len(),
            placed.len()
        );
        for p in &placed {
            out.push_str(&format!(
                "  {} sprite={:#018x} at=({:.0}, {:.0})\n",
                p.coord, p.appearance.0, p.rect.x, p.rect.y
            ));
        }
        out
    }
}
