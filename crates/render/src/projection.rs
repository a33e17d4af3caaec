use glam::Vec2;
use isogo_common::{ScreenRect, TileCoord};
use serde::{Deserialize, Serialize};

/// Screen geometry of the isometric view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Horizontal screen offset between diagonally adjacent tiles.
    pub tile_half_width: f32,
    /// Vertical screen offset between diagonally adjacent tiles.
    pub tile_half_height: f32,
    /// Viewport size in pixels; the projection origin is its centre.
    pub viewport: [f32; 2],
    /// Sprite extents used for pointer hit testing. Defaults to one full
    /// tile diamond (twice the half extents).
    pub sprite_size: Option<[f32; 2]>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            tile_half_width: 254.0,
            tile_half_height: 146.0,
            viewport: [1920.0, 1080.0],
            sprite_size: None,
        }
    }
}

/// Axonometric mapping from tile coordinates to screen space.
///
/// Pure: every call depends only on its arguments and the fixed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    half: Vec2,
    origin: Vec2,
    viewport: Vec2,
    sprite: Vec2,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default())
    }
}

impl Projection {
    pub fn new(config: &ProjectionConfig) -> Self {
        let half = Vec2::new(config.tile_half_width, config.tile_half_height);
        let viewport = Vec2::from(config.viewport);
        Self {
            half,
            origin: viewport / 2.0,
            viewport,
            sprite: config.sprite_size.map_or(half * 2.0, Vec2::from),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Screen anchor of `tile` as seen from the continuous `observer` position.
    pub fn anchor(&self, tile: TileCoord, observer: Vec2) -> Vec2 {
        let d = tile.as_vec2() - observer;
        Vec2::new(
            (d.x + d.y) * self.half.x + self.origin.x,
            (d.x - d.y) * self.half.y + self.origin.y,
        )
    }

    /// Bounding rectangle of a tile's sprite, top-left at its anchor.
    pub fn tile_rect(&self, tile: TileCoord, observer: Vec2) -> ScreenRect {
        let a = self.anchor(tile, observer);
        ScreenRect::new(a.x, a.y, self.sprite.x, self.sprite.y)
    }

    /// Whether any part of `rect` overlaps the viewport.
    pub fn on_screen(&self, rect: &ScreenRect) -> bool {
        rect.x < self.viewport.x
            && rect.x + rect.width > 0.0
            && rect.y < self.viewport.y
            && rect.y + rect.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn observer_tile_lands_on_origin() {
        let p = Projection::default();
        assert_eq!(p.anchor(TileCoord::new(0, 0), Vec2::ZERO), Vec2::new(960.0, 540.0));
        assert!(approx(
            p.anchor(TileCoord::new(3, -2), Vec2::new(3.0, -2.0)),
            p.origin()
        ));
    }

    #[test]
    fn diagonal_neighbours_are_staggered() {
        let p = Projection::default();
        let o = Vec2::ZERO;
        let base = p.anchor(TileCoord::new(0, 0), o);
        assert_eq!(p.anchor(TileCoord::new(1, 0), o) - base, Vec2::new(254.0, 146.0));
        assert_eq!(p.anchor(TileCoord::new(0, 1), o) - base, Vec2::new(254.0, -146.0));
        // (1, 1) sits on the same row, one diamond to the right.
        assert_eq!(p.anchor(TileCoord::new(1, 1), o) - base, Vec2::new(508.0, 0.0));
    }

    #[test]
    fn fractional_observer_shifts_every_tile() {
        let p = Projection::default();
        let t = TileCoord::new(2, 1);
        let a = p.anchor(t, Vec2::ZERO);
        let b = p.anchor(t, Vec2::new(0.25, 0.0));
        assert!(approx(a - b, Vec2::new(254.0 * 0.25, 146.0 * 0.25)));
    }

    #[test]
    fn tile_rect_uses_sprite_size() {
        let p = Projection::new(&ProjectionConfig {
            sprite_size: Some([100.0, 50.0]),
            ..ProjectionConfig::default()
        });
        let r = p.tile_rect(TileCoord::new(0, 0), Vec2::ZERO);
        assert_eq!(r, ScreenRect::new(960.0, 540.0, 100.0, 50.0));

        let d = Projection::default().tile_rect(TileCoord::new(0, 0), Vec2::ZERO);
        assert_eq!((d.width, d.height), (508.0, 292.0));
    }

    #[test]
    fn on_screen_culls_far_tiles() {
        let p = Projection::default();
        assert!(p.on_screen(&p.tile_rect(TileCoord::new(0, 0), Vec2::ZERO)));
        assert!(!p.on_screen(&p.tile_rect(TileCoord::new(10, 10), Vec2::ZERO)));
    }
}
