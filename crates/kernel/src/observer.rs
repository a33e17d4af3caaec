use glam::Vec2;
use isogo_common::{Heading, ItemId};
use serde::{Deserialize, Serialize};

/// Default per-axis step, in tiles per second.
pub const DEFAULT_STEP: f32 = 4.0;

/// The moving observer the world streams around.
///
/// Owns the continuous position and the append-only inventory of items
/// collected by destroying tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    position: Vec2,
    step: f32,
    inventory: Vec<ItemId>,
}

impl Default for Observer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Observer {
    /// Create an observer at the origin with the given per-axis step.
    pub fn new(step: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            step,
            inventory: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Step used for the right/left diagonals so they roughly match the
    /// speed of up/down, which move both axes by a full step.
    pub fn half_step(&self) -> f32 {
        self.step / 2.0
    }

    /// Advance the position for one tick.
    ///
    /// Displacement per tick is `step / fps`, i.e. `step` tiles per second.
    /// Held directions combine additively. Returns `false` and leaves the
    /// position untouched when `fps` is not a usable rate (zero on the first
    /// ticks, negative or non-finite).
    pub fn integrate(&mut self, heading: Heading, fps: f32) -> bool {
        if !(fps.is_finite() && fps > 0.0) {
            return false;
        }
        let half = self.half_step() / fps;
        let full = self.step / fps;
        let mut delta = Vec2::ZERO;
        if heading.right {
            delta += Vec2::new(half, half);
        }
        if heading.left {
            delta -= Vec2::new(half, half);
        }
        if heading.up {
            delta += Vec2::new(-full, full);
        }
        if heading.down {
            delta += Vec2::new(full, -full);
        }
        self.position += delta;
        true
    }

    /// Items collected so far, in collection order.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    pub fn collect(&mut self, item: ItemId) {
        tracing::debug!(%item, total = self.inventory.len() + 1, "item collected");
        self.inventory.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(right: bool, left: bool, up: bool, down: bool) -> Heading {
        Heading {
            right,
            left,
            up,
            down,
        }
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn observer_starts_at_origin() {
        let o = Observer::default();
        assert_eq!(o.position(), Vec2::ZERO);
        assert_eq!(o.half_step(), DEFAULT_STEP / 2.0);
        assert!(o.inventory().is_empty());
    }

    #[test]
    fn each_direction_moves_along_its_diagonal() {
        let fps = 4.0;
        let cases = [
            (held(true, false, false, false), Vec2::new(0.5, 0.5)),
            (held(false, true, false, false), Vec2::new(-0.5, -0.5)),
            (held(false, false, true, false), Vec2::new(-1.0, 1.0)),
            (held(false, false, false, true), Vec2::new(1.0, -1.0)),
        ];
        for (heading, expected) in cases {
            let mut o = Observer::default();
            assert!(o.integrate(heading, fps));
            assert!(approx(o.position(), expected), "{heading:?} -> {:?}", o.position());
        }
    }

    #[test]
    fn held_directions_combine() {
        let mut o = Observer::default();
        o.integrate(held(true, false, true, false), 4.0);
        assert!(approx(o.position(), Vec2::new(-0.5, 1.5)));

        // Opposite keys cancel out.
        let mut o = Observer::default();
        o.integrate(held(true, true, true, true), 4.0);
        assert!(approx(o.position(), Vec2::ZERO));
    }

    #[test]
    fn unusable_frame_rate_skips_movement() {
        let all = held(true, false, true, false);
        for fps in [0.0, -30.0, f32::NAN, f32::INFINITY] {
            let mut o = Observer::default();
            assert!(!o.integrate(all, fps));
            assert_eq!(o.position(), Vec2::ZERO);
        }
    }

    #[test]
    fn one_second_of_ticks_covers_one_step() {
        let mut o = Observer::default();
        for _ in 0..60 {
            o.integrate(held(false, false, false, true), 60.0);
        }
        assert!(approx(o.position(), Vec2::new(4.0, -4.0)));
    }

    #[test]
    fn inventory_is_append_only_in_order() {
        let mut o = Observer::default();
        o.collect(ItemId::new("flower"));
        o.collect(ItemId::new("stone"));
        o.collect(ItemId::new("flower"));
        let names: Vec<&str> = o.inventory().iter().map(ItemId::as_str).collect();
        assert_eq!(names, ["flower", "stone", "flower"]);
    }
}
