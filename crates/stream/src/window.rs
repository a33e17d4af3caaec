use glam::Vec2;
use isogo_common::TileCoord;
use isogo_kernel::{StoreError, TileKind, TileStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::generation::GenerationPolicy;

/// Streaming configuration: render distance and scan window size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Maximum Euclidean distance (in tiles) at which an object is drawn.
    pub render_distance: i32,
    /// Scan window half-extent as a multiple of the render distance.
    pub window_scale: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            render_distance: 6,
            window_scale: 1.2,
        }
    }
}

impl StreamConfig {
    /// Half the side of the square scan window, never smaller than the
    /// render distance so every drawable tile is scanned.
    pub fn half_extent(&self) -> i32 {
        let scaled = (self.render_distance as f32 * self.window_scale).floor() as i32;
        scaled.max(self.render_distance).max(0)
    }
}

/// Coordinates currently eligible for drawing.
///
/// A view over the tile store, never authoritative. Adding a member twice or
/// removing an absent one is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMembership {
    members: BTreeSet<TileCoord>,
}

impl RenderMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the coordinate was not already a member.
    pub fn add(&mut self, coord: TileCoord) -> bool {
        self.members.insert(coord)
    }

    /// Returns `true` if the coordinate was a member.
    pub fn remove(&mut self, coord: TileCoord) -> bool {
        self.members.remove(&coord)
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.members.contains(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Membership changes produced by one scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanDelta {
    pub added: Vec<TileCoord>,
    pub removed: Vec<TileCoord>,
}

impl ScanDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Per-scan statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub scanned: usize,
    pub materialized_this_scan: usize,
    pub added_this_scan: usize,
    pub removed_this_scan: usize,
    pub members: usize,
    pub scan_time: Duration,
}

/// Tick driver for the world window around the observer.
///
/// Each scan materializes unseen coordinates in the square window and
/// recomputes render membership for every occupied tile it touches.
#[derive(Debug)]
pub struct WorldStreamer {
    pub config: StreamConfig,
    policy: GenerationPolicy,
    rng: ChaCha8Rng,
    membership: RenderMembership,
    stats: StreamStats,
}

impl WorldStreamer {
    /// Create a streamer. With `seed` set, generation is reproducible.
    pub fn new(config: StreamConfig, policy: GenerationPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            policy,
            rng,
            membership: RenderMembership::new(),
            stats: StreamStats::default(),
        }
    }

    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    pub fn membership(&self) -> &RenderMembership {
        &self.membership
    }

    /// Mutable membership, for out-of-band removals such as destruction.
    pub fn membership_mut(&mut self) -> &mut RenderMembership {
        &mut self.membership
    }

    /// Statistics from the last scan.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Scan the window around `observer`, returning the membership delta.
    ///
    /// Every coordinate in the window is re-examined on every call, since
    /// destruction can change a tile's renderability between scans. Members
    /// that fell outside the window are re-checked as well.
    pub fn update(&mut self, store: &mut TileStore, observer: Vec2) -> Result<ScanDelta, StoreError> {
        let _span = tracing::info_span!("window_scan").entered();
        let scan_start = Instant::now();

        let center = TileCoord::nearest(observer);
        let half = self.config.half_extent();
        let radius = self.config.render_distance as f32;
        let mut delta = ScanDelta::default();
        let mut materialized = 0;

        for x in center.x - half..=center.x + half {
            for y in center.y - half..=center.y + half {
                let coord = TileCoord::new(x, y);
                match store.kind(coord) {
                    TileKind::Unmaterialized => {
                        self.policy.materialize(store, coord, &mut self.rng)?;
                        materialized += 1;
                        if store.kind(coord) == TileKind::Occupied {
                            self.apply(coord, observer, radius, &mut delta);
                        }
                    }
                    TileKind::Occupied => self.apply(coord, observer, radius, &mut delta),
                    TileKind::Empty => {}
                }
            }
        }

        let stale: Vec<TileCoord> = self
            .membership
            .iter()
            .filter(|c| {
                (c.x - center.x).abs() > half
                    || (c.y - center.y).abs() > half
                    || store.kind(*c) != TileKind::Occupied
            })
            .collect();
        for coord in stale {
            if store.kind(coord) != TileKind::Occupied || coord.distance_to(observer) > radius {
                self.membership.remove(coord);
                delta.removed.push(coord);
            }
        }

        let side = (2 * half + 1) as usize;
        self.stats = StreamStats {
            scanned: side * side,
            materialized_this_scan: materialized,
            added_this_scan: delta.added.len(),
            removed_this_scan: delta.removed.len(),
            members: self.membership.len(),
            scan_time: scan_start.elapsed(),
        };

        tracing::trace!(
            %center,
            materialized,
            added = delta.added.len(),
            removed = delta.removed.len(),
            members = self.membership.len(),
            "window scan complete"
        );

        Ok(delta)
    }

    fn apply(&mut self, coord: TileCoord, observer: Vec2, radius: f32, delta: &mut ScanDelta) {
        if coord.distance_to(observer) > radius {
            if self.membership.remove(coord) {
                tracing::debug!(%coord, "tile left render distance");
                delta.removed.push(coord);
            }
        } else if self.membership.add(coord) {
            tracing::debug!(%coord, "tile entered render distance");
            delta.added.push(coord);
        }
    }
}
