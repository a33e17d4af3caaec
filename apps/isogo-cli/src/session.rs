use glam::Vec2;
use isogo_assets::Palette;
use isogo_author::{Destroyed, Destruction, DestructionScene};
use isogo_input::{InputSnapshot, InputSource};
use isogo_kernel::{Observer, StoreError, TileEvent, TileStore};
use isogo_render::{AudioSink, Projection, RenderRegistry};
use isogo_stream::{Clock, FrameTimer, GenerationPolicy, RenderMembership, WorldStreamer};
use std::time::Duration;

use crate::config::WorldConfig;

/// What one tick did.
#[derive(Debug)]
pub struct TickReport<O> {
    pub tick: u64,
    pub fps: f32,
    pub added: usize,
    pub removed: usize,
    pub destroyed: Vec<Destroyed>,
    /// Store mutations made during the tick, drained from the store.
    pub events: Vec<TileEvent>,
    pub frame: O,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub destroyed: usize,
}

/// One running world: tile store, observer, streamer and the render/audio
/// collaborators it feeds.
pub struct Session<R, A> {
    store: TileStore,
    observer: Observer,
    streamer: WorldStreamer,
    destruction: Destruction,
    projection: Projection,
    registry: R,
    audio: A,
    ticks: u64,
}

impl<R: RenderRegistry, A: AudioSink> Session<R, A> {
    pub fn new(config: &WorldConfig, palette: Palette, registry: R, audio: A) -> Self {
        Self {
            store: TileStore::new(),
            observer: Observer::new(config.step),
            streamer: WorldStreamer::new(
                config.stream.clone(),
                GenerationPolicy::new(palette),
                config.seed,
            ),
            destruction: Destruction::new(config.destruction.clone()),
            projection: Projection::new(&config.projection),
            registry,
            audio,
            ticks: 0,
        }
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn membership(&self) -> &RenderMembership {
        self.streamer.membership()
    }

    pub fn streamer(&self) -> &WorldStreamer {
        &self.streamer
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick: move, scan, destroy, draw.
    ///
    /// The store's event log is drained into the report, so it never outlives
    /// the tick that produced it.
    pub fn tick(&mut self, input: &InputSnapshot, fps: f32) -> Result<TickReport<R::Output>, StoreError> {
        self.ticks += 1;
        let _span = tracing::trace_span!("tick", n = self.ticks).entered();

        self.observer.integrate(input.heading, fps);
        let at = self.observer.position();

        let delta = self.streamer.update(&mut self.store, at)?;
        for &coord in &delta.removed {
            self.registry.remove(coord);
        }
        for &coord in &delta.added {
            if let Some(tile) = self.store.occupied(coord) {
                self.registry.add(coord, tile.appearance);
            }
        }

        let destroyed = self.destruction.resolve(
            DestructionScene {
                store: &mut self.store,
                membership: self.streamer.membership_mut(),
                observer: &mut self.observer,
            },
            &self.projection,
            input.pointer,
            fps,
            &mut self.audio,
        );
        for d in &destroyed {
            self.registry.remove(d.coord);
        }
        let events = self.store.drain_events();

        let frame = self.registry.draw_all(&self.projection, self.observer.position());
        Ok(TickReport {
            tick: self.ticks,
            fps,
            added: delta.added.len(),
            removed: delta.removed.len(),
            destroyed,
            events,
            frame,
        })
    }

    /// Drive ticks from `input` until it asks to quit.
    ///
    /// The frame rate fed to each tick comes from `timer`, which records a
    /// simulated `frame_time` after every tick, so the first tick always sees
    /// an unknown rate.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        timer: &mut FrameTimer,
        frame_time: Duration,
        mut on_tick: impl FnMut(&TickReport<R::Output>),
    ) -> Result<RunSummary, StoreError> {
        let mut summary = RunSummary::default();
        loop {
            let snapshot = input.sample();
            if snapshot.quit {
                tracing::info!(ticks = summary.ticks, "quit requested");
                break;
            }
            let report = self.tick(&snapshot, timer.fps())?;
            summary.ticks += 1;
            summary.destroyed += report.destroyed.len();
            on_tick(&report);
            timer.record(frame_time);
        }
        Ok(summary)
    }

    /// Hand back the collaborators, ending the session.
    pub fn into_parts(self) -> (R, A) {
        (self.registry, self.audio)
    }
}
