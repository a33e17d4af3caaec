use std::collections::VecDeque;
use std::time::Duration;

/// Number of recent frames averaged into the frame-rate estimate.
pub const FPS_WINDOW: usize = 10;

/// Source of the current measured frame rate.
pub trait Clock {
    /// Ticks per second. Zero while no estimate exists yet.
    fn fps(&self) -> f32;
}

/// Frame-rate estimate over the most recent frame durations.
///
/// Only the last `window` frames count, so the estimate follows changes in
/// load within a few frames.
#[derive(Debug)]
pub struct FrameTimer {
    recent: VecDeque<Duration>,
    window: usize,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(FPS_WINDOW)
    }
}

impl FrameTimer {
    /// A timer averaging over `window` frames (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            recent: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Record a finished frame, forgetting the oldest one past the window.
    pub fn record(&mut self, frame: Duration) {
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(frame);
    }

    /// Mean duration of the remembered frames; zero before the first.
    pub fn average(&self) -> Duration {
        if self.recent.is_empty() {
            return Duration::ZERO;
        }
        self.recent.iter().sum::<Duration>() / self.recent.len() as u32
    }
}

impl Clock for FrameTimer {
    fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}
