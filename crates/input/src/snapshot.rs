use glam::Vec2;
use isogo_common::Heading;
use std::collections::VecDeque;

/// Primary pointer state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    /// Screen position in pixels.
    pub position: Vec2,
    /// Whether the primary button is held.
    pub held: bool,
}

impl Pointer {
    pub fn held_at(position: Vec2) -> Self {
        Self {
            position,
            held: true,
        }
    }
}

/// Everything the core reads from input devices during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub heading: Heading,
    pub pointer: Pointer,
    /// Process-level quit request; ends the tick loop.
    pub quit: bool,
}

impl InputSnapshot {
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

/// Per-tick input provider.
pub trait InputSource {
    fn sample(&mut self) -> InputSnapshot;
}

/// Replays a fixed sequence of snapshots, then requests quit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Number of snapshots left before quit.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_else(InputSnapshot::quit)
    }
}

impl<F: FnMut() -> InputSnapshot> InputSource for F {
    fn sample(&mut self) -> InputSnapshot {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_then_quits() {
        let walk = InputSnapshot {
            heading: Heading {
                up: true,
                ..Heading::NONE
            },
            ..InputSnapshot::default()
        };
        let mut input = ScriptedInput::new([walk, InputSnapshot::default()]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.sample(), walk);
        assert!(!input.sample().quit);
        assert!(input.sample().quit);
        assert!(input.sample().quit);
    }

    #[test]
    fn closures_are_input_sources() {
        let mut ticks = 0;
        let mut source = || {
            ticks += 1;
            InputSnapshot {
                pointer: Pointer::held_at(Vec2::new(ticks as f32, 0.0)),
                ..InputSnapshot::default()
            }
        };
        assert_eq!(source.sample().pointer.position.x, 1.0);
        assert_eq!(source.sample().pointer.position.x, 2.0);
    }

    #[test]
    fn default_snapshot_is_idle() {
        let s = InputSnapshot::default();
        assert!(s.heading.is_idle());
        assert!(!s.pointer.held);
        assert!(!s.quit);
    }
}
