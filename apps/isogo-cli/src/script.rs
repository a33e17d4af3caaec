use clap::ValueEnum;
use glam::Vec2;
use isogo_common::Heading;
use isogo_input::{InputSnapshot, Pointer};
use isogo_render::Projection;

/// Ticks per leg of the walk loop.
const WALK_LEG: u64 = 120;
/// Ticks spent digging before stepping aside.
const DIG_HOLD: u64 = 60;
/// Ticks spent walking between digs.
const DIG_WALK: u64 = 30;

/// Canned input patterns for headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Script {
    /// No input at all.
    Idle,
    /// Walk a square loop: up, right, down, left.
    Walk,
    /// Hold the pointer near screen centre, stepping right between digs.
    Dig,
}

impl Script {
    /// Input for the `tick`-th frame, with the pointer aimed at `target`.
    pub fn frame(self, tick: u64, target: Vec2) -> InputSnapshot {
        match self {
            Script::Idle => InputSnapshot::default(),
            Script::Walk => {
                let mut heading = Heading::NONE;
                match (tick / WALK_LEG) % 4 {
                    0 => heading.up = true,
                    1 => heading.right = true,
                    2 => heading.down = true,
                    _ => heading.left = true,
                }
                InputSnapshot {
                    heading,
                    ..InputSnapshot::default()
                }
            }
            Script::Dig => {
                if tick % (DIG_HOLD + DIG_WALK) < DIG_HOLD {
                    InputSnapshot {
                        pointer: Pointer::held_at(target),
                        ..InputSnapshot::default()
                    }
                } else {
                    InputSnapshot {
                        heading: Heading {
                            right: true,
                            ..Heading::NONE
                        },
                        pointer: Pointer {
                            position: target,
                            held: false,
                        },
                        quit: false,
                    }
                }
            }
        }
    }

    /// Input source replaying this script for `ticks` ticks, then quitting.
    pub fn source(self, ticks: u64, target: Vec2) -> impl FnMut() -> InputSnapshot {
        let mut tick = 0;
        move || {
            if tick >= ticks {
                return InputSnapshot::quit();
            }
            let frame = self.frame(tick, target);
            tick += 1;
            frame
        }
    }
}

/// Pointer target just inside the sprite of the tile the observer stands on.
pub fn dig_target(projection: &Projection) -> Vec2 {
    projection.origin() + Vec2::splat(16.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isogo_input::InputSource;

    #[test]
    fn quits_after_last_scripted_tick() {
        let mut input = Script::Idle.source(2, Vec2::ZERO);
        assert!(!input.sample().quit);
        assert!(!input.sample().quit);
        assert!(input.sample().quit);
        assert!(input.sample().quit);
    }

    #[test]
    fn walk_cycles_through_headings() {
        let up = Script::Walk.frame(0, Vec2::ZERO).heading;
        assert!(up.up && !up.right);
        let right = Script::Walk.frame(WALK_LEG, Vec2::ZERO).heading;
        assert!(right.right && !right.up);
        let again = Script::Walk.frame(WALK_LEG * 4, Vec2::ZERO).heading;
        assert_eq!(again, up);
    }

    #[test]
    fn dig_holds_then_walks() {
        let target = Vec2::new(970.0, 550.0);
        let dig = Script::Dig.frame(0, target);
        assert_eq!(dig.pointer, Pointer::held_at(target));
        assert!(dig.heading.is_idle());

        let walk = Script::Dig.frame(DIG_HOLD, target);
        assert!(!walk.pointer.held);
        assert!(walk.heading.right);
    }
}
