use isogo_common::SoundId;

/// Output side of the audio backend.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
}

/// Sink that records every played sound, in order.
#[derive(Debug, Default)]
pub struct AudioLog {
    played: Vec<SoundId>,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[SoundId] {
        &self.played
    }
}

impl AudioSink for AudioLog {
    fn play(&mut self, sound: SoundId) {
        tracing::debug!(?sound, "play");
        self.played.push(sound);
    }
}
