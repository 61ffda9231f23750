use crate::api::types::SfxId;

/// Hard cap on registered sound effect slots.
pub const MAX_SOUNDS: usize = 16;

/// A playback command emitted toward the audio collaborator. The core never
/// mixes or decodes anything; the shell drains these once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundCommand {
    /// Play a registered effect slot at default pitch.
    Fx(SfxId),
    /// Play a registered effect slot with a pitch multiplier (1.0 = normal).
    FxPitched(SfxId, f32),
    /// Start a background track, replacing the current one.
    Music(String),
}

/// Registry of sound effect slots plus the per-frame command queue.
///
/// Unknown or out-of-range handles are ignored: a missing sound degrades to
/// silence, never to an error.
pub struct SoundBank {
    paths: Vec<String>,
    commands: Vec<SoundCommand>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self {
            paths: Vec::with_capacity(MAX_SOUNDS),
            commands: Vec::new(),
        }
    }

    /// Register a sound effect, returning its slot handle.
    /// Returns `None` once all slots are taken.
    pub fn register(&mut self, path: &str) -> Option<SfxId> {
        if self.paths.len() >= MAX_SOUNDS {
            log::warn!("sound bank full ({} slots), dropping {}", MAX_SOUNDS, path);
            return None;
        }
        self.paths.push(path.to_string());
        Some(SfxId(self.paths.len() as u32 - 1))
    }

    /// Path registered for a slot, if any.
    pub fn path(&self, id: SfxId) -> Option<&str> {
        self.paths.get(id.0 as usize).map(String::as_str)
    }

    /// Queue a registered effect for playback. Unregistered ids are a no-op.
    pub fn play_fx(&mut self, id: SfxId) {
        if (id.0 as usize) < self.paths.len() {
            self.commands.push(SoundCommand::Fx(id));
        }
    }

    /// Queue a registered effect with a pitch multiplier. Unregistered ids
    /// are a no-op.
    pub fn play_fx_with_pitch(&mut self, id: SfxId, pitch: f32) {
        if (id.0 as usize) < self.paths.len() {
            self.commands.push(SoundCommand::FxPitched(id, pitch));
        }
    }

    /// Queue a background track change.
    pub fn play_music(&mut self, path: &str) {
        self.commands.push(SoundCommand::Music(path.to_string()));
    }

    /// Pending commands for this frame.
    pub fn commands(&self) -> &[SoundCommand] {
        &self.commands
    }

    /// Drain the per-frame command queue (called by the shell).
    pub fn drain_commands(&mut self) -> Vec<SoundCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn slot_count(&self) -> usize {
        self.paths.len()
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::new()
    }
}
