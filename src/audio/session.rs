use crate::audio::catalog::SoundSource;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("invalid sound source")]
    InvalidSource,
    #[error("audio device unavailable: {0}")]
    Device(String),
    #[error("failed to load sound: {0}")]
    Load(String),
    #[error("failed to start playback: {0}")]
    Playback(String),
    #[error("failed to stop sound: {0}")]
    Stop(String),
}

/// Platform side of the audio session: turns a source into a playable handle.
pub trait AudioBackend {
    fn load(&mut self, source: &SoundSource) -> Result<Box<dyn LoadedSound>, AudioError>;
}

/// A loaded sound owned by the session until it is unloaded.
pub trait LoadedSound {
    /// Gain in `0.0..=1.0`.
    fn set_volume(&mut self, gain: f32) -> Result<(), AudioError>;
    fn play(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self) -> Result<(), AudioError>;
    /// Releases the underlying resource.
    fn unload(self: Box<Self>) -> Result<(), AudioError>;
}

/// Maps a 0-100 volume onto a playback gain.
pub fn volume_to_gain(volume: u8) -> f32 {
    f32::from(volume.min(100)) / 100.0
}

/// Holds at most one loaded sound at a time.
pub struct AudioSession {
    backend: Box<dyn AudioBackend>,
    loaded: Option<Box<dyn LoadedSound>>,
}

impl AudioSession {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            loaded: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Plays `source` at `volume` (0-100), releasing any sound that is already loaded first.
    pub fn play(&mut self, source: Option<&SoundSource>, volume: u8) -> Result<(), AudioError> {
        let source = match source {
            Some(source) if source.is_valid() => source,
            other => {
                log::error!("Rejecting invalid sound source: {:?}", other);
                return Err(AudioError::InvalidSource);
            }
        };

        self.release_loaded();

        let mut sound = self.backend.load(source).map_err(|e| {
            log::error!("Failed to load sound {:?}: {}", source, e);
            e
        })?;

        let gain = volume_to_gain(volume);
        if let Err(e) = sound.set_volume(gain).and_then(|_| sound.play()) {
            log::error!("Failed to play sound {:?}: {}", source, e);
            if let Err(unload_err) = sound.unload() {
                log::warn!("Failed to release sound after playback error: {}", unload_err);
            }
            return Err(e);
        }

        log::info!("Playing sound at volume {}%", volume.min(100));
        self.loaded = Some(sound);
        Ok(())
    }

    /// Stops and releases the loaded sound. Does nothing when no sound is loaded.
    pub fn stop(&mut self) {
        if self.loaded.is_none() {
            return;
        }
        log::debug!("Stopping current sound");
        self.release_loaded();
    }

    fn release_loaded(&mut self) {
        let Some(mut sound) = self.loaded.take() else {
            return;
        };

        if let Err(e) = sound.stop() {
            log::warn!("Failed to stop sound: {}", e);
        }
        if let Err(e) = sound.unload() {
            log::warn!("Failed to release sound: {}", e);
        }
    }
}

impl Drop for AudioSession {
    fn drop(&mut self) {
        self.release_loaded();
    }
}
