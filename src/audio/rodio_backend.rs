use crate::audio::catalog::{asset_file_name, SoundSource};
use crate::audio::device_manager::AudioDeviceManager;
use crate::audio::session::{AudioBackend, AudioError, LoadedSound};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Plays sounds through rodio on a cpal output device.
pub struct RodioBackend {
    device_manager: Option<AudioDeviceManager>,
    output_device_name: Option<String>,
    sounds_dir: PathBuf,
}

impl RodioBackend {
    pub fn new(output_device_name: Option<String>, sounds_dir: PathBuf) -> Self {
        let device_manager = match AudioDeviceManager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                log::warn!("Audio devices unavailable at startup, will retry on playback: {}", e);
                None
            }
        };

        Self {
            device_manager,
            output_device_name,
            sounds_dir,
        }
    }

    fn resolve_path(&self, source: &SoundSource) -> Result<PathBuf, AudioError> {
        if let Some(asset) = source.asset {
            let file_name = asset_file_name(asset)
                .ok_or_else(|| AudioError::Load(format!("unknown sound asset {}", asset)))?;
            return Ok(self.sounds_dir.join(file_name));
        }

        match source.uri.as_deref() {
            Some(uri) => Ok(PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))),
            None => Err(AudioError::InvalidSource),
        }
    }

    fn resolve_device(&mut self) -> Result<cpal::Device, AudioError> {
        if self.device_manager.is_none() {
            let manager = AudioDeviceManager::new().map_err(|e| AudioError::Device(e.to_string()))?;
            self.device_manager = Some(manager);
        }
        let Some(manager) = self.device_manager.as_ref() else {
            return Err(AudioError::Device("no device manager".to_string()));
        };

        let device = match &self.output_device_name {
            Some(name) => {
                log::debug!("Using configured audio device: {}", name);
                manager.get_device_by_name(name)
            }
            None => {
                log::debug!("No device configured, using default audio device");
                manager.get_default_device()
            }
        };

        device.map_err(|e| AudioError::Device(e.to_string()))
    }

    fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
        let file = File::open(path).map_err(|e| {
            log::error!("Failed to open sound file '{}': {}", path.display(), e);
            AudioError::Load(format!("{}: {}", path.display(), e))
        })?;

        Decoder::new(BufReader::new(file)).map_err(|e| {
            log::error!("Failed to decode sound file '{}': {}", path.display(), e);
            AudioError::Load(format!("{}: {}", path.display(), e))
        })
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, source: &SoundSource) -> Result<Box<dyn LoadedSound>, AudioError> {
        let path = self.resolve_path(source)?;
        let decoder = Self::open_decoder(&path)?;
        let device = self.resolve_device()?;

        let (stream, stream_handle) = OutputStream::try_from_device(&device).map_err(|e| {
            log::error!("Failed to create output stream: {}", e);
            AudioError::Device(e.to_string())
        })?;

        let sink = Sink::try_new(&stream_handle).map_err(|e| {
            log::error!("Failed to create audio sink: {}", e);
            AudioError::Device(e.to_string())
        })?;

        // Queued paused so volume is applied before the first sample is heard.
        sink.pause();
        sink.append(decoder);

        log::debug!("Loaded sound file: {}", path.display());
        Ok(Box::new(RodioSound {
            _stream: stream,
            _stream_handle: stream_handle,
            sink,
        }))
    }
}

struct RodioSound {
    // The stream must outlive the sink or playback goes silent.
    _stream: OutputStream,
    _stream_handle: OutputStreamHandle,
    sink: Sink,
}

impl LoadedSound for RodioSound {
    fn set_volume(&mut self, gain: f32) -> Result<(), AudioError> {
        if !(0.0..=1.0).contains(&gain) {
            return Err(AudioError::Playback(format!("gain {} out of range", gain)));
        }
        self.sink.set_volume(gain);
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if self.sink.empty() {
            return Err(AudioError::Playback("nothing queued".to_string()));
        }
        self.sink.play();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.sink.stop();
        Ok(())
    }

    fn unload(self: Box<Self>) -> Result<(), AudioError> {
        self.sink.stop();
        drop(self);
        Ok(())
    }
}
