use crate::audio::catalog::SoundSource;
use crate::audio::session::{AudioBackend, AudioError, LoadedSound};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(SoundSource),
    SetVolume(usize, f32),
    Play(usize),
    Stop(usize),
    Unload(usize),
}

#[derive(Debug, Default)]
pub struct FakeAudioLog {
    pub calls: Vec<Call>,
    pub live_handles: Vec<usize>,
    pub next_id: usize,
    pub fail_load: bool,
    pub fail_play: bool,
    pub fail_stop: bool,
}

impl FakeAudioLog {
    pub fn loads(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, Call::Load(_))).count()
    }
}

/// Backend that records every call instead of touching an audio device.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub log: Rc<RefCell<FakeAudioLog>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for FakeBackend {
    fn load(&mut self, source: &SoundSource) -> Result<Box<dyn LoadedSound>, AudioError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Load(source.clone()));
        if log.fail_load {
            return Err(AudioError::Load("fake load failure".to_string()));
        }

        let id = log.next_id;
        log.next_id += 1;
        log.live_handles.push(id);
        Ok(Box::new(FakeSound {
            id,
            log: Rc::clone(&self.log),
        }))
    }
}

struct FakeSound {
    id: usize,
    log: Rc<RefCell<FakeAudioLog>>,
}

impl LoadedSound for FakeSound {
    fn set_volume(&mut self, gain: f32) -> Result<(), AudioError> {
        self.log.borrow_mut().calls.push(Call::SetVolume(self.id, gain));
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Play(self.id));
        if log.fail_play {
            return Err(AudioError::Playback("fake playback failure".to_string()));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Stop(self.id));
        if log.fail_stop {
            return Err(AudioError::Stop("fake stop failure".to_string()));
        }
        Ok(())
    }

    fn unload(self: Box<Self>) -> Result<(), AudioError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Unload(self.id));
        log.live_handles.retain(|id| *id != self.id);
        Ok(())
    }
}
