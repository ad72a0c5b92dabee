pub mod catalog;
pub mod device_manager;
pub mod rodio_backend;
pub mod session;
pub mod sound_generator;

#[cfg(test)]
pub mod fake_backend;
#[cfg(test)]
mod tests;

pub use catalog::{default_sound, find_sound, SoundOption, SOUND_OPTIONS};
pub use rodio_backend::RodioBackend;
pub use session::{AudioError, AudioSession};
pub use sound_generator::{default_sounds_dir, ensure_catalog_sounds};
