use crate::audio::catalog::{asset_file_name, SOUND_OPTIONS};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

const SAMPLE_RATE: u32 = 44100;

fn wav_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Writes normalized `-1.0..=1.0` samples to a 16-bit WAV file.
pub fn write_wav(output_path: &Path, samples: &[f32]) -> anyhow::Result<()> {
    let mut writer = WavWriter::create(output_path, wav_spec()).map_err(|e| {
        log::error!("Failed to create WAV writer for {}: {}", output_path.display(), e);
        anyhow::anyhow!("Failed to create WAV writer: {}", e)
    })?;

    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value).map_err(|e| {
            log::error!("Failed to write sample to {}: {}", output_path.display(), e);
            anyhow::anyhow!("Failed to write sample: {}", e)
        })?;
    }

    writer.finalize().map_err(|e| {
        log::error!("Failed to finalize WAV file {}: {}", output_path.display(), e);
        anyhow::anyhow!("Failed to finalize WAV file: {}", e)
    })?;

    Ok(())
}

fn sample_count(duration_ms: u32) -> usize {
    (duration_ms as u64 * SAMPLE_RATE as u64 / 1000) as usize
}

/// Three descending bell strikes.
pub fn chimes() -> Vec<f32> {
    let mut samples = vec![0.0; sample_count(2400)];
    let strikes: [(u32, f32); 3] = [(0, 1318.5), (400, 1046.5), (800, 784.0)];

    for (offset_ms, frequency) in strikes {
        let start = sample_count(offset_ms);
        for (i, sample) in samples[start..].iter_mut().enumerate() {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = (-3.0 * t).exp();
            let tone = (2.0 * PI * frequency * t).sin() + 0.4 * (2.0 * PI * frequency * 2.76 * t).sin();
            *sample += 0.18 * envelope * tone;
        }
    }

    samples
}

/// Smoothed noise with a slow swell.
pub fn rain() -> Vec<f32> {
    let total = sample_count(4000);
    let mut state: u32 = 0x2545_f491;
    let mut smoothed = 0.0f32;

    (0..total)
        .map(|i| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = state as f32 / u32::MAX as f32 * 2.0 - 1.0;
            smoothed += 0.15 * (noise - smoothed);

            let t = i as f32 / SAMPLE_RATE as f32;
            let swell = 0.7 + 0.3 * (2.0 * PI * 0.25 * t).sin();
            let fade = fade_envelope(i, total, sample_count(300));
            0.5 * smoothed * swell * fade
        })
        .collect()
}

/// Low drone with a soft fifth above it.
pub fn meditation() -> Vec<f32> {
    let total = sample_count(5000);
    (0..total)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let root = (2.0 * PI * 110.0 * t).sin();
            let fifth = 0.5 * (2.0 * PI * 165.0 * t).sin();
            let shimmer = 0.15 * (2.0 * PI * 440.0 * t).sin() * (2.0 * PI * 0.5 * t).sin();
            0.2 * (root + fifth + shimmer) * fade_envelope(i, total, sample_count(1200))
        })
        .collect()
}

/// Inharmonic partials that decay slowly and beat against each other.
pub fn tibetan_bowl() -> Vec<f32> {
    let total = sample_count(5000);
    let partials: [(f32, f32, f32); 4] = [(220.0, 1.0, 0.6), (221.5, 0.6, 0.6), (592.0, 0.4, 1.1), (1110.0, 0.2, 1.8)];

    (0..total)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let attack = (t / 0.02).min(1.0);
            let tone: f32 = partials
                .iter()
                .map(|&(frequency, amplitude, decay)| amplitude * (-decay * t).exp() * (2.0 * PI * frequency * t).sin())
                .sum();
            0.22 * attack * tone
        })
        .collect()
}

fn fade_envelope(index: usize, total: usize, fade_len: usize) -> f32 {
    if fade_len == 0 {
        return 1.0;
    }
    let fade_in = index as f32 / fade_len as f32;
    let fade_out = total.saturating_sub(index) as f32 / fade_len as f32;
    fade_in.min(fade_out).min(1.0)
}

/// Default location for the generated alert sounds.
pub fn default_sounds_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zen-pomodoro")
        .join("sounds")
}

/// Generates any catalog sound missing from `sounds_dir`.
pub fn ensure_catalog_sounds(sounds_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(sounds_dir).map_err(|e| {
        log::error!("Failed to create sounds directory {}: {}", sounds_dir.display(), e);
        anyhow::anyhow!("Failed to create sounds directory: {}", e)
    })?;

    for option in SOUND_OPTIONS.iter() {
        let Some(file_name) = option.source.asset.and_then(asset_file_name) else {
            continue;
        };
        let path = sounds_dir.join(file_name);
        if path.exists() {
            continue;
        }

        let samples = match option.value {
            "chimes" => chimes(),
            "rain" => rain(),
            "meditation" => meditation(),
            "tibetan" => tibetan_bowl(),
            other => {
                log::warn!("No generator for sound '{}'", other);
                continue;
            }
        };

        write_wav(&path, &samples)?;
        log::info!("Generated {} sound at: {}", option.label, path.display());
    }

    Ok(sounds_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_samples_stay_in_range() {
        for samples in [chimes(), rain(), meditation(), tibetan_bowl()] {
            assert!(!samples.is_empty());
            assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        }
    }

    #[test]
    fn test_ensure_catalog_sounds_writes_every_asset() {
        let dir = std::env::temp_dir().join(format!("zen-pomodoro-sounds-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        ensure_catalog_sounds(&dir).expect("Failed to generate sounds");

        for name in ["chime.wav", "rain.wav", "meditation.wav", "tibetan.wav"] {
            let reader = hound::WavReader::open(dir.join(name)).expect("Generated file should be a WAV");
            assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
            assert!(reader.len() > 0);
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
