/// Reference to a playable audio resource: a bundled asset id, a URI, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSource {
    pub asset: Option<u32>,
    pub uri: Option<String>,
}

impl SoundSource {
    pub const fn asset(id: u32) -> Self {
        Self {
            asset: Some(id),
            uri: None,
        }
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            asset: None,
            uri: Some(uri.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.asset.is_some() || self.uri.as_deref().map_or(false, |uri| !uri.trim().is_empty())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SoundOption {
    pub label: &'static str,
    pub value: &'static str,
    pub source: SoundSource,
}

pub const CHIMES_ASSET: u32 = 1;
pub const RAIN_ASSET: u32 = 2;
pub const MEDITATION_ASSET: u32 = 3;
pub const TIBETAN_ASSET: u32 = 4;

pub static SOUND_OPTIONS: [SoundOption; 4] = [
    SoundOption { label: "Chimes", value: "chimes", source: SoundSource::asset(CHIMES_ASSET) },
    SoundOption { label: "Rain", value: "rain", source: SoundSource::asset(RAIN_ASSET) },
    SoundOption { label: "Meditation", value: "meditation", source: SoundSource::asset(MEDITATION_ASSET) },
    SoundOption { label: "Tibetan Bowl", value: "tibetan", source: SoundSource::asset(TIBETAN_ASSET) },
];

pub fn default_sound() -> &'static SoundOption {
    &SOUND_OPTIONS[0]
}

pub fn find_sound(value: &str) -> Option<&'static SoundOption> {
    SOUND_OPTIONS.iter().find(|option| option.value == value)
}

/// File name of a bundled asset inside the sounds directory.
pub fn asset_file_name(asset: u32) -> Option<&'static str> {
    match asset {
        CHIMES_ASSET => Some("chime.wav"),
        RAIN_ASSET => Some("rain.wav"),
        MEDITATION_ASSET => Some("meditation.wav"),
        TIBETAN_ASSET => Some("tibetan.wav"),
        _ => None,
    }
}
