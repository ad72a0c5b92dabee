use crate::audio::default_sounds_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration stored on disk. Alert preferences are not part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output device for alert sounds. `None` uses the system default.
    pub output_device_name: Option<String>,
    /// Where the generated alert sounds live. `None` uses the config directory.
    pub sounds_directory: Option<PathBuf>,
    /// Start with the 5 second test duration instead of a full pomodoro.
    pub start_in_test_mode: bool,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            log::info!("No config file found, creating default config");
            let config = Self::default();
            config
                .save_to(config_path)
                .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
            log::info!("Created new config file at {}", config_path.display());
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file at {}: {}", config_path.display(), e))?;

        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                log::info!("Loaded existing config from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                log::warn!("Config file exists but has issues ({}), replacing it with defaults", e);
                let config = Self::default();
                config
                    .save_to(config_path)
                    .map_err(|save_err| anyhow::anyhow!("Failed to save new config: {}", save_err))?;
                Ok(config)
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zen-pomodoro")
            .join("config.json")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.sounds_directory.clone().unwrap_or_else(default_sounds_dir)
    }
}
