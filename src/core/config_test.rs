#[cfg(test)]
mod tests {

    use std::path::PathBuf;
    use crate::core::AppConfig;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("zen-pomodoro-config-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(config.output_device_name.is_none());
        assert!(config.sounds_directory.is_none());
        assert!(!config.start_in_test_mode);
        assert!(config.sounds_dir().ends_with("sounds"));
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig {
            output_device_name: Some("Speakers".to_string()),
            sounds_directory: Some(PathBuf::from("/tmp/sounds")),
            start_in_test_mode: true,
        };

        let serialized = serde_json::to_string(&config).expect("Failed to serialize config");
        let deserialized: AppConfig = serde_json::from_str(&serialized).expect("Failed to deserialize config");

        assert_eq!(deserialized.output_device_name.as_deref(), Some("Speakers"));
        assert_eq!(deserialized.sounds_dir(), PathBuf::from("/tmp/sounds"));
        assert!(deserialized.start_in_test_mode);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let old_config_json = r#"{ "output_device_name": "Headphones" }"#;

        let config: AppConfig = serde_json::from_str(old_config_json).expect("Failed to parse old config");

        assert_eq!(config.output_device_name.as_deref(), Some("Headphones"));
        assert!(config.sounds_directory.is_none());
        assert!(!config.start_in_test_mode);
    }

    #[test]
    fn test_load_creates_default_file() {
        let path = temp_config_path("create");
        let _ = std::fs::remove_file(&path);

        let config = AppConfig::load_from(&path).expect("Failed to load config");

        assert!(!config.start_in_test_mode);
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_replaces_broken_file() {
        let path = temp_config_path("broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let config = AppConfig::load_from(&path).expect("Broken config should fall back to defaults");

        assert!(config.output_device_name.is_none());
        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<AppConfig>(&rewritten).is_ok());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_config_path("roundtrip");
        let config = AppConfig {
            start_in_test_mode: true,
            ..AppConfig::default()
        };

        config.save_to(&path).expect("Failed to save config");
        let loaded = AppConfig::load_from(&path).expect("Failed to reload config");

        assert!(loaded.start_in_test_mode);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
