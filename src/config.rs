use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, WIN_LENGTH};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ai: AiConfig,
    pub logging: LoggingConfig,
}

/// Board dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Computer opponent settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Pause before the computer's move is applied, so the human sees their
    /// own piece land first.
    pub move_delay_ms: u64,
    /// Fixed seed for the computer's random tie-breaks.
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            move_delay_ms: 500,
            seed: None,
        }
    }
}

/// Log output. Without a file no subscriber is installed, since the terminal
/// belongs to the UI.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = WIN_LENGTH..=MAX_DIMENSION;
        if !range.contains(&self.game.width) {
            return Err(ConfigError::Validation(format!(
                "game.width must be in [{WIN_LENGTH}, {MAX_DIMENSION}]"
            )));
        }
        if !range.contains(&self.game.height) {
            return Err(ConfigError::Validation(format!(
                "game.height must be in [{WIN_LENGTH}, {MAX_DIMENSION}]"
            )));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.width, 7);
        assert_eq!(config.game.height, 6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[ai]
seed = 17
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ai.seed, Some(17));
        // Other fields should be defaults
        assert_eq!(config.ai.move_delay_ms, 500);
        assert_eq!(config.game.width, 7);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game.height, DEFAULT_HEIGHT);
        assert_eq!(config.ai.seed, None);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_validation_rejects_narrow_board() {
        let mut config = AppConfig::default();
        config.game.width = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let mut config = AppConfig::default();
        config.game.height = MAX_DIMENSION + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_filter() {
        let mut config = AppConfig::default();
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.width, 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
width = 9
height = 7

[logging]
file = "game.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.width, 9);
        assert_eq!(config.game.height, 7);
        assert_eq!(config.logging.file, Some(PathBuf::from("game.log")));
        // Others are defaults
        assert_eq!(config.ai.move_delay_ms, 500);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nwidth = 2\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[game\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
