//! speech-bridge configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use speech_chunker::DEFAULT_CHUNK_SIZE;
use std::fs;
use std::path::{Path, PathBuf};

use crate::tts::{MAX_VOLUME, clamp_rate, clamp_volume};

const DEFAULT_VOLUME: u8 = MAX_VOLUME;
const DEFAULT_ENGINE_BIN: &str = "espeak-ng";
const DEFAULT_PLAYER_BIN: &str = "aplay";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Default voice (substring of an installed voice name)
    #[serde(default)]
    pub voice: Option<String>,

    /// Speaking rate (-10 to 10)
    #[serde(default)]
    pub rate: i32,

    /// Volume (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Maximum fragment length in chars
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Output device index. None means the system default.
    #[serde(default)]
    pub device: Option<String>,

    /// TTS engine executable
    #[serde(default = "default_engine_bin")]
    pub engine_bin: String,

    /// Audio player executable
    #[serde(default = "default_player_bin")]
    pub player_bin: String,
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_engine_bin() -> String {
    DEFAULT_ENGINE_BIN.to_string()
}

fn default_player_bin() -> String {
    DEFAULT_PLAYER_BIN.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 0,
            volume: default_volume(),
            chunk_size: default_chunk_size(),
            device: None,
            engine_bin: default_engine_bin(),
            player_bin: default_player_bin(),
        }
    }
}

impl BridgeConfig {
    /// Get the config file path: <config_dir>/speech-bridge/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("speech-bridge")
            .join("config.toml")
    }

    /// Load config from the default path, returning defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: BridgeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config.clamped())
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Bring hand-edited values back into range.
    fn clamped(mut self) -> Self {
        self.rate = clamp_rate(self.rate);
        self.volume = clamp_volume(self.volume.into());
        self.chunk_size = self.chunk_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert!(config.voice.is_none());
        assert_eq!(config.rate, 0);
        assert_eq!(config.volume, 100);
        assert_eq!(config.chunk_size, 50);
        assert!(config.device.is_none());
        assert_eq!(config.engine_bin, "espeak-ng");
        assert_eq!(config.player_bin, "aplay");
    }

    #[test]
    fn test_config_path() {
        let path = BridgeConfig::config_path();
        assert!(path.ends_with("speech-bridge/config.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
voice = "irina"
rate = -3
volume = 80
chunk_size = 120
device = "1"
"#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voice, Some("irina".to_string()));
        assert_eq!(config.rate, -3);
        assert_eq!(config.volume, 80);
        assert_eq!(config.chunk_size, 120);
        assert_eq!(config.device, Some("1".to_string()));
        assert_eq!(config.engine_bin, "espeak-ng");
    }

    #[test]
    fn test_parse_empty_config() {
        let config: BridgeConfig = toml::from_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = BridgeConfig::load_from(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = BridgeConfig {
            voice: Some("english".to_string()),
            rate: 4,
            chunk_size: 80,
            ..BridgeConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_clamps_out_of_range_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "rate = 40\nvolume = 250\nchunk_size = 0\n").unwrap();

        let config = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(config.rate, 10);
        assert_eq!(config.volume, 100);
        assert_eq!(config.chunk_size, 1);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "rate = \"fast\"").unwrap();
        assert!(BridgeConfig::load_from(&path).is_err());
    }
}
