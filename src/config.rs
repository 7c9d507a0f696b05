//! Handheld configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_tictactoe::RESET_DELAY_MS;
use tracing::{debug, info, instrument};

/// Timing, logging and key bindings for the simulated handheld.
///
/// Deserializing always validates, whatever the source format.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawHandheldConfig")]
pub struct HandheldConfig {
    /// How long a finished game stays on screen before resetting.
    reset_delay_ms: u64,
    /// Wait before rebooting after the display fails to come up.
    restart_delay_ms: u64,
    /// Poll interval of the main loop.
    tick_ms: u64,
    /// How long a key press holds its line low when the terminal does not
    /// report key releases.
    press_hold_ms: u64,
    /// Log destination while the panel owns the terminal.
    log_file: PathBuf,
    /// Keys standing in for the three buttons.
    keys: KeyBindings,
}

/// Unvalidated form of [`HandheldConfig`] as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawHandheldConfig {
    #[serde(default = "default_reset_delay_ms")]
    reset_delay_ms: u64,
    #[serde(default = "default_restart_delay_ms")]
    restart_delay_ms: u64,
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
    #[serde(default = "default_press_hold_ms")]
    press_hold_ms: u64,
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
    #[serde(default)]
    keys: KeyBindings,
}

/// Keys standing in for the three buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Navigate-horizontal button.
    #[serde(default = "default_horizontal_key")]
    horizontal: char,
    /// Navigate-vertical button.
    #[serde(default = "default_vertical_key")]
    vertical: char,
    /// Place button.
    #[serde(default = "default_place_key")]
    place: char,
}

fn default_reset_delay_ms() -> u64 {
    RESET_DELAY_MS
}

fn default_restart_delay_ms() -> u64 {
    7000
}

fn default_tick_ms() -> u64 {
    10
}

fn default_press_hold_ms() -> u64 {
    120
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_handheld.log")
}

fn default_horizontal_key() -> char {
    'x'
}

fn default_vertical_key() -> char {
    'y'
}

fn default_place_key() -> char {
    'p'
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            horizontal: default_horizontal_key(),
            vertical: default_vertical_key(),
            place: default_place_key(),
        }
    }
}

impl Default for HandheldConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: default_reset_delay_ms(),
            restart_delay_ms: default_restart_delay_ms(),
            tick_ms: default_tick_ms(),
            press_hold_ms: default_press_hold_ms(),
            log_file: default_log_file(),
            keys: KeyBindings::default(),
        }
    }
}

impl TryFrom<RawHandheldConfig> for HandheldConfig {
    type Error = ConfigError;

    fn try_from(raw: RawHandheldConfig) -> Result<Self, Self::Error> {
        let config = Self {
            reset_delay_ms: raw.reset_delay_ms,
            restart_delay_ms: raw.restart_delay_ms,
            tick_ms: raw.tick_ms,
            press_hold_ms: raw.press_hold_ms,
            log_file: raw.log_file,
            keys: raw.keys,
        };
        config.validate()?;
        Ok(config)
    }
}

impl HandheldConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = content.parse()?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns a copy with a different poll interval.
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Result<Self, ConfigError> {
        self.tick_ms = tick_ms;
        self.validate()?;
        Ok(self)
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::new("tick_ms must be greater than zero"));
        }
        if self.press_hold_ms == 0 {
            return Err(ConfigError::new("press_hold_ms must be greater than zero"));
        }

        let keys = [self.keys.horizontal, self.keys.vertical, self.keys.place]
            .map(|c| c.to_ascii_lowercase());
        if keys[0] == keys[1] || keys[0] == keys[2] || keys[1] == keys[2] {
            return Err(ConfigError::new("button keys must be distinct"));
        }
        if keys.contains(&'q') {
            return Err(ConfigError::new("'q' is reserved for quitting"));
        }
        Ok(())
    }
}

impl std::str::FromStr for HandheldConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: HandheldConfig = "".parse().unwrap();
        assert_eq!(config, HandheldConfig::default());
        assert_eq!(*config.reset_delay_ms(), 3000);
        assert_eq!(*config.restart_delay_ms(), 7000);
    }

    #[test]
    fn test_partial_keys_table_keeps_other_defaults() {
        let config: HandheldConfig = "[keys]\nplace = 'k'\n".parse().unwrap();
        assert_eq!(*config.keys().place(), 'k');
        assert_eq!(*config.keys().horizontal(), 'x');
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = "[keys]\nhorizontal = 'p'\n".parse::<HandheldConfig>().unwrap_err();
        assert!(err.message.contains("distinct"));
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!("tick_ms = 0".parse::<HandheldConfig>().is_err());
        assert!(HandheldConfig::default().with_tick_ms(0).is_err());
    }

    #[test]
    fn test_deserialize_validates_in_every_format() {
        let from_json = serde_json::from_str::<HandheldConfig>;
        assert!(toml::from_str::<HandheldConfig>("tick_ms = 0").is_err());
        assert!(from_json(r#"{"tick_ms": 0}"#).is_err());
        assert!(from_json(r#"{"press_hold_ms": 0}"#).is_err());

        let config = from_json(r#"{"tick_ms": 5}"#).unwrap();
        assert_eq!(*config.tick_ms(), 5);
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let config = HandheldConfig::default().with_tick_ms(25).unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(text.parse::<HandheldConfig>().unwrap(), config);
    }
}
