//! Replay configuration loading (replay.toml)
//!
//! Everything in the config file can also be given on the command line;
//! command-line values win. The file is handy for keeping a capture, an
//! identifier and the replay pacing together.

use anyhow::{Context, Result};
use can_flow_core::DEFAULT_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Replay configuration (loaded from replay.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub replay: ReplaySettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Capture file to load
    pub file: Option<PathBuf>,
    /// Identifier to replay, as a hex string (e.g. "1A3")
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplaySettings {
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    #[serde(default)]
    pub loop_playback: bool,
    #[serde(default)]
    pub auto_reference: bool,
    #[serde(default)]
    pub reverse: bool,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
            loop_playback: false,
            auto_reference: false,
            reverse: false,
        }
    }
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<ReplayConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: ReplayConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Parse an identifier given as hex text, with an optional `0x` prefix
pub fn parse_hex_id(text: &str) -> Result<u32> {
    let digits = text
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16)
        .with_context(|| format!("Invalid hex identifier: {:?}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            file = "door_module.log"
            id = "1A3"

            [replay]
            interval_ms = 250
            loop_playback = true
            auto_reference = true
        "#;

        let config: ReplayConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.id.as_deref(), Some("1A3"));
        assert_eq!(config.replay.interval_ms, 250);
        assert!(config.replay.loop_playback);
        assert!(config.replay.auto_reference);
        assert!(!config.replay.reverse);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ReplayConfig = toml::from_str("").unwrap();
        assert!(config.input.file.is_none());
        assert_eq!(config.replay.interval_ms, DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn test_parse_hex_id() {
        assert_eq!(parse_hex_id("1A3").unwrap(), 0x1A3);
        assert_eq!(parse_hex_id("0x7e0").unwrap(), 0x7E0);
        assert!(parse_hex_id("not-hex").is_err());
    }
}
