//! replog configuration.
//!
//! Loaded from `~/.replog/config.toml`. A missing file means defaults; an
//! unreadable or unparsable file is a user-visible error.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// User configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Whether cadence cues are audible. The sequencer emits cue requests
    /// either way; this only selects the sink.
    #[serde(default = "default_sound")]
    pub sound: bool,

    /// Overrides the store root (default `~/.replog/data`).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound: true,
            data_dir: None,
        }
    }
}

fn default_sound() -> bool {
    true
}

impl Config {
    /// Loads config from `~/.replog/config.toml`, falling back to defaults
    /// when the file doesn't exist.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.replog/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".replog").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_sound_on() {
        let config = Config::default();
        assert!(config.sound);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn parses_kebab_case_keys() {
        let config: Config = toml::from_str("sound = false\ndata-dir = \"/tmp/replog\"").unwrap();
        assert!(!config.sound);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/replog")));
    }

    #[test]
    fn missing_keys_fall_back() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.sound);
        assert!(config.data_dir.is_none());
    }
}
