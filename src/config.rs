//! Configuration loader for gridsnake.
//!
//! * Looks for `gridsnake.toml` in the cwd unless overridden by `--config`.
//! * Every field is optional; each binary fills in its variant's defaults,
//!   and CLI flags win over the file.
//!
//! Extend this struct whenever you add new tunables.

use serde::Deserialize;
use std::fs;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Grid size in cells.
    #[serde(default)]
    pub cols: Option<i32>,
    #[serde(default)]
    pub rows: Option<i32>,
    /// Random seed for reproducible food placement.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Step pacing overrides, milliseconds.
    #[serde(default)]
    pub base_step_ms: Option<f64>,
    #[serde(default)]
    pub min_step_ms: Option<f64>,
}

pub const DEFAULT_CONFIG_PATH: &str = "gridsnake.toml";

impl Config {
    /// Parse a TOML file.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load from `path` (or the default location); a missing default file
    /// is normal, anything else is logged before falling back to defaults.
    pub fn load_or_default(path: Option<&str>) -> Self {
        let explicit = path.is_some();
        let p = path.unwrap_or(DEFAULT_CONFIG_PATH);
        match Self::load_from(p) {
            Ok(config) => {
                log::info!("loaded config from {p}");
                config
            }
            Err(ConfigError::Io(e))
                if !explicit && e.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                log::warn!("ignoring config {p}: {e}");
                Self::default()
            }
        }
    }

    /// Merge a pacing tunable over a default.
    pub fn pacing(&self, mut pacing: crate::scheduler::Pacing) -> crate::scheduler::Pacing {
        if let Some(base) = self.base_step_ms {
            pacing.base_step_ms = base;
        }
        if let Some(min) = self.min_step_ms {
            pacing.min_step_ms = min;
        }
        pacing
    }
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Pacing;

    #[test]
    fn parses_partial_files() {
        let config: Config = toml::from_str("cols = 50\nseed = 7").unwrap();
        assert_eq!(config.cols, Some(50));
        assert_eq!(config.rows, None);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cols, None);
        assert_eq!(config.base_step_ms, None);
    }

    #[test]
    fn pacing_overrides_merge_over_defaults() {
        let config: Config = toml::from_str("base_step_ms = 100.0").unwrap();
        let pacing = config.pacing(Pacing::default());
        assert_eq!(pacing.base_step_ms, 100.0);
        assert_eq!(pacing.min_step_ms, 70.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::load_from("/dev/null/definitely-missing"),
            Err(ConfigError::Io(_))
        ));
        let err = toml::from_str::<Config>("cols = \"many\"").unwrap_err();
        let _ = ConfigError::Parse(err);
    }
}
