use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Tunables for the dual-panel motion controller.
///
/// Thresholds are expressed as fractions of a surface's travel range; the
/// velocity floor is in cells per second; spring parameters are the usual
/// damped-oscillator constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Normalized position above which a released panel stays open
    pub panel_open_threshold: f64,
    /// Normalized position above which a released chat drag opens the panel
    pub chat_open_threshold: f64,
    /// Lower normalized position that still opens when combined with a flick
    pub dynamic_threshold: f64,
    /// Minimum release speed for a flick to substitute for distance
    pub velocity_floor: f64,
    /// Spring stiffness for snap animations
    pub spring_stiffness: f64,
    /// Spring damping for snap animations
    pub spring_damping: f64,
    /// Spring mass for snap animations
    pub spring_mass: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            panel_open_threshold: 0.7,
            chat_open_threshold: 0.3,
            dynamic_threshold: 0.1,
            velocity_floor: 50.0,
            spring_stiffness: 400.0,
            spring_damping: 30.0,
            spring_mass: 0.8,
        }
    }
}

/// `[logging]` section of sidetrack.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default log level for stderr output
    pub level: String,
    /// Output format: pretty, json, compact
    pub format: String,
    /// Enable file logging to ~/.sidetrack/logs/
    pub file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "pretty".to_string(), file: false }
    }
}

/// Top-level configuration loaded from sidetrack.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub motion: MotionConfig,
    pub logging: LoggingSettings,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Example config written on first run
    pub fn example() -> &'static str {
        r#"# sidetrack configuration

[motion]
# Release a panel drag past this fraction of its travel and it stays open.
panel_open_threshold = 0.7
# Release a chat drag past this fraction and the panel opens.
chat_open_threshold = 0.3
# A flick past this fraction opens the panel even short of the static threshold.
dynamic_threshold = 0.1
# Minimum flick speed (cells/sec) for velocity to substitute for distance.
velocity_floor = 50.0
# Snap animation spring.
spring_stiffness = 400.0
spring_damping = 30.0
spring_mass = 0.8

[logging]
level = "warn"
format = "pretty"   # pretty | json | compact
file = false
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_config_defaults() {
        let config = MotionConfig::default();
        assert_eq!(config.panel_open_threshold, 0.7);
        assert_eq!(config.chat_open_threshold, 0.3);
        assert_eq!(config.dynamic_threshold, 0.1);
        assert_eq!(config.velocity_floor, 50.0);
        assert_eq!(config.spring_stiffness, 400.0);
        assert_eq!(config.spring_damping, 30.0);
        assert_eq!(config.spring_mass, 0.8);
    }

    #[test]
    fn test_config_from_toml_partial() {
        let parsed: Config = toml::from_str(
            r#"
            [motion]
            chat_open_threshold = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(parsed.motion.chat_open_threshold, 0.4);
        assert_eq!(parsed.motion.panel_open_threshold, 0.7);
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn test_config_example_round_trip() {
        let parsed: Config = toml::from_str(Config::example()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sidetrack.toml");
        std::fs::write(&path, Config::example()).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_from_file_missing() {
        let result = Config::from_file(Path::new("/nonexistent/sidetrack.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_file_invalid() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sidetrack.toml");
        std::fs::write(&path, "[motion]\npanel_open_threshold = \"high\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
