use crate::layout::{BarLayout, LayoutError};
use crate::orbit::{DEFAULT_POINTS, Easing, OrbitError, OrbitSpec};
use crate::selection::ColorTiming;
use crate::spring::{SpringError, SpringSpec};
use crate::tab::{Tab, TabBar, TabError, default_tabs};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub points: usize,
    pub leg_ms: u64,
    pub rest_ms: u64,
    pub easing: Easing,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            leg_ms: 1000,
            rest_ms: 0,
            easing: Easing::Linear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tabs: Vec<Tab>,
    pub bar: BarLayout,
    pub spring: SpringSpec,
    pub orbit: OrbitConfig,
    pub color_timing: ColorTiming,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: default_tabs(),
            bar: BarLayout::default(),
            spring: SpringSpec::default(),
            orbit: OrbitConfig::default(),
            color_timing: ColorTiming::default(),
        }
    }
}

impl Config {
    pub fn tab_bar(&self) -> Result<TabBar, ConfigError> {
        Ok(TabBar::new(self.tabs.clone())?)
    }

    /// Orbit radius follows the bar so points never leave the indicator.
    pub fn orbit_spec(&self) -> OrbitSpec {
        OrbitSpec {
            points: self.orbit.points,
            radius: self.bar.orbit_radius(),
            leg: Duration::from_millis(self.orbit.leg_ms),
            rest: Duration::from_millis(self.orbit.rest_ms),
            easing: self.orbit.easing,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tab_bar()?;
        self.bar.validate()?;
        self.spring.validate()?;
        self.orbit_spec().validate()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid tabs: {0}")]
    Tabs(#[from] TabError),
    #[error("Invalid bar: {0}")]
    Layout(#[from] LayoutError),
    #[error("Invalid spring: {0}")]
    Spring(#[from] SpringError),
    #[error("Invalid orbit: {0}")]
    Orbit(#[from] OrbitError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbitbar", "orbitbar").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("ORBITBAR")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Loads `path` (optional) layered under `ORBITBAR_*` environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(environment())
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// Never fails: a broken or unreadable config falls back to the built-in defaults.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::TabColor;

    fn parse_config(toml: &str) -> Result<Config, ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_default_file_matches_defaults() {
        assert_eq!(parse_config(DEFAULT_CONFIG).unwrap(), Config::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_fill_in() {
        let config = parse_config(
            r##"
color_timing = "settle"

[spring]
stiffness = 1500.0

[orbit]
rest_ms = 2000
easing = "ease-in-out"

[[tabs]]
icon = "go-home-symbolic"
color = "#112233"

[[tabs]]
icon = "system-search-symbolic"
color = "#445566"
"##,
        )
        .unwrap();

        assert_eq!(config.color_timing, ColorTiming::OnSettle);
        assert_eq!(config.spring.stiffness, 1500.0);
        assert_eq!(config.spring.damping_ratio, 0.5);
        assert_eq!(config.orbit.rest_ms, 2000);
        assert_eq!(config.orbit.leg_ms, 1000);
        assert_eq!(config.orbit.easing, Easing::EaseInOut);
        assert_eq!(config.tabs.len(), 2);
        assert_eq!(config.tabs[1].color, TabColor::from_rgb(0x44, 0x55, 0x66));
        assert_eq!(config.orbit_spec().cycle(), Duration::from_millis(4000));
    }

    #[test]
    fn test_orbit_radius_tracks_bar() {
        let config = parse_config("[bar]\nmain_radius = 50.0\npoint_radius = 10.0\n").unwrap();
        assert_eq!(config.orbit_spec().radius, 40.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let no_tabs = Config {
            tabs: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(no_tabs.validate(), Err(ConfigError::Tabs(TabError::Empty))));
        assert!(matches!(
            parse_config("[spring]\ndamping_ratio = 0.0"),
            Err(ConfigError::Spring(SpringError::DampingRatio(_)))
        ));
        assert!(matches!(
            parse_config("[orbit]\nleg_ms = 0"),
            Err(ConfigError::Orbit(OrbitError::ZeroLeg))
        ));
        assert!(matches!(
            parse_config("[bar]\npoint_radius = 99.0"),
            Err(ConfigError::Layout(LayoutError::PointTooLarge { .. }))
        ));
    }

    #[test]
    fn test_bad_colour_is_a_config_error() {
        let result = parse_config("[[tabs]]\nicon = \"x\"\ncolor = \"#nothex\"\n");
        assert!(matches!(result, Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = std::env::temp_dir().join("navmotion-config-test-missing");
        let config = load_config_from(&dir.join("config.toml"));
        assert!(config.is_ok());
    }
}
