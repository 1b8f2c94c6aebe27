use crate::animation::CycleCount;
use crate::engine::Visibility;
use crate::scene::Stage;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RingConfig {
    pub spokes: usize,
    pub margin: f64,
    pub rim_padding: f64,
    pub inner_ratio: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            spokes: 24,
            margin: 30.0,
            rim_padding: 21.0,
            inner_ratio: 0.5,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub balls: usize,
    pub ball_radius: f64,
    pub ball_center_radius: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "duration_ms")]
    pub duration: Duration,
    pub cycles: CycleCount,
    pub autoplay: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            balls: 12,
            ball_radius: 20.0,
            ball_center_radius: 2.0,
            duration: Duration::from_millis(14000),
            cycles: CycleCount::Indefinite,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub orbit: OrbitConfig,
    #[serde(default)]
    pub visible: Visibility,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.stage.width > 0.0 && self.stage.height > 0.0) {
            return invalid("stage width and height must be positive");
        }
        if !(self.ring.inner_ratio > 0.0 && self.ring.inner_ratio < 1.0) {
            return invalid("ring.inner_ratio must be between 0 and 1");
        }
        if self.ring.margin < 0.0 || self.ring.rim_padding < 0.0 {
            return invalid("ring.margin and ring.rim_padding must not be negative");
        }
        if self.orbit.ball_radius < 0.0 || self.orbit.ball_center_radius < 0.0 {
            return invalid("ball radii must not be negative");
        }
        if self.orbit.duration.is_zero() {
            return invalid("orbit.duration_ms must be positive");
        }
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbital", "orbital").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn build<S>(source: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(source)
        .add_source(
            config::Environment::with_prefix("ORBITAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build(config::File::from(config_path).required(false))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

/// Writes the bundled defaults to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn write_config_file(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if write_config_file(&path)? {
        log::info!("Wrote default configuration to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
