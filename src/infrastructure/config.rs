use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::domain::rooms::RoomDirectory;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub data: DataSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    /// Local directory holding `{period}.json` and `time.json`. Takes
    /// precedence over `base_url` when both are set.
    pub dir: Option<PathBuf>,
    /// Static site base URL serving the same files.
    pub base_url: Option<String>,
    /// Room-to-meter directory file.
    pub rooms_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
        }
    }
}

fn default_max_points() -> usize {
    150
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .add_source(config::Environment::with_prefix("DORM").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_room_directory(path: &Path) -> anyhow::Result<RoomDirectory> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read room directory {}", path.display()))?;
    let directory = serde_json::from_str(&raw)
        .with_context(|| format!("malformed room directory {}", path.display()))?;
    Ok(directory)
}
