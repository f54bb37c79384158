use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbitcam::camera::CameraSettings;
use orbitcam::content::{Deck, Topic};
use orbitcam::layout::{ChildLayoutOptions, LayoutMode};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TOPIC_COUNT: usize = 8;
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Child arrangement used while it fits; cramped tiles still fall back.
    pub child_mode: LayoutMode,
    /// Base child ring radius in pixels.
    pub ring_radius: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "resize_debounce_ms")]
    pub resize_debounce: Duration,
    /// Placeholder topics generated when the config lists none.
    pub generate: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            child_mode: LayoutMode::default(),
            ring_radius: ChildLayoutOptions::default().ring_radius,
            resize_debounce: RESIZE_DEBOUNCE,
            generate: DEFAULT_TOPIC_COUNT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl LayoutConfig {
    pub fn child_options(&self) -> ChildLayoutOptions {
        ChildLayoutOptions {
            ring_radius: self.ring_radius,
        }
    }
}

impl Config {
    pub fn deck(&self) -> Deck {
        if self.topics.is_empty() {
            Deck::generate(self.layout.generate)
        } else {
            Deck::new(self.topics.clone())
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn build(sources: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Config, ConfigError> {
    let s = sources
        .add_source(
            config::Environment::with_prefix("ORBIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

pub fn load_or_setup() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
