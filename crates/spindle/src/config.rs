use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spindle_core::carousel::{
    self, CommitPolicy, GestureConfig, LayoutConfig, Placement,
};
use spindle_core::geometry::Size;
use spindle_core::source::{self, CarouselItem};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ITEM_WIDTH: f64 = 360.0;
pub const DEFAULT_ITEM_HEIGHT: f64 = 240.0;
pub const DEFAULT_ARROW_SIZE: i32 = 24;
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Explicit item list; wins over `image_dir`.
    pub images: Vec<CarouselItem>,
    pub image_dir: Option<PathBuf>,
    pub placeholder_count: usize,
    pub item_width: f64,
    pub item_height: f64,
    pub sensitivity: f64,
    pub threshold: f64,
    pub commit_policy: CommitPolicy,
    pub spread: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub scale_spread: f64,
    pub max_visible_offset: f64,
    pub placement: Placement,
    /// Degrees per step on the arc.
    pub arc_angle: f64,
    pub stack_base: u32,
    pub arrow_size: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            image_dir: None,
            placeholder_count: DEFAULT_PLACEHOLDER_COUNT,
            item_width: DEFAULT_ITEM_WIDTH,
            item_height: DEFAULT_ITEM_HEIGHT,
            sensitivity: carousel::DEFAULT_SENSITIVITY,
            threshold: carousel::DEFAULT_THRESHOLD,
            commit_policy: CommitPolicy::default(),
            spread: carousel::DEFAULT_SPREAD,
            min_scale: carousel::DEFAULT_MIN_SCALE,
            max_scale: carousel::DEFAULT_MAX_SCALE,
            scale_spread: carousel::DEFAULT_SCALE_SPREAD,
            max_visible_offset: carousel::DEFAULT_MAX_VISIBLE_OFFSET,
            placement: Placement::default(),
            arc_angle: carousel::DEFAULT_ARC_ANGLE_DEG,
            stack_base: carousel::DEFAULT_STACK_BASE,
            arrow_size: DEFAULT_ARROW_SIZE,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid setting '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.item_width > 0.0) {
            return invalid("item_width", "must be positive");
        }
        if !(self.item_height > 0.0) {
            return invalid("item_height", "must be positive");
        }
        if !(self.sensitivity > 0.0) {
            return invalid("sensitivity", "must be positive");
        }
        if !(self.scale_spread > 0.0) {
            return invalid("scale_spread", "must be positive");
        }
        if !(self.spread > 0.0) {
            return invalid("spread", "must be positive");
        }
        if !(self.threshold >= 0.0) {
            return invalid("threshold", "must not be negative");
        }
        if !(self.max_visible_offset >= 0.0) {
            return invalid("max_visible_offset", "must not be negative");
        }
        // every visible step must stack strictly below the one nearer the center
        if (self.stack_base as f64) < carousel::STACK_STEP * self.max_visible_offset.ceil() {
            return invalid("stack_base", "too small for max_visible_offset");
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return invalid("min_scale", "must be positive and at most max_scale");
        }
        if !(self.arc_angle > 0.0 && self.arc_angle <= 90.0) {
            return invalid("arc_angle", "must be in (0, 90] degrees");
        }
        if self.arrow_size <= 0 {
            return invalid("arrow_size", "must be positive");
        }
        Ok(self)
    }

    pub fn item_size(&self) -> Size {
        Size::new(self.item_width, self.item_height)
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            spread: self.spread,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            scale_spread: self.scale_spread,
            max_visible_offset: self.max_visible_offset,
            placement: self.placement,
            arc_angle: self.arc_angle.to_radians(),
            stack_base: self.stack_base,
        }
    }

    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            policy: self.commit_policy,
            sensitivity: self.sensitivity,
            threshold: self.threshold,
            ..GestureConfig::default()
        }
    }

    /// Configured images, else `image_dir`, else the default image
    /// directories, else placeholders. Never empty.
    pub fn items(&self) -> Vec<CarouselItem> {
        if !self.images.is_empty() {
            return self.images.clone();
        }

        let scanned = match &self.image_dir {
            Some(dir) => source::scan_directory(dir).unwrap_or_else(|e| {
                log::error!("Failed to scan {}: {}", dir.display(), e);
                Vec::new()
            }),
            None => source::discover_images(),
        };

        if scanned.is_empty() {
            CarouselItem::placeholders(self.placeholder_count.max(1))
        } else {
            scanned
        }
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "spindle", "spindle").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("SPINDLE").try_parsing(true))
        .build()?;

    s.try_deserialize::<Config>()?.validate()
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Using default config: {}", e);
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
