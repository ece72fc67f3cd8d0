use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PLACEHOLDER_SCHEME: &str = "placeholder:";

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "tif", "tiff"];

/// Where an item's picture comes from: a file path or `placeholder:<n>`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageSource(String);

crate::impl_string_newtype!(ImageSource);

impl ImageSource {
    pub fn placeholder(number: usize) -> Self {
        Self(format!("{PLACEHOLDER_SCHEME}{number}"))
    }

    pub fn placeholder_number(&self) -> Option<usize> {
        self.0.strip_prefix(PLACEHOLDER_SCHEME)?.trim().parse().ok()
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with(PLACEHOLDER_SCHEME)
    }

    pub fn path(&self) -> Option<&Path> {
        (!self.is_placeholder() && !self.0.is_empty()).then(|| Path::new(&self.0))
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Caption(String);

crate::impl_string_newtype!(Caption);

impl Caption {
    /// `summer_trip-02` becomes `summer trip 02`.
    pub fn from_stem(stem: &str) -> Self {
        let words: Vec<&str> = stem
            .split(['_', '-'])
            .filter(|w| !w.is_empty())
            .collect();
        Self(words.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub source: ImageSource,
    #[serde(default)]
    pub caption: Option<Caption>,
}

impl CarouselItem {
    pub fn new(source: ImageSource, caption: Option<Caption>) -> Self {
        Self { source, caption }
    }

    pub fn from_path(path: &Path) -> Self {
        let caption = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(Caption::from_stem)
            .filter(|c| !c.is_empty());
        Self::new(ImageSource::from(path), caption)
    }

    pub fn placeholders(count: usize) -> Vec<Self> {
        (1..=count)
            .map(|n| {
                Self::new(
                    ImageSource::placeholder(n),
                    Some(Caption::new(format!("Placeholder {n}"))),
                )
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Image files directly inside `dir`, ordered by file name.
pub fn scan_directory(dir: &Path) -> Result<Vec<CarouselItem>, ScanError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image(path))
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths.iter().map(|p| CarouselItem::from_path(p)).collect())
}

pub fn default_image_directories() -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs = Vec::new();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join("spindle").join("images"));
    }

    dirs.extend(
        xdg.get_data_dirs()
            .into_iter()
            .map(|p| p.join("spindle").join("images")),
    );
    dirs
}

/// Items from the first default directory that has any images.
pub fn discover_images() -> Vec<CarouselItem> {
    default_image_directories()
        .iter()
        .filter(|dir| dir.is_dir())
        .find_map(|dir| match scan_directory(dir) {
            Ok(items) if !items.is_empty() => Some(items),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Skipping image directory {}: {}", dir.display(), e);
                None
            }
        })
        .unwrap_or_default()
}
