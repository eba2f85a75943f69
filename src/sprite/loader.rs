//! Sprite loading
//!
//! Reading and decoding a sprite happens off the UI thread. Each request gets
//! a sequence id; when a completion arrives, it is applied only if its id is
//! still the latest one issued, so a slow decode of an old selection can never
//! overwrite a newer one.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task;

/// Why a sprite could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read sprite {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sprite {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("decode task failed: {0}")]
    Join(String),
}

/// A load handed to the async runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: u64,
    /// Path relative to the asset root
    pub path: PathBuf,
}

/// The image currently bound to the drawing surface
#[derive(Debug, Clone, Default)]
pub enum LoadedImage {
    /// Nothing requested yet (or the last request was cancelled)
    #[default]
    Idle,
    /// Waiting for the decode of request `id`
    Pending(u64),
    /// Fully decoded pixels
    Decoded(RgbaImage),
    /// The latest request failed
    Failed,
}

impl LoadedImage {
    /// Pixels that are ready to draw: decoded, with a nonzero width
    pub fn ready(&self) -> Option<&RgbaImage> {
        match self {
            LoadedImage::Decoded(image) if image.width() > 0 => Some(image),
            _ => None,
        }
    }
}

/// What happened to a completed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image is now the current one
    Loaded,
    /// The latest request failed; the surface should be cleared
    Failed,
    /// A newer request was issued in the meantime; nothing changed
    Stale,
}

/// Owns the loaded image and the request sequence
#[derive(Debug, Default)]
pub struct SpriteLoader {
    next_id: u64,
    latest: Option<u64>,
    image: LoadedImage,
}

impl SpriteLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh load, discarding whatever image was loaded before
    pub fn begin(&mut self, path: PathBuf) -> LoadRequest {
        self.next_id += 1;
        let id = self.next_id;
        self.latest = Some(id);
        self.image = LoadedImage::Pending(id);

        log::debug!("⏳ Load #{} requested: {}", id, path.display());

        LoadRequest { id, path }
    }

    /// Forget any outstanding request; late completions become stale
    pub fn cancel(&mut self) {
        if let LoadedImage::Pending(id) = self.image {
            log::debug!("Cancelled load #{}", id);
        }
        self.latest = None;
        self.image = LoadedImage::Idle;
    }

    /// Apply the result of request `id`
    pub fn complete(&mut self, id: u64, result: Result<RgbaImage, Arc<LoadError>>) -> LoadOutcome {
        if self.latest != Some(id) {
            log::debug!("Dropping stale load #{} (latest is {:?})", id, self.latest);
            return LoadOutcome::Stale;
        }

        match result {
            Ok(image) => {
                log::info!("📷 Loaded sprite #{}: {}x{}", id, image.width(), image.height());
                self.image = LoadedImage::Decoded(image);
                LoadOutcome::Loaded
            }
            Err(error) => {
                log::error!("Failed to load sprite: {}", error);
                self.image = LoadedImage::Failed;
                LoadOutcome::Failed
            }
        }
    }

    pub fn image(&self) -> &LoadedImage {
        &self.image
    }
}

/// Read and decode a sprite file
///
/// Returns the request id alongside the result so the caller can hand both
/// back to [`SpriteLoader::complete`].
pub async fn load_sprite(id: u64, path: PathBuf) -> (u64, Result<RgbaImage, LoadError>) {
    // Spawn blocking because decoding is CPU-bound
    let result = task::spawn_blocking(move || load_sprite_blocking(&path))
        .await
        .map_err(|e| LoadError::Join(e.to_string()))
        .and_then(|result| result);

    (id, result)
}

fn load_sprite_blocking(path: &Path) -> Result<RgbaImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let image = image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(image.to_rgba8())
}
