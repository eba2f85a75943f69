//! Application configuration
//!
//! Everything here has a fixed default. The asset root plays the role of
//! "the directory the page was served from": the manifest and every sprite
//! path are resolved relative to it.

use std::path::{Path, PathBuf};

/// Name of the manifest file inside the asset root
pub const MANIFEST_FILE: &str = "sprites.json";

/// Directory (inside the asset root) holding the sprite folders
pub const SPRITES_DIR: &str = "sprites";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory containing `sprites.json` and the `sprites/` tree
    pub asset_root: PathBuf,
    /// Drawing surface width in pixels
    pub canvas_width: u32,
    /// Drawing surface height in pixels
    pub canvas_height: u32,
    /// Edge length of a thumbnail button's image
    pub thumbnail_size: f32,
    /// Initial window size (width, height)
    pub window_size: (f32, f32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            canvas_width: 256,
            canvas_height: 256,
            thumbnail_size: 64.0,
            window_size: (960.0, 720.0),
        }
    }
}

impl Config {
    /// Use a different asset root, keeping every other default
    #[cfg(test)]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Full path of the manifest file
    pub fn manifest_path(&self) -> PathBuf {
        self.asset_root.join(MANIFEST_FILE)
    }

    /// Resolve a relative sprite path (`sprites/...`) against the asset root
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.asset_root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_path_under_root() {
        let config = Config::default().with_asset_root("/srv/assets");
        assert_eq!(config.manifest_path(), PathBuf::from("/srv/assets/sprites.json"));
        assert_eq!(
            config.resolve(Path::new("sprites/Hats/a.png")),
            PathBuf::from("/srv/assets/sprites/Hats/a.png")
        );
    }
}
