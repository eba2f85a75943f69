//! Sprite resources
//!
//! Sprites live under `sprites/<Category>/[<Subcategory>/]<file>`. Both the
//! thumbnail list and the loader derive paths through [`sprite_path`].

pub mod loader;

use std::path::{Component, Path, PathBuf};

use crate::config::SPRITES_DIR;

pub use loader::{load_sprite, LoadError, LoadOutcome, LoadRequest, LoadedImage, SpriteLoader};

/// Relative path of a sprite file
///
/// Only plain name components are kept, so the result always stays under
/// `sprites/` whatever the manifest says.
pub fn sprite_path(category: &str, subcategory: Option<&str>, file: &str) -> PathBuf {
    let mut path = PathBuf::from(SPRITES_DIR);
    push_normal(&mut path, category);
    if let Some(subcategory) = subcategory {
        push_normal(&mut path, subcategory);
    }
    push_normal(&mut path, file);
    path
}

/// Whether `name` is a non-empty relative path made only of plain names
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

fn push_normal(path: &mut PathBuf, name: &str) {
    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_category_path() {
        assert_eq!(sprite_path("Hats", None, "a.png"), PathBuf::from("sprites/Hats/a.png"));
    }

    #[test]
    fn test_subcategory_path() {
        assert_eq!(
            sprite_path("Clothing", Some("Shirts"), "x.png"),
            PathBuf::from("sprites/Clothing/Shirts/x.png")
        );
    }

    #[test]
    fn test_path_stays_under_sprites_dir() {
        assert_eq!(sprite_path("Hats", None, "/etc/passwd"), PathBuf::from("sprites/Hats/etc/passwd"));
        assert_eq!(
            sprite_path("../..", Some("/tmp"), "../a.png"),
            PathBuf::from("sprites/tmp/a.png")
        );
    }

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("a.png"));
        assert!(is_plain_name("nested/a.png"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name("/etc/passwd"));
        assert!(!is_plain_name("../a.png"));
        assert!(!is_plain_name("./a.png"));
    }
}
