//! Category/subcategory/file selection and the thumbnail list
//!
//! A category is always selected unless the manifest lists none. When the selected category is split into
//! subcategories, a subcategory is always selected too and its control is
//! shown; for simple categories the subcategory is ignored (but remembered,
//! like a hidden dropdown keeps its value).

use std::path::PathBuf;

use super::manifest::Manifest;
use crate::sprite::sprite_path;

/// One clickable preview in the thumbnail strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// File name as listed in the manifest
    pub file: String,
    /// Relative sprite path (same rule the loader uses)
    pub path: PathBuf,
}

/// Text shown above the thumbnails
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub category: String,
    /// Empty for simple categories
    pub subcategory: String,
}

#[derive(Debug, Clone)]
pub struct Selection {
    category: String,
    subcategory: Option<String>,
    file: Option<String>,
    thumbnails: Vec<Thumbnail>,
    highlighted: Option<usize>,
    status: StatusLine,
}

impl Selection {
    /// Start on the first category (and its first subcategory, if any)
    ///
    /// The thumbnail list is empty until [`Selection::rebuild`] runs.
    pub fn new(manifest: &Manifest) -> Self {
        let category = manifest.categories().next().unwrap_or_default().to_string();
        let mut selection = Self {
            category,
            subcategory: None,
            file: None,
            thumbnails: Vec::new(),
            highlighted: None,
            status: StatusLine::default(),
        };
        selection.ensure_subcategory(manifest);
        selection
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Subcategory that applies to the current category, if it has any
    pub fn active_subcategory(&self, manifest: &Manifest) -> Option<&str> {
        if manifest.is_subcategorized(&self.category) {
            self.subcategory.as_deref()
        } else {
            None
        }
    }

    /// Whether the subcategory control should be visible
    pub fn subcategory_visible(&self, manifest: &Manifest) -> bool {
        manifest.is_subcategorized(&self.category)
    }

    /// Currently selected file name
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    /// Index of the thumbnail carrying the "selected" highlight
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Switch category. Returns `false` (and changes nothing) for names the
    /// manifest doesn't list.
    pub fn set_category(&mut self, manifest: &Manifest, category: &str) -> bool {
        if manifest.section(category).is_none() {
            log::warn!("Ignoring unknown category {:?}", category);
            return false;
        }

        self.category = category.to_string();
        self.ensure_subcategory(manifest);
        true
    }

    /// Switch subcategory within the current category
    pub fn set_subcategory(&mut self, manifest: &Manifest, subcategory: &str) -> bool {
        if !manifest.subcategories(&self.category).contains(&subcategory) {
            log::warn!(
                "Ignoring subcategory {:?}: not part of {:?}",
                subcategory,
                self.category
            );
            return false;
        }

        self.subcategory = Some(subcategory.to_string());
        true
    }

    /// Rebuild the thumbnail list for the current category/subcategory
    ///
    /// Returns the path of the default sprite (the first file) to load, or
    /// `None` when the list is empty and the surface should be cleared.
    pub fn rebuild(&mut self, manifest: &Manifest) -> Option<PathBuf> {
        let subcategory = self.active_subcategory(manifest).map(str::to_string);

        self.status = StatusLine {
            category: self.category.clone(),
            subcategory: subcategory.clone().unwrap_or_default(),
        };

        let files = manifest.files(&self.category, subcategory.as_deref());
        self.thumbnails = files
            .iter()
            .map(|file| Thumbnail {
                file: file.clone(),
                path: sprite_path(&self.category, subcategory.as_deref(), file),
            })
            .collect();

        log::debug!(
            "Rebuilt thumbnails for {}{}: {} sprites",
            self.category,
            subcategory.as_deref().map(|s| format!("/{}", s)).unwrap_or_default(),
            self.thumbnails.len()
        );

        if self.thumbnails.is_empty() {
            self.file = None;
            self.highlighted = None;
            None
        } else {
            self.select(0)
        }
    }

    /// Click on thumbnail `index`: select its file and move the highlight
    ///
    /// Returns the sprite path to load, or `None` for an out-of-range index.
    pub fn select(&mut self, index: usize) -> Option<PathBuf> {
        let thumbnail = self.thumbnails.get(index)?;
        self.file = Some(thumbnail.file.clone());
        self.highlighted = Some(index);
        Some(thumbnail.path.clone())
    }

    /// Make sure a subcategorized category has a valid subcategory selected
    fn ensure_subcategory(&mut self, manifest: &Manifest) {
        let subcategories = manifest.subcategories(&self.category);
        if subcategories.is_empty() {
            return;
        }

        let still_valid = self
            .subcategory
            .as_deref()
            .is_some_and(|current| subcategories.contains(&current));
        if !still_valid {
            self.subcategory = subcategories.first().map(|s| s.to_string());
        }
    }
}
