//! The sprite manifest (`sprites.json`)
//!
//! A JSON object whose keys are category names. Each value is either a list
//! of file names, or an object mapping subcategory names to lists of file
//! names. Categories and subcategories keep the order they have in the file.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

use crate::sprite::is_plain_name;

/// Errors that keep the manifest from loading
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("category {category:?}: {reason}")]
    InvalidSection { category: String, reason: String },
}

/// What a category holds
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// A plain, ordered list of file names
    Files(Vec<String>),
    /// Ordered subcategories, each with its own file list
    Subcategories(Vec<(String, Vec<String>)>),
}

/// Parsed manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    categories: Vec<(String, Section)>,
}

impl Manifest {
    /// Parse the manifest from its JSON text
    ///
    /// `{}` is accepted and yields a manifest with no categories.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;

        let mut categories = Vec::with_capacity(root.len());
        for (category, value) in root {
            check_name(&category, "category name", &category)?;
            let section = parse_section(&category, value)?;
            categories.push((category, section));
        }

        Ok(Self { categories })
    }

    /// Category names in manifest order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a category's section
    pub fn section(&self, category: &str) -> Option<&Section> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, section)| section)
    }

    /// Whether the category exists and is split into subcategories
    pub fn is_subcategorized(&self, category: &str) -> bool {
        matches!(self.section(category), Some(Section::Subcategories(_)))
    }

    /// Subcategory names of a category, in manifest order
    ///
    /// Empty for simple or unknown categories.
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        match self.section(category) {
            Some(Section::Subcategories(subs)) => subs.iter().map(|(name, _)| name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// File list for a category (and subcategory, for subcategorized ones)
    ///
    /// Anything absent yields an empty slice. The subcategory is ignored for
    /// simple categories.
    pub fn files(&self, category: &str, subcategory: Option<&str>) -> &[String] {
        match self.section(category) {
            Some(Section::Files(files)) => files.as_slice(),
            Some(Section::Subcategories(subs)) => subcategory
                .and_then(|wanted| subs.iter().find(|(name, _)| name == wanted))
                .map(|(_, files)| files.as_slice())
                .unwrap_or(&[]),
            None => &[],
        }
    }
}

/// A category value exactly as it appears in the JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSection {
    Files(Vec<String>),
    Subcategories(Map<String, Value>),
}

fn parse_section(category: &str, value: Value) -> Result<Section, ManifestError> {
    let raw: RawSection = serde_json::from_value(value).map_err(|_| ManifestError::InvalidSection {
        category: category.to_string(),
        reason: "expected a list of file names or an object of subcategories".to_string(),
    })?;

    match raw {
        RawSection::Files(files) => {
            check_files(category, &files)?;
            Ok(Section::Files(files))
        }
        RawSection::Subcategories(subs) => {
            let mut parsed = Vec::with_capacity(subs.len());
            for (name, list) in subs {
                check_name(category, "subcategory name", &name)?;
                let files: Vec<String> =
                    serde_json::from_value(list).map_err(|e| ManifestError::InvalidSection {
                        category: category.to_string(),
                        reason: format!("subcategory {:?} must be a list of file names ({})", name, e),
                    })?;
                check_files(category, &files)?;
                parsed.push((name, files));
            }
            Ok(Section::Subcategories(parsed))
        }
    }
}

/// Names become path components under `sprites/`, so they must be relative
fn check_name(category: &str, what: &str, name: &str) -> Result<(), ManifestError> {
    if is_plain_name(name) {
        Ok(())
    } else {
        Err(ManifestError::InvalidSection {
            category: category.to_string(),
            reason: format!("{} {:?} is not a plain relative name", what, name),
        })
    }
}

fn check_files(category: &str, files: &[String]) -> Result<(), ManifestError> {
    files
        .iter()
        .try_for_each(|file| check_name(category, "file name", file))
}

/// Read and parse the manifest file
pub async fn load_manifest(path: PathBuf) -> Result<Manifest, ManifestError> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ManifestError::Read { path: path.clone(), source })?;

    let manifest = Manifest::from_json(&text)?;

    log::info!(
        "📁 Manifest loaded from {}: {} categories",
        path.display(),
        manifest.categories.len()
    );

    Ok(manifest)
}
