//! Immutable snapshot of every loaded crop and fertilizer profile.
//!
//! A [`ProfileCatalog`] is built once per data reload and shared behind an
//! `Arc`. Reloading builds a new catalog and swaps it in; a catalog is never
//! mutated while decisions read from it.
//!
//! Loading is partial-failure tolerant: a file that cannot be read or whose
//! root is not a JSON object is logged and skipped, and every other file
//! still loads. Individual missing fields are never errors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use harvest_soil::FertilizerProfile;
use harvest_types::{DEFAULT_NAMESPACE, HARVEST_NAMESPACE, ResourceId};
use serde_json::Value;
use tracing::{info, warn};

use crate::profile::CropProfile;

/// Errors that can occur while loading profile data.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// A data directory or file could not be read.
    #[error("failed to read profile data at {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A data record could not be parsed into an object.
    #[error("malformed profile data in {name}: {reason}")]
    Malformed {
        /// Source name of the record.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Which kind of profile a data record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileKind {
    Crop,
    Fertilizer,
}

impl ProfileKind {
    /// Field that overrides the identifier derived from the source name.
    const fn id_field(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Fertilizer => "id",
        }
    }

    /// Namespace for identifiers derived from the source name.
    const fn fallback_namespace(self) -> &'static str {
        match self {
            Self::Crop => DEFAULT_NAMESPACE,
            Self::Fertilizer => HARVEST_NAMESPACE,
        }
    }
}

/// Every crop and fertilizer profile known to the simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCatalog {
    crops: BTreeMap<ResourceId, CropProfile>,
    fertilizers: BTreeMap<ResourceId, FertilizerProfile>,
}

impl ProfileCatalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            crops: BTreeMap::new(),
            fertilizers: BTreeMap::new(),
        }
    }

    /// Add or replace a crop profile, keyed by its identifier.
    #[must_use]
    pub fn with_crop(mut self, profile: CropProfile) -> Self {
        self.crops.insert(profile.id.clone(), profile);
        self
    }

    /// Add or replace a fertilizer profile, keyed by its identifier.
    #[must_use]
    pub fn with_fertilizer(mut self, profile: FertilizerProfile) -> Self {
        self.fertilizers.insert(profile.id.clone(), profile);
        self
    }

    /// Look up a crop profile.
    pub fn crop(&self, id: &ResourceId) -> Option<&CropProfile> {
        self.crops.get(id)
    }

    /// Look up a fertilizer profile.
    pub fn fertilizer(&self, id: &ResourceId) -> Option<&FertilizerProfile> {
        self.fertilizers.get(id)
    }

    /// Number of crop profiles.
    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }

    /// Number of fertilizer profiles.
    pub fn fertilizer_count(&self) -> usize {
        self.fertilizers.len()
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Load every `*.json` file from the two data directories.
    ///
    /// Files are read in file-name order. A file that fails to read or
    /// parse is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] if either directory cannot be listed.
    pub fn load_from_dirs(crops_dir: &Path, fertilizers_dir: &Path) -> Result<Self, ProfileError> {
        let mut catalog = Self::new();
        for (name, contents) in read_json_dir(crops_dir)? {
            catalog.add_source(ProfileKind::Crop, &name, &contents);
        }
        for (name, contents) in read_json_dir(fertilizers_dir)? {
            catalog.add_source(ProfileKind::Fertilizer, &name, &contents);
        }
        catalog.log_loaded();
        Ok(catalog)
    }

    /// Build a catalog from in-memory `(name, contents)` pairs.
    ///
    /// `name` plays the role of the file name: its stem becomes the
    /// identifier when a record carries none. Records that fail to parse
    /// are logged and skipped.
    pub fn from_sources(crops: &[(&str, &str)], fertilizers: &[(&str, &str)]) -> Self {
        let mut catalog = Self::new();
        for (name, contents) in crops {
            catalog.add_source(ProfileKind::Crop, name, contents);
        }
        for (name, contents) in fertilizers {
            catalog.add_source(ProfileKind::Fertilizer, name, contents);
        }
        catalog.log_loaded();
        catalog
    }

    fn add_source(&mut self, kind: ProfileKind, name: &str, contents: &str) {
        let (id, root) = match parse_source(kind, name, contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "skipping profile data");
                return;
            }
        };
        match kind {
            ProfileKind::Crop => {
                self.crops.insert(id.clone(), CropProfile::parse(id, &root));
            }
            ProfileKind::Fertilizer => {
                self.fertilizers
                    .insert(id.clone(), FertilizerProfile::parse(id, &root));
            }
        }
    }

    fn log_loaded(&self) {
        info!(
            crops = self.crops.len(),
            fertilizers = self.fertilizers.len(),
            "loaded profile catalog"
        );
    }
}

/// Parse one data record and resolve its identifier.
fn parse_source(
    kind: ProfileKind,
    name: &str,
    contents: &str,
) -> Result<(ResourceId, Value), ProfileError> {
    let root: Value = serde_json::from_str(contents).map_err(|err| ProfileError::Malformed {
        name: name.to_owned(),
        reason: err.to_string(),
    })?;
    if !root.is_object() {
        return Err(ProfileError::Malformed {
            name: name.to_owned(),
            reason: "root is not a JSON object".to_owned(),
        });
    }

    let id = match root.get(kind.id_field()).and_then(Value::as_str) {
        Some(raw) => ResourceId::parse(raw),
        None => {
            let stem = Path::new(name)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(name);
            ResourceId::new(kind.fallback_namespace(), stem)
        }
    };
    Ok((id, root))
}

/// Read every `*.json` file in `dir`, sorted by file name.
///
/// Unreadable files are logged and skipped.
fn read_json_dir(dir: &Path) -> Result<Vec<(String, String)>, ProfileError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ProfileError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_owned();
        match std::fs::read_to_string(&path) {
            Ok(contents) => sources.push((name, contents)),
            Err(source) => {
                let err = ProfileError::Io { path, source };
                warn!(error = %err, "skipping unreadable profile file");
            }
        }
    }
    Ok(sources)
}
