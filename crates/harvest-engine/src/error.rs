//! Error types for the Harvest engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the run so
//! `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the Harvest engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: harvest_core::ConfigError,
    },

    /// Profile data could not be loaded.
    #[error("profile error: {source}")]
    Profile {
        /// The underlying profile error.
        #[from]
        source: harvest_core::ProfileError,
    },

    /// The persisted region could not be read or written.
    #[error("soil error: {source}")]
    Soil {
        /// The underlying soil error.
        #[from]
        source: harvest_soil::SoilError,
    },

    /// Reading or writing the region file failed.
    #[error("region file {}: {source}", .path.display())]
    RegionFile {
        /// The region file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
