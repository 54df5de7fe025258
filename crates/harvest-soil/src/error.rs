//! Error types for the `harvest-soil` crate.
//!
//! Out-of-range attribute values are never errors: they are clamped. The
//! only failures here concern the persisted region form.

/// Errors that can occur while reading a persisted region.
#[derive(Debug, thiserror::Error)]
pub enum SoilError {
    /// The persisted region is structurally unusable.
    #[error("malformed region data: {reason}")]
    MalformedRegion {
        /// What was wrong with it.
        reason: String,
    },

    /// The persisted region text is not valid JSON.
    #[error("region JSON error: {source}")]
    Json {
        /// The underlying parse error.
        #[from]
        source: serde_json::Error,
    },
}
