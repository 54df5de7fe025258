//! Soil state for the Harvest simulation.
//!
//! This crate models the ground crops grow in: six normalized attributes per
//! location, the weather-driven scheduled update, fertilizer effects, tilling,
//! and the per-region store the host persists.
//!
//! # Modules
//!
//! - [`attribute`] -- The `[0, 1]` attribute domain and the real-pH mapping.
//! - [`diagnostics`] -- Moisture and pH classification for display.
//! - [`dynamics`] -- Tunable coefficients for the scheduled update.
//! - [`error`] -- Error types for the persisted region form.
//! - [`fertilizer`] -- Fertilizer effects, presets, and data profiles.
//! - [`record`] -- [`SoilRecord`], one location's mutable soil state.
//! - [`region`] -- [`RegionStore`], all records of one persisted region.
//! - [`tag`] -- The flat key-value persisted form.
//! - [`tillage`] -- The hoe soil-improvement action.

pub mod attribute;
pub mod diagnostics;
pub mod dynamics;
pub mod error;
pub mod fertilizer;
pub mod record;
pub mod region;
pub mod tag;
pub mod tillage;

// Re-export primary types at crate root.
pub use attribute::{PH_MAX, PH_MIN, clamp01, denormalize_ph, normalize_ph};
pub use diagnostics::{MoistureStatus, PhStatus, SoilReport};
pub use dynamics::SoilDynamics;
pub use error::SoilError;
pub use fertilizer::{FertilizerEffect, FertilizerProfile, PH_ADJUST_STEP};
pub use record::SoilRecord;
pub use region::RegionStore;
pub use tag::SoilTag;
pub use tillage::TillReport;
