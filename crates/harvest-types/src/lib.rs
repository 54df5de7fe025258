//! Shared type definitions for the Harvest soil simulation.
//!
//! This crate holds the small vocabulary every other crate in the workspace
//! speaks: where a soil record lives, how crops and fertilizers are named,
//! and which attributes a soil record carries.
//!
//! # Modules
//!
//! - [`ids`] -- [`BlockPos`] locations and namespaced [`ResourceId`]s
//! - [`enums`] -- Soil attributes, irrigation source kinds, and growth bands

pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ALLOW_THRESHOLD, BONUS_THRESHOLD, DENY_THRESHOLD, GrowthBand, IrrigationSource, SoilAttribute,
};
pub use ids::{BlockPos, DEFAULT_NAMESPACE, HARVEST_NAMESPACE, ResourceId};
