//! Growth rules, scheduling, and host hooks for the Harvest simulation.
//!
//! This crate sits between the host game and the soil model. It decides
//! whether crops grow, applies fertilizer items, runs the periodic soil
//! update, and loads the data-driven profiles that tune all of it.
//!
//! # Modules
//!
//! - [`ambient`] -- The [`AmbientSampler`] trait the host implements, plus
//!   temperature normalization and the irrigation scan.
//! - [`catalog`] -- [`ProfileCatalog`], the immutable profile snapshot and
//!   its partial-failure tolerant loader.
//! - [`config`] -- Typed configuration loaded from `harvest-config.yaml`.
//! - [`fertilizing`] -- Resolving a fertilizer item to its soil effect.
//! - [`growth`] -- The growth decision pipeline.
//! - [`hooks`] -- [`HarvestHooks`], the host-facing entry points.
//! - [`profile`] -- [`CropProfile`] and the growth scorer.
//! - [`scheduler`] -- [`SoilScheduler`], periodic soil passes.

pub mod ambient;
pub mod catalog;
pub mod config;
pub mod fertilizing;
pub mod growth;
pub mod hooks;
pub mod profile;
pub mod scheduler;

// Re-export primary types at crate root.
pub use ambient::AmbientSampler;
pub use catalog::{ProfileCatalog, ProfileError};
pub use config::{ConfigError, HarvestConfig};
pub use fertilizing::{EffectSource, FertilizerOutcome, apply_fertilizer_item};
pub use growth::{CropStage, GrowthDecision, GrowthEvaluation, complete_growth, evaluate_growth};
pub use hooks::HarvestHooks;
pub use profile::{CropProfile, IntensiveBonus, Range};
pub use scheduler::{PassSummary, SoilScheduler};
