//! The host-facing entry points.
//!
//! [`HarvestHooks`] is what a host game calls into. It holds the current
//! profile catalog snapshot and nothing else; every call receives the
//! region store and randomness it should use, so the core never looks up
//! world state on its own.
//!
//! Growth hooks address the crop block. The soil they read is the block
//! directly below it.

use std::sync::Arc;

use harvest_soil::{RegionStore, SoilReport, TillReport};
use harvest_types::{BlockPos, ResourceId};
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::ProfileCatalog;
use crate::fertilizing::{FertilizerOutcome, apply_fertilizer_item};
use crate::growth::{CropStage, GrowthDecision, complete_growth, evaluate_growth};

/// Host-facing facade over the soil and growth rules.
#[derive(Debug, Clone, Default)]
pub struct HarvestHooks {
    catalog: Arc<ProfileCatalog>,
}

impl HarvestHooks {
    /// Create hooks over a catalog snapshot.
    pub const fn new(catalog: Arc<ProfileCatalog>) -> Self {
        Self { catalog }
    }

    /// The current catalog snapshot.
    pub fn catalog(&self) -> Arc<ProfileCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Replace the catalog snapshot after a data reload.
    ///
    /// Callers holding the previous snapshot keep it until they drop it.
    pub fn on_reload(&mut self, catalog: Arc<ProfileCatalog>) {
        info!(
            crops = catalog.crop_count(),
            fertilizers = catalog.fertilizer_count(),
            "profile catalog reloaded"
        );
        self.catalog = catalog;
    }

    /// Decide a growth opportunity for the crop at `crop_pos`.
    ///
    /// Returns `None` when the crop has no profile: the host should apply
    /// its own default behaviour and no soil state changes.
    pub fn on_growth_attempt(
        &self,
        store: &mut RegionStore,
        crop_pos: BlockPos,
        crop: &ResourceId,
        stage: CropStage,
        rng: &mut impl Rng,
    ) -> Option<GrowthDecision> {
        let Some(profile) = self.catalog.crop(crop) else {
            debug!(crop = %crop, pos = %crop_pos, "no crop profile, growth unmodified");
            return None;
        };
        let soil = store.get_or_create(crop_pos.below());
        Some(evaluate_growth(soil, profile, stage, rng).decision)
    }

    /// Record that the crop at `crop_pos` completed a growth step.
    ///
    /// Does nothing if the soil below was never tracked.
    pub fn on_growth_completed(&self, store: &mut RegionStore, crop_pos: BlockPos) {
        if let Some(soil) = store.get_mut(crop_pos.below()) {
            complete_growth(soil);
        }
    }

    /// Apply a fertilizer item to the soil at `soil_pos`.
    pub fn on_fertilizer(
        &self,
        store: &mut RegionStore,
        soil_pos: BlockPos,
        item: &ResourceId,
    ) -> FertilizerOutcome {
        let soil = store.get_or_create(soil_pos);
        apply_fertilizer_item(soil, &self.catalog, item)
    }

    /// Till the soil at `soil_pos`.
    pub fn on_till(&self, store: &mut RegionStore, soil_pos: BlockPos) -> TillReport {
        let report = store.get_or_create(soil_pos).till();
        debug!(pos = %soil_pos, hoe_count = report.hoe_count, "soil tilled");
        report
    }

    /// Diagnostic snapshot of the soil at `soil_pos`.
    pub fn soil_report(&self, store: &mut RegionStore, soil_pos: BlockPos) -> SoilReport {
        SoilReport::from_record(store.get_or_create(soil_pos))
    }
}
