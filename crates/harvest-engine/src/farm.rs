//! The demo farm: crop plots and the farmer who tends them.
//!
//! Each host tick every plot has a small chance of a growth opportunity,
//! mirroring random block ticks in the host game. The farmer harvests ripe
//! plots, tills after every harvest, and corrects low fertility and bad pH
//! using the soil report.

use harvest_core::{CropStage, GrowthDecision, HarvestHooks};
use harvest_soil::{PhStatus, RegionStore, SoilReport};
use harvest_types::{BlockPos, HARVEST_NAMESPACE, ResourceId};
use rand::Rng;
use tracing::{debug, info};

/// Chance per host tick that a plot gets a growth opportunity.
pub const GROWTH_OPPORTUNITY_CHANCE: f64 = 0.02;

/// Final age of every demo crop.
pub const MAX_CROP_AGE: u32 = 7;

/// Fertility below which the farmer fertilizes after harvest.
const REFERTILIZE_THRESHOLD: f64 = 0.35;

/// One crop block and the soil beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plot {
    /// Crop block position. The soil is the block below.
    pub crop_pos: BlockPos,
    /// Crop identifier.
    pub crop: ResourceId,
    /// Current growth stage.
    pub stage: CropStage,
    /// Completed harvests.
    pub harvests: u32,
}

impl Plot {
    /// A freshly planted plot.
    pub const fn new(crop_pos: BlockPos, crop: ResourceId) -> Self {
        Self {
            crop_pos,
            crop,
            stage: CropStage::new(0, MAX_CROP_AGE),
            harvests: 0,
        }
    }

    /// Position of the soil under the crop.
    pub const fn soil_pos(&self) -> BlockPos {
        self.crop_pos.below()
    }

    /// Advance one stage, capped at the final age.
    const fn grow(&mut self) {
        if let Some(next) = self.stage.next() {
            self.stage.age = next;
        }
    }

    const fn is_ripe(&self) -> bool {
        self.stage.age >= self.stage.max_age
    }
}

/// Running totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FarmStats {
    /// Growth opportunities offered.
    pub opportunities: u64,
    /// Opportunities the soil rules refused.
    pub denied: u64,
    /// Opportunities the soil rules allowed.
    pub allowed: u64,
    /// Extra stages granted by boosted growth.
    pub bonus_stages: u64,
    /// Opportunities for crops without a profile.
    pub unmodulated: u64,
    /// Fertilizer and pH items applied.
    pub fertilizer_uses: u64,
    /// Harvests across all plots.
    pub harvests: u64,
}

/// The farm's plots and the hooks that govern them.
#[derive(Debug)]
pub struct Farm {
    hooks: HarvestHooks,
    plots: Vec<Plot>,
    stats: FarmStats,
}

impl Farm {
    /// Create a farm over the given plots.
    pub const fn new(hooks: HarvestHooks, plots: Vec<Plot>) -> Self {
        Self {
            hooks,
            plots,
            stats: FarmStats {
                opportunities: 0,
                denied: 0,
                allowed: 0,
                bonus_stages: 0,
                unmodulated: 0,
                fertilizer_uses: 0,
                harvests: 0,
            },
        }
    }

    /// Every plot.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Totals so far.
    pub const fn stats(&self) -> FarmStats {
        self.stats
    }

    /// Compost every plot's soil before the first tick.
    pub fn prepare(&mut self, store: &mut RegionStore) {
        let compost = ResourceId::new(HARVEST_NAMESPACE, "compost_fertilizer");
        for plot in &self.plots {
            self.hooks.on_till(store, plot.soil_pos());
            self.hooks.on_fertilizer(store, plot.soil_pos(), &compost);
        }
        self.stats.fertilizer_uses = self
            .stats
            .fertilizer_uses
            .saturating_add(u64::try_from(self.plots.len()).unwrap_or(u64::MAX));
    }

    /// Run one host tick of crop growth and farming.
    pub fn tick(&mut self, store: &mut RegionStore, rng: &mut impl Rng) {
        for index in 0..self.plots.len() {
            if rng.random::<f64>() < GROWTH_OPPORTUNITY_CHANCE {
                self.offer_growth(index, store, rng);
            }
            self.harvest_if_ripe(index, store);
        }
    }

    fn offer_growth(&mut self, index: usize, store: &mut RegionStore, rng: &mut impl Rng) {
        let Some(plot) = self.plots.get_mut(index) else {
            return;
        };
        self.stats.opportunities = self.stats.opportunities.saturating_add(1);

        let decision =
            self.hooks
                .on_growth_attempt(store, plot.crop_pos, &plot.crop, plot.stage, rng);
        match decision {
            None => {
                self.stats.unmodulated = self.stats.unmodulated.saturating_add(1);
                plot.grow();
            }
            Some(GrowthDecision::Deny) => {
                self.stats.denied = self.stats.denied.saturating_add(1);
                return;
            }
            Some(GrowthDecision::Allow { bonus_age }) => {
                self.stats.allowed = self.stats.allowed.saturating_add(1);
                if let Some(age) = bonus_age {
                    self.stats.bonus_stages = self.stats.bonus_stages.saturating_add(1);
                    plot.stage.age = age;
                }
                plot.grow();
            }
        }
        self.hooks.on_growth_completed(store, plot.crop_pos);
    }

    fn harvest_if_ripe(&mut self, index: usize, store: &mut RegionStore) {
        let Some(plot) = self.plots.get_mut(index) else {
            return;
        };
        if !plot.is_ripe() {
            return;
        }
        plot.stage.age = 0;
        plot.harvests = plot.harvests.saturating_add(1);
        self.stats.harvests = self.stats.harvests.saturating_add(1);

        let soil_pos = plot.soil_pos();
        self.hooks.on_till(store, soil_pos);
        let report = self.hooks.soil_report(store, soil_pos);
        debug!(crop = %plot.crop, pos = %soil_pos, soil = %report, "harvested");

        for item in remedies(&report) {
            let outcome = self
                .hooks
                .on_fertilizer(store, soil_pos, &ResourceId::new(HARVEST_NAMESPACE, item));
            self.stats.fertilizer_uses = self.stats.fertilizer_uses.saturating_add(1);
            debug!(item, outcome = ?outcome, "soil treated");
        }
    }

    /// Log a closing report for every plot.
    pub fn log_reports(&self, store: &mut RegionStore) {
        for plot in &self.plots {
            let report = self.hooks.soil_report(store, plot.soil_pos());
            info!(
                crop = %plot.crop,
                pos = %plot.soil_pos(),
                harvests = plot.harvests,
                age = plot.stage.age,
                soil = %report,
                "plot summary"
            );
        }
    }
}

/// Items the farmer applies after reading a soil report.
fn remedies(report: &SoilReport) -> Vec<&'static str> {
    let mut items = Vec::new();
    match report.ph_status {
        PhStatus::TooAcidic => items.push("ph_up_fertilizer"),
        PhStatus::TooAlkaline => items.push("ph_down_fertilizer"),
        PhStatus::Optimal => {}
    }
    if report.fertility < REFERTILIZE_THRESHOLD {
        items.push("nitrogen_mix_fertilizer");
    }
    items
}
