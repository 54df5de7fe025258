//! Per-location soil state and its update rules.
//!
//! A [`SoilRecord`] holds the six normalized attributes of one block of soil
//! plus the fertilizer, stress, and tillage bookkeeping that shapes how the
//! soil responds to weather, fertilizer, and crop growth.
//!
//! # Scheduled update
//!
//! [`SoilRecord::scheduled_update`] is the per-interval state transition and
//! runs in a fixed order:
//!
//! 1. Subtract evaporation (sunny when not raining)
//! 2. If raining, add rainfall absorbed according to texture
//! 3. If irrigated, add the irrigation bonus
//! 4. Re-clamp moisture
//! 5. Decay residual fertilizer
//!
//! Moisture gains and losses are independent additive deltas applied before
//! decay, so decay never sees the same interval's moisture change.

use harvest_types::SoilAttribute;
use serde_json::Value;

use crate::attribute::{clamp01, denormalize_ph, normalize_ph};
use crate::dynamics::{SUN_EVAPORATION_BONUS, SoilDynamics};
use crate::fertilizer::FertilizerEffect;
use crate::tag::{self, SoilTag};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Initial moisture of a fresh record.
pub const DEFAULT_MOISTURE: f64 = 0.5;
/// Initial real pH of a fresh record.
pub const DEFAULT_PH_REAL: f64 = 6.5;
/// Initial fertility of a fresh record.
pub const DEFAULT_FERTILITY: f64 = 0.4;
/// Initial texture of a fresh record (loam).
pub const DEFAULT_TEXTURE: f64 = 0.5;
/// Initial aeration of a fresh record.
pub const DEFAULT_AERATION: f64 = 0.5;
/// Initial organic matter of a fresh record.
pub const DEFAULT_ORGANIC_MATTER: f64 = 0.3;
/// Fertilizer decay rate before any fertilizer has been applied.
pub const DEFAULT_FERTILIZER_DECAY_RATE: f64 = 0.001;

/// Fertility consumed by every completed growth step.
pub const GROWTH_FERTILITY_COST: f64 = 0.0025;
/// Organic matter consumed by every completed growth step.
pub const GROWTH_ORGANIC_COST: f64 = 0.0008;
/// Extra fertility consumed when the soil is under high stress.
pub const HIGH_STRESS_FERTILITY_COST: f64 = 0.0015;
/// Stress above which growth pays the extra fertility cost.
pub const HIGH_STRESS_THRESHOLD: f64 = 0.5;
/// Stress removed by one passive recovery step.
pub const STRESS_RECOVERY_STEP: f64 = 0.001;

/// Growth bonus per soil-improvement action.
pub const HOE_BONUS_PER_USE: f64 = 0.01;
/// Maximum growth bonus from soil-improvement actions.
pub const HOE_BONUS_CAP: f64 = 0.10;

// Persisted keys for the scalar fields.
const KEY_FERTILIZER_INTENSITY: &str = "fertilizerIntensity";
const KEY_ORGANIC_MATTER_BONUS: &str = "organicMatterBonus";
const KEY_TICKS_SINCE_FERTILIZED: &str = "ticksSinceFertilized";
const KEY_FERTILIZER_DECAY_RATE: &str = "fertilizerDecayRate";
const KEY_STRESS_SCORE: &str = "stressScore";
const KEY_HOE_COUNT: &str = "hoeCount";

// ---------------------------------------------------------------------------
// SoilAttributes
// ---------------------------------------------------------------------------

/// The six normalized attribute values. Every attribute is always present.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SoilAttributes {
    moisture: f64,
    ph: f64,
    fertility: f64,
    texture: f64,
    aeration: f64,
    organic_matter: f64,
}

impl SoilAttributes {
    const fn get(&self, attr: SoilAttribute) -> f64 {
        match attr {
            SoilAttribute::Moisture => self.moisture,
            SoilAttribute::Ph => self.ph,
            SoilAttribute::Fertility => self.fertility,
            SoilAttribute::Texture => self.texture,
            SoilAttribute::Aeration => self.aeration,
            SoilAttribute::OrganicMatter => self.organic_matter,
        }
    }

    const fn slot(&mut self, attr: SoilAttribute) -> &mut f64 {
        match attr {
            SoilAttribute::Moisture => &mut self.moisture,
            SoilAttribute::Ph => &mut self.ph,
            SoilAttribute::Fertility => &mut self.fertility,
            SoilAttribute::Texture => &mut self.texture,
            SoilAttribute::Aeration => &mut self.aeration,
            SoilAttribute::OrganicMatter => &mut self.organic_matter,
        }
    }
}

// ---------------------------------------------------------------------------
// SoilRecord
// ---------------------------------------------------------------------------

/// Mutable soil state for one location.
///
/// Records are owned by a [`RegionStore`](crate::RegionStore) and created
/// lazily the first time a location is touched. All attribute writes route
/// through [`clamp01`], so every stored value stays in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilRecord {
    attributes: SoilAttributes,
    /// Residual strength of the last fertilizer, decays toward 0.
    fertilizer_intensity: f64,
    /// Cumulative organic boost. Informational, never clamped.
    organic_matter_bonus: f64,
    ticks_since_fertilized: u64,
    /// Overwritten by every fertilizer application.
    fertilizer_decay_rate: f64,
    stress_score: f64,
    hoe_count: u32,
}

impl Default for SoilRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl SoilRecord {
    /// Create a record with the documented defaults: moisture 0.5, pH 6.5,
    /// fertility 0.4, texture 0.5, aeration 0.5, organic matter 0.3.
    pub const fn new() -> Self {
        Self {
            attributes: SoilAttributes {
                moisture: DEFAULT_MOISTURE,
                ph: normalize_ph(DEFAULT_PH_REAL),
                fertility: DEFAULT_FERTILITY,
                texture: DEFAULT_TEXTURE,
                aeration: DEFAULT_AERATION,
                organic_matter: DEFAULT_ORGANIC_MATTER,
            },
            fertilizer_intensity: 0.0,
            organic_matter_bonus: 0.0,
            ticks_since_fertilized: 0,
            fertilizer_decay_rate: DEFAULT_FERTILIZER_DECAY_RATE,
            stress_score: 0.0,
            hoe_count: 0,
        }
    }

    // --- Attribute access ---------------------------------------------------

    /// Return the normalized value of an attribute.
    pub const fn get(&self, attr: SoilAttribute) -> f64 {
        self.attributes.get(attr)
    }

    /// Set an attribute, clamping into `[0, 1]`.
    pub const fn set(&mut self, attr: SoilAttribute, value: f64) {
        *self.attributes.slot(attr) = clamp01(value);
    }

    /// Add `delta` to an attribute, clamping the result.
    pub const fn adjust(&mut self, attr: SoilAttribute, delta: f64) {
        self.set(attr, self.get(attr) + delta);
    }

    /// Return pH on its real `[3, 10]` scale.
    pub const fn ph_real(&self) -> f64 {
        denormalize_ph(self.attributes.ph)
    }

    /// Set pH from a real value, clamping into `[3, 10]`.
    pub const fn set_ph_real(&mut self, ph_real: f64) {
        self.set(SoilAttribute::Ph, normalize_ph(ph_real));
    }

    /// Add `delta` to moisture, clamping the result.
    pub const fn apply_moisture_delta(&mut self, delta: f64) {
        self.adjust(SoilAttribute::Moisture, delta);
    }

    // --- Bookkeeping accessors ----------------------------------------------

    /// Residual fertilizer strength.
    pub const fn fertilizer_intensity(&self) -> f64 {
        self.fertilizer_intensity
    }

    /// Cumulative organic boost from fertilizer.
    pub const fn organic_matter_bonus(&self) -> f64 {
        self.organic_matter_bonus
    }

    /// Scheduled updates since the last fertilizer application.
    pub const fn ticks_since_fertilized(&self) -> u64 {
        self.ticks_since_fertilized
    }

    /// Current per-update fertilizer decay rate.
    pub const fn fertilizer_decay_rate(&self) -> f64 {
        self.fertilizer_decay_rate
    }

    /// Accumulated growth stress in `[0, 1]`.
    pub const fn stress_score(&self) -> f64 {
        self.stress_score
    }

    /// Number of soil-improvement actions applied.
    pub const fn hoe_count(&self) -> u32 {
        self.hoe_count
    }

    // --- Moisture dynamics --------------------------------------------------

    /// Evaporation for one scheduled update with default coefficients.
    ///
    /// See [`compute_evaporation_with`](Self::compute_evaporation_with).
    pub fn compute_evaporation(&self, temperature: f64, is_sunny: bool) -> f64 {
        self.compute_evaporation_with(&SoilDynamics::default(), temperature, is_sunny)
    }

    /// Evaporation for one scheduled update.
    ///
    /// Sandy, aerated, low-organic soil loses water faster; warmth scales
    /// the loss and sunshine adds a flat amount:
    ///
    /// ```text
    /// texture_factor  = 1 + (0.5 - texture) * 0.8
    /// aeration_factor = 1 + (aeration - 0.5) * 0.3
    /// organic_factor  = 1 - organic * 0.25
    /// rate = base * texture_factor * aeration_factor * organic_factor
    ///        * (0.5 + temperature) + (sunny ? 0.0005 : 0)
    /// ```
    ///
    /// `temperature` is normalized and clamped to `[0, 1]`.
    pub fn compute_evaporation_with(
        &self,
        dynamics: &SoilDynamics,
        temperature: f64,
        is_sunny: bool,
    ) -> f64 {
        let texture = self.attributes.texture;
        let aeration = self.attributes.aeration;
        let organic = self.attributes.organic_matter;

        let texture_factor = 1.0 + (0.5 - texture) * 0.8;
        let aeration_factor = 1.0 + (aeration - 0.5) * 0.3;
        let organic_factor = 1.0 - organic * 0.25;
        let sun_bonus = if is_sunny { SUN_EVAPORATION_BONUS } else { 0.0 };

        dynamics.evaporation_base
            * texture_factor
            * aeration_factor
            * organic_factor
            * (0.5 + clamp01(temperature))
            + sun_bonus
    }

    /// Moisture absorbed from one raining update. Loam absorbs the most.
    fn rainfall_absorption(&self, dynamics: &SoilDynamics) -> f64 {
        let texture = self.attributes.texture;
        dynamics.rainfall_moisture_gain * (0.7 + (0.5 - (texture - 0.5).abs()))
    }

    /// Run one scheduled update with default coefficients.
    pub fn scheduled_update(&mut self, temperature: f64, raining: bool, irrigation_bonus: f64) {
        self.scheduled_update_with(&SoilDynamics::default(), temperature, raining, irrigation_bonus);
    }

    /// Run one scheduled update: evaporation, rainfall, irrigation, clamp,
    /// then fertilizer decay.
    pub fn scheduled_update_with(
        &mut self,
        dynamics: &SoilDynamics,
        temperature: f64,
        raining: bool,
        irrigation_bonus: f64,
    ) {
        let evaporation = self.compute_evaporation_with(dynamics, temperature, !raining);
        self.apply_moisture_delta(-evaporation);

        if raining {
            let absorbed = self.rainfall_absorption(dynamics);
            self.apply_moisture_delta(absorbed);
        }

        if irrigation_bonus > 0.0 {
            self.apply_moisture_delta(irrigation_bonus);
        }

        self.set(SoilAttribute::Moisture, self.attributes.moisture);

        self.tick_fertilizer_decay_with(dynamics);
    }

    // --- Fertilizer ---------------------------------------------------------

    /// Apply one fertilizer application.
    ///
    /// Boosts fertility and organic matter immediately, adds to the residual
    /// intensity (never below 0), and resets the fertilized counter. A
    /// positive decay rate replaces the current one: the last fertilizer
    /// applied controls future decay speed. A rate that is not positive is
    /// ignored.
    pub fn apply_fertilizer(&mut self, effect: &FertilizerEffect) {
        self.fertilizer_intensity =
            (self.fertilizer_intensity + effect.fertility_boost).max(0.0);
        self.organic_matter_bonus += effect.organic_matter_boost;
        if effect.decay_rate > 0.0 {
            self.fertilizer_decay_rate = effect.decay_rate;
        }
        self.adjust(SoilAttribute::Fertility, effect.fertility_boost);
        self.adjust(SoilAttribute::OrganicMatter, effect.organic_matter_boost);
        self.ticks_since_fertilized = 0;
    }

    /// Decay residual fertilizer once with default coefficients.
    pub fn tick_fertilizer_decay(&mut self) {
        self.tick_fertilizer_decay_with(&SoilDynamics::default());
    }

    /// Decay residual fertilizer once.
    ///
    /// While intensity is positive, it drops by the decay rate (floored at
    /// 0) and fertility and organic matter drop by half and a fifth of the
    /// rate. The update that brings intensity to exactly 0 still depletes
    /// the soil; later updates do not. The fertilized counter always
    /// advances.
    pub fn tick_fertilizer_decay_with(&mut self, dynamics: &SoilDynamics) {
        if self.fertilizer_intensity > 0.0 {
            let rate =
                (self.fertilizer_decay_rate * dynamics.fertilizer_decay_multiplier).max(0.0);
            self.fertilizer_intensity = (self.fertilizer_intensity - rate).max(0.0);
            self.adjust(SoilAttribute::Fertility, -rate * 0.5);
            self.adjust(SoilAttribute::OrganicMatter, -rate * 0.2);
        }
        self.ticks_since_fertilized = self.ticks_since_fertilized.saturating_add(1);
    }

    // --- Growth, stress, and intensive farming ------------------------------

    /// Deplete the soil after a completed growth step.
    ///
    /// High-stress soil pays an extra fertility cost.
    pub fn consume_after_growth(&mut self) {
        let mut fertility_cost = GROWTH_FERTILITY_COST;
        if self.stress_score > HIGH_STRESS_THRESHOLD {
            fertility_cost += HIGH_STRESS_FERTILITY_COST;
        }
        self.adjust(SoilAttribute::Fertility, -fertility_cost);
        self.adjust(SoilAttribute::OrganicMatter, -GROWTH_ORGANIC_COST);
    }

    /// Add stress, keeping the score within `[0, 1]`.
    pub const fn register_stress(&mut self, amount: f64) {
        self.stress_score = clamp01(self.stress_score + amount);
    }

    /// Remove one small fixed step of stress, flooring at 0.
    pub const fn passive_stress_recovery(&mut self) {
        self.stress_score = (self.stress_score - STRESS_RECOVERY_STEP).max(0.0);
    }

    /// Record one soil-improvement action.
    pub const fn increment_hoe_count(&mut self) {
        self.hoe_count = self.hoe_count.saturating_add(1);
    }

    /// Growth bonus from soil-improvement actions: `min(count * 0.01, 0.10)`.
    pub fn hoe_bonus(&self) -> f64 {
        (f64::from(self.hoe_count) * HOE_BONUS_PER_USE).min(HOE_BONUS_CAP)
    }

    // --- Persisted form -----------------------------------------------------

    /// Write every field into a flat persisted record.
    pub fn to_tag(&self) -> SoilTag {
        let mut out = SoilTag::new();
        for attr in SoilAttribute::ALL {
            tag::write_f64(&mut out, attr.name(), self.get(attr));
        }
        tag::write_f64(&mut out, KEY_FERTILIZER_INTENSITY, self.fertilizer_intensity);
        tag::write_f64(&mut out, KEY_ORGANIC_MATTER_BONUS, self.organic_matter_bonus);
        out.insert(
            KEY_TICKS_SINCE_FERTILIZED.to_owned(),
            Value::from(self.ticks_since_fertilized),
        );
        tag::write_f64(&mut out, KEY_FERTILIZER_DECAY_RATE, self.fertilizer_decay_rate);
        tag::write_f64(&mut out, KEY_STRESS_SCORE, self.stress_score);
        out.insert(KEY_HOE_COUNT.to_owned(), Value::from(self.hoe_count));
        out
    }

    /// Build a record from a persisted form, starting from defaults.
    pub fn from_tag(source: &SoilTag) -> Self {
        let mut record = Self::new();
        record.load_tag(source);
        record
    }

    /// Overwrite every field present in `source`; absent or unreadable
    /// fields keep their current values.
    ///
    /// Loaded values are brought back inside their invariants: attributes
    /// and stress are clamped, intensity is floored at 0, and a decay rate
    /// that is not positive is ignored.
    pub fn load_tag(&mut self, source: &SoilTag) {
        for attr in SoilAttribute::ALL {
            if let Some(value) = tag::read_f64(source, attr.name()) {
                self.set(attr, value);
            }
        }
        if let Some(value) = tag::read_f64(source, KEY_FERTILIZER_INTENSITY) {
            self.fertilizer_intensity = value.max(0.0);
        }
        if let Some(value) = tag::read_f64(source, KEY_ORGANIC_MATTER_BONUS) {
            self.organic_matter_bonus = value;
        }
        if let Some(value) = tag::read_u64(source, KEY_TICKS_SINCE_FERTILIZED) {
            self.ticks_since_fertilized = value;
        }
        if let Some(value) = tag::read_f64(source, KEY_FERTILIZER_DECAY_RATE)
            && value > 0.0
        {
            self.fertilizer_decay_rate = value;
        }
        if let Some(value) = tag::read_f64(source, KEY_STRESS_SCORE) {
            self.stress_score = clamp01(value);
        }
        if let Some(value) = tag::read_u64(source, KEY_HOE_COUNT) {
            self.hoe_count = u32::try_from(value).unwrap_or(u32::MAX);
        }
    }
}
