//! The growth decision pipeline.
//!
//! Each time the host offers a crop a chance to grow, the soil under it and
//! the crop's profile produce a growth multiplier, and the multiplier's band
//! decides the outcome:
//!
//! | Band | Multiplier | Outcome | Stress |
//! |------|-----------|---------|--------|
//! | Deny | `<= 0.25` | refused | `+0.02` |
//! | Probabilistic | `(0.25, 1)` | allowed with probability `multiplier` | `+0.01` on refusal, recovery on success |
//! | Allow | `[1, 1.2)` | allowed | recovery |
//! | Boosted | `>= 1.2` | allowed, may skip one stage | recovery |
//!
//! Stress is the slow memory of the pipeline: repeated refusals raise it,
//! which lowers future multipliers, and every success relieves it a little.
//! A completed growth step depletes the soil and relieves stress once more
//! through [`complete_growth`].

use harvest_soil::SoilRecord;
use harvest_types::{BONUS_THRESHOLD, GrowthBand};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::CropProfile;

/// Maximum fraction of growth that full stress removes.
pub const STRESS_PENALTY_WEIGHT: f64 = 0.30;

/// Stress added when the multiplier falls in the deny band.
pub const DENY_STRESS: f64 = 0.02;

/// Stress added when a probabilistic roll refuses growth.
pub const REJECT_STRESS: f64 = 0.01;

/// Bonus-stage chance gained per unit of multiplier above 1.
pub const BONUS_CHANCE_SCALE: f64 = 0.25;

/// Highest possible bonus-stage chance.
pub const BONUS_CHANCE_CAP: f64 = 0.35;

/// A crop's current and final growth stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropStage {
    /// Current age.
    pub age: u32,
    /// Age at which the crop is fully grown.
    pub max_age: u32,
}

impl CropStage {
    /// Create a stage.
    pub const fn new(age: u32, max_age: u32) -> Self {
        Self { age, max_age }
    }

    /// The age one stage later, or `None` if already fully grown.
    pub const fn next(self) -> Option<u32> {
        if self.age < self.max_age {
            Some(self.age.saturating_add(1))
        } else {
            None
        }
    }
}

/// What the host should do with one growth opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthDecision {
    /// Cancel this growth step.
    Deny,
    /// Let the growth step proceed.
    Allow {
        /// Age the crop should be set to before the step, if a bonus
        /// stage was rolled.
        bonus_age: Option<u32>,
    },
}

impl GrowthDecision {
    /// Whether growth proceeds.
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow { .. })
    }
}

/// Full result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthEvaluation {
    /// Multiplier after hoe bonus and stress penalty.
    pub multiplier: f64,
    /// Band the multiplier fell into.
    pub band: GrowthBand,
    /// The decision.
    pub decision: GrowthDecision,
}

/// Effective growth multiplier of `soil` for `profile`.
///
/// ```text
/// multiplier = compute_growth(soil) * (1 + hoe_bonus) * (1 - stress * 0.30)
/// ```
pub fn growth_multiplier(soil: &SoilRecord, profile: &CropProfile) -> f64 {
    let stress_factor = 1.0 - soil.stress_score() * STRESS_PENALTY_WEIGHT;
    profile.compute_growth_for(soil) * (1.0 + soil.hoe_bonus()) * stress_factor
}

/// Chance of rolling a bonus stage at `multiplier`.
pub fn bonus_chance(multiplier: f64) -> f64 {
    if multiplier < BONUS_THRESHOLD {
        return 0.0;
    }
    ((multiplier - 1.0) * BONUS_CHANCE_SCALE).min(BONUS_CHANCE_CAP)
}

/// Decide one growth opportunity and update the soil's stress.
///
/// Draws from `rng` only in the probabilistic and boosted bands, once each.
pub fn evaluate_growth(
    soil: &mut SoilRecord,
    profile: &CropProfile,
    stage: CropStage,
    rng: &mut impl Rng,
) -> GrowthEvaluation {
    let multiplier = growth_multiplier(soil, profile);
    let band = GrowthBand::classify(multiplier);

    let decision = match band {
        GrowthBand::Deny => {
            soil.register_stress(DENY_STRESS);
            GrowthDecision::Deny
        }
        GrowthBand::Probabilistic => {
            let draw = rng.random::<f64>();
            if draw > multiplier {
                soil.register_stress(REJECT_STRESS);
                GrowthDecision::Deny
            } else {
                soil.passive_stress_recovery();
                GrowthDecision::Allow { bonus_age: None }
            }
        }
        GrowthBand::Allow => {
            soil.passive_stress_recovery();
            GrowthDecision::Allow { bonus_age: None }
        }
        GrowthBand::Boosted => {
            let draw = rng.random::<f64>();
            let bonus_age = if draw < bonus_chance(multiplier) {
                stage.next()
            } else {
                None
            };
            soil.passive_stress_recovery();
            GrowthDecision::Allow { bonus_age }
        }
    };

    debug!(
        crop = %profile.id,
        multiplier,
        band = ?band,
        decision = ?decision,
        stress = soil.stress_score(),
        "growth evaluated"
    );

    GrowthEvaluation {
        multiplier,
        band,
        decision,
    }
}

/// Apply the aftermath of a completed growth step: deplete the soil, then
/// relieve stress.
pub fn complete_growth(soil: &mut SoilRecord) {
    soil.consume_after_growth();
    soil.passive_stress_recovery();
}
