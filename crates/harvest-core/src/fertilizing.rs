//! Resolving a fertilizer item into its effect on a soil record.
//!
//! Resolution order for an item identifier:
//!
//! 1. `ph_up_fertilizer` / `ph_down_fertilizer` shift real pH by 0.30 and
//!    touch nothing else.
//! 2. A catalog fertilizer profile with that identifier applies its effect,
//!    then its pH shift.
//! 3. The built-in presets, matched by item path.
//! 4. Anything else is unknown and changes nothing.

use harvest_soil::{FertilizerEffect, PH_ADJUST_STEP, SoilRecord};
use harvest_types::ResourceId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ProfileCatalog;

/// Item path of the pH up fertilizer.
pub const PH_UP_ITEM: &str = "ph_up_fertilizer";
/// Item path of the pH down fertilizer.
pub const PH_DOWN_ITEM: &str = "ph_down_fertilizer";
/// Item path of the compost preset.
pub const COMPOST_ITEM: &str = "compost_fertilizer";
/// Item path of the nitrogen mix preset.
pub const NITROGEN_MIX_ITEM: &str = "nitrogen_mix_fertilizer";
/// Item path of the potassium mix preset.
pub const POTASSIUM_MIX_ITEM: &str = "potassium_mix_fertilizer";

/// Where an applied effect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSource {
    /// A loaded fertilizer profile.
    Profile,
    /// One of the built-in presets.
    Preset,
}

/// What applying an item did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FertilizerOutcome {
    /// Real pH was shifted.
    PhAdjusted {
        /// Real pH before.
        from: f64,
        /// Real pH after, clamped to the scale.
        to: f64,
    },
    /// A fertilizer effect was applied.
    Applied {
        /// Where the effect came from.
        source: EffectSource,
        /// The effect applied.
        effect: FertilizerEffect,
    },
    /// No profile or preset matches the item. Nothing changed.
    Unknown,
}

/// The built-in preset for an item path, if any.
pub fn preset_for(path: &str) -> Option<FertilizerEffect> {
    match path {
        COMPOST_ITEM => Some(FertilizerEffect::basic_compost()),
        NITROGEN_MIX_ITEM => Some(FertilizerEffect::nitrogen_mix()),
        POTASSIUM_MIX_ITEM => Some(FertilizerEffect::potassium()),
        _ => None,
    }
}

/// Apply the fertilizer item `item` to `soil`.
pub fn apply_fertilizer_item(
    soil: &mut SoilRecord,
    catalog: &ProfileCatalog,
    item: &ResourceId,
) -> FertilizerOutcome {
    let outcome = resolve_and_apply(soil, catalog, item);
    debug!(item = %item, outcome = ?outcome, "fertilizer applied");
    outcome
}

fn resolve_and_apply(
    soil: &mut SoilRecord,
    catalog: &ProfileCatalog,
    item: &ResourceId,
) -> FertilizerOutcome {
    let ph_step = match item.path() {
        PH_UP_ITEM => Some(PH_ADJUST_STEP),
        PH_DOWN_ITEM => Some(-PH_ADJUST_STEP),
        _ => None,
    };
    if let Some(step) = ph_step {
        let from = soil.ph_real();
        soil.set_ph_real(from + step);
        return FertilizerOutcome::PhAdjusted {
            from,
            to: soil.ph_real(),
        };
    }

    if let Some(profile) = catalog.fertilizer(item) {
        let effect = profile.effect();
        soil.apply_fertilizer(&effect);
        if profile.ph_shift != 0.0 {
            soil.set_ph_real(soil.ph_real() + profile.ph_shift);
        }
        return FertilizerOutcome::Applied {
            source: EffectSource::Profile,
            effect,
        };
    }

    match preset_for(item.path()) {
        Some(effect) => {
            soil.apply_fertilizer(&effect);
            FertilizerOutcome::Applied {
                source: EffectSource::Preset,
                effect,
            }
        }
        None => FertilizerOutcome::Unknown,
    }
}
