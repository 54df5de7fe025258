//! Fertilizer effects and data-driven fertilizer profiles.
//!
//! A [`FertilizerEffect`] is the immutable value a soil record consumes in
//! [`SoilRecord::apply_fertilizer`](crate::SoilRecord::apply_fertilizer).
//! Effects come either from a [`FertilizerProfile`] loaded from a data
//! record, or from one of three built-in presets used when no profile
//! matches an item.
//!
//! pH adjustment is not an effect: it shifts the real pH directly and never
//! touches fertility or organic matter.

use harvest_types::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Real-pH change applied by the pH up / pH down items.
pub const PH_ADJUST_STEP: f64 = 0.30;

/// Decay rate used when a profile record omits `decay_rate`.
pub const DEFAULT_PROFILE_DECAY_RATE: f64 = 0.001;

/// What one application of a fertilizer does to a soil record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FertilizerEffect {
    /// Added to fertility and to the residual fertilizer intensity.
    pub fertility_boost: f64,
    /// Added to organic matter and to the organic bookkeeping counter.
    pub organic_matter_boost: f64,
    /// Per-update decay of the residual intensity once applied.
    pub decay_rate: f64,
}

impl FertilizerEffect {
    /// Create an effect from its three components.
    pub const fn new(fertility_boost: f64, organic_matter_boost: f64, decay_rate: f64) -> Self {
        Self {
            fertility_boost,
            organic_matter_boost,
            decay_rate,
        }
    }

    /// Compost: a little fertility, a lot of organic matter, slow decay.
    pub const fn basic_compost() -> Self {
        Self::new(0.05, 0.15, 0.0005)
    }

    /// Nitrogen mix: a strong fertility spike that fades quickly.
    pub const fn nitrogen_mix() -> Self {
        Self::new(0.30, 0.05, 0.0025)
    }

    /// Potassium mix: moderate fertility with moderate decay.
    pub const fn potassium() -> Self {
        Self::new(0.15, 0.02, 0.0015)
    }
}

/// A fertilizer described by an external data record.
///
/// Record shape:
///
/// ```json
/// { "id": "harvest:nitrogen_mix_fertilizer", "fertility_boost": 0.30,
///   "organic_boost": 0.05, "decay_rate": 0.0025, "ph_shift": 0.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerProfile {
    /// Item identifier this profile applies to.
    pub id: ResourceId,
    /// Fertility added per application.
    pub fertility_boost: f64,
    /// Organic matter added per application.
    pub organic_boost: f64,
    /// Residual intensity decay per scheduled update.
    pub decay_rate: f64,
    /// Real-pH change applied after the effect.
    pub ph_shift: f64,
}

impl FertilizerProfile {
    /// Build a profile from a data record.
    ///
    /// Every field is optional: a missing or non-numeric field takes its
    /// default (`0` for the boosts and `ph_shift`, `0.001` for
    /// `decay_rate`). A `decay_rate` that is not positive also takes the
    /// default. A root that is not an object yields all defaults.
    pub fn parse(id: ResourceId, root: &Value) -> Self {
        let decay_rate = number_or(root, "decay_rate", DEFAULT_PROFILE_DECAY_RATE);
        Self {
            id,
            fertility_boost: number_or(root, "fertility_boost", 0.0),
            organic_boost: number_or(root, "organic_boost", 0.0),
            decay_rate: if decay_rate > 0.0 {
                decay_rate
            } else {
                DEFAULT_PROFILE_DECAY_RATE
            },
            ph_shift: number_or(root, "ph_shift", 0.0),
        }
    }

    /// The soil effect of one application of this fertilizer.
    pub const fn effect(&self) -> FertilizerEffect {
        FertilizerEffect::new(self.fertility_boost, self.organic_boost, self.decay_rate)
    }
}

/// Read a finite number field from a JSON object, or fall back to `default`.
pub(crate) fn number_or(root: &Value, key: &str, default: f64) -> f64 {
    root.get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}
