//! Enumeration types for the Harvest soil simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Soil attributes
// ---------------------------------------------------------------------------

/// One of the six attributes every soil record carries.
///
/// All attributes are stored normalized to `[0, 1]`. [`SoilAttribute::Ph`]
/// additionally has a real scale of `[3, 10]` mapped affinely onto the
/// normalized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoilAttribute {
    /// Water content. Drives evaporation and the crop moisture band.
    Moisture,
    /// Acidity, normalized from the real pH scale.
    Ph,
    /// General nutrient level consumed by growth and boosted by fertilizer.
    Fertility,
    /// Grain size: 0 is sand, 0.5 is loam, 1 is clay.
    Texture,
    /// Air content. High aeration speeds evaporation and rewards intensive farming.
    Aeration,
    /// Organic content. Buffers evaporation and rewards intensive farming.
    OrganicMatter,
}

impl SoilAttribute {
    /// Every attribute, in persisted order.
    pub const ALL: [Self; 6] = [
        Self::Moisture,
        Self::Ph,
        Self::Fertility,
        Self::Texture,
        Self::Aeration,
        Self::OrganicMatter,
    ];

    /// The key this attribute is stored under in the persisted soil form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Moisture => "MOISTURE",
            Self::Ph => "PH",
            Self::Fertility => "FERTILITY",
            Self::Texture => "TEXTURE",
            Self::Aeration => "AERATION",
            Self::OrganicMatter => "ORGANIC_MATTER",
        }
    }
}

impl core::fmt::Display for SoilAttribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Irrigation
// ---------------------------------------------------------------------------

/// A block that supplies moisture to nearby soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IrrigationSource {
    /// Strong source, searched first over the wider radius.
    WaterEmitter,
    /// Weak source, only consulted when no emitter is in range.
    IrrigationChannel,
}

// ---------------------------------------------------------------------------
// Growth bands
// ---------------------------------------------------------------------------

/// Multiplier at or below which growth is always denied.
pub const DENY_THRESHOLD: f64 = 0.25;

/// Multiplier at or above which growth is always allowed.
pub const ALLOW_THRESHOLD: f64 = 1.0;

/// Multiplier at or above which an extra growth stage may be rolled.
pub const BONUS_THRESHOLD: f64 = 1.2;

/// The decision band a growth multiplier falls into.
///
/// Bands are mutually exclusive and cover every `f64`, including `NaN`,
/// which is treated as denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthBand {
    /// `multiplier <= 0.25`: growth is refused outright.
    Deny,
    /// `0.25 < multiplier < 1`: growth succeeds with probability `multiplier`.
    Probabilistic,
    /// `1 <= multiplier < 1.2`: growth always succeeds.
    Allow,
    /// `multiplier >= 1.2`: growth succeeds and may skip a stage.
    Boosted,
}

impl GrowthBand {
    /// Classify a growth multiplier.
    pub fn classify(multiplier: f64) -> Self {
        if multiplier.is_nan() || multiplier <= DENY_THRESHOLD {
            Self::Deny
        } else if multiplier < ALLOW_THRESHOLD {
            Self::Probabilistic
        } else if multiplier < BONUS_THRESHOLD {
            Self::Allow
        } else {
            Self::Boosted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        let names: std::collections::BTreeSet<_> =
            SoilAttribute::ALL.into_iter().map(SoilAttribute::name).collect();
        assert_eq!(names.len(), SoilAttribute::ALL.len());
    }

    #[test]
    fn display_uses_persisted_name() {
        assert_eq!(SoilAttribute::OrganicMatter.to_string(), "ORGANIC_MATTER");
    }

    #[test]
    fn growth_band_boundaries() {
        assert_eq!(GrowthBand::classify(f64::NEG_INFINITY), GrowthBand::Deny);
        assert_eq!(GrowthBand::classify(0.0), GrowthBand::Deny);
        assert_eq!(GrowthBand::classify(0.25), GrowthBand::Deny);
        assert_eq!(GrowthBand::classify(0.250_001), GrowthBand::Probabilistic);
        assert_eq!(GrowthBand::classify(0.999_999), GrowthBand::Probabilistic);
        assert_eq!(GrowthBand::classify(1.0), GrowthBand::Allow);
        assert_eq!(GrowthBand::classify(1.199_999), GrowthBand::Allow);
        assert_eq!(GrowthBand::classify(1.2), GrowthBand::Boosted);
        assert_eq!(GrowthBand::classify(f64::INFINITY), GrowthBand::Boosted);
        assert_eq!(GrowthBand::classify(f64::NAN), GrowthBand::Deny);
    }
}
