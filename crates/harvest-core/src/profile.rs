//! Crop profiles and the growth scorer.
//!
//! A [`CropProfile`] describes what one crop wants from the soil: three
//! optimal ranges, how hard each deviation hurts, a base multiplier, and two
//! intensive-farming bonuses. [`CropProfile::compute_growth`] turns the
//! current soil values into a non-negative growth multiplier.
//!
//! Record shape:
//!
//! ```json
//! { "crop": "minecraft:wheat",
//!   "optimal": { "moisture": {"min": 0.45, "max": 0.75},
//!                "ph": {"min": 6.0, "max": 7.0},
//!                "fertility": {"min": 0.50, "max": 0.90} },
//!   "stress_penalty": {"moisture": 0.4, "ph": 0.3, "fertility": 0.5},
//!   "growth_multiplier": 1.0,
//!   "intensive_bonus": { "aeration": {"threshold": 0.6, "bonus": 0.05},
//!                        "organic_matter": {"threshold": 0.5, "bonus": 0.07} } }
//! ```

use harvest_soil::{PH_MAX, PH_MIN, SoilRecord};
use harvest_types::{ResourceId, SoilAttribute};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Guards the range-width division against zero-width ranges.
const RANGE_EPSILON: f64 = 0.0001;

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// An inclusive optimal band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// Create a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the band.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// How far `value` lies outside the band, or 0 inside it.
    pub fn distance(&self, value: f64) -> f64 {
        if self.contains(value) {
            0.0
        } else if value < self.min {
            self.min - value
        } else {
            value - self.max
        }
    }

    /// Growth factor for `value`: 1 inside the band, otherwise reduced by
    /// `penalty` scaled by the distance relative to the band width (capped
    /// at one full width). Never negative.
    pub fn factor(&self, value: f64, penalty: f64) -> f64 {
        if self.contains(value) {
            return 1.0;
        }
        let width = self.max - self.min + RANGE_EPSILON;
        let scaled = (self.distance(value) / width).min(1.0);
        (1.0 - penalty * scaled).max(0.0)
    }

    fn parse(node: Option<&Value>, default: Self) -> Self {
        Self {
            min: number_or(node, "min", default.min),
            max: number_or(node, "max", default.max),
        }
    }
}

// ---------------------------------------------------------------------------
// Intensive bonus
// ---------------------------------------------------------------------------

/// A flat growth uplift granted when an attribute reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensiveBonus {
    /// Minimum normalized attribute value.
    pub threshold: f64,
    /// Fraction added to the intensive bonus sum.
    pub bonus: f64,
}

impl IntensiveBonus {
    /// Create a bonus rule.
    pub const fn new(threshold: f64, bonus: f64) -> Self {
        Self { threshold, bonus }
    }

    /// The bonus earned by `value`.
    pub fn earned(&self, value: f64) -> f64 {
        if value >= self.threshold { self.bonus } else { 0.0 }
    }

    fn parse(node: Option<&Value>, default: Self) -> Self {
        Self {
            threshold: number_or(node, "threshold", default.threshold),
            bonus: number_or(node, "bonus", default.bonus),
        }
    }
}

// ---------------------------------------------------------------------------
// CropProfile
// ---------------------------------------------------------------------------

/// Soil requirements and growth parameters for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Crop block identifier.
    pub id: ResourceId,
    /// Optimal normalized moisture.
    pub moisture: Range,
    /// Optimal real pH.
    pub ph: Range,
    /// Optimal normalized fertility.
    pub fertility: Range,
    /// Maximum growth loss from moisture deviation.
    pub moisture_penalty: f64,
    /// Maximum growth loss from pH deviation.
    pub ph_penalty: f64,
    /// Maximum growth loss from fertility deviation.
    pub fertility_penalty: f64,
    /// Base growth multiplier before factors and bonuses.
    pub growth_multiplier: f64,
    /// Bonus for well-aerated soil.
    pub aeration_bonus: IntensiveBonus,
    /// Bonus for organic-rich soil.
    pub organic_bonus: IntensiveBonus,
}

impl CropProfile {
    /// Build a profile from a data record.
    ///
    /// Missing or non-numeric fields take their defaults: full-domain
    /// ranges (`[0, 1]`, or `[3, 10]` for pH), penalties 0.4 / 0.3 / 0.5,
    /// multiplier 1.0, aeration bonus 0.6 / 0.05, organic bonus 0.5 / 0.07.
    pub fn parse(id: ResourceId, root: &Value) -> Self {
        let optimal = root.get("optimal");
        let stress = root.get("stress_penalty");
        let intensive = root.get("intensive_bonus");

        Self {
            id,
            moisture: Range::parse(child(optimal, "moisture"), Range::new(0.0, 1.0)),
            ph: Range::parse(child(optimal, "ph"), Range::new(PH_MIN, PH_MAX)),
            fertility: Range::parse(child(optimal, "fertility"), Range::new(0.0, 1.0)),
            moisture_penalty: number_or(stress, "moisture", 0.4),
            ph_penalty: number_or(stress, "ph", 0.3),
            fertility_penalty: number_or(stress, "fertility", 0.5),
            growth_multiplier: number_or(Some(root), "growth_multiplier", 1.0),
            aeration_bonus: IntensiveBonus::parse(
                child(intensive, "aeration"),
                IntensiveBonus::new(0.6, 0.05),
            ),
            organic_bonus: IntensiveBonus::parse(
                child(intensive, "organic_matter"),
                IntensiveBonus::new(0.5, 0.07),
            ),
        }
    }

    /// Growth multiplier for the given soil values.
    ///
    /// `ph_real` is on the real scale; everything else is normalized.
    /// Range factors compound multiplicatively; the intensive bonuses add
    /// together and scale the result once:
    ///
    /// ```text
    /// base       = growth_multiplier * f_moisture * f_ph * f_fertility
    /// multiplier = base * (1 + aeration_bonus + organic_bonus)
    /// ```
    pub fn compute_growth(
        &self,
        moisture: f64,
        ph_real: f64,
        fertility: f64,
        aeration: f64,
        organic: f64,
    ) -> f64 {
        let moisture_factor = self.moisture.factor(moisture, self.moisture_penalty);
        let ph_factor = self.ph.factor(ph_real, self.ph_penalty);
        let fertility_factor = self.fertility.factor(fertility, self.fertility_penalty);

        let base = self.growth_multiplier * moisture_factor * ph_factor * fertility_factor;
        let intensive = self.aeration_bonus.earned(aeration) + self.organic_bonus.earned(organic);

        (base * (1.0 + intensive)).max(0.0)
    }

    /// [`compute_growth`](Self::compute_growth) over a soil record's current values.
    pub fn compute_growth_for(&self, soil: &SoilRecord) -> f64 {
        self.compute_growth(
            soil.get(SoilAttribute::Moisture),
            soil.ph_real(),
            soil.get(SoilAttribute::Fertility),
            soil.get(SoilAttribute::Aeration),
            soil.get(SoilAttribute::OrganicMatter),
        )
    }
}

fn child<'a>(node: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    node.and_then(|value| value.get(key))
}

fn number_or(node: Option<&Value>, key: &str, default: f64) -> f64 {
    child(node, key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn wheat() -> CropProfile {
        let record = json!({
            "crop": "minecraft:wheat",
            "optimal": {
                "moisture": { "min": 0.45, "max": 0.75 },
                "ph": { "min": 6.0, "max": 7.0 },
                "fertility": { "min": 0.50, "max": 0.90 }
            },
            "stress_penalty": { "moisture": 0.4, "ph": 0.3, "fertility": 0.5 },
            "growth_multiplier": 1.0,
            "intensive_bonus": {
                "aeration": { "threshold": 0.6, "bonus": 0.05 },
                "organic_matter": { "threshold": 0.5, "bonus": 0.07 }
            }
        });
        CropProfile::parse(ResourceId::parse("minecraft:wheat"), &record)
    }

    #[test]
    fn range_contains_and_distance() {
        let range = Range::new(0.45, 0.75);
        assert!(range.contains(0.45));
        assert!(range.contains(0.75));
        assert!(!range.contains(0.76));
        assert!(range.distance(0.5).abs() < TOLERANCE);
        assert!((range.distance(0.40) - 0.05).abs() < TOLERANCE);
        assert!((range.distance(0.85) - 0.10).abs() < TOLERANCE);
    }

    #[test]
    fn zero_width_range_does_not_divide_by_zero() {
        let range = Range::new(0.5, 0.5);
        assert!((range.factor(0.5, 0.4) - 1.0).abs() < TOLERANCE);
        let factor = range.factor(0.6, 0.4);
        assert!(factor.is_finite());
        assert!((factor - 0.6).abs() < TOLERANCE);
    }

    #[test]
    fn factor_is_never_negative() {
        let range = Range::new(0.4, 0.6);
        assert!(range.factor(0.0, 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn default_soil_on_wheat_is_probabilistic() {
        // Moisture and pH in range, fertility 0.10 below a 0.40-wide band.
        let growth = wheat().compute_growth_for(&SoilRecord::new());
        assert!((growth - 0.875).abs() < 1e-3, "growth was {growth}");
    }

    #[test]
    fn intensive_bonuses_add_then_scale() {
        let profile = wheat();
        let growth = profile.compute_growth(0.6, 6.5, 0.7, 0.6, 0.5);
        assert!((growth - 1.12).abs() < TOLERANCE);
        let aeration_only = profile.compute_growth(0.6, 6.5, 0.7, 0.6, 0.49);
        assert!((aeration_only - 1.05).abs() < TOLERANCE);
    }

    #[test]
    fn penalties_compound() {
        let profile = wheat();
        // Every band missed by a full width or more.
        let growth = profile.compute_growth(0.0, 3.0, 0.0, 0.0, 0.0);
        assert!((growth - 0.6 * 0.7 * 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn parse_empty_record_uses_defaults() {
        let profile = CropProfile::parse(ResourceId::parse("carrots"), &json!({}));
        assert_eq!(profile.moisture, Range::new(0.0, 1.0));
        assert_eq!(profile.ph, Range::new(PH_MIN, PH_MAX));
        assert!((profile.moisture_penalty - 0.4).abs() < TOLERANCE);
        assert!((profile.ph_penalty - 0.3).abs() < TOLERANCE);
        assert!((profile.fertility_penalty - 0.5).abs() < TOLERANCE);
        assert!((profile.growth_multiplier - 1.0).abs() < TOLERANCE);
        assert_eq!(profile.aeration_bonus, IntensiveBonus::new(0.6, 0.05));
        assert_eq!(profile.organic_bonus, IntensiveBonus::new(0.5, 0.07));
        // Full-domain ranges never penalize.
        let growth = profile.compute_growth(0.0, 3.0, 1.0, 0.0, 0.0);
        assert!((growth - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn parse_partial_range_keeps_other_bound() {
        let record = json!({ "optimal": { "moisture": { "max": 0.8 } }, "growth_multiplier": "x" });
        let profile = CropProfile::parse(ResourceId::parse("beetroots"), &record);
        assert_eq!(profile.moisture, Range::new(0.0, 0.8));
        assert!((profile.growth_multiplier - 1.0).abs() < TOLERANCE);
    }
}
