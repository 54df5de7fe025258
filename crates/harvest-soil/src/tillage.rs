//! Tilling: the soil-improvement action a player performs with a hoe.
//!
//! Each pass loosens the soil, works in a little organic matter, dries the
//! surface slightly, and nudges texture toward loam. The hoe count it
//! increments feeds the intensive-farming growth bonus.

use harvest_types::SoilAttribute;
use serde::{Deserialize, Serialize};

use crate::record::SoilRecord;

/// Aeration gained per tilling pass.
pub const TILL_AERATION_GAIN: f64 = 0.05;
/// Organic matter gained per tilling pass.
pub const TILL_ORGANIC_GAIN: f64 = 0.02;
/// Moisture lost per tilling pass.
pub const TILL_MOISTURE_LOSS: f64 = 0.01;
/// Fraction of the distance to loam that texture moves per pass.
pub const TILL_TEXTURE_PULL: f64 = 0.3;
/// Texture value of ideal loam.
pub const LOAM_TEXTURE: f64 = 0.5;

/// Attribute values before and after one tilling pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TillReport {
    /// Aeration before the pass.
    pub aeration_before: f64,
    /// Aeration after the pass.
    pub aeration_after: f64,
    /// Texture before the pass.
    pub texture_before: f64,
    /// Texture after the pass.
    pub texture_after: f64,
    /// Hoe count after the pass.
    pub hoe_count: u32,
    /// Growth bonus the new hoe count grants.
    pub hoe_bonus: f64,
}

impl SoilRecord {
    /// Till the soil once and report what changed.
    pub fn till(&mut self) -> TillReport {
        let aeration_before = self.get(SoilAttribute::Aeration);
        let texture_before = self.get(SoilAttribute::Texture);

        self.adjust(SoilAttribute::Aeration, TILL_AERATION_GAIN);
        self.adjust(SoilAttribute::OrganicMatter, TILL_ORGANIC_GAIN);
        self.apply_moisture_delta(-TILL_MOISTURE_LOSS);
        self.adjust(
            SoilAttribute::Texture,
            (LOAM_TEXTURE - texture_before) * TILL_TEXTURE_PULL,
        );
        self.increment_hoe_count();

        TillReport {
            aeration_before,
            aeration_after: self.get(SoilAttribute::Aeration),
            texture_before,
            texture_after: self.get(SoilAttribute::Texture),
            hoe_count: self.hoe_count(),
            hoe_bonus: self.hoe_bonus(),
        }
    }
}
