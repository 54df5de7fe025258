//! Human-readable soil diagnostics: moisture and pH classification plus a
//! one-line report, as shown by the moisture meter and pH sensor tools.

use std::fmt;

use harvest_types::SoilAttribute;
use serde::{Deserialize, Serialize};

use crate::record::SoilRecord;

/// Moisture classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoistureStatus {
    /// Below 0.25.
    VeryDry,
    /// From 0.25 up to 0.45.
    SlightlyDry,
    /// From 0.45 up to 0.75.
    Optimal,
    /// From 0.75 up to 0.90.
    Wet,
    /// 0.90 and above.
    Waterlogged,
}

impl MoistureStatus {
    /// Classify a normalized moisture value.
    pub fn classify(moisture: f64) -> Self {
        if moisture < 0.25 {
            Self::VeryDry
        } else if moisture < 0.45 {
            Self::SlightlyDry
        } else if moisture < 0.75 {
            Self::Optimal
        } else if moisture < 0.90 {
            Self::Wet
        } else {
            Self::Waterlogged
        }
    }

    /// Short label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryDry => "very dry",
            Self::SlightlyDry => "slightly dry",
            Self::Optimal => "optimal",
            Self::Wet => "wet",
            Self::Waterlogged => "waterlogged",
        }
    }
}

/// Real pH classification with the item that corrects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhStatus {
    /// Below 5.5.
    TooAcidic,
    /// Between 5.5 and 7.5 inclusive.
    Optimal,
    /// Above 7.5.
    TooAlkaline,
}

impl PhStatus {
    /// Classify a real pH value.
    pub fn classify(ph_real: f64) -> Self {
        if ph_real < 5.5 {
            Self::TooAcidic
        } else if ph_real > 7.5 {
            Self::TooAlkaline
        } else {
            Self::Optimal
        }
    }

    /// The corrective action, if any.
    pub const fn remedy(self) -> Option<&'static str> {
        match self {
            Self::TooAcidic => Some("apply pH up"),
            Self::Optimal => None,
            Self::TooAlkaline => Some("apply pH down"),
        }
    }

    /// Short label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TooAcidic => "too acidic",
            Self::Optimal => "optimal",
            Self::TooAlkaline => "too alkaline",
        }
    }
}

/// Snapshot of one soil record for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilReport {
    /// Normalized moisture.
    pub moisture: f64,
    /// Real pH.
    pub ph_real: f64,
    /// Normalized fertility.
    pub fertility: f64,
    /// Normalized aeration.
    pub aeration: f64,
    /// Normalized organic matter.
    pub organic_matter: f64,
    /// Accumulated stress.
    pub stress: f64,
    /// Intensive-farming growth bonus.
    pub hoe_bonus: f64,
    /// Moisture band.
    pub moisture_status: MoistureStatus,
    /// pH band.
    pub ph_status: PhStatus,
}

impl SoilReport {
    /// Take a snapshot of `record`.
    pub fn from_record(record: &SoilRecord) -> Self {
        let moisture = record.get(SoilAttribute::Moisture);
        let ph_real = record.ph_real();
        Self {
            moisture,
            ph_real,
            fertility: record.get(SoilAttribute::Fertility),
            aeration: record.get(SoilAttribute::Aeration),
            organic_matter: record.get(SoilAttribute::OrganicMatter),
            stress: record.stress_score(),
            hoe_bonus: record.hoe_bonus(),
            moisture_status: MoistureStatus::classify(moisture),
            ph_status: PhStatus::classify(ph_real),
        }
    }
}

impl fmt::Display for SoilReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moisture {:.2} ({}) | pH {:.2} ({}",
            self.moisture,
            self.moisture_status.label(),
            self.ph_real,
            self.ph_status.label(),
        )?;
        if let Some(remedy) = self.ph_status.remedy() {
            write!(f, ", {remedy}")?;
        }
        write!(
            f,
            ") | fertility {:.2} | aeration {:.2} | organic {:.2} | stress {:.2} | hoe bonus {:.2}",
            self.fertility, self.aeration, self.organic_matter, self.stress, self.hoe_bonus,
        )
    }
}
