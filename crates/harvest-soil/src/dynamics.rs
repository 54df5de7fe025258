//! Tunable coefficients for the scheduled soil update.
//!
//! The defaults reproduce the reference soil model exactly. Hosts that load
//! a configuration file build a [`SoilDynamics`] from it and pass it to
//! [`SoilRecord::scheduled_update_with`](crate::SoilRecord::scheduled_update_with).

/// Base evaporation per scheduled update, before texture, aeration,
/// organic matter, and temperature scaling.
pub const DEFAULT_EVAPORATION_BASE: f64 = 0.0008;

/// Flat evaporation added on sunny (non-raining) updates.
pub const SUN_EVAPORATION_BONUS: f64 = 0.0005;

/// Moisture gained per raining update before the texture absorption factor.
pub const DEFAULT_RAINFALL_MOISTURE_GAIN: f64 = 0.004;

/// Global scale applied to every fertilizer decay rate.
pub const DEFAULT_FERTILIZER_DECAY_MULTIPLIER: f64 = 1.0;

/// Coefficients for evaporation, rainfall, and fertilizer decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilDynamics {
    /// Base evaporation per update.
    pub evaporation_base: f64,
    /// Base rainfall moisture gain per update.
    pub rainfall_moisture_gain: f64,
    /// Multiplier applied to the record's fertilizer decay rate.
    pub fertilizer_decay_multiplier: f64,
}

impl Default for SoilDynamics {
    fn default() -> Self {
        Self {
            evaporation_base: DEFAULT_EVAPORATION_BASE,
            rainfall_moisture_gain: DEFAULT_RAINFALL_MOISTURE_GAIN,
            fertilizer_decay_multiplier: DEFAULT_FERTILIZER_DECAY_MULTIPLIER,
        }
    }
}
