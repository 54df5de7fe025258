//! Ambient inputs the host supplies to the scheduled soil update.
//!
//! The core never reads the host world directly. The host implements
//! [`AmbientSampler`] over whatever it considers the world, and the
//! scheduler asks it for temperature, rain, and nearby irrigation blocks.

use harvest_types::{BlockPos, IrrigationSource};

use crate::config::IrrigationConfig;

/// Lowest raw host temperature the normalization expects.
pub const HOST_TEMPERATURE_MIN: f64 = -0.5;

/// Highest raw host temperature the normalization expects.
pub const HOST_TEMPERATURE_MAX: f64 = 2.0;

/// Host-provided view of weather and nearby blocks.
pub trait AmbientSampler {
    /// Raw temperature at `pos`, nominally within `[-0.5, 2.0]`.
    fn temperature(&self, pos: BlockPos) -> f64;

    /// Whether it is raining. Sampled once per scheduled pass.
    fn is_raining(&self) -> bool;

    /// The irrigation block at exactly `pos`, if there is one.
    fn irrigation_at(&self, pos: BlockPos) -> Option<IrrigationSource>;
}

/// Map a raw host temperature onto `[0, 1]`, clamping out-of-range values.
pub fn normalize_temperature(raw: f64) -> f64 {
    let span = HOST_TEMPERATURE_MAX - HOST_TEMPERATURE_MIN;
    harvest_soil::clamp01((raw - HOST_TEMPERATURE_MIN) / span)
}

/// Whether `source` appears in the square x/z neighbourhood of `pos` at
/// the same height.
///
/// Scans `dx` outer and `dz` inner, both from `-radius` to `radius`, and
/// stops at the first hit.
pub fn scan_for(
    sampler: &impl AmbientSampler,
    pos: BlockPos,
    radius: i32,
    source: IrrigationSource,
) -> bool {
    let radius = radius.max(0);
    (-radius..=radius).any(|dx| {
        (-radius..=radius).any(|dz| sampler.irrigation_at(pos.offset(dx, 0, dz)) == Some(source))
    })
}

/// Irrigation bonus for soil at `pos`.
///
/// An emitter in range wins outright and the channel scan is skipped;
/// otherwise a channel in range gives the smaller bonus.
pub fn irrigation_bonus(
    sampler: &impl AmbientSampler,
    pos: BlockPos,
    config: &IrrigationConfig,
) -> f64 {
    if scan_for(sampler, pos, config.emitter_radius, IrrigationSource::WaterEmitter) {
        config.emitter_bonus
    } else if scan_for(sampler, pos, config.channel_radius, IrrigationSource::IrrigationChannel) {
        config.channel_bonus
    } else {
        0.0
    }
}
