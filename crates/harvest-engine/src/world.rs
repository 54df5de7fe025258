//! A tiny stand-in for the host game world.
//!
//! Holds the weather and the irrigation blocks of a single farm, and
//! answers the ambient queries the soil scheduler makes. Weather is rolled
//! from the shared seeded RNG so whole runs are reproducible.

use std::collections::BTreeMap;

use harvest_core::AmbientSampler;
use harvest_types::{BlockPos, IrrigationSource};
use rand::Rng;

/// Host ticks between weather rolls.
pub const WEATHER_PERIOD_TICKS: u64 = 200;

/// Chance that a dry period turns to rain.
const RAIN_START_CHANCE: f64 = 0.3;

/// Chance that a rainy period keeps raining.
const RAIN_PERSIST_CHANCE: f64 = 0.5;

/// Raw temperature at `x = 0`.
const BASE_TEMPERATURE: f64 = 0.8;

/// Raw temperature gained per block east.
const TEMPERATURE_GRADIENT: f64 = 0.02;

/// Weather and irrigation blocks of the demo farm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoWorld {
    raining: bool,
    irrigation: BTreeMap<BlockPos, IrrigationSource>,
}

impl DemoWorld {
    /// Create a dry world with no irrigation.
    pub const fn new() -> Self {
        Self {
            raining: false,
            irrigation: BTreeMap::new(),
        }
    }

    /// Place an irrigation block.
    pub fn place(&mut self, pos: BlockPos, source: IrrigationSource) {
        self.irrigation.insert(pos, source);
    }

    /// Roll new weather if `tick` starts a weather period. Returns `true`
    /// when the rain state changed.
    pub fn update_weather(&mut self, tick: u64, rng: &mut impl Rng) -> bool {
        if tick % WEATHER_PERIOD_TICKS != 0 {
            return false;
        }
        let chance = if self.raining {
            RAIN_PERSIST_CHANCE
        } else {
            RAIN_START_CHANCE
        };
        let raining = rng.random::<f64>() < chance;
        let changed = raining != self.raining;
        self.raining = raining;
        changed
    }
}

impl AmbientSampler for DemoWorld {
    fn temperature(&self, pos: BlockPos) -> f64 {
        BASE_TEMPERATURE + f64::from(pos.x) * TEMPERATURE_GRADIENT
    }

    fn is_raining(&self) -> bool {
        self.raining
    }

    fn irrigation_at(&self, pos: BlockPos) -> Option<IrrigationSource> {
        self.irrigation.get(&pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn weather_only_changes_on_period_boundaries() {
        let mut world = DemoWorld::new();
        let mut rng = SmallRng::seed_from_u64(3);
        for tick in 1..WEATHER_PERIOD_TICKS {
            assert!(!world.update_weather(tick, &mut rng));
        }
    }

    #[test]
    fn weather_is_reproducible_for_a_seed() {
        let roll = |seed| {
            let mut world = DemoWorld::new();
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..20)
                .map(|period| {
                    world.update_weather(period * WEATHER_PERIOD_TICKS, &mut rng);
                    world.is_raining()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(roll(11), roll(11));
    }

    #[test]
    fn placed_blocks_are_visible() {
        let mut world = DemoWorld::new();
        let pos = BlockPos::new(2, 64, 0);
        world.place(pos, IrrigationSource::WaterEmitter);
        assert_eq!(world.irrigation_at(pos), Some(IrrigationSource::WaterEmitter));
        assert_eq!(world.irrigation_at(BlockPos::new(3, 64, 0)), None);
    }

    #[test]
    fn temperature_rises_eastward() {
        let world = DemoWorld::new();
        let west = world.temperature(BlockPos::new(-10, 64, 0));
        let east = world.temperature(BlockPos::new(10, 64, 0));
        assert!(east > west);
    }
}
