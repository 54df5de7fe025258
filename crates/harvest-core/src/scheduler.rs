//! Periodic soil updates driven by the host's tick loop.
//!
//! The host calls [`SoilScheduler::advance`] once per host tick. Every
//! `update_interval_ticks` ticks it reports that a pass is due, and
//! [`SoilScheduler::run_pass`] updates every record of a region with the
//! same rain sample.

use harvest_soil::{RegionStore, SoilDynamics};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ambient::{AmbientSampler, irrigation_bonus, normalize_temperature};
use crate::config::{HarvestConfig, IrrigationConfig};

/// What one scheduled pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Records updated.
    pub updated: usize,
    /// Records that received an irrigation bonus.
    pub irrigated: usize,
    /// Whether it was raining during the pass.
    pub raining: bool,
}

/// Counts host ticks and runs scheduled soil passes.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilScheduler {
    /// Host ticks between passes, already clamped.
    interval: u64,
    /// Host ticks since the last pass.
    counter: u64,
    dynamics: SoilDynamics,
    irrigation: IrrigationConfig,
}

impl SoilScheduler {
    /// Create a scheduler from configuration.
    pub const fn new(config: &HarvestConfig) -> Self {
        Self {
            interval: config.soil.effective_interval(),
            counter: 0,
            dynamics: config.soil.dynamics(),
            irrigation: config.irrigation,
        }
    }

    /// Host ticks between passes.
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// Count one host tick. Returns `true` when a pass is due, and resets
    /// the count.
    pub const fn advance(&mut self) -> bool {
        self.counter = self.counter.saturating_add(1);
        if self.counter < self.interval {
            return false;
        }
        self.counter = 0;
        true
    }

    /// Count one host tick and, if a pass is due, run it over `store`.
    pub fn on_host_tick(
        &mut self,
        store: &mut RegionStore,
        sampler: &impl AmbientSampler,
    ) -> Option<PassSummary> {
        if self.advance() {
            Some(self.run_pass(store, sampler))
        } else {
            None
        }
    }

    /// Run one scheduled update over every record in `store`.
    ///
    /// Rain is sampled once for the whole pass; temperature and irrigation
    /// are sampled per record before its update.
    pub fn run_pass(&self, store: &mut RegionStore, sampler: &impl AmbientSampler) -> PassSummary {
        let raining = sampler.is_raining();
        let mut summary = PassSummary {
            raining,
            ..PassSummary::default()
        };

        for (pos, record) in store.iter_mut() {
            let temperature = normalize_temperature(sampler.temperature(pos));
            let bonus = irrigation_bonus(sampler, pos, &self.irrigation);
            if bonus > 0.0 {
                summary.irrigated = summary.irrigated.saturating_add(1);
            }
            record.scheduled_update_with(&self.dynamics, temperature, raining, bonus);
            summary.updated = summary.updated.saturating_add(1);
        }

        debug!(
            updated = summary.updated,
            irrigated = summary.irrigated,
            raining,
            "soil pass complete"
        );
        summary
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use harvest_types::{BlockPos, IrrigationSource, SoilAttribute};

    use super::*;

    struct Weather {
        raining: bool,
        rain_samples: Cell<u32>,
        emitter: Option<BlockPos>,
    }

    impl Weather {
        fn new(raining: bool) -> Self {
            Self {
                raining,
                rain_samples: Cell::new(0),
                emitter: None,
            }
        }
    }

    impl AmbientSampler for Weather {
        fn temperature(&self, _pos: BlockPos) -> f64 {
            0.75
        }

        fn is_raining(&self) -> bool {
            self.rain_samples.set(self.rain_samples.get().saturating_add(1));
            self.raining
        }

        fn irrigation_at(&self, pos: BlockPos) -> Option<IrrigationSource> {
            (self.emitter == Some(pos)).then_some(IrrigationSource::WaterEmitter)
        }
    }

    fn config_with_interval(ticks: u64) -> HarvestConfig {
        let mut config = HarvestConfig::default();
        config.soil.update_interval_ticks = ticks;
        config
    }

    #[test]
    fn pass_runs_every_interval() {
        let mut scheduler = SoilScheduler::new(&config_with_interval(5));
        let fired: Vec<bool> = (0..12).map(|_| scheduler.advance()).collect();
        let expected = [
            false, false, false, false, true, false, false, false, false, true, false, false,
        ];
        assert_eq!(fired, expected);
    }

    #[test]
    fn interval_is_clamped() {
        assert_eq!(SoilScheduler::new(&config_with_interval(0)).interval(), 5);
        assert_eq!(SoilScheduler::new(&config_with_interval(9_999)).interval(), 400);
    }

    #[test]
    fn rain_is_sampled_once_per_pass() {
        let scheduler = SoilScheduler::new(&HarvestConfig::default());
        let mut store = RegionStore::new();
        for x in 0..5 {
            store.get_or_create(BlockPos::new(x * 20, 64, 0));
        }
        let weather = Weather::new(true);
        let summary = scheduler.run_pass(&mut store, &weather);
        assert_eq!(weather.rain_samples.get(), 1);
        assert_eq!(summary.updated, 5);
        assert!(summary.raining);
    }

    #[test]
    fn pass_applies_scheduled_update_with_irrigation() {
        let scheduler = SoilScheduler::new(&HarvestConfig::default());
        let mut store = RegionStore::new();
        let wet = BlockPos::new(0, 64, 0);
        let dry = BlockPos::new(100, 64, 0);
        store.get_or_create(wet);
        store.get_or_create(dry);
        let mut weather = Weather::new(false);
        weather.emitter = Some(BlockPos::new(2, 64, 2));

        let summary = scheduler.run_pass(&mut store, &weather);
        assert_eq!(summary.irrigated, 1);

        // Temperature 0.75 normalizes to 0.5; default evaporation is 0.00124 when sunny.
        let wet_moisture = store.get(wet).unwrap().get(SoilAttribute::Moisture);
        let dry_moisture = store.get(dry).unwrap().get(SoilAttribute::Moisture);
        assert!((dry_moisture - (0.5 - 0.00124)).abs() < 1e-9);
        assert!((wet_moisture - (0.5 - 0.00124 + 0.004)).abs() < 1e-9);
    }

    #[test]
    fn on_host_tick_only_updates_when_due() {
        let mut scheduler = SoilScheduler::new(&config_with_interval(5));
        let mut store = RegionStore::new();
        let pos = BlockPos::new(0, 0, 0);
        store.get_or_create(pos);
        let weather = Weather::new(false);
        for _ in 0..4 {
            assert!(scheduler.on_host_tick(&mut store, &weather).is_none());
        }
        assert_eq!(store.get(pos).unwrap().ticks_since_fertilized(), 0);
        let summary = scheduler.on_host_tick(&mut store, &weather).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(store.get(pos).unwrap().ticks_since_fertilized(), 1);
    }
}
