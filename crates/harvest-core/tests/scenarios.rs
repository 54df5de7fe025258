//! End-to-end scenarios across soil, profiles, growth, and scheduling.
//!
//! Each test drives the public API the way a host would: a region store, a
//! profile catalog, the hooks facade, and a scripted or seeded RNG.

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use std::collections::BTreeMap;
use std::sync::Arc;

use harvest_core::{
    AmbientSampler, CropStage, GrowthDecision, HarvestConfig, HarvestHooks, ProfileCatalog,
    SoilScheduler,
};
use harvest_soil::{FertilizerEffect, RegionStore, SoilRecord};
use harvest_types::{BlockPos, GrowthBand, IrrigationSource, ResourceId, SoilAttribute};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

const TOLERANCE: f64 = 1e-9;

const WHEAT: &str = r#"{
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
}"#;

/// Returns the same word forever. `0` draws 0.0; `u64::MAX` draws just
/// under 1.0.
struct FixedRng(u64);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = self.0.to_le_bytes()[i % 8];
        }
    }
}

/// Fixed weather with a set of irrigation blocks.
struct Farm {
    raining: bool,
    temperature: f64,
    blocks: BTreeMap<BlockPos, IrrigationSource>,
}

impl AmbientSampler for Farm {
    fn temperature(&self, _pos: BlockPos) -> f64 {
        self.temperature
    }

    fn is_raining(&self) -> bool {
        self.raining
    }

    fn irrigation_at(&self, pos: BlockPos) -> Option<IrrigationSource> {
        self.blocks.get(&pos).copied()
    }
}

fn wheat_hooks() -> HarvestHooks {
    HarvestHooks::new(Arc::new(ProfileCatalog::from_sources(&[("wheat.json", WHEAT)], &[])))
}

fn wheat_id() -> ResourceId {
    ResourceId::parse("minecraft:wheat")
}

#[test]
fn default_soil_wheat_growth_is_probabilistic() {
    let catalog = ProfileCatalog::from_sources(&[("wheat.json", WHEAT)], &[]);
    let profile = catalog.crop(&wheat_id()).unwrap();
    let soil = SoilRecord::new();

    let growth = profile.compute_growth_for(&soil);
    assert!((growth - 0.875).abs() < 1e-3);
    let multiplier = harvest_core::growth::growth_multiplier(&soil, profile);
    assert!((multiplier - growth).abs() < TOLERANCE);
    assert_eq!(GrowthBand::classify(multiplier), GrowthBand::Probabilistic);
}

#[test]
fn compost_then_one_decay_step() {
    let mut soil = SoilRecord::new();
    soil.apply_fertilizer(&FertilizerEffect::basic_compost());
    assert!((soil.get(SoilAttribute::Fertility) - 0.45).abs() < TOLERANCE);
    assert!((soil.get(SoilAttribute::OrganicMatter) - 0.45).abs() < TOLERANCE);
    assert!((soil.fertilizer_intensity() - 0.05).abs() < TOLERANCE);
    assert!((soil.fertilizer_decay_rate() - 0.0005).abs() < TOLERANCE);
    assert_eq!(soil.ticks_since_fertilized(), 0);

    soil.tick_fertilizer_decay();
    assert!((soil.fertilizer_intensity() - 0.0495).abs() < TOLERANCE);
    assert!((soil.get(SoilAttribute::Fertility) - 0.449_75).abs() < TOLERANCE);
    assert!((soil.get(SoilAttribute::OrganicMatter) - 0.4499).abs() < TOLERANCE);
    assert_eq!(soil.ticks_since_fertilized(), 1);
}

#[test]
fn stress_caps_at_one_after_sixty_registrations() {
    let mut soil = SoilRecord::new();
    for _ in 0..60 {
        soil.register_stress(0.02);
    }
    assert!((soil.stress_score() - 1.0).abs() < TOLERANCE);
}

#[test]
fn region_round_trip_preserves_every_record() {
    let hooks = wheat_hooks();
    let mut store = RegionStore::new();
    let mut rng = FixedRng(u64::MAX);
    let crop_pos = BlockPos::new(10, 65, -4);

    hooks.on_till(&mut store, crop_pos.below());
    hooks.on_fertilizer(
        &mut store,
        crop_pos.below(),
        &ResourceId::new("harvest", "nitrogen_mix_fertilizer"),
    );
    hooks.on_growth_attempt(&mut store, crop_pos, &wheat_id(), CropStage::new(1, 7), &mut rng);
    hooks.soil_report(&mut store, BlockPos::new(-200, 70, 31));

    let text = store.to_json_string().unwrap();
    let restored = RegionStore::from_json_str(&text).unwrap();
    assert_eq!(restored, store);
    assert_eq!(restored.len(), 2);
}

#[test]
fn fertilized_tilled_soil_unlocks_bonus_stages() {
    let hooks = wheat_hooks();
    let mut store = RegionStore::new();
    let crop_pos = BlockPos::new(0, 65, 0);
    let soil_pos = crop_pos.below();

    for _ in 0..10 {
        hooks.on_till(&mut store, soil_pos);
    }
    let soil = store.get_or_create(soil_pos);
    soil.set(SoilAttribute::Moisture, 0.6);
    soil.set(SoilAttribute::Fertility, 0.7);
    soil.set(SoilAttribute::OrganicMatter, 0.9);
    assert!(soil.get(SoilAttribute::Aeration) >= 0.6);
    assert_eq!(soil.hoe_count(), 10);

    // 1.12 intensive uplift times 1.10 hoe bonus lands in the boosted band.
    let mut rng = FixedRng(0);
    let decision =
        hooks.on_growth_attempt(&mut store, crop_pos, &wheat_id(), CropStage::new(2, 7), &mut rng);
    assert_eq!(decision, Some(GrowthDecision::Allow { bonus_age: Some(3) }));
}

#[test]
fn repeated_rejection_feeds_back_into_stress() {
    let hooks = wheat_hooks();
    let mut store = RegionStore::new();
    let crop_pos = BlockPos::new(0, 65, 0);
    store
        .get_or_create(crop_pos.below())
        .set(SoilAttribute::Fertility, 0.0);

    let mut rng = FixedRng(u64::MAX);
    let mut denials = 0_u32;
    for _ in 0..20 {
        let decision =
            hooks.on_growth_attempt(&mut store, crop_pos, &wheat_id(), CropStage::new(0, 7), &mut rng);
        if decision == Some(GrowthDecision::Deny) {
            denials += 1;
        }
    }
    assert_eq!(denials, 20);
    let stress = store.get(crop_pos.below()).unwrap().stress_score();
    assert!((stress - 0.2).abs() < TOLERANCE);
}

#[test]
fn seeded_season_is_reproducible() {
    fn run(seed: u64) -> RegionStore {
        let hooks = wheat_hooks();
        let mut config = HarvestConfig::default();
        config.soil.update_interval_ticks = 10;
        let mut scheduler = SoilScheduler::new(&config);
        let mut store = RegionStore::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut farm = Farm {
            raining: false,
            temperature: 0.8,
            blocks: BTreeMap::new(),
        };
        farm.blocks
            .insert(BlockPos::new(2, 64, 0), IrrigationSource::WaterEmitter);

        let crops: Vec<BlockPos> = (0..4).map(|x| BlockPos::new(x, 65, 0)).collect();
        for tick in 0..400_u64 {
            farm.raining = (tick / 100) % 2 == 1;
            scheduler.on_host_tick(&mut store, &farm);
            if tick % 25 == 0 {
                for pos in &crops {
                    let decision = hooks.on_growth_attempt(
                        &mut store,
                        *pos,
                        &wheat_id(),
                        CropStage::new(0, 7),
                        &mut rng,
                    );
                    if decision.is_some_and(GrowthDecision::is_allowed) {
                        hooks.on_growth_completed(&mut store, *pos);
                    }
                }
            }
        }
        store
    }

    let first = run(7);
    let second = run(7);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    for (_, soil) in first.iter() {
        for attr in SoilAttribute::ALL {
            let value = soil.get(attr);
            assert!((0.0..=1.0).contains(&value));
        }
        assert!((0.0..=1.0).contains(&soil.stress_score()));
    }
}

#[test]
fn reload_changes_future_decisions_only() {
    let mut hooks = wheat_hooks();
    let mut store = RegionStore::new();
    let crop_pos = BlockPos::new(0, 65, 0);
    let mut rng = FixedRng(0);

    let before = hooks.catalog();
    assert!(
        hooks
            .on_growth_attempt(&mut store, crop_pos, &wheat_id(), CropStage::new(0, 7), &mut rng)
            .is_some()
    );

    hooks.on_reload(Arc::new(ProfileCatalog::new()));
    assert!(
        hooks
            .on_growth_attempt(&mut store, crop_pos, &wheat_id(), CropStage::new(0, 7), &mut rng)
            .is_none()
    );
    assert!(before.crop(&wheat_id()).is_some());
}
