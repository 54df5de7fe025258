//! Standalone driver for the Harvest simulation.
//!
//! Stands in for the host game: it owns a small farm world, feeds host
//! ticks to the soil scheduler, offers random growth opportunities to
//! each crop through the growth hooks, and plays a farmer who harvests,
//! tills, and fertilizes.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `harvest-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load crop and fertilizer profiles
//! 4. Restore the persisted region, if any
//! 5. Lay out the farm and its irrigation
//! 6. Run the tick loop
//! 7. Log plot summaries and save the region

mod error;
mod farm;
mod world;

use std::path::Path;
use std::sync::Arc;

use harvest_core::{AmbientSampler, HarvestConfig, HarvestHooks, ProfileCatalog, SoilScheduler};
use harvest_soil::RegionStore;
use harvest_types::{BlockPos, IrrigationSource, ResourceId};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::farm::{Farm, Plot};
use crate::world::DemoWorld;

const CONFIG_FILE: &str = "harvest-config.yaml";

/// Application entry point for the Harvest engine.
///
/// # Errors
///
/// Returns an error if configuration, profile data, or the region file
/// cannot be loaded, or the region cannot be saved.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so remember whether
    //    the file was found and report it afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("harvest-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        seed = config.simulation.seed,
        max_ticks = config.simulation.max_ticks,
        update_interval_ticks = config.soil.effective_interval(),
        "Configuration loaded"
    );

    // 3. Load profiles.
    let catalog =
        ProfileCatalog::load_from_dirs(&config.data.crops_dir, &config.data.fertilizers_dir)
            .map_err(EngineError::from)?;
    let hooks = HarvestHooks::new(Arc::new(catalog));
    let mut scheduler = SoilScheduler::new(&config);

    // 4. Restore the region.
    let region_path = config.simulation.region_file.as_path();
    let mut store = load_region(region_path)?;
    info!(records = store.len(), path = %region_path.display(), "Region loaded");

    // 5. Lay out the farm.
    let mut world = DemoWorld::new();
    world.place(BlockPos::new(2, 64, 0), IrrigationSource::WaterEmitter);
    world.place(BlockPos::new(10, 64, 4), IrrigationSource::IrrigationChannel);
    let mut farm = Farm::new(hooks, starting_plots());
    if store.is_empty() {
        farm.prepare(&mut store);
    }
    info!(plots = farm.plots().len(), "Farm laid out");

    // 6. Run.
    let mut rng = SmallRng::seed_from_u64(config.simulation.seed);
    for tick in 0..config.simulation.max_ticks {
        if world.update_weather(tick, &mut rng) {
            info!(tick, raining = world.is_raining(), "Weather changed");
        }
        if let Some(summary) = scheduler.on_host_tick(&mut store, &world) {
            debug!(tick, updated = summary.updated, "Soil pass");
        }
        farm.tick(&mut store, &mut rng);
    }

    // 7. Report and save.
    farm.log_reports(&mut store);
    let stats = farm.stats();
    info!(
        opportunities = stats.opportunities,
        allowed = stats.allowed,
        denied = stats.denied,
        bonus_stages = stats.bonus_stages,
        unmodulated = stats.unmodulated,
        fertilizer_uses = stats.fertilizer_uses,
        harvests = stats.harvests,
        "Simulation complete"
    );

    save_region(&store, region_path)?;
    info!(records = store.len(), path = %region_path.display(), "Region saved");
    Ok(())
}

/// Load `harvest-config.yaml` from the working directory, or defaults if
/// it does not exist. The flag reports whether the file was read.
fn load_config() -> Result<(HarvestConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let config = HarvestConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((HarvestConfig::default(), false))
    }
}

fn load_region(path: &Path) -> Result<RegionStore, EngineError> {
    if !path.exists() {
        return Ok(RegionStore::new());
    }
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::RegionFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RegionStore::from_json_str(&text)?)
}

fn save_region(store: &RegionStore, path: &Path) -> Result<(), EngineError> {
    let text = store.to_json_string()?;
    std::fs::write(path, text).map_err(|source| EngineError::RegionFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Wheat beside the emitter, carrots beside the channel, and a row of
/// beetroots that has no profile and grows unmodulated.
fn starting_plots() -> Vec<Plot> {
    let wheat = ResourceId::parse("minecraft:wheat");
    let carrots = ResourceId::parse("minecraft:carrots");
    let beetroots = ResourceId::parse("minecraft:beetroots");

    let mut plots = Vec::new();
    for x in 0..4 {
        plots.push(Plot::new(BlockPos::new(x, 65, 1), wheat.clone()));
    }
    for x in 9..12 {
        plots.push(Plot::new(BlockPos::new(x, 65, 5), carrots.clone()));
    }
    for x in 20..22 {
        plots.push(Plot::new(BlockPos::new(x, 65, 0), beetroots.clone()));
    }
    plots
}
