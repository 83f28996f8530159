use anyhow::{Context, Result};
use std::path::Path;
use worldle_core::{DailySchedule, EngineConfig};
use worldle_data::{Catalog, DailyPermutation};

/// Everything the engine needs, loaded once per process.
pub struct Inputs {
    pub catalog: Catalog,
    pub permutation: DailyPermutation,
    pub config: EngineConfig,
}

impl Inputs {
    pub fn schedule(&self) -> DailySchedule {
        DailySchedule::new(self.config.epoch, self.permutation.clone())
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display())),
        None => {
            log::info!("Using embedded country catalog");
            Catalog::embedded().context("Embedded catalog is invalid")
        }
    }
}

/// Load catalog, permutation and config, falling back to the embedded data
/// and default config for anything not given.
///
/// The permutation is checked against the catalog here so a bad data file
/// fails at startup rather than on the day it is reached.
pub fn load_inputs(
    catalog: Option<&Path>,
    permutation: Option<&Path>,
    config: Option<&Path>,
) -> Result<Inputs> {
    let catalog = load_catalog(catalog)?;

    let permutation = match permutation {
        Some(path) => DailyPermutation::load(path)
            .with_context(|| format!("Failed to load permutation: {}", path.display()))?,
        None => DailyPermutation::embedded().context("Embedded permutation is invalid")?,
    };
    permutation
        .validate_against(&catalog)
        .context("Daily permutation does not match the catalog")?;

    let config = match config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };

    log::info!(
        "Loaded {} countries, {}-day cycle, epoch {}",
        catalog.len(),
        permutation.len(),
        config.epoch
    );

    Ok(Inputs {
        catalog,
        permutation,
        config,
    })
}
