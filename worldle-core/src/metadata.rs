//! Assembly of the per-puzzle payload.
//!
//! For a target country this produces the distance and bearing from every
//! catalog country to the target, plus the bonus-round flag candidates.
//!
//! Bearings point from the guessed country **towards** the target: they tell
//! the player which way to go next.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::geodesic::{bearing_deg, distance_km, LatLon};
use crate::sampler::{sample, SeededRng};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use worldle_data::{compare_names, Catalog, CountryRecord};

/// Distance and heading from one catalog country to the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub country_code: String,
    pub country_name: String,
    pub distance_km: u32,
    /// Rounded, always in `0..360`.
    pub bearing_deg: u16,
}

/// Everything a client needs to play one puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMetadata {
    pub target: CountryRecord,
    /// One entry per catalog country, ordered by display name.
    pub distances: Vec<DistanceEntry>,
    /// Bonus-round flags in display order; contains the target exactly once.
    pub bonus_candidates: Vec<String>,
}

impl CountryMetadata {
    pub fn entry(&self, code: &str) -> Option<&DistanceEntry> {
        self.distances.iter().find(|e| e.country_code == code)
    }
}

fn distance_entry(country: &CountryRecord, target: LatLon) -> DistanceEntry {
    let from = LatLon::from(country);
    let distance = distance_km(from, target);
    let bearing = bearing_deg(from, target);

    DistanceEntry {
        country_code: country.code.clone(),
        country_name: country.name.clone(),
        distance_km: distance.round() as u32,
        // 359.6 rounds up to 360, which is north again
        bearing_deg: (bearing.round() as u16) % 360,
    }
}

/// Build metadata with a thread-local RNG for the bonus display shuffle.
///
/// The sampled candidate set is reproducible from `seed`; only the order the
/// flags are shown in varies between calls.
pub fn build_metadata(
    catalog: &Catalog,
    target_code: &str,
    seed: &str,
    config: &EngineConfig,
) -> Result<CountryMetadata, EngineError> {
    build_metadata_with_rng(
        catalog,
        target_code,
        seed,
        config,
        &mut rand::thread_rng(),
    )
}

/// Build metadata, using `display_rng` for the final bonus shuffle.
pub fn build_metadata_with_rng<R: Rng + ?Sized>(
    catalog: &Catalog,
    target_code: &str,
    seed: &str,
    config: &EngineConfig,
    display_rng: &mut R,
) -> Result<CountryMetadata, EngineError> {
    let target = catalog
        .get(target_code)
        .ok_or_else(|| EngineError::UnknownCountry(target_code.to_string()))?;
    let target_point = LatLon::from(target);

    let mut distances: Vec<DistanceEntry> = catalog
        .records()
        .iter()
        .map(|country| distance_entry(country, target_point))
        .collect();
    // stable: equal names keep catalog order
    distances.sort_by(|a, b| compare_names(&a.country_name, &b.country_name));

    if config.bonus_round_size == 0 {
        return Err(EngineError::InvalidSampleSize {
            requested: 0,
            available: catalog.len(),
        });
    }
    let others: Vec<&str> = catalog.codes().filter(|&code| code != target_code).collect();
    let mut rng = SeededRng::from_seed_str(seed);
    let mut bonus_candidates: Vec<String> = sample(&others, config.bonus_round_size - 1, &mut rng)?
        .into_iter()
        .map(str::to_string)
        .collect();
    bonus_candidates.push(target.code.clone());
    bonus_candidates.shuffle(display_rng);

    log::debug!(
        "Built metadata for {} ({} distances, {} bonus flags, seed {})",
        target.code,
        distances.len(),
        bonus_candidates.len(),
        seed
    );

    Ok(CountryMetadata {
        target: target.clone(),
        distances,
        bonus_candidates,
    })
}
