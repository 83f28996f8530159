//! The fixed, pre-shuffled ordering of country codes that drives daily
//! selection.
//!
//! The ordering is generated offline ([`DailyPermutation::generate`]) and then
//! shipped as data. It is never reshuffled while serving puzzles; changing it
//! changes every future day's answer.

use crate::countries::Catalog;
use crate::error::DataError;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const EMBEDDED_PERMUTATION: &str = include_str!("../data/permutation.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DailyPermutation {
    codes: Vec<String>,
}

impl TryFrom<Vec<String>> for DailyPermutation {
    type Error = DataError;

    fn try_from(codes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<DailyPermutation> for Vec<String> {
    fn from(permutation: DailyPermutation) -> Self {
        permutation.codes
    }
}

impl DailyPermutation {
    pub fn new(codes: Vec<String>) -> Result<Self, DataError> {
        if codes.is_empty() {
            return Err(DataError::EmptyPermutation);
        }
        Ok(Self { codes })
    }

    /// Parse a JSON array of codes.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let codes: Vec<String> = serde_json::from_str(json)?;
        Self::new(codes)
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        log::info!("Loading daily permutation from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn embedded() -> Result<Self, DataError> {
        Self::from_json_str(EMBEDDED_PERMUTATION)
    }

    /// Shuffle every catalog code into a new ordering.
    ///
    /// Offline tooling only; the seed makes regenerated files reviewable.
    pub fn generate(catalog: &Catalog, seed: u64) -> Self {
        let mut codes: Vec<String> = catalog.codes().map(str::to_string).collect();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        codes.shuffle(&mut rng);
        log::debug!("Generated permutation of {} codes (seed {})", codes.len(), seed);
        Self { codes }
    }

    /// Every entry must name a catalog country, exactly once.
    ///
    /// Catalog countries missing from the permutation are allowed (they can be
    /// guessed but are never the answer) and only logged.
    pub fn validate_against(&self, catalog: &Catalog) -> Result<(), DataError> {
        let mut seen = HashSet::with_capacity(self.codes.len());
        for code in &self.codes {
            if !catalog.contains(code) {
                return Err(DataError::UnknownCode(code.clone()));
            }
            if !seen.insert(code.as_str()) {
                return Err(DataError::DuplicatePermutationEntry(code.clone()));
            }
        }

        let missing = catalog.len() - seen.len();
        if missing > 0 {
            log::warn!(
                "{} catalog countries never appear in the daily permutation",
                missing
            );
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.codes.get(index).map(String::as_str)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::{BoundingBox, CountryRecord};

    fn catalog(codes: &[&str]) -> Catalog {
        let records = codes
            .iter()
            .map(|code| CountryRecord {
                code: code.to_string(),
                name: code.to_string(),
                latitude: 0.0,
                longitude: 0.0,
                bounding_box: BoundingBox {
                    min_lat: -1.0,
                    max_lat: 1.0,
                    min_lon: -1.0,
                    max_lon: 1.0,
                },
            })
            .collect();
        Catalog::new(records).unwrap()
    }

    fn perm(codes: &[&str]) -> DailyPermutation {
        DailyPermutation::new(codes.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_embedded_permutation_matches_embedded_catalog() {
        let catalog = Catalog::embedded().unwrap();
        let permutation = DailyPermutation::embedded().unwrap();
        permutation.validate_against(&catalog).unwrap();
        assert_eq!(permutation.len(), catalog.len());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            DailyPermutation::new(vec![]).unwrap_err(),
            DataError::EmptyPermutation
        ));
        assert!(matches!(
            DailyPermutation::from_json_str("[]").unwrap_err(),
            DataError::EmptyPermutation
        ));
    }

    #[test]
    fn test_deserialize_goes_through_new() {
        let err = serde_json::from_str::<DailyPermutation>("[]").unwrap_err();
        assert!(err.to_string().contains("empty"));

        let p: DailyPermutation = serde_json::from_str(r#"["FR", "US"]"#).unwrap();
        assert_eq!(p, perm(&["FR", "US"]));
    }

    #[test]
    fn test_validate_unknown_code() {
        let err = perm(&["FR", "ZZ"])
            .validate_against(&catalog(&["FR", "US"]))
            .unwrap_err();
        assert!(matches!(err, DataError::UnknownCode(code) if code == "ZZ"));
    }

    #[test]
    fn test_validate_duplicate_entry() {
        let err = perm(&["FR", "US", "FR"])
            .validate_against(&catalog(&["FR", "US"]))
            .unwrap_err();
        assert!(matches!(err, DataError::DuplicatePermutationEntry(code) if code == "FR"));
    }

    #[test]
    fn test_partial_permutation_is_valid() {
        perm(&["US"])
            .validate_against(&catalog(&["FR", "US"]))
            .unwrap();
    }

    #[test]
    fn test_generate_is_seeded_and_complete() {
        let catalog = catalog(&["AU", "FR", "US", "DE", "JP", "BR"]);
        let a = DailyPermutation::generate(&catalog, 42);
        let b = DailyPermutation::generate(&catalog, 42);
        assert_eq!(a, b);
        a.validate_against(&catalog).unwrap();
        assert_eq!(a.len(), catalog.len());
    }

    #[test]
    fn test_json_roundtrip_shape() {
        let p = perm(&["FR", "US", "AU"]);
        let json = p.to_json_pretty().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert_eq!(DailyPermutation::from_json_str(&json).unwrap(), p);
    }
}
