use crate::error::DataError;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Dataset compiled into the binary.
const EMBEDDED_COUNTRIES: &str = include_str!("../data/countries.json");

/// Latitude/longitude extent of a country, in degrees.
///
/// `min_lon > max_lon` means the box crosses the antimeridian and covers
/// `min_lon..=180` plus `-180..=max_lon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    fn is_valid(&self) -> bool {
        self.min_lat <= self.max_lat
            && valid_lat(self.min_lat)
            && valid_lat(self.max_lat)
            && valid_lon(self.min_lon)
            && valid_lon(self.max_lon)
    }
}

/// A single country in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2 code, unique within a catalog.
    pub code: String,
    pub name: String,
    /// Centroid latitude in degrees.
    pub latitude: f64,
    /// Centroid longitude in degrees.
    pub longitude: f64,
    pub bounding_box: BoundingBox,
}

/// On-disk shape: the code is the object key.
#[derive(Debug, Deserialize)]
struct RawCountry {
    name: String,
    latitude: f64,
    longitude: f64,
    bounding_box: BoundingBox,
}

/// Object entries in document order, duplicates included.
struct RawCatalog(Vec<(String, RawCountry)>);

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of country code to country")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawCatalog, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawCountry>()? {
                    entries.push(entry);
                }
                Ok(RawCatalog(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn valid_lat(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

fn valid_lon(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon)
}

/// Immutable set of countries, in a fixed order.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<CountryRecord>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating every record.
    ///
    /// Record order is preserved; it is the tie-break order for anything that
    /// sorts catalog entries.
    pub fn new(records: Vec<CountryRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyCatalog);
        }

        let mut by_code = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if !valid_lat(record.latitude) || !valid_lon(record.longitude) {
                return Err(DataError::InvalidCoordinates {
                    code: record.code.clone(),
                    lat: record.latitude,
                    lon: record.longitude,
                });
            }
            if !record.bounding_box.is_valid() {
                return Err(DataError::InvalidBoundingBox(record.code.clone()));
            }
            if by_code.insert(record.code.clone(), idx).is_some() {
                return Err(DataError::DuplicateCode(record.code.clone()));
            }
        }

        Ok(Self { records, by_code })
    }

    /// Parse the `{ "CODE": { name, latitude, longitude, bounding_box } }`
    /// document. Records come out sorted by code; a repeated key is a
    /// [`DataError::DuplicateCode`].
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let RawCatalog(mut raw) = serde_json::from_str(json)?;
        raw.sort_by(|a, b| a.0.cmp(&b.0));
        let records = raw
            .into_iter()
            .map(|(code, c)| CountryRecord {
                code,
                name: c.name,
                latitude: c.latitude,
                longitude: c.longitude,
                bounding_box: c.bounding_box,
            })
            .collect();
        Self::new(records)
    }

    /// Load a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        log::info!("Loading country catalog from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let catalog = Self::from_json_str(&json)?;
        log::info!("Loaded {} countries", catalog.len());
        Ok(catalog)
    }

    /// The dataset shipped with the crate.
    pub fn embedded() -> Result<Self, DataError> {
        Self::from_json_str(EMBEDDED_COUNTRIES)
    }

    pub fn get(&self, code: &str) -> Option<&CountryRecord> {
        self.by_code.get(code).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
