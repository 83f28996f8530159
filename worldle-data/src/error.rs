//! Error types for loading and validating catalog data.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog contains no countries")]
    EmptyCatalog,
    #[error("Duplicate country code: {0}")]
    DuplicateCode(String),
    #[error("Invalid coordinates for {code}: lat {lat}, lon {lon}")]
    InvalidCoordinates { code: String, lat: f64, lon: f64 },
    #[error("Invalid bounding box for {0}")]
    InvalidBoundingBox(String),
    #[error("Permutation references unknown country code: {0}")]
    UnknownCode(String),
    #[error("Permutation lists {0} more than once")]
    DuplicatePermutationEntry(String),
    #[error("Permutation is empty")]
    EmptyPermutation,
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
