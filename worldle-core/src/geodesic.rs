//! Great-circle math on a spherical Earth.
//!
//! Results are full precision. Rounding happens once, when a
//! [`DistanceEntry`](crate::metadata::DistanceEntry) is built.

use serde::{Deserialize, Serialize};
use worldle_data::CountryRecord;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<&CountryRecord> for LatLon {
    fn from(record: &CountryRecord) -> Self {
        Self::new(record.latitude, record.longitude)
    }
}

/// Haversine distance in kilometres.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push near-antipodal points just past 1
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` towards `to`, in `[0, 360)`. 0 is north.
///
/// Coincident points have no direction; they resolve to 0.
pub fn bearing_deg(from: LatLon, to: LatLon) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlon = (to.lon - from.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let theta = y.atan2(x).to_degrees();

    (theta + 360.0) % 360.0
}
