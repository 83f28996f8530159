//! Player-facing interpretation of a distance entry.

use serde::{Deserialize, Serialize};

/// Great-circle distance to the antipode, rounded the way the game shows it.
pub const ANTIPODAL_DISTANCE_KM: u32 = 20_000;

/// Eight-way compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Nearest compass point; each covers 45° centred on itself.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let b = bearing_deg.rem_euclid(360.0);
        match b {
            b if b < 22.5 => Direction::N,
            b if b < 67.5 => Direction::NE,
            b if b < 112.5 => Direction::E,
            b if b < 157.5 => Direction::SE,
            b if b < 202.5 => Direction::S,
            b if b < 247.5 => Direction::SW,
            b if b < 292.5 => Direction::W,
            b if b < 337.5 => Direction::NW,
            _ => Direction::N,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::N => "↑",
            Direction::NE => "↗",
            Direction::E => "→",
            Direction::SE => "↘",
            Direction::S => "↓",
            Direction::SW => "↙",
            Direction::W => "←",
            Direction::NW => "↖",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        f.write_str(name)
    }
}

/// How close a guess is, from 0 (antipodal) to 100 (on target).
pub fn proximity_percent(distance_km: u32) -> u8 {
    let distance = distance_km.min(ANTIPODAL_DISTANCE_KM) as f64;
    let pct = ((1.0 - distance / ANTIPODAL_DISTANCE_KM as f64) * 100.0).floor();
    pct as u8
}
