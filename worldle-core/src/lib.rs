//! # Worldle engine core
//!
//! Pure computation behind the daily country puzzle: which country is today's
//! answer, how far and in which direction every other country lies from it,
//! and which flags appear in the bonus round.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐  (code, #n)  ┌──────────────────┐
//! │ DailySchedule  │─────────────▶│ build_metadata   │──▶ CountryMetadata
//! │ (epoch, perm)  │              │                  │
//! └────────────────┘              └───┬──────────┬───┘
//!                                     │          │
//!                          ┌──────────▼──┐  ┌────▼──────┐
//!                          │  geodesic   │  │  sampler  │
//!                          │ (per entry) │  │ (seeded)  │
//!                          └─────────────┘  └───────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`DailySchedule`] | Maps an instant to a [`DailySelection`] |
//! | [`build_metadata`] | `(catalog, target, seed) -> CountryMetadata` |
//! | [`SeededRng`] | Reproducible generator keyed by a seed string |
//! | [`MetadataCache`] | Optional memoization with hourly revalidation |
//! | [`GameSession`] / [`Stats`] | Guess bookkeeping for one puzzle and across days |
//!
//! Every entry point takes the [`Catalog`](worldle_data::Catalog) by
//! reference. There is no global state; two calls with the same inputs give
//! the same answer (the bonus-round display shuffle excepted).

pub mod cache;
pub mod config;
pub mod daily;
pub mod error;
pub mod feedback;
pub mod geodesic;
pub mod metadata;
pub mod sampler;
pub mod session;

pub use cache::MetadataCache;
pub use config::EngineConfig;
pub use daily::{DailySchedule, DailySelection};
pub use error::EngineError;
pub use feedback::{proximity_percent, Direction};
pub use geodesic::{bearing_deg, distance_km, LatLon};
pub use metadata::{build_metadata, build_metadata_with_rng, CountryMetadata, DistanceEntry};
pub use sampler::{sample, sample_seeded, SeededRng};
pub use session::{GameSession, Guess, Stats};
