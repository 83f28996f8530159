//! Static reference data for the Worldle engine.
//!
//! The catalog and the daily permutation are loaded once at startup and then
//! passed by reference into the engine. Nothing in this crate is global: the
//! embedded dataset is parsed on request by [`Catalog::embedded`] and
//! [`DailyPermutation::embedded`].

pub mod collate;
pub mod countries;
pub mod error;
pub mod permutation;

pub use collate::{collation_key, compare_names};
pub use countries::{BoundingBox, Catalog, CountryRecord};
pub use error::DataError;
pub use permutation::DailyPermutation;
