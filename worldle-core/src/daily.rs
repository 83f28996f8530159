//! Deterministic choice of the day's country.
//!
//! The answer is a pure function of three things: a fixed epoch instant, the
//! pre-shuffled [`DailyPermutation`], and the current instant. Nothing is
//! stored; every caller recomputes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use worldle_data::DailyPermutation;

const SECONDS_PER_DAY: i64 = 86_400;

/// Today's answer and its puzzle number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySelection {
    pub target_code: String,
    /// 1-based.
    pub puzzle_number: u32,
}

impl DailySelection {
    /// Seed for the bonus-round draw: the puzzle number, so everyone playing
    /// the same puzzle gets the same flags.
    pub fn seed(&self) -> String {
        self.puzzle_number.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DailySchedule {
    epoch: DateTime<Utc>,
    permutation: DailyPermutation,
}

impl DailySchedule {
    pub fn new(epoch: DateTime<Utc>, permutation: DailyPermutation) -> Self {
        Self { epoch, permutation }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn permutation(&self) -> &DailyPermutation {
        &self.permutation
    }

    /// Whole 24h periods between the epoch and `now`.
    ///
    /// Instants before the epoch count as day zero.
    pub fn days_elapsed(&self, now: DateTime<Utc>) -> u64 {
        if now < self.epoch {
            log::debug!("{} is before the epoch {}, using day one", now, self.epoch);
            return 0;
        }
        let secs = (now - self.epoch).num_seconds();
        (secs / SECONDS_PER_DAY) as u64
    }

    /// Selection for a given number of elapsed days.
    pub fn selection_for_day(&self, days: u64) -> DailySelection {
        // DailyPermutation is never empty, so the modulus is never zero.
        let index = (days % self.permutation.len() as u64) as usize;
        let target_code = self.permutation.codes()[index].clone();
        let puzzle_number = u32::try_from(days + 1).unwrap_or(u32::MAX);

        DailySelection {
            target_code,
            puzzle_number,
        }
    }

    pub fn selection_at(&self, now: DateTime<Utc>) -> DailySelection {
        self.selection_for_day(self.days_elapsed(now))
    }

    /// Selection for the current wall-clock instant.
    pub fn today(&self) -> DailySelection {
        self.selection_at(Utc::now())
    }
}
