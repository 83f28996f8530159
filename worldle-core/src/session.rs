//! Guess bookkeeping for one puzzle, and statistics across puzzles.
//!
//! These are plain serializable values. Where they are stored, and how, is up
//! to the caller; the engine never reads or writes them on its own.

use crate::daily::DailySelection;
use crate::error::EngineError;
use crate::feedback::{proximity_percent, Direction};
use crate::metadata::CountryMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution key for a round that ran out of guesses.
pub const FAILED_KEY: &str = "X";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub country_code: String,
    pub country_name: String,
    pub distance_km: u32,
    pub bearing_deg: u16,
    pub correct: bool,
}

impl Guess {
    pub fn direction(&self) -> Direction {
        Direction::from_bearing(self.bearing_deg as f64)
    }

    pub fn proximity_percent(&self) -> u8 {
        proximity_percent(self.distance_km)
    }
}

/// Progress on a single day's puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    selection: DailySelection,
    max_guesses: usize,
    guesses: Vec<Guess>,
    bonus_guess: Option<String>,
}

impl GameSession {
    pub fn new(selection: DailySelection, max_guesses: usize) -> Self {
        Self {
            selection,
            max_guesses,
            guesses: Vec::with_capacity(max_guesses),
            bonus_guess: None,
        }
    }

    /// Whether stored progress belongs to `selection`. Progress from an
    /// earlier day should be discarded rather than resumed.
    pub fn is_for(&self, selection: &DailySelection) -> bool {
        self.selection == *selection
    }

    pub fn selection(&self) -> &DailySelection {
        &self.selection
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    pub fn remaining_guesses(&self) -> usize {
        if self.is_correct() {
            0
        } else {
            self.max_guesses.saturating_sub(self.guesses.len())
        }
    }

    pub fn is_correct(&self) -> bool {
        self.guesses.iter().any(|g| g.correct)
    }

    pub fn is_completed(&self) -> bool {
        self.is_correct() || self.guesses.len() >= self.max_guesses
    }

    /// Record a guess, using the distance and bearing from `metadata`.
    pub fn guess(
        &mut self,
        metadata: &CountryMetadata,
        country_code: &str,
    ) -> Result<&Guess, EngineError> {
        if self.is_completed() {
            return Err(EngineError::GameOver);
        }
        let entry = metadata
            .entry(country_code)
            .ok_or_else(|| EngineError::UnknownCountry(country_code.to_string()))?;
        if self.guesses.iter().any(|g| g.country_code == country_code) {
            return Err(EngineError::AlreadyGuessed(entry.country_name.clone()));
        }

        let correct = country_code == self.selection.target_code;
        log::debug!(
            "Guess {} for #{}: {} ({} km)",
            self.guesses.len() + 1,
            self.selection.puzzle_number,
            entry.country_name,
            entry.distance_km
        );
        self.guesses.push(Guess {
            country_code: entry.country_code.clone(),
            country_name: entry.country_name.clone(),
            distance_km: entry.distance_km,
            bearing_deg: entry.bearing_deg,
            correct,
        });
        Ok(&self.guesses[self.guesses.len() - 1])
    }

    /// Pick a flag in the bonus round. Returns whether it was the target's.
    pub fn bonus_guess(&mut self, country_code: &str) -> Result<bool, EngineError> {
        if !self.is_completed() {
            return Err(EngineError::GameNotFinished);
        }
        if self.bonus_guess.is_some() {
            return Err(EngineError::BonusAlreadyTaken);
        }
        self.bonus_guess = Some(country_code.to_string());
        Ok(country_code == self.selection.target_code)
    }

    /// `None` until the bonus round has been played.
    pub fn bonus_correct(&self) -> Option<bool> {
        self.bonus_guess
            .as_deref()
            .map(|code| code == self.selection.target_code)
    }
}

/// Cumulative results across days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub num_completed: u32,
    /// Wins keyed by guess count ("1", "2", ...) plus [`FAILED_KEY`] for losses.
    pub guess_distribution: BTreeMap<String, u32>,
    pub num_bonus_correct: u32,
    pub current_streak: u32,
    pub max_streak: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(6)
    }
}

impl Stats {
    pub fn new(max_guesses: usize) -> Self {
        let mut guess_distribution: BTreeMap<String, u32> =
            (1..=max_guesses).map(|n| (n.to_string(), 0)).collect();
        guess_distribution.insert(FAILED_KEY.to_string(), 0);

        Self {
            num_completed: 0,
            guess_distribution,
            num_bonus_correct: 0,
            current_streak: 0,
            max_streak: 0,
        }
    }

    /// Fold a finished session into the totals. Call once per session.
    pub fn record(&mut self, session: &GameSession) -> Result<(), EngineError> {
        if !session.is_completed() {
            return Err(EngineError::GameNotFinished);
        }

        self.num_completed += 1;
        let key = if session.is_correct() {
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
            session.num_guesses().to_string()
        } else {
            self.current_streak = 0;
            FAILED_KEY.to_string()
        };
        *self.guess_distribution.entry(key).or_insert(0) += 1;

        if session.bonus_correct() == Some(true) {
            self.num_bonus_correct += 1;
        }
        Ok(())
    }

    pub fn num_wins(&self) -> u32 {
        self.guess_distribution
            .iter()
            .filter(|(k, _)| k.as_str() != FAILED_KEY)
            .map(|(_, v)| *v)
            .sum()
    }

    pub fn win_percent(&self) -> u32 {
        percent(self.num_wins(), self.num_completed)
    }

    pub fn bonus_percent(&self) -> u32 {
        percent(self.num_bonus_correct, self.num_completed)
    }
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::metadata::build_metadata;
    use worldle_data::Catalog;

    fn setup(target: &str) -> (CountryMetadata, GameSession) {
        let catalog = Catalog::embedded().unwrap();
        let config = EngineConfig::default();
        let selection = DailySelection {
            target_code: target.to_string(),
            puzzle_number: 12,
        };
        let meta = build_metadata(&catalog, target, &selection.seed(), &config).unwrap();
        (meta, GameSession::new(selection, config.max_guesses))
    }

    #[test]
    fn test_correct_guess_completes() {
        let (meta, mut session) = setup("FR");
        let g = session.guess(&meta, "DE").unwrap();
        assert!(!g.correct);
        assert!(g.distance_km > 0);
        // Germany lies north-east of France, so France is south-west of it
        assert_eq!(g.direction(), Direction::SW);

        let g = session.guess(&meta, "FR").unwrap();
        assert!(g.correct);
        assert_eq!(g.proximity_percent(), 100);
        assert!(session.is_correct());
        assert!(session.is_completed());
        assert_eq!(session.num_guesses(), 2);
        assert_eq!(session.remaining_guesses(), 0);
        assert!(matches!(session.guess(&meta, "US"), Err(EngineError::GameOver)));
    }

    #[test]
    fn test_rejects_unknown_and_repeated() {
        let (meta, mut session) = setup("FR");
        assert!(matches!(
            session.guess(&meta, "ZZ"),
            Err(EngineError::UnknownCountry(_))
        ));
        session.guess(&meta, "US").unwrap();
        assert!(matches!(
            session.guess(&meta, "US"),
            Err(EngineError::AlreadyGuessed(name)) if name == "United States"
        ));
        assert_eq!(session.num_guesses(), 1);
        assert_eq!(session.remaining_guesses(), 5);
    }

    #[test]
    fn test_runs_out_of_guesses() {
        let (meta, mut session) = setup("FR");
        for code in ["US", "BR", "AU", "JP", "IN", "CA"] {
            session.guess(&meta, code).unwrap();
        }
        assert!(session.is_completed());
        assert!(!session.is_correct());
        assert!(matches!(session.guess(&meta, "FR"), Err(EngineError::GameOver)));
    }

    #[test]
    fn test_bonus_round_rules() {
        let (meta, mut session) = setup("JP");
        assert!(matches!(
            session.bonus_guess("JP"),
            Err(EngineError::GameNotFinished)
        ));
        assert_eq!(session.bonus_correct(), None);

        session.guess(&meta, "JP").unwrap();
        assert!(session.bonus_guess("JP").unwrap());
        assert_eq!(session.bonus_correct(), Some(true));
        assert!(matches!(
            session.bonus_guess("KR"),
            Err(EngineError::BonusAlreadyTaken)
        ));
    }

    #[test]
    fn test_session_matches_selection() {
        let (_, session) = setup("FR");
        assert!(session.is_for(&DailySelection {
            target_code: "FR".to_string(),
            puzzle_number: 12
        }));
        assert!(!session.is_for(&DailySelection {
            target_code: "US".to_string(),
            puzzle_number: 13
        }));
    }

    #[test]
    fn test_stats_streaks_and_distribution() {
        let mut stats = Stats::default();

        let (meta, mut win) = setup("FR");
        win.guess(&meta, "DE").unwrap();
        win.guess(&meta, "FR").unwrap();
        win.bonus_guess("FR").unwrap();
        stats.record(&win).unwrap();
        stats.record(&win).unwrap();
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.guess_distribution["2"], 2);
        assert_eq!(stats.num_bonus_correct, 2);

        let (meta, mut loss) = setup("FR");
        for code in ["US", "BR", "AU", "JP", "IN", "CA"] {
            loss.guess(&meta, code).unwrap();
        }
        loss.bonus_guess("US").unwrap();
        stats.record(&loss).unwrap();
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.guess_distribution[FAILED_KEY], 1);
        assert_eq!(stats.num_completed, 3);
        assert_eq!(stats.num_wins(), 2);
        assert_eq!(stats.win_percent(), 67);
        assert_eq!(stats.bonus_percent(), 67);
    }

    #[test]
    fn test_stats_reject_unfinished_session() {
        let (_, session) = setup("FR");
        let mut stats = Stats::default();
        assert!(matches!(
            stats.record(&session),
            Err(EngineError::GameNotFinished)
        ));
        assert_eq!(stats.num_completed, 0);
        assert_eq!(stats.win_percent(), 0);
    }

    #[test]
    fn test_session_roundtrips_through_json() {
        let (meta, mut session) = setup("US");
        session.guess(&meta, "CA").unwrap();
        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.guesses()[0].country_name, "Canada");
    }

    #[test]
    fn test_restored_session_with_excess_guesses() {
        let (meta, mut session) = setup("US");
        for code in ["CA", "MX", "BR"] {
            session.guess(&meta, code).unwrap();
        }
        // stored under a larger limit, restored with a smaller one
        let mut json = serde_json::to_value(&session).unwrap();
        json["max_guesses"] = serde_json::json!(2);
        let restored: GameSession = serde_json::from_value(json).unwrap();
        assert_eq!(restored.remaining_guesses(), 0);
        assert!(restored.is_completed());
    }
}
