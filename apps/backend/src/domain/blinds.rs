//! Blind level table applied to successive rounds of a match.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One blind level: the values a round freezes at creation time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    /// Duration of the level in seconds of active (non-paused) play.
    pub duration_secs: i64,
}

impl BlindLevel {
    pub fn new(small_blind: Decimal, big_blind: Decimal, duration_secs: i64) -> Self {
        Self {
            small_blind,
            big_blind,
            duration_secs,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.small_blind <= Decimal::ZERO {
            return Err(format!("blind level: small_blind {} <= 0", self.small_blind));
        }
        if self.big_blind <= self.small_blind {
            return Err(format!(
                "blind level: big_blind ({}) <= small_blind ({})",
                self.big_blind, self.small_blind
            ));
        }
        if self.duration_secs <= 0 {
            return Err("blind level: duration_secs <= 0".into());
        }
        Ok(())
    }
}

/// Row of the blind-structure projection exposed on the match detail view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevelSummary {
    pub round: usize,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
}

/// Ordered, immutable table of blind levels, indexed by round number
/// starting at 0. Defined once per deployment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindStructure {
    levels: Vec<BlindLevel>,
}

impl BlindStructure {
    pub fn new(levels: Vec<BlindLevel>) -> Self {
        Self { levels }
    }

    /// The production table: eight fast one-minute levels, then four
    /// thirty-minute levels.
    pub fn standard() -> Self {
        let level =
            |sb: i64, bb: i64, secs: i64| BlindLevel::new(cents(sb), cents(bb), secs);
        Self::new(vec![
            level(25, 50, 60),
            level(50, 100, 60),
            level(75, 150, 60),
            level(100, 200, 60),
            level(125, 250, 60),
            level(200, 400, 60),
            level(300, 600, 60),
            level(500, 1000, 60),
            level(700, 1400, 30 * 60),
            level(1000, 2000, 30 * 60),
            level(1500, 3000, 30 * 60),
            level(3000, 6000, 30 * 60),
        ])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The level for the given 0-based index.
    pub fn level(&self, index: usize) -> Option<&BlindLevel> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[BlindLevel] {
        &self.levels
    }

    /// `(round, small_blind, big_blind)` rows for the match detail view.
    pub fn summary(&self) -> Vec<BlindLevelSummary> {
        self.levels
            .iter()
            .enumerate()
            .map(|(round, level)| BlindLevelSummary {
                round,
                small_blind: level.small_blind,
                big_blind: level.big_blind,
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("blind structure: empty levels".into());
        }
        for (index, level) in self.levels.iter().enumerate() {
            level
                .validate()
                .map_err(|e| format!("level {index}: {e}"))?;
        }
        Ok(())
    }
}

impl Default for BlindStructure {
    fn default() -> Self {
        Self::standard()
    }
}

/// Decimal chip amount from cents, e.g. `cents(25)` == 0.25.
fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_structure_is_valid() {
        let structure = BlindStructure::standard();
        assert_eq!(structure.len(), 12);
        structure.validate().expect("standard table validates");
    }

    #[test]
    fn standard_structure_first_level() {
        let structure = BlindStructure::standard();
        let first = structure.level(0).expect("level 0");
        assert_eq!(first.small_blind, Decimal::new(25, 2));
        assert_eq!(first.big_blind, Decimal::new(50, 2));
        assert_eq!(first.duration_secs, 60);
    }

    #[test]
    fn summary_projects_round_and_blinds() {
        let structure = BlindStructure::standard();
        let summary = structure.summary();
        assert_eq!(summary.len(), structure.len());
        assert_eq!(summary[0].round, 0);
        assert_eq!(summary[11].small_blind, Decimal::new(3000, 2));
    }

    #[test]
    fn inverted_blinds_fail_validation() {
        let level = BlindLevel::new(Decimal::new(100, 2), Decimal::new(50, 2), 60);
        assert!(level.validate().is_err());
    }

    #[test]
    fn empty_structure_fails_validation() {
        assert!(BlindStructure::new(vec![]).validate().is_err());
    }
}
