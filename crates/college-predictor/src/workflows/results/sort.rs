use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::workflows::prediction::PredictionRecord;

/// Numeric record fields a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    MatchPercentage,
    AppliedCutoff,
    OpeningRank,
    ClosingRank,
}

impl SortKey {
    /// Missing values sort as zero.
    pub fn value(&self, record: &PredictionRecord) -> u64 {
        match self {
            SortKey::MatchPercentage => u64::from(record.match_percentage),
            SortKey::AppliedCutoff => record.applied_cutoff.map(u64::from).unwrap_or(0),
            SortKey::OpeningRank => record.opening_rank.map(u64::from).unwrap_or(0),
            SortKey::ClosingRank => record.closing_rank.map(u64::from).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Re-selecting the active key flips the direction; a new key starts
    /// descending.
    pub fn select(&mut self, key: SortKey) {
        if key == self.key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn compare(&self, a: &PredictionRecord, b: &PredictionRecord) -> Ordering {
        let ordering = self.key.value(a).cmp(&self.key.value(b));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable: records with equal values keep their relative order.
    pub fn apply(&self, records: &mut [&PredictionRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::results::tests::record;

    #[test]
    fn reselecting_key_toggles_direction() {
        let mut sort = SortState::default();
        assert_eq!(sort.key, SortKey::MatchPercentage);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.select(SortKey::MatchPercentage);
        assert_eq!(sort.direction, SortDirection::Ascending);
        sort.select(SortKey::MatchPercentage);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn new_key_defaults_to_descending() {
        let mut sort = SortState::new(SortKey::MatchPercentage, SortDirection::Ascending);
        sort.select(SortKey::AppliedCutoff);
        assert_eq!(sort.key, SortKey::AppliedCutoff);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn missing_values_sort_as_zero() {
        let mut with_cutoff = record("with", 50, "Delhi", "North");
        with_cutoff.applied_cutoff = Some(1200);
        let mut without_cutoff = record("without", 50, "Delhi", "North");
        without_cutoff.applied_cutoff = None;

        let mut refs = vec![&with_cutoff, &without_cutoff];
        SortState::new(SortKey::AppliedCutoff, SortDirection::Ascending).apply(&mut refs);
        assert_eq!(refs[0].id, "without");
        assert_eq!(SortKey::AppliedCutoff.value(&without_cutoff), 0);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let records = vec![
            record("first", 81, "Delhi", "North"),
            record("second", 96, "Delhi", "North"),
            record("third", 81, "Delhi", "North"),
            record("fourth", 96, "Delhi", "North"),
        ];
        let sort = SortState::default();

        let mut once: Vec<&PredictionRecord> = records.iter().collect();
        sort.apply(&mut once);
        let ids: Vec<&str> = once.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "fourth", "first", "third"]);

        let mut twice = once.clone();
        sort.apply(&mut twice);
        assert_eq!(once, twice);
    }
}
