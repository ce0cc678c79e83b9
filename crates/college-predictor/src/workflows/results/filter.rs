use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::workflows::prediction::PredictionRecord;

/// Region and state narrowing applied to a result set. The two fields are
/// independent equality predicates; an unset or blank field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl FilterState {
    pub fn new(region: Option<String>, state: Option<String>) -> Self {
        Self { region, state }
    }

    pub fn is_active(&self) -> bool {
        active(&self.region).is_some() || active(&self.state).is_some()
    }

    pub fn matches(&self, record: &PredictionRecord) -> bool {
        let region_ok = active(&self.region)
            .map(|region| record.region.trim() == region)
            .unwrap_or(true);
        let state_ok = active(&self.state)
            .map(|state| record.state.trim() == state)
            .unwrap_or(true);
        region_ok && state_ok
    }

    /// Editing policy: picking a region discards any chosen state, since the
    /// region is the broader axis.
    pub fn select_region(&mut self, region: Option<String>) {
        self.region = region;
        self.state = None;
    }

    pub fn select_state(&mut self, state: Option<String>) {
        self.state = state;
    }

    pub fn clear(&mut self) {
        self.region = None;
        self.state = None;
    }
}

/// Sorted unique states under each region, projected from the unfiltered
/// result set. Region names are compared exactly.
pub fn states_by_region(records: &[PredictionRecord]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for record in records {
        if record.region.is_empty() || record.state.is_empty() {
            continue;
        }
        grouped
            .entry(record.region.clone())
            .or_default()
            .insert(record.state.clone());
    }
    grouped
        .into_iter()
        .map(|(region, states)| (region, states.into_iter().collect()))
        .collect()
}

/// Number of records per region, for labelling region choices.
pub fn region_counts(records: &[PredictionRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records.iter().filter(|record| !record.region.is_empty()) {
        *counts.entry(record.region.clone()).or_insert(0) += 1;
    }
    counts
}

/// States worth offering for the current filter: those under the selected
/// region, or every state present when no region is selected.
pub fn available_states(records: &[PredictionRecord], filter: &FilterState) -> Vec<String> {
    match active(&filter.region) {
        Some(region) => states_by_region(records)
            .remove(region)
            .unwrap_or_default(),
        None => records
            .iter()
            .filter(|record| !record.state.is_empty())
            .map(|record| record.state.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}
