use serde::Serialize;

use super::domain::SelectionEntry;

pub const MISSING_VALUE: &str = "N/A";

/// One labelled row of the side-by-side comparison, one value per college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComparisonTable {
    pub ids: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

/// Renders `value` with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn text(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING_VALUE.to_string()
    } else {
        value.to_string()
    }
}

fn plain<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

fn number(value: Option<u32>) -> String {
    value
        .map(|value| group_thousands(u64::from(value)))
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

type Field = (&'static str, fn(&SelectionEntry) -> String);

const FIELDS: [Field; 13] = [
    ("Institute Name", |entry| text(&entry.institute_name)),
    ("Branch", |entry| text(&entry.branch)),
    ("Type", |entry| text(&entry.institution_type)),
    ("State", |entry| text(&entry.state)),
    ("Region", |entry| text(&entry.region)),
    ("Match Score", |entry| {
        entry
            .match_percentage
            .map(|value| format!("{value}%"))
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    }),
    ("Admission Chance", |entry| {
        plain(entry.admission_chance.map(|chance| chance.label()))
    }),
    ("Opening Rank", |entry| number(entry.opening_rank)),
    ("Closing Rank", |entry| number(entry.closing_rank)),
    ("Applied Cutoff", |entry| number(entry.applied_cutoff)),
    ("Year", |entry| plain(entry.year)),
    ("Round", |entry| plain(entry.round)),
    ("Eligibility", |entry| {
        plain(entry.eligibility_status.map(|status| status.label()))
    }),
];

/// Builds the comparison grid for the given entries, in their list order.
pub fn comparison_table(entries: &[SelectionEntry]) -> ComparisonTable {
    ComparisonTable {
        ids: entries.iter().map(|entry| entry.id.clone()).collect(),
        rows: FIELDS
            .iter()
            .map(|&(label, render)| ComparisonRow {
                label,
                values: entries.iter().map(render).collect(),
            })
            .collect(),
    }
}
