//! Filtering, sorting, and pagination over a prediction result set, plus the
//! session holder that keeps the latest outcome for browsing.

pub mod filter;
pub mod pagination;
pub mod session;
pub mod sort;
pub mod view;

pub use filter::{available_states, region_counts, states_by_region, FilterState};
pub use pagination::{clamp_page, page_window, total_pages, PageLink, PAGE_SIZE, WINDOW_RADIUS};
pub use session::{PredictionSession, Submission};
pub use sort::{SortDirection, SortKey, SortState};
pub use view::{derive, ResultsBrowser, ResultsPage, ResultsView};

#[cfg(test)]
pub(crate) mod tests {
    use crate::workflows::prediction::{AdmissionChance, EligibilityStatus, PredictionRecord};

    pub(crate) fn record(
        id: &str,
        match_percentage: u8,
        state: &str,
        region: &str,
    ) -> PredictionRecord {
        PredictionRecord {
            id: id.to_string(),
            institute_name: format!("Institute {id}"),
            branch: "Computer Science and Engineering".to_string(),
            institution_type: "NIT".to_string(),
            state: state.to_string(),
            region: region.to_string(),
            match_percentage,
            applied_cutoff: Some(1000),
            eligibility_status: EligibilityStatus::Eligible,
            admission_chance: AdmissionChance::Medium,
            opening_rank: None,
            closing_rank: None,
            year: None,
            round: None,
        }
    }
}
