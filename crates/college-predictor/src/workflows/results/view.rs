use serde::Serialize;

use super::filter::FilterState;
use super::pagination::{clamp_page, page_window, total_pages, PageLink, PAGE_SIZE};
use super::sort::{SortKey, SortState};
use crate::workflows::prediction::PredictionRecord;

/// Visible slice of a filtered, sorted result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsPage<'a> {
    pub items: Vec<&'a PredictionRecord>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
    pub total_results: usize,
    pub window: Vec<PageLink>,
}

impl ResultsPage<'_> {
    pub fn is_filtered(&self) -> bool {
        self.total_filtered != self.total_results
    }
}

/// Filter, sort, then cut out the requested page. Pages past the end clamp to
/// the last page.
pub fn derive<'a>(
    records: &'a [PredictionRecord],
    filter: &FilterState,
    sort: SortState,
    page: usize,
    page_size: usize,
) -> ResultsPage<'a> {
    let page_size = page_size.max(1);
    let mut visible: Vec<&PredictionRecord> =
        records.iter().filter(|record| filter.matches(record)).collect();
    sort.apply(&mut visible);

    let total_filtered = visible.len();
    let total_pages = total_pages(total_filtered, page_size);
    let page = clamp_page(page, total_pages);
    let items = visible
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    ResultsPage {
        items,
        page,
        page_size,
        total_pages,
        total_filtered,
        total_results: records.len(),
        window: page_window(page, total_pages),
    }
}

/// What a results screen should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsView<'a> {
    /// A submission is still in flight and no results exist yet.
    Loading,
    /// No submission has been made yet.
    Idle,
    /// The run finished, or the filters matched, with zero records.
    Empty { total_results: usize },
    Page(ResultsPage<'a>),
}

/// Presenter-side browsing state. Changing filters or sort returns to the
/// first page; moving between pages leaves filters and sort alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsBrowser {
    filter: FilterState,
    sort: SortState,
    page: usize,
}

impl ResultsBrowser {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn select_region(&mut self, region: Option<String>) {
        self.filter.select_region(region);
        self.page = 1;
    }

    pub fn select_state(&mut self, state: Option<String>) {
        self.filter.select_state(state);
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.page = 1;
    }

    pub fn select_sort(&mut self, key: SortKey) {
        self.sort.select(key);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// A new prediction run replaced the result set.
    pub fn results_replaced(&mut self) {
        self.page = 1;
    }

    pub fn derive<'a>(&self, records: &'a [PredictionRecord]) -> ResultsPage<'a> {
        derive(records, &self.filter, self.sort, self.page(), PAGE_SIZE)
    }

    /// Clamps the stored page to what the records can show, so a later
    /// "next page" starts from a real page.
    pub fn derive_and_clamp<'a>(&mut self, records: &'a [PredictionRecord]) -> ResultsPage<'a> {
        let page = self.derive(records);
        self.page = page.page;
        page
    }
}
