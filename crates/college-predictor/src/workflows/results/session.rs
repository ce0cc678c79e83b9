use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::filter::FilterState;
use super::sort::SortState;
use super::view::{derive, ResultsView};
use crate::workflows::prediction::{PredictionOutcome, PredictionRecord};

#[derive(Debug, Default)]
struct SessionState {
    next_ticket: u64,
    pending: BTreeSet<u64>,
    outcome: Option<PredictionOutcome>,
}

/// Holder for the latest prediction outcome. Submissions are neither queued
/// nor coalesced: whichever run resolves last replaces the stored outcome.
#[derive(Debug, Default)]
pub struct PredictionSession {
    state: RwLock<SessionState>,
}

/// Marks one submission as in flight until it completes or is dropped.
#[derive(Debug)]
#[must_use = "an unfinished submission keeps the session loading until dropped"]
pub struct Submission<'a> {
    session: &'a PredictionSession,
    ticket: u64,
}

impl PredictionSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin(&self) -> Submission<'_> {
        let mut state = self.write();
        state.next_ticket += 1;
        let ticket = state.next_ticket;
        state.pending.insert(ticket);
        Submission {
            session: self,
            ticket,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.read().pending.is_empty()
    }

    pub fn outcome(&self) -> Option<PredictionOutcome> {
        self.read().outcome.clone()
    }

    pub fn records(&self) -> Vec<PredictionRecord> {
        self.read()
            .outcome
            .as_ref()
            .map(|outcome| outcome.records.clone())
            .unwrap_or_default()
    }

    /// Store an outcome without going through a [`Submission`].
    pub fn replace(&self, outcome: PredictionOutcome) {
        self.write().outcome = Some(outcome);
    }

    pub fn clear(&self) {
        self.write().outcome = None;
    }

    /// Renders the current state through `render` while the read lock is held.
    pub fn with_view<R>(
        &self,
        filter: &FilterState,
        sort: SortState,
        page: usize,
        page_size: usize,
        render: impl FnOnce(ResultsView<'_>) -> R,
    ) -> R {
        let state = self.read();
        if !state.pending.is_empty() {
            return render(ResultsView::Loading);
        }
        let Some(outcome) = state.outcome.as_ref() else {
            return render(ResultsView::Idle);
        };
        let page = derive(&outcome.records, filter, sort, page, page_size);
        if page.total_filtered == 0 {
            render(ResultsView::Empty {
                total_results: page.total_results,
            })
        } else {
            render(ResultsView::Page(page))
        }
    }
}

impl Submission<'_> {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn complete(self, outcome: PredictionOutcome) {
        self.session.write().outcome = Some(outcome);
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.session.write().pending.remove(&self.ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::prediction::PredictionSource;
    use crate::workflows::results::pagination::PAGE_SIZE;
    use crate::workflows::results::tests::record;

    fn outcome(ids: &[&str]) -> PredictionOutcome {
        PredictionOutcome {
            records: ids
                .iter()
                .map(|id| record(id, 80, "Haryana", "North"))
                .collect(),
            source: PredictionSource::LocalFallback,
            notice: None,
        }
    }

    fn status(session: &PredictionSession, filter: &FilterState) -> String {
        session.with_view(filter, SortState::default(), 1, PAGE_SIZE, |view| match view {
            ResultsView::Loading => "loading".to_string(),
            ResultsView::Idle => "idle".to_string(),
            ResultsView::Empty { total_results } => format!("empty/{total_results}"),
            ResultsView::Page(page) => format!("page/{}", page.items.len()),
        })
    }

    #[test]
    fn loading_is_distinct_from_empty() {
        let session = PredictionSession::new();
        assert_eq!(status(&session, &FilterState::default()), "idle");

        let submission = session.begin();
        assert!(session.is_loading());
        assert_eq!(status(&session, &FilterState::default()), "loading");

        submission.complete(outcome(&[]));
        assert!(!session.is_loading());
        assert_eq!(status(&session, &FilterState::default()), "empty/0");
    }

    #[test]
    fn filters_that_match_nothing_render_empty() {
        let session = PredictionSession::new();
        session.replace(outcome(&["a", "b"]));
        let south = FilterState::new(Some("South".to_string()), None);
        assert_eq!(status(&session, &south), "empty/2");
        assert_eq!(status(&session, &FilterState::default()), "page/2");
    }

    #[test]
    fn last_resolved_submission_wins() {
        let session = PredictionSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(second.ticket() > first.ticket());

        second.complete(outcome(&["second"]));
        assert!(session.is_loading(), "first run is still in flight");
        first.complete(outcome(&["first"]));

        assert!(!session.is_loading());
        let ids: Vec<String> = session.records().into_iter().map(|record| record.id).collect();
        assert_eq!(ids, vec!["first".to_string()]);
    }

    #[test]
    fn dropped_submission_stops_loading_and_keeps_previous_outcome() {
        let session = PredictionSession::new();
        session.replace(outcome(&["kept"]));
        {
            let _abandoned = session.begin();
            assert!(session.is_loading());
        }
        assert!(!session.is_loading());
        assert_eq!(session.records().len(), 1);

        session.clear();
        assert!(session.outcome().is_none());
    }
}
