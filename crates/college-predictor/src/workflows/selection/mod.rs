//! Favorites and the comparison shortlist, persisted as one JSON record.

pub mod compare;
pub mod domain;
pub mod persistence;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use compare::{comparison_table, group_thousands, ComparisonRow, ComparisonTable};
pub use domain::SelectionEntry;
pub use persistence::{
    JsonFilePersistence, MemoryPersistence, PersistenceError, SelectionPersistence,
    SelectionSnapshot, SNAPSHOT_VERSION,
};
pub use router::{selection_router, SelectionRoutes};
pub use store::{MutationOutcome, SelectionError, SelectionStore, COMPARE_CAPACITY};
