//! Store abstraction for datapump
//!
//! The library never talks to a concrete database. Everything goes through
//! the [`Store`] trait: one bounded, synchronous query per call, described by
//! a [`QuerySpec`] value. The in-memory implementation backs the CLI and the
//! test suites; production callers adapt their own store.

mod compare;
mod dataset;
mod errors;
mod memory;
mod query;
mod record;

pub use compare::compare_values;
pub use dataset::Dataset;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use query::{FilterOp, Predicate, QuerySpec, SortDirection, SortSpec};
pub use record::{Record, RecordKey};

/// Executor seam between datapump and the backing store.
///
/// One call = one round trip. Implementations must be synchronous and must
/// not retain cursor state between calls; every query is independently
/// bounded by its own limit/offset.
pub trait Store {
    /// Execute a query and return the matching records in query order.
    fn execute(&self, query: &QuerySpec) -> StoreResult<Vec<Record>>;
}
