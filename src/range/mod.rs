//! Range iterator
//!
//! Walks an ordered column of a queryable model in fixed-size windows using
//! inclusive boundary filters, re-querying after each window instead of
//! holding a live server-side cursor. Supports ascending and descending
//! traversal, non-unique ordering columns, optional start/stop bounds, an
//! overall result limit, eager relation attachment per chunk, and post-fetch
//! callback hooks.
//!
//! ```ignore
//! let mut range = RangeIterator::new(
//!     QuerySpec::all("post"),
//!     RangeOptions::step(100).limit(1000),
//!     &registry,
//! )?;
//! for record in range.iter(&store) {
//!     handle(record?);
//! }
//! ```

mod errors;
mod iter;

pub use errors::{RangeError, RangeResult};
pub use iter::RangeIter;

use serde_json::Value;

use crate::attach::{resolve_spec, AttachSpec, RelationPlan};
use crate::model::ModelRegistry;
use crate::store::{QuerySpec, Record, Store};

/// Post-fetch hook invoked with each materialized chunk.
///
/// Callbacks may annotate records in place; they run after attachment and
/// before the chunk is yielded.
pub type ChunkCallback = Box<dyn FnMut(&mut [Record])>;

/// Traversal configuration for [`RangeIterator`]
pub struct RangeOptions {
    /// Window size; the sign encodes direction (negative = descending)
    pub step: i64,
    /// Overall cap on yielded records
    pub limit: Option<u64>,
    /// Starting boundary on the ordering column (inclusive)
    pub min_bound: Option<Value>,
    /// Terminal boundary in the traversal direction (inclusive)
    pub max_bound: Option<Value>,
    /// Whether windows are globally ordered by the ordering column. When
    /// false and no terminal bound is set, traversal walks key ranges without
    /// an ORDER BY, which is cheaper when order does not matter.
    pub sorted: bool,
    /// Relation paths to eagerly attach per chunk
    pub attach: Vec<AttachSpec>,
    /// Post-fetch hooks
    pub callbacks: Vec<ChunkCallback>,
    /// Ordering column; defaults to the model's primary key
    pub order_column: Option<String>,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            step: 1000,
            limit: None,
            min_bound: None,
            max_bound: None,
            sorted: true,
            attach: Vec::new(),
            callbacks: Vec::new(),
            order_column: None,
        }
    }
}

impl RangeOptions {
    /// Options with the given step and defaults otherwise
    pub fn step(step: i64) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    /// Sets the overall limit
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the starting boundary
    pub fn min_bound(mut self, bound: Value) -> Self {
        self.min_bound = Some(bound);
        self
    }

    /// Sets the terminal boundary
    pub fn max_bound(mut self, bound: Value) -> Self {
        self.max_bound = Some(bound);
        self
    }

    /// Disables global ordering
    pub fn unsorted(mut self) -> Self {
        self.sorted = false;
        self
    }

    /// Adds a relation path to attach per chunk
    pub fn attach(mut self, spec: AttachSpec) -> Self {
        self.attach.push(spec);
        self
    }

    /// Adds a post-fetch callback
    pub fn callback(mut self, callback: ChunkCallback) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// Overrides the ordering column
    pub fn order_column(mut self, column: impl Into<String>) -> Self {
        self.order_column = Some(column.into());
        self
    }
}

/// A validated range traversal over one model.
///
/// Construction validates the query and resolves attachment metadata; each
/// call to [`iter`](Self::iter) starts a fresh traversal over the current
/// store contents. A single instance owns its cursor state and must not be
/// advanced from multiple execution contexts.
pub struct RangeIterator {
    pub(crate) base: QuerySpec,
    pub(crate) order_column: String,
    pub(crate) step: u64,
    pub(crate) descending: bool,
    pub(crate) limit: Option<u64>,
    pub(crate) min_bound: Option<Value>,
    pub(crate) max_bound: Option<Value>,
    pub(crate) sorted: bool,
    pub(crate) plans: Vec<RelationPlan>,
    pub(crate) callbacks: Vec<ChunkCallback>,
}

impl RangeIterator {
    /// Validates a query and traversal options against the registry.
    ///
    /// Fails with [`RangeError::InvalidQuerySet`] if the query already
    /// carries an explicit ordering or a non-zero offset. A caller-supplied
    /// plain limit is adopted as the overall limit when the options give
    /// none; the query's own limit is cleared either way.
    pub fn new(
        query: QuerySpec,
        options: RangeOptions,
        registry: &ModelRegistry,
    ) -> RangeResult<Self> {
        if query.is_ordered() || query.offset != 0 {
            return Err(RangeError::InvalidQuerySet);
        }
        if options.step == 0 {
            return Err(RangeError::ZeroStep);
        }

        let mut base = query;
        let limit = options.limit.or(base.limit.take());

        let descending = options.step < 0;
        let mut step = options.step.unsigned_abs();
        if let Some(l) = limit {
            if l > 0 {
                step = step.min(l);
            }
        }

        let order_column = match options.order_column {
            Some(column) => column,
            None => registry.require(&base.model)?.primary_key.clone(),
        };

        let mut plans = Vec::with_capacity(options.attach.len());
        for spec in &options.attach {
            plans.push(resolve_spec(registry, &base.model, spec)?);
        }

        Ok(Self {
            base,
            order_column,
            step,
            descending,
            limit,
            min_bound: options.min_bound,
            // A terminal bound requires ordered traversal to be meaningful
            sorted: options.sorted || options.max_bound.is_some(),
            max_bound: options.max_bound,
            plans,
            callbacks: options.callbacks,
        })
    }

    /// Starts a fresh traversal against the store.
    ///
    /// Re-iterating an unmodified store yields the same sequence; no
    /// isolation is provided against concurrent writers.
    pub fn iter<'a, S: Store + ?Sized>(&'a mut self, store: &'a S) -> RangeIter<'a, S> {
        RangeIter::new(self, store)
    }
}
