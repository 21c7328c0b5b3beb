//! Query description passed to a [`Store`](super::Store)
//!
//! A `QuerySpec` is a plain value: predicates, optional sort, optional limit,
//! offset. Builders consume and return the spec so call sites read like a
//! fluent query.

use serde_json::Value;

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: column = value
    Eq(Value),
    /// Greater than or equal: column >= value
    Gte(Value),
    /// Less than or equal: column <= value
    Lte(Value),
    /// Membership: column IN (values)
    In(Vec<Value>),
}

/// A single predicate (column + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Column name
    pub column: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq(value),
        }
    }

    /// Create a greater-than-or-equal predicate
    pub fn gte(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Gte(value),
        }
    }

    /// Create a less-than-or-equal predicate
    pub fn lte(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Lte(value),
        }
    }

    /// Create a membership predicate
    pub fn is_in(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::In(values),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl SortDirection {
    /// Returns the direction name for diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification (single column)
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    /// Column to order by
    pub column: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on a column
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a column
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A bounded query against a single model
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Model name
    pub model: String,
    /// Predicates, AND semantics
    pub predicates: Vec<Predicate>,
    /// Optional ordering
    pub sort: Option<SortSpec>,
    /// Optional result count limit
    pub limit: Option<u64>,
    /// Number of leading matches to skip
    pub offset: u64,
}

impl QuerySpec {
    /// Create an unfiltered, unordered, unbounded query for a model
    pub fn all(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            predicates: Vec::new(),
            sort: None,
            limit: None,
            offset: 0,
        }
    }

    /// Add a predicate
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Set the ordering
    pub fn order_by(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the result limit
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the starting offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Returns true if the query carries an explicit ordering
    pub fn is_ordered(&self) -> bool {
        self.sort.is_some()
    }
}
