//! datapump - chunked range iteration and dependency-ordered data export
//!
//! Two data-access primitives over an abstract relational store, plus the
//! dump workflow that consumes them:
//!
//! - [`range::RangeIterator`] streams an ordered key column in bounded
//!   windows without holding a server-side cursor
//! - [`deps::DependencySorter`] orders mixed-model record sets so referenced
//!   models come first
//! - [`dump::DumpJob`] collects, orders, and serializes a working set

pub mod attach;
pub mod cli;
pub mod deps;
pub mod dump;
pub mod model;
pub mod observability;
pub mod range;
pub mod serializer;
pub mod store;
