//! Range traversal state machine
//!
//! Each window is one bounded fetch: boundary predicate on the ordering
//! column, optional terminal-bound predicate, ORDER BY when sorted, limit =
//! step, offset = tie offset. The tie offset counts records already yielded
//! at the current boundary value, so re-filtering on an inclusive boundary
//! never re-yields ties and never skips a tie-run longer than the window.

use std::cmp::Ordering;
use std::collections::VecDeque;

use serde_json::Value;

use crate::attach::attach_relation;
use crate::store::{compare_values, Predicate, Record, SortSpec, Store};

use super::errors::RangeResult;
use super::RangeIterator;

/// One traversal pass produced by [`RangeIterator::iter`]
pub struct RangeIter<'a, S: ?Sized> {
    config: &'a mut RangeIterator,
    store: &'a S,
    buffer: VecDeque<Record>,
    /// Current boundary value on the ordering column
    cursor: Option<Value>,
    /// Records already yielded at the cursor value
    tie_offset: u64,
    yielded: u64,
    last_window: Option<usize>,
    done: bool,
}

impl<'a, S: Store + ?Sized> RangeIter<'a, S> {
    pub(crate) fn new(config: &'a mut RangeIterator, store: &'a S) -> Self {
        let cursor = config.min_bound.clone();
        Self {
            config,
            store,
            buffer: VecDeque::new(),
            cursor,
            tie_offset: 0,
            yielded: 0,
            last_window: None,
            done: false,
        }
    }

    /// Issues one bounded fetch and runs attachment and callbacks on it
    fn fetch_window(&mut self) -> RangeResult<()> {
        let config = &mut *self.config;
        let column = config.order_column.as_str();

        let mut query = config.base.clone();
        if let Some(cur) = &self.cursor {
            query = query.filter(if config.descending {
                Predicate::lte(column, cur.clone())
            } else {
                Predicate::gte(column, cur.clone())
            });
        }
        if let Some(max) = &config.max_bound {
            query = query.filter(if config.descending {
                Predicate::gte(column, max.clone())
            } else {
                Predicate::lte(column, max.clone())
            });
        }
        if config.sorted {
            query = query.order_by(if config.descending {
                SortSpec::desc(column)
            } else {
                SortSpec::asc(column)
            });
        }
        query = query.limit(config.step).offset(self.tie_offset);

        let mut chunk = self.store.execute(&query)?;

        for plan in &config.plans {
            attach_relation(self.store, &mut chunk, plan)?;
        }
        for callback in &mut config.callbacks {
            callback(&mut chunk);
        }

        self.last_window = Some(chunk.len());
        self.buffer.extend(chunk);
        Ok(())
    }

    /// Advances cursor state past a yielded record and checks the terminal
    /// bound. Returns true if traversal must stop after this record.
    fn advance_past(&mut self, record: &Record) -> bool {
        let value = match record.field(&self.config.order_column) {
            Some(v) => v.clone(),
            None => {
                // A null ordering value can never become a boundary filter;
                // count it as a tie so the window offset walks past it.
                self.tie_offset += 1;
                return false;
            }
        };

        if self.cursor.as_ref() == Some(&value) {
            self.tie_offset += 1;
        } else {
            self.cursor = Some(value.clone());
            // One: the first row at the new boundary value was just consumed
            self.tie_offset = 1;
        }

        if let Some(max) = &self.config.max_bound {
            let cmp = compare_values(Some(&value), Some(max));
            return if self.config.descending {
                cmp != Ordering::Greater
            } else {
                cmp != Ordering::Less
            };
        }
        false
    }
}

impl<S: Store + ?Sized> Iterator for RangeIter<'_, S> {
    type Item = RangeResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if let Some(limit) = self.config.limit {
                if self.yielded >= limit {
                    self.done = true;
                    return None;
                }
            }

            if let Some(record) = self.buffer.pop_front() {
                self.yielded += 1;
                if self.advance_past(&record) {
                    self.done = true;
                }
                return Some(Ok(record));
            }

            // A short window is definitive: the store returned everything
            // at-or-beyond the boundary past the consumed ties.
            if let Some(len) = self.last_window {
                if (len as u64) < self.config.step {
                    self.done = true;
                    return None;
                }
            }

            if let Err(e) = self.fetch_window() {
                self.done = true;
                return Some(Err(e));
            }
            if self.buffer.is_empty() {
                self.done = true;
                return None;
            }
        }
    }
}
