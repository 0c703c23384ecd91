//! Queue/stack traversal demonstrators.
//!
//! Both functions drain a working copy of the input, so the caller's slice
//! survives the demonstration untouched.

use std::collections::VecDeque;

use crate::record::Record;

/// FIFO drain: consumes records oldest-inserted first.
///
/// Returns the records in consumption order.
pub fn drain_fifo(records: &[Record]) -> Vec<Record> {
    let mut queue: VecDeque<Record> = records.iter().cloned().collect();
    let mut consumed = Vec::with_capacity(queue.len());

    log::debug!("draining {} records front-first", queue.len());
    while let Some(record) = queue.pop_front() {
        log::debug!("consumed: {}", record);
        consumed.push(record);
    }

    consumed
}

/// LIFO drain: consumes records most-recently-inserted first.
///
/// Returns the records in consumption order.
pub fn drain_lifo(records: &[Record]) -> Vec<Record> {
    let mut stack: Vec<Record> = records.to_vec();
    let mut consumed = Vec::with_capacity(stack.len());

    log::debug!("draining {} records back-first", stack.len());
    while let Some(record) = stack.pop() {
        log::debug!("consumed: {}", record);
        consumed.push(record);
    }

    consumed
}
