//! `algo-lab` is an instructional sandbox of classic algorithms over synthetic
//! consumption records, with explicit instrumentation.
//!
//! # Overview
//!
//! `algo-lab` provides:
//!
//! * **Counted searches:**
//!   sequential search over any record sequence and binary search over a
//!   name-sorted one, each reporting how many comparisons (and, for binary
//!   search, halving iterations) the lookup cost.
//! * **Divide-and-conquer sorts:**
//!   a stable recursive merge sort and a three-way-partition quick sort,
//!   both non-mutating and parameterized by a compare or key function.
//! * **Instrumentation:**
//!   [`measured`] runs any closure once and reports its wall-clock time and
//!   traced allocation (current and peak bytes), via a tracing global
//!   allocator with per-thread sessions.
//! * **Benchmarking:**
//!   [`BenchmarkHarness`] drives repeated instrumented runs of both sorts
//!   across input sizes, memoizing results per size, and produces a tabular
//!   result set for external charting.
//!
//! # Example
//!
//! ```
//! use algo_lab::{dataset, measured, merge_sort_by_key, sequential_search};
//!
//! let records = dataset::synthetic(100, 42);
//!
//! let report = sequential_search(&records, "Reagent A");
//! assert!(report.comparisons <= records.len());
//!
//! let (sorted, measurement) = measured(|| merge_sort_by_key(&records, |r| r.quantity)).unwrap();
//! assert!(sorted.windows(2).all(|w| w[0].quantity <= w[1].quantity));
//! assert!(measurement.peak_bytes > 0);
//! ```

pub mod bench;
pub mod dataset;
pub mod drain;
pub mod measure;
pub mod record;
pub mod search;
pub mod sort;

pub use bench::{Algorithm, BenchmarkEntry, BenchmarkHarness, DEFAULT_SIZES, RUNS_PER_SIZE};
pub use drain::{drain_fifo, drain_lifo};
pub use measure::{measured, MeasureError, Measurement, TraceAllocator};
pub use record::Record;
pub use search::{binary_search, sequential_search, IndexedProbe, NameIndex, ProbeReport, ScanReport};
pub use sort::{merge_sort, merge_sort_by, merge_sort_by_key, quick_sort, quick_sort_by, quick_sort_by_key};

/// Allocation tracing hooks into the allocator crate-wide; sessions are
/// per-thread and dormant outside [`measured`] calls.
#[global_allocator]
static GLOBAL: TraceAllocator = TraceAllocator;
