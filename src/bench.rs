//! Benchmark harness with a size-keyed result cache.

use std::collections::BTreeMap;

use crate::measure::{measured, MeasureError};
use crate::record::Record;
use crate::sort;

/// Benchmarked sort algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    MergeSort,
    QuickSort,
}

impl Algorithm {
    /// All benchmarked algorithms, in table order.
    pub const ALL: [Algorithm; 2] = [Algorithm::MergeSort, Algorithm::QuickSort];

    /// Stable identifier used in tables and serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::MergeSort => "merge_sort",
            Algorithm::QuickSort => "quick_sort",
        }
    }

    fn run(&self, data: &[Record]) -> Vec<Record> {
        match self {
            Algorithm::MergeSort => sort::merge_sort_by_key(data, |r| r.quantity),
            Algorithm::QuickSort => sort::quick_sort_by_key(data, |r| r.quantity),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the benchmark table: an algorithm at one input size,
/// averaged over the harness's repeated runs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BenchmarkEntry {
    /// Benchmarked algorithm.
    pub algorithm: Algorithm,
    /// Input size the dataset was generated with.
    pub size: usize,
    /// Mean wall-clock time per run, in seconds.
    pub mean_elapsed_secs: f64,
    /// Mean peak traced allocation per run, in bytes.
    pub mean_peak_bytes: f64,
}

/// Default input sizes benchmarked by the driver.
pub const DEFAULT_SIZES: &[usize] = &[100, 500, 1000, 2000];

/// Instrumented runs per algorithm and size.
pub const RUNS_PER_SIZE: usize = 3;

/// Drives repeated instrumented sort runs across input sizes, memoizing
/// results per size.
///
/// Each size is measured at most once per harness lifetime: later requests
/// for a size already in the cache reuse the stored entries verbatim, so
/// adding one new size to a later call only executes that size's runs.
/// The cache never evicts.
pub struct BenchmarkHarness<G>
where
    G: FnMut(usize) -> Vec<Record>,
{
    generator: G,
    runs: usize,
    cache: BTreeMap<usize, Vec<BenchmarkEntry>>,
}

impl<G> BenchmarkHarness<G>
where
    G: FnMut(usize) -> Vec<Record>,
{
    /// Creates a harness around a dataset generator.
    ///
    /// # Arguments
    /// * `generator` - Produces one dataset of the requested size
    pub fn new(generator: G) -> Self {
        BenchmarkHarness {
            generator,
            runs: RUNS_PER_SIZE,
            cache: BTreeMap::new(),
        }
    }

    /// Overrides the number of runs averaged per algorithm and size.
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        return self;
    }

    /// Returns the benchmark table for `sizes`, measuring any size not yet
    /// cached and reusing stored entries for the rest.
    ///
    /// Rows come back in requested-size order, [`Algorithm::ALL`] order
    /// within a size, ready for the external chart collaborator.
    ///
    /// # Arguments
    /// * `sizes` - Input sizes the table must cover
    pub fn table(&mut self, sizes: &[usize]) -> Result<Vec<BenchmarkEntry>, MeasureError> {
        for &size in sizes {
            if !self.cache.contains_key(&size) {
                let entries = self.run_size(size)?;
                self.cache.insert(size, entries);
            } else {
                log::debug!("size {} served from cache", size);
            }
        }

        let mut table = Vec::with_capacity(sizes.len() * Algorithm::ALL.len());
        for size in sizes {
            table.extend(self.cache[size].iter().cloned());
        }
        return Ok(table);
    }

    fn run_size(&mut self, size: usize) -> Result<Vec<BenchmarkEntry>, MeasureError> {
        log::info!("benchmarking size {} ({} runs per algorithm)", size, self.runs);
        let base = (self.generator)(size);

        let mut entries = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            let mut elapsed_total = 0.0;
            let mut peak_total = 0.0;

            for _ in 0..self.runs {
                // each run gets an independent copy of the same dataset
                let data = base.clone();
                let (_, measurement) = measured(|| algorithm.run(&data))?;
                elapsed_total += measurement.elapsed.as_secs_f64();
                peak_total += measurement.peak_bytes as f64;
            }

            let runs = self.runs.max(1) as f64;
            entries.push(BenchmarkEntry {
                algorithm,
                size,
                mean_elapsed_secs: elapsed_total / runs,
                mean_peak_bytes: peak_total / runs,
            });
        }

        return Ok(entries);
    }
}
