//! Counted search algorithms over record sequences.

use std::cmp::Ordering;

use crate::record::Record;

/// Outcome of a sequential (linear) search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Zero-based position of the first match, [`None`] when absent.
    pub index: Option<usize>,
    /// Elements visited; equals position + 1 on a hit, sequence length on a miss.
    pub comparisons: usize,
}

/// Scans `records` left to right for the first exact `name` match.
///
/// No ordering precondition: the input may be in any order. One comparison
/// is counted per element visited and the scan stops at the first hit.
///
/// # Arguments
/// * `records` - Sequence to be scanned
/// * `target` - Exact name to look for
pub fn sequential_search(records: &[Record], target: &str) -> ScanReport {
    log::debug!("sequential search over {} records, target {:?}", records.len(), target);

    let mut comparisons = 0;
    for (i, record) in records.iter().enumerate() {
        comparisons += 1;
        if record.name == target {
            return ScanReport {
                index: Some(i),
                comparisons,
            };
        }
    }

    return ScanReport {
        index: None,
        comparisons,
    };
}

/// Outcome of a binary search probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    /// Position of a match in the probed (sorted) sequence, [`None`] when absent.
    pub index: Option<usize>,
    /// Halving iterations performed.
    pub iterations: usize,
    /// Equality comparisons against the target (one per iteration).
    pub eq_comparisons: usize,
    /// Order comparisons used to pick a half (one per non-matching iteration).
    pub ord_comparisons: usize,
}

/// Binary search over a sequence sorted ascending by `name`.
///
/// The sorted-input precondition is the caller's responsibility and is not
/// checked; probing an unsorted sequence silently returns wrong answers.
/// With duplicate names it is unspecified which duplicate the probe lands on.
///
/// # Arguments
/// * `sorted` - Sequence sorted ascending by name
/// * `target` - Exact name to look for
pub fn binary_search(sorted: &[Record], target: &str) -> ProbeReport {
    log::debug!("binary search over {} records, target {:?}", sorted.len(), target);
    probe(sorted.len(), |i| sorted[i].name.as_str(), target)
}

fn probe<'a, F>(len: usize, name_at: F, target: &str) -> ProbeReport
where
    F: Fn(usize) -> &'a str,
{
    let mut report = ProbeReport {
        index: None,
        iterations: 0,
        eq_comparisons: 0,
        ord_comparisons: 0,
    };

    if len == 0 {
        return report;
    }

    let (mut low, mut high) = (0, len - 1);
    loop {
        report.iterations += 1;
        let mid = (low + high) / 2;
        let mid_name = name_at(mid);

        report.eq_comparisons += 1;
        if mid_name == target {
            report.index = Some(mid);
            return report;
        }

        report.ord_comparisons += 1;
        if mid_name.cmp(target) == Ordering::Less {
            low = mid + 1;
        } else {
            if mid == 0 {
                // closed-interval low > high on unsigned indices
                return report;
            }
            high = mid - 1;
        }

        if low > high {
            return report;
        }
    }
}

/// Binary search probe enriched with the hit's position in the original,
/// unsorted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedProbe {
    /// The plain probe outcome, positions relative to the sorted view.
    pub probe: ProbeReport,
    /// Position of the matched record in the original sequence.
    pub original_index: Option<usize>,
}

/// Name-sorted view over an unsorted record slice.
///
/// Builds a stable position → original-index map once (argsort by `name`),
/// so a binary search over the view can report where the hit lives in the
/// caller's original ordering without rescanning it.
pub struct NameIndex<'a> {
    records: &'a [Record],
    order: Vec<usize>,
}

impl<'a> NameIndex<'a> {
    /// Builds the view; `records` itself is left untouched.
    pub fn new(records: &'a [Record]) -> Self {
        let mut order = Vec::from_iter(0..records.len());
        order.sort_by(|&a, &b| records[a].name.cmp(&records[b].name));
        NameIndex { records, order }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Record at `pos` in name order.
    pub fn record(&self, pos: usize) -> &Record {
        &self.records[self.order[pos]]
    }

    /// Original position of the record at `pos` in name order.
    pub fn original_index(&self, pos: usize) -> usize {
        self.order[pos]
    }

    /// Binary search for `target` over the name-ordered view.
    ///
    /// The index-map lookup on a hit is O(1) bookkeeping and does not touch
    /// the probe's own counters.
    pub fn search(&self, target: &str) -> IndexedProbe {
        log::debug!("indexed binary search over {} records, target {:?}", self.len(), target);

        let probe = probe(self.order.len(), |i| self.records[self.order[i]].name.as_str(), target);
        IndexedProbe {
            probe,
            original_index: probe.index.map(|pos| self.order[pos]),
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::{binary_search, sequential_search, NameIndex};
    use crate::record::Record;

    fn records(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Record::new(*name, i as u32 + 1, 1))
            .collect()
    }

    #[rstest]
    #[case(&["B", "A", "C"], "B", Some(0), 1)]
    #[case(&["B", "A", "C"], "C", Some(2), 3)]
    #[case(&["B", "A", "C"], "Z", None, 3)]
    #[case(&[], "A", None, 0)]
    #[case(&["A", "A"], "A", Some(0), 1)]
    fn test_sequential_search(
        #[case] names: &[&str],
        #[case] target: &str,
        #[case] expected_index: Option<usize>,
        #[case] expected_comparisons: usize,
    ) {
        let report = sequential_search(&records(names), target);
        assert_eq!(report.index, expected_index);
        assert_eq!(report.comparisons, expected_comparisons);
    }

    #[rstest]
    #[case(&["A", "B", "C", "D", "E"], "C", Some(2))]
    #[case(&["A", "B", "C", "D", "E"], "A", Some(0))]
    #[case(&["A", "B", "C", "D", "E"], "E", Some(4))]
    #[case(&["A", "B", "C", "D", "E"], "Z", None)]
    #[case(&["A", "B", "C", "D", "E"], "0", None)]
    #[case(&["A"], "A", Some(0))]
    #[case(&[], "A", None)]
    fn test_binary_search(
        #[case] names: &[&str],
        #[case] target: &str,
        #[case] expected_index: Option<usize>,
    ) {
        let sorted = records(names);
        let report = binary_search(&sorted, target);

        assert_eq!(report.index, expected_index);
        // iterations bounded by ceil(log2(n + 1))
        let bound = usize::BITS - names.len().leading_zeros();
        assert!(report.iterations <= bound as usize);
        assert_eq!(report.eq_comparisons, report.iterations);
    }

    #[test]
    fn test_binary_search_counters_on_miss() {
        let sorted = records(&["A", "B", "D", "E"]);
        let report = binary_search(&sorted, "C");

        assert_eq!(report.index, None);
        assert_eq!(report.ord_comparisons, report.iterations);
    }

    #[test]
    fn test_binary_search_duplicate_names() {
        let sorted = records(&["A", "A", "B"]);
        let report = binary_search(&sorted, "A");

        let index = report.index.unwrap();
        assert!(index <= 1);
        assert!(report.iterations <= 2);
    }

    #[test]
    fn test_name_index_reports_original_position() {
        let original = records(&["B", "A", "C"]);
        let index = NameIndex::new(&original);

        assert_eq!(index.record(0).name, "A");
        assert_eq!(index.original_index(0), 1);

        let outcome = index.search("B");
        assert_eq!(outcome.probe.index, Some(1));
        assert_eq!(outcome.original_index, Some(0));
    }

    #[test]
    fn test_name_index_miss() {
        let original = records(&["B", "A", "C"]);
        let outcome = NameIndex::new(&original).search("Z");

        assert_eq!(outcome.probe.index, None);
        assert_eq!(outcome.original_index, None);
    }

    #[test]
    fn test_name_index_stable_for_duplicates() {
        let original = records(&["A", "B", "A"]);
        let index = NameIndex::new(&original);

        // equal names keep their original relative order in the view
        assert_eq!(index.original_index(0), 0);
        assert_eq!(index.original_index(1), 2);
        assert_eq!(index.original_index(2), 1);
    }
}
