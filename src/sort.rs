//! Recursive merge sort and quick sort.
//!
//! Both sorts are non-mutating: they take a slice, clone it into a working
//! buffer once and return a freshly sorted [`Vec`]. Recursion runs over
//! ranges of that buffer instead of per-level sub-sequence copies, keeping
//! auxiliary allocation at O(n) per merge/partition level.

use std::cmp::Ordering;

/// Merge sort using the [`Ord`] ordering of the items.
pub fn merge_sort<T>(items: &[T]) -> Vec<T>
where
    T: Clone + Ord,
{
    merge_sort_by(items, T::cmp)
}

/// Merge sort using a custom compare function.
///
/// Stable: on equal items the left half's element is emitted first, so the
/// input's relative order survives.
///
/// # Arguments
/// * `items` - Sequence to be sorted
/// * `compare` - Function to be used to compare items
pub fn merge_sort_by<T, F>(items: &[T], compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering + Copy,
{
    let mut buf = items.to_vec();
    merge_slice(&mut buf, compare);
    buf
}

/// Merge sort using a key extraction function.
///
/// # Arguments
/// * `items` - Sequence to be sorted
/// * `key` - Function extracting the comparison key of an item
pub fn merge_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    merge_sort_by(items, |a, b| key(a).cmp(&key(b)))
}

fn merge_slice<T, F>(buf: &mut [T], compare: F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering + Copy,
{
    let n = buf.len();
    if n <= 1 {
        return;
    }

    let mid = n / 2;
    merge_slice(&mut buf[..mid], compare);
    merge_slice(&mut buf[mid..], compare);

    let mut merged = Vec::with_capacity(n);
    {
        let (left, right) = buf.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if compare(&left[i], &right[j]) != Ordering::Greater {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    buf.clone_from_slice(&merged);
}

/// Quick sort using the [`Ord`] ordering of the items.
pub fn quick_sort<T>(items: &[T]) -> Vec<T>
where
    T: Clone + Ord,
{
    quick_sort_by(items, T::cmp)
}

/// Quick sort using a custom compare function.
///
/// Pivot is the element at the middle index of the current range and the
/// partition is three-way (less / equal / greater). Each group keeps the
/// scan order of the range it was filtered from, but the sort is not stable
/// across groups. Degrades toward O(n²) on sorted, reverse-sorted or
/// heavily duplicated input.
///
/// # Arguments
/// * `items` - Sequence to be sorted
/// * `compare` - Function to be used to compare items
pub fn quick_sort_by<T, F>(items: &[T], compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering + Copy,
{
    let mut buf = items.to_vec();
    quick_slice(&mut buf, compare);
    buf
}

/// Quick sort using a key extraction function.
///
/// # Arguments
/// * `items` - Sequence to be sorted
/// * `key` - Function extracting the comparison key of an item
pub fn quick_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    quick_sort_by(items, |a, b| key(a).cmp(&key(b)))
}

fn quick_slice<T, F>(buf: &mut [T], compare: F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering + Copy,
{
    let n = buf.len();
    if n <= 1 {
        return;
    }

    let pivot = buf[n / 2].clone();
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for item in buf.iter() {
        match compare(item, &pivot) {
            Ordering::Less => less.push(item.clone()),
            Ordering::Equal => equal.push(item.clone()),
            Ordering::Greater => greater.push(item.clone()),
        }
    }

    quick_slice(&mut less, compare);
    quick_slice(&mut greater, compare);

    buf[..less.len()].clone_from_slice(&less);
    buf[less.len()..less.len() + equal.len()].clone_from_slice(&equal);
    buf[less.len() + equal.len()..].clone_from_slice(&greater);
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use rand::seq::SliceRandom;
    use rstest::*;

    use super::{merge_sort, merge_sort_by, merge_sort_by_key, quick_sort, quick_sort_by, quick_sort_by_key};
    use crate::record::Record;

    fn sorted_by<T, K, F>(items: &[T], key: F) -> bool
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        items.windows(2).all(|w| key(&w[0]) <= key(&w[1]))
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![7])]
    #[case(vec![3, 1, 2])]
    #[case(vec![5, 5, 5, 5])]
    #[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0])]
    fn test_sorts_agree_with_std(#[case] input: Vec<i32>) {
        let mut expected = input.clone();
        expected.sort();

        assert_eq!(merge_sort(&input), expected);
        assert_eq!(quick_sort(&input), expected);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_sorts_on_shuffled_input(#[case] reversed: bool) {
        let mut input = Vec::from_iter(0..100);
        input.shuffle(&mut rand::thread_rng());

        let compare = if reversed {
            |a: &i32, b: &i32| a.cmp(b).reverse()
        } else {
            |a: &i32, b: &i32| a.cmp(b)
        };

        let mut expected = input.clone();
        expected.sort_by(compare);

        assert_eq!(merge_sort_by(&input, compare), expected);
        assert_eq!(quick_sort_by(&input, compare), expected);
    }

    #[test]
    fn test_input_left_untouched() {
        let input = vec![3, 1, 2];
        let _ = merge_sort(&input);
        let _ = quick_sort(&input);
        assert_eq!(input, vec![3, 1, 2]);
    }

    #[test]
    fn test_merge_sort_stability() {
        // second field tags the original position of equal keys
        let input: Vec<(i32, i32)> = vec![(1, 0), (0, 1), (1, 2), (0, 3), (1, 4)];
        let result = merge_sort_by(&input, |a, b| a.0.cmp(&b.0));
        assert_eq!(result, vec![(0, 1), (0, 3), (1, 0), (1, 2), (1, 4)]);
    }

    #[test]
    fn test_quick_sort_equal_group_keeps_scan_order() {
        let input: Vec<(i32, i32)> = vec![(1, 0), (0, 1), (1, 2), (0, 3), (1, 4)];
        let result = quick_sort_by(&input, |a, b| a.0.cmp(&b.0));
        assert_eq!(result, vec![(0, 1), (0, 3), (1, 0), (1, 2), (1, 4)]);
    }

    #[test]
    fn test_idempotence() {
        let sorted = merge_sort(&vec![4, 2, 8, 6]);
        assert_eq!(merge_sort(&sorted), sorted);
        assert_eq!(quick_sort(&sorted), sorted);
    }

    #[test]
    fn test_record_key_extractors() {
        let records = vec![
            Record::new("B", 1, 1),
            Record::new("A", 2, 2),
            Record::new("A", 3, 3),
        ];

        let by_name = merge_sort_by_key(&records, |r| r.name.clone());
        assert!(sorted_by(&by_name, |r: &Record| r.name.clone()));
        // merge sort keeps the two "A" records in input order
        assert_eq!(by_name[0].quantity, 2);
        assert_eq!(by_name[1].quantity, 3);
        assert_eq!(by_name[2].name, "B");

        let by_name_quick = quick_sort_by_key(&records, |r| r.name.clone());
        assert!(sorted_by(&by_name_quick, |r: &Record| r.name.clone()));
        // the equal group comes from one scan pass, keeping input order too
        assert_eq!(by_name_quick[0].quantity, 2);
        assert_eq!(by_name_quick[1].quantity, 3);

        let by_quantity = quick_sort_by_key(&records, |r| r.quantity);
        assert!(sorted_by(&by_quantity, |r: &Record| r.quantity));
    }

    #[test]
    fn test_permutation_preserved() {
        let mut input = Vec::from_iter((0..50).map(|i| i % 7));
        input.shuffle(&mut rand::thread_rng());

        for result in [merge_sort(&input), quick_sort(&input)] {
            let mut expected = input.clone();
            expected.sort();
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn test_compare_called_consistently() {
        // parity comparator: evens before odds, ascending within each class
        let input = vec![3, 1, 2];
        let result = merge_sort_by(&input, |a: &i32, b: &i32| match (a % 2, b % 2) {
            (0, 1) => Ordering::Less,
            (1, 0) => Ordering::Greater,
            _ => a.cmp(b),
        });
        assert_eq!(result, vec![2, 1, 3]);
    }
}
