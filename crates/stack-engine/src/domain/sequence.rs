//! # Sequence Algorithms
//!
//! Structural operations on an ordered sequence whose last element is the top.
//! Generic over the element type so the same code handles ciphertext
//! (`StackValue`) and plaintext (`PlainValue`).

use super::errors::SequenceError;
use std::cmp::Ordering;

/// Fail unless at least `required` elements are present.
pub fn require_len(len: usize, required: usize) -> Result<(), SequenceError> {
    if len < required {
        return Err(SequenceError::Insufficient {
            required,
            available: len,
        });
    }
    Ok(())
}

/// Strict bounds: `index < len`.
pub fn check_index(index: usize, len: usize) -> Result<(), SequenceError> {
    if index >= len {
        return Err(SequenceError::OutOfBounds { index, len });
    }
    Ok(())
}

/// Relaxed bounds for insertion and split points: `index <= len`.
pub fn check_insert_index(index: usize, len: usize) -> Result<(), SequenceError> {
    if index > len {
        return Err(SequenceError::OutOfBounds { index, len });
    }
    Ok(())
}

/// Inclusive range `[start, end]`, both within bounds and `start <= end`.
pub fn check_range(start: usize, end: usize, len: usize) -> Result<(), SequenceError> {
    check_index(start, len)?;
    check_index(end, len)?;
    if start > end {
        return Err(SequenceError::Invalid(format!(
            "range start {} is after end {}",
            start, end
        )));
    }
    Ok(())
}

/// Borrow the top element.
pub fn top<T>(values: &[T]) -> Result<&T, SequenceError> {
    values.last().ok_or(SequenceError::Empty)
}

/// Index of the element `depth` positions below the top (0 = top).
pub fn index_from_top(depth: usize, len: usize) -> Result<usize, SequenceError> {
    if depth >= len {
        return Err(SequenceError::OutOfBounds { index: depth, len });
    }
    Ok(len - 1 - depth)
}

/// Remove and return the top element.
pub fn pop_top<T>(values: &mut Vec<T>) -> Result<T, SequenceError> {
    values.pop().ok_or(SequenceError::Empty)
}

/// Remove the top `count` elements, returned bottom of the removed segment first.
pub fn pop_many<T>(values: &mut Vec<T>, count: usize) -> Result<Vec<T>, SequenceError> {
    if count > values.len() {
        return Err(SequenceError::Insufficient {
            required: count,
            available: values.len(),
        });
    }
    let at = values.len() - count;
    Ok(values.split_off(at))
}

/// Exchange the top two elements.
pub fn swap_top<T>(values: &mut [T]) -> Result<(), SequenceError> {
    require_len(values.len(), 2)?;
    let n = values.len();
    values.swap(n - 2, n - 1);
    Ok(())
}

/// Rotate the top three: the element at `n-3` moves to `n-2`, `n-2` moves to
/// `n-1`, and the old top drops to `n-3`.
///
/// `[a, b, c]` becomes `[c, a, b]`.
pub fn rotate_top3<T>(values: &mut [T]) -> Result<(), SequenceError> {
    require_len(values.len(), 3)?;
    let n = values.len();
    values[n - 3..].rotate_right(1);
    Ok(())
}

/// Copy `values[..index]` and `values[index..]`.
pub fn split_at<T: Clone>(values: &[T], index: usize) -> Result<(Vec<T>, Vec<T>), SequenceError> {
    check_insert_index(index, values.len())?;
    let (lower, upper) = values.split_at(index);
    Ok((lower.to_vec(), upper.to_vec()))
}

fn facet_order(a: f64, b: f64, ascending: bool) -> Ordering {
    if ascending {
        a.total_cmp(&b)
    } else {
        b.total_cmp(&a)
    }
}

/// Stable sort by the numeric facet.
pub fn sort_by_facet<T, F>(values: &mut [T], facet: F, ascending: bool)
where
    F: Fn(&T) -> f64,
{
    values.sort_by(|a, b| facet_order(facet(a), facet(b), ascending));
}

/// Whether facets are already in the requested order.
///
/// Uses the same total order as [`sort_by_facet`], so a sorted sequence always
/// reports sorted.
pub fn is_sorted_by_facet(facets: &[f64], ascending: bool) -> bool {
    facets
        .windows(2)
        .all(|w| facet_order(w[0], w[1], ascending) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_top3_scenario() {
        let mut v = vec!["a", "b", "c"];
        rotate_top3(&mut v).unwrap();
        assert_eq!(v, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rotate_top3_leaves_lower_elements() {
        let mut v = vec![0, 1, 2, 3, 4];
        rotate_top3(&mut v).unwrap();
        assert_eq!(v, vec![0, 1, 4, 2, 3]);
    }

    #[test]
    fn test_rotate_top3_needs_three() {
        let mut v = vec![1, 2];
        assert_eq!(
            rotate_top3(&mut v),
            Err(SequenceError::Insufficient {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_swap_top() {
        let mut v = vec![1, 2, 3];
        swap_top(&mut v).unwrap();
        assert_eq!(v, vec![1, 3, 2]);

        let mut empty: Vec<i32> = vec![];
        assert_eq!(
            swap_top(&mut empty),
            Err(SequenceError::Insufficient {
                required: 2,
                available: 0
            })
        );
    }

    #[test]
    fn test_pop_many_bottom_first() {
        let mut v = vec!["a", "b", "c", "d"];
        assert_eq!(pop_many(&mut v, 2).unwrap(), vec!["c", "d"]);
        assert_eq!(v, vec!["a", "b"]);

        assert!(matches!(
            pop_many(&mut v, 3),
            Err(SequenceError::Insufficient { required: 3, available: 2 })
        ));
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_bounds() {
        assert!(check_index(2, 3).is_ok());
        assert!(check_index(3, 3).is_err());
        assert!(check_insert_index(3, 3).is_ok());
        assert!(check_insert_index(4, 3).is_err());
        assert!(check_range(0, 2, 3).is_ok());
        assert!(check_range(2, 1, 3).is_err());
        assert!(check_range(1, 3, 3).is_err());
    }

    #[test]
    fn test_index_from_top() {
        assert_eq!(index_from_top(0, 4).unwrap(), 3);
        assert_eq!(index_from_top(3, 4).unwrap(), 0);
        assert!(index_from_top(4, 4).is_err());
    }

    #[test]
    fn test_split_at_edges() {
        let v = vec![1, 2, 3];
        assert_eq!(split_at(&v, 0).unwrap(), (vec![], vec![1, 2, 3]));
        assert_eq!(split_at(&v, 3).unwrap(), (vec![1, 2, 3], vec![]));
        assert!(split_at(&v, 4).is_err());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut v = vec![(2.0, 'a'), (1.0, 'b'), (2.0, 'c'), (1.0, 'd')];
        sort_by_facet(&mut v, |x| x.0, true);
        assert_eq!(v, vec![(1.0, 'b'), (1.0, 'd'), (2.0, 'a'), (2.0, 'c')]);

        sort_by_facet(&mut v, |x| x.0, false);
        assert_eq!(v, vec![(2.0, 'a'), (2.0, 'c'), (1.0, 'b'), (1.0, 'd')]);
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted_by_facet(&[], true));
        assert!(is_sorted_by_facet(&[1.0, 1.0, 2.0], true));
        assert!(!is_sorted_by_facet(&[1.0, 1.0, 2.0], false));
        assert!(is_sorted_by_facet(&[3.0, 2.0, 2.0], false));
    }
}
