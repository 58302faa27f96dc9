//! # Set Algebra
//!
//! Set operations over decrypted elements. Membership is decided by plaintext
//! identity (`PlainValue::data`). Ciphertext cannot be compared because the
//! same plaintext seals to different bytes every time.
//!
//! Results are de-duplicated and listed in first-seen order, but callers must
//! treat them as sets.

use super::entities::PlainValue;
use std::collections::HashSet;

fn identities(values: &[PlainValue]) -> HashSet<&[u8]> {
    values.iter().map(|v| v.data.as_slice()).collect()
}

fn collect_unique<'a, I>(candidates: I) -> Vec<PlainValue>
where
    I: IntoIterator<Item = &'a PlainValue>,
{
    let mut seen: HashSet<&[u8]> = HashSet::new();
    candidates
        .into_iter()
        .filter(|v| seen.insert(v.data.as_slice()))
        .cloned()
        .collect()
}

/// Elements in either input.
pub fn union(a: &[PlainValue], b: &[PlainValue]) -> Vec<PlainValue> {
    collect_unique(a.iter().chain(b.iter()))
}

/// Elements of `a` that are also in `b`.
pub fn intersection(a: &[PlainValue], b: &[PlainValue]) -> Vec<PlainValue> {
    let in_b = identities(b);
    collect_unique(a.iter().filter(|v| in_b.contains(v.data.as_slice())))
}

/// Elements of `a` that are not in `b`.
pub fn difference(a: &[PlainValue], b: &[PlainValue]) -> Vec<PlainValue> {
    let in_b = identities(b);
    collect_unique(a.iter().filter(|v| !in_b.contains(v.data.as_slice())))
}

/// Elements in exactly one of the inputs.
pub fn symmetric_difference(a: &[PlainValue], b: &[PlainValue]) -> Vec<PlainValue> {
    let in_a = identities(a);
    let in_b = identities(b);
    collect_unique(
        a.iter()
            .filter(|v| !in_b.contains(v.data.as_slice()))
            .chain(b.iter().filter(|v| !in_a.contains(v.data.as_slice()))),
    )
}

/// Indices of the first occurrence of each identity, in original order.
pub fn first_occurrences(values: &[PlainValue]) -> Vec<usize> {
    let mut seen: HashSet<&[u8]> = HashSet::new();
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| seen.insert(v.data.as_slice()))
        .map(|(i, _)| i)
        .collect()
}

/// Whether every identity appears once.
pub fn all_unique(values: &[PlainValue]) -> bool {
    first_occurrences(values).len() == values.len()
}

/// Index of the first element whose plaintext equals `target`.
pub fn position(values: &[PlainValue], target: &[u8]) -> Option<usize> {
    values.iter().position(|v| v.data == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(data: &str) -> PlainValue {
        PlainValue::new(data, 0.0)
    }

    fn names(values: &[PlainValue]) -> Vec<String> {
        let mut out: Vec<String> = values
            .iter()
            .map(|v| String::from_utf8_lossy(&v.data).into_owned())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_union_dedups() {
        let a = vec![pv("x"), pv("y"), pv("x")];
        let b = vec![pv("y"), pv("z")];
        assert_eq!(names(&union(&a, &b)), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_intersection_and_difference() {
        let a = vec![pv("x"), pv("y"), pv("w")];
        let b = vec![pv("y"), pv("z"), pv("w")];
        assert_eq!(names(&intersection(&a, &b)), vec!["w", "y"]);
        assert_eq!(names(&difference(&a, &b)), vec!["x"]);
        assert_eq!(names(&symmetric_difference(&a, &b)), vec!["x", "z"]);
    }

    #[test]
    fn test_identity_ignores_numeric_facet() {
        let a = vec![PlainValue::new("x", 1.0)];
        let b = vec![PlainValue::new("x", 2.0)];
        assert_eq!(intersection(&a, &b).len(), 1);
        assert!(difference(&a, &b).is_empty());
    }

    #[test]
    fn test_first_occurrences() {
        let values = vec![pv("a"), pv("b"), pv("a"), pv("c"), pv("b")];
        assert_eq!(first_occurrences(&values), vec![0, 1, 3]);
        assert!(!all_unique(&values));
        assert!(all_unique(&values[..2]));
    }

    #[test]
    fn test_position() {
        let values = vec![pv("a"), pv("b"), pv("b")];
        assert_eq!(position(&values, b"b"), Some(1));
        assert_eq!(position(&values, b"q"), None);
    }
}
