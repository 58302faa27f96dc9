//! # Caller Strategies
//!
//! Predicates and transforms passed into query operations. Closures implement
//! these traits directly; the named structs cover the common cases.

use super::entities::PlainValue;

/// Decides whether an element matches.
pub trait ElementPredicate {
    /// Test one decrypted element.
    fn matches(&self, element: &PlainValue) -> bool;
}

impl<F> ElementPredicate for F
where
    F: Fn(&PlainValue) -> bool,
{
    fn matches(&self, element: &PlainValue) -> bool {
        self(element)
    }
}

/// Rewrites an element. The result is re-encrypted before persisting.
pub trait ElementTransform {
    /// Produce the replacement element.
    fn apply(&self, element: PlainValue) -> PlainValue;
}

impl<F> ElementTransform for F
where
    F: Fn(PlainValue) -> PlainValue,
{
    fn apply(&self, element: PlainValue) -> PlainValue {
        self(element)
    }
}

/// Decides whether two consecutive elements form a balanced pair.
pub trait PairMatcher {
    /// `lower` sits at an even index, `upper` right above it.
    fn matches(&self, lower: &PlainValue, upper: &PlainValue) -> bool;
}

impl<F> PairMatcher for F
where
    F: Fn(&PlainValue, &PlainValue) -> bool,
{
    fn matches(&self, lower: &PlainValue, upper: &PlainValue) -> bool {
        self(lower, upper)
    }
}

/// Matches elements whose facet lies in `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct FacetInRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl ElementPredicate for FacetInRange {
    fn matches(&self, element: &PlainValue) -> bool {
        element.value >= self.min && element.value <= self.max
    }
}

/// Matches elements whose plaintext equals the given bytes.
#[derive(Debug, Clone)]
pub struct DataEquals(pub Vec<u8>);

impl ElementPredicate for DataEquals {
    fn matches(&self, element: &PlainValue) -> bool {
        element.data == self.0
    }
}

/// Pairs whose facets sum to zero, e.g. a debit followed by its credit.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpposingFacets;

impl PairMatcher for OpposingFacets {
    fn matches(&self, lower: &PlainValue, upper: &PlainValue) -> bool {
        lower.value + upper.value == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_strategies() {
        let positive = |e: &PlainValue| e.value > 0.0;
        assert!(positive.matches(&PlainValue::new("a", 1.0)));

        let double = |mut e: PlainValue| {
            e.value *= 2.0;
            e
        };
        assert_eq!(double.apply(PlainValue::new("a", 2.0)).value, 4.0);
    }

    #[test]
    fn test_named_strategies() {
        let range = FacetInRange { min: 1.0, max: 2.0 };
        assert!(range.matches(&PlainValue::new("a", 2.0)));
        assert!(!range.matches(&PlainValue::new("a", 2.1)));

        assert!(DataEquals(b"k".to_vec()).matches(&PlainValue::new("k", 0.0)));

        let debit = PlainValue::new("debit", -5.0);
        let credit = PlainValue::new("credit", 5.0);
        assert!(OpposingFacets.matches(&debit, &credit));
    }
}
