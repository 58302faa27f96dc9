//! Predicate, search and ordering operations.

use super::operations::*;
use super::StackEngine;
use crate::domain::entities::{PlainValue, StackId, StackValue};
use crate::domain::errors::StackError;
use crate::domain::strategy::{ElementPredicate, ElementTransform, PairMatcher};
use crate::domain::{sequence, set_ops};
use crate::ports::inbound::QueryStackApi;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn matching<P: ElementPredicate>(
        &self,
        id: &StackId,
        operation: &'static str,
        predicate: &P,
    ) -> Result<Vec<PlainValue>, StackError> {
        self.read(id, operation, |stack| {
            let plains = self.open_all(id, operation, &stack.values)?;
            Ok(plains.into_iter().filter(|p| predicate.matches(p)).collect())
        })
    }
}

impl<L, C, T> QueryStackApi for StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn sort(&self, id: &StackId, ascending: bool) -> Result<(), StackError> {
        self.mutate(id, SORT, |stack| {
            sequence::sort_by_facet(&mut stack.values, |v: &StackValue| v.value, ascending);
            Ok(())
        })
    }

    fn is_sorted(&self, id: &StackId, ascending: bool) -> Result<bool, StackError> {
        self.read(id, IS_SORTED, |stack| {
            Ok(sequence::is_sorted_by_facet(&stack.facets(), ascending))
        })
    }

    fn filter<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
    ) -> Result<Vec<PlainValue>, StackError> {
        self.matching(id, FILTER, &predicate)
    }

    fn map<M: ElementTransform>(&self, id: &StackId, transform: M) -> Result<(), StackError> {
        self.mutate(id, MAP, |stack| {
            let plains = self.open_all(id, MAP, &stack.values)?;
            let mapped: Vec<PlainValue> = plains.into_iter().map(|p| transform.apply(p)).collect();
            stack.values = self.seal_all(id, MAP, &mapped)?;
            Ok(())
        })
    }

    fn accumulate<F>(&self, id: &StackId, fold: F, initial: f64) -> Result<f64, StackError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.read(id, ACCUMULATE, |stack| {
            Ok(stack.values.iter().fold(initial, |acc, v| fold(acc, v.value)))
        })
    }

    fn search(&self, id: &StackId, target: &[u8]) -> Result<usize, StackError> {
        self.read(id, SEARCH, |stack| {
            let plains = self.open_all(id, SEARCH, &stack.values)?;
            set_ops::position(&plains, target).ok_or_else(|| StackError::ElementNotFound {
                stack_id: id.clone(),
                operation: SEARCH,
            })
        })
    }

    fn contains(&self, id: &StackId, target: &[u8]) -> Result<bool, StackError> {
        match self.search(id, target) {
            Ok(_) => Ok(true),
            Err(StackError::ElementNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn remove_duplicates(&self, id: &StackId) -> Result<usize, StackError> {
        self.mutate(id, REMOVE_DUPLICATES, |stack| {
            let plains = self.open_all(id, REMOVE_DUPLICATES, &stack.values)?;
            let keep = set_ops::first_occurrences(&plains);
            let removed = stack.len() - keep.len();
            if removed > 0 {
                stack.values = keep.into_iter().map(|i| stack.values[i].clone()).collect();
            }
            Ok(removed)
        })
    }

    fn check_uniqueness(&self, id: &StackId) -> Result<bool, StackError> {
        self.read(id, CHECK_UNIQUENESS, |stack| {
            let plains = self.open_all(id, CHECK_UNIQUENESS, &stack.values)?;
            Ok(set_ops::all_unique(&plains))
        })
    }

    fn check_balance<M: PairMatcher>(&self, id: &StackId, matcher: M) -> Result<bool, StackError> {
        self.read(id, CHECK_BALANCE, |stack| {
            if stack.len() % 2 != 0 {
                return Ok(false);
            }
            let plains = self.open_all(id, CHECK_BALANCE, &stack.values)?;
            Ok(plains
                .chunks_exact(2)
                .all(|pair| matcher.matches(&pair[0], &pair[1])))
        })
    }

    fn range(&self, id: &StackId, start: usize, end: usize) -> Result<Vec<PlainValue>, StackError> {
        self.read(id, RANGE, |stack| {
            sequence::check_range(start, end, stack.len())
                .map_err(|e| StackError::from_sequence(id, RANGE, e))?;
            self.open_all(id, RANGE, &stack.values[start..=end])
        })
    }

    fn set_value_conditionally<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
        new_value: PlainValue,
    ) -> Result<usize, StackError> {
        let sealed = self.seal_value(id, SET_CONDITIONALLY, &new_value)?;
        self.mutate(id, SET_CONDITIONALLY, |stack| {
            let plains = self.open_all(id, SET_CONDITIONALLY, &stack.values)?;
            let mut replaced = 0;
            for (index, plain) in plains.iter().enumerate() {
                if predicate.matches(plain) {
                    stack.values[index] = sealed.clone();
                    stack.last_accessed_index = Some(index);
                    replaced += 1;
                }
            }
            Ok(replaced)
        })
    }

    fn get_subsection<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
    ) -> Result<Vec<PlainValue>, StackError> {
        self.matching(id, GET_SUBSECTION, &predicate)
    }

    fn count_matches<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
    ) -> Result<usize, StackError> {
        Ok(self.matching(id, COUNT_MATCHES, &predicate)?.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::PlainValue;
    use crate::domain::errors::StackError;
    use crate::domain::strategy::{DataEquals, FacetInRange, OpposingFacets};
    use crate::ports::inbound::QueryStackApi;
    use crate::ports::outbound::StackLedger;
    use crate::test_utils::{contents, data_of, facets, make_engine, pv, seed, seed_facets};

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let engine = make_engine();
        let id = seed(&engine, &[("x", 2.0), ("a", 1.0), ("y", 2.0), ("b", 0.0)]);

        engine.sort(&id, true).unwrap();
        let once = contents(&engine, &id);
        assert_eq!(
            once.iter().map(|(d, _)| d.as_str()).collect::<Vec<_>>(),
            vec!["b", "a", "x", "y"]
        );
        assert!(engine.is_sorted(&id, true).unwrap());
        assert!(!engine.is_sorted(&id, false).unwrap());

        engine.sort(&id, true).unwrap();
        assert_eq!(contents(&engine, &id), once);

        engine.sort(&id, false).unwrap();
        assert_eq!(facets(&engine, &id), vec![2.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let engine = make_engine();
        let id = seed_facets(&engine, &[1.0, 5.0, 10.0]);
        let before = engine.ledger().fetch(&id).unwrap();

        let hits = engine.filter(&id, FacetInRange { min: 2.0, max: 10.0 }).unwrap();
        assert_eq!(hits.iter().map(|p| p.value).collect::<Vec<_>>(), vec![5.0, 10.0]);
        assert_eq!(
            engine.get_subsection(&id, |p: &PlainValue| p.value < 2.0).unwrap().len(),
            1
        );
        assert_eq!(engine.count_matches(&id, |p: &PlainValue| p.value > 0.0).unwrap(), 3);
        assert_eq!(engine.ledger().fetch(&id).unwrap(), before);
    }

    #[test]
    fn test_map_reencrypts() {
        let engine = make_engine();
        let id = seed(&engine, &[("a", 1.0), ("b", 2.0)]);
        let before = engine.ledger().fetch(&id).unwrap();

        engine
            .map(&id, |p: PlainValue| {
                let mut data = p.data.clone();
                data.extend_from_slice(b"!");
                PlainValue::new(data, p.value * 10.0)
            })
            .unwrap();

        assert_eq!(
            contents(&engine, &id),
            vec![("a!".to_string(), 10.0), ("b!".to_string(), 20.0)]
        );
        let after = engine.ledger().fetch(&id).unwrap();
        assert_ne!(after.values[0].data, before.values[0].data);
    }

    #[test]
    fn test_accumulate_is_left_fold() {
        let engine = make_engine();
        let id = seed_facets(&engine, &[1.0, 2.0, 3.0]);
        assert_eq!(engine.accumulate(&id, |acc, v| acc * 10.0 + v, 0.0).unwrap(), 123.0);
    }

    #[test]
    fn test_search_and_contains() {
        let engine = make_engine();
        let id = seed(&engine, &[("a", 1.0), ("b", 2.0), ("b", 3.0)]);

        assert_eq!(engine.search(&id, b"b").unwrap(), 1);
        assert!(matches!(
            engine.search(&id, b"z"),
            Err(StackError::ElementNotFound { .. })
        ));
        assert!(engine.contains(&id, b"a").unwrap());
        assert!(!engine.contains(&id, b"z").unwrap());
        assert!(engine.contains(&"ghost".into(), b"a").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let engine = make_engine();
        let id = seed(&engine, &[("a", 1.0), ("b", 2.0), ("a", 3.0), ("c", 4.0), ("b", 5.0)]);

        assert!(!engine.check_uniqueness(&id).unwrap());
        assert_eq!(engine.remove_duplicates(&id).unwrap(), 2);
        assert_eq!(
            contents(&engine, &id),
            vec![
                ("a".to_string(), 1.0),
                ("b".to_string(), 2.0),
                ("c".to_string(), 4.0)
            ]
        );
        assert!(engine.check_uniqueness(&id).unwrap());
        assert_eq!(engine.remove_duplicates(&id).unwrap(), 0);
    }

    #[test]
    fn test_check_balance() {
        let engine = make_engine();
        let balanced = seed_facets(&engine, &[5.0, -5.0, 2.0, -2.0]);
        assert!(engine.check_balance(&balanced, OpposingFacets).unwrap());

        let unbalanced = seed_facets(&engine, &[5.0, -4.0]);
        assert!(!engine.check_balance(&unbalanced, OpposingFacets).unwrap());

        let odd = seed_facets(&engine, &[5.0, -5.0, 1.0]);
        assert!(!engine.check_balance(&odd, OpposingFacets).unwrap());

        let brackets = seed(&engine, &[("(", 0.0), (")", 0.0)]);
        let matched = engine
            .check_balance(&brackets, |l: &PlainValue, u: &PlainValue| {
                l.data == b"(" && u.data == b")"
            })
            .unwrap();
        assert!(matched);
    }

    #[test]
    fn test_range() {
        let engine = make_engine();
        let id = seed(&engine, &[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);

        assert_eq!(data_of(&engine.range(&id, 1, 2).unwrap()), vec!["b", "c"]);
        assert_eq!(data_of(&engine.range(&id, 3, 3).unwrap()), vec!["d"]);
        assert!(matches!(
            engine.range(&id, 1, 4),
            Err(StackError::IndexOutOfBounds { index: 4, .. })
        ));
        assert!(matches!(
            engine.range(&id, 2, 1),
            Err(StackError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_set_value_conditionally() {
        let engine = make_engine();
        let id = seed(&engine, &[("a", 1.0), ("b", 2.0), ("a", 3.0)]);

        let replaced = engine
            .set_value_conditionally(&id, DataEquals(b"a".to_vec()), pv("z", 0.0))
            .unwrap();
        assert_eq!(replaced, 2);
        assert_eq!(
            contents(&engine, &id),
            vec![
                ("z".to_string(), 0.0),
                ("b".to_string(), 2.0),
                ("z".to_string(), 0.0)
            ]
        );
    }
}
