//! Algebraic properties of the engine, checked over generated stacks.

use proptest::prelude::*;
use stack_engine::{
    BasicStackApi, BulkStackApi, EngineConfig, InMemoryLedger, PlainValue, QueryStackApi,
    StackEngine, StackId, XChaChaElementCipher,
};
use std::collections::HashSet;

type Engine = StackEngine<InMemoryLedger, XChaChaElementCipher>;

fn engine() -> Engine {
    StackEngine::in_memory(XChaChaElementCipher::ephemeral(), EngineConfig::default())
}

fn element() -> impl Strategy<Value = PlainValue> {
    (proptest::collection::vec(any::<u8>(), 0..12), -1.0e6f64..1.0e6)
        .prop_map(|(data, value)| PlainValue::new(data, value))
}

fn elements(max: usize) -> impl Strategy<Value = Vec<PlainValue>> {
    proptest::collection::vec(element(), 0..max)
}

/// Small payload alphabet so generated stacks overlap.
fn overlapping(max: usize) -> impl Strategy<Value = Vec<PlainValue>> {
    proptest::collection::vec(
        (0u8..6, -10.0f64..10.0).prop_map(|(tag, value)| PlainValue::new(vec![tag], value)),
        0..max,
    )
}

fn snapshot(engine: &Engine, id: &StackId) -> Vec<PlainValue> {
    engine.filter(id, |_: &PlainValue| true).unwrap()
}

fn identities(values: &[PlainValue]) -> HashSet<Vec<u8>> {
    values.iter().map(|v| v.data.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn push_then_pop_restores_stack(initial in elements(8), value in element()) {
        let engine = engine();
        let id = engine.create_stack(initial.clone()).unwrap();

        engine.push(&id, value.clone()).unwrap();
        prop_assert_eq!(engine.pop(&id).unwrap(), value);
        prop_assert_eq!(snapshot(&engine, &id), initial);
    }

    #[test]
    fn peek_never_mutates(initial in elements(8)) {
        let engine = engine();
        let id = engine.create_stack(initial.clone()).unwrap();

        let peeked = engine.peek(&id);
        prop_assert_eq!(peeked.ok(), initial.last().cloned());
        prop_assert_eq!(snapshot(&engine, &id), initial);
    }

    #[test]
    fn sort_is_idempotent(initial in elements(10), ascending in any::<bool>()) {
        let engine = engine();
        let id = engine.create_stack(initial).unwrap();

        engine.sort(&id, ascending).unwrap();
        let once = snapshot(&engine, &id);
        engine.sort(&id, ascending).unwrap();

        prop_assert!(engine.is_sorted(&id, ascending).unwrap());
        prop_assert_eq!(snapshot(&engine, &id), once);
    }

    #[test]
    fn merge_undoes_split(initial in elements(10), cut in any::<usize>()) {
        let engine = engine();
        let id = engine.create_stack(initial.clone()).unwrap();
        let k = cut % (initial.len() + 1);

        let (lower, upper) = engine.split(&id, k).unwrap();
        let merged = engine.merge(&lower, &upper).unwrap();
        prop_assert_eq!(snapshot(&engine, &merged), initial);
    }

    #[test]
    fn union_is_commutative(a in overlapping(8), b in overlapping(8)) {
        let engine = engine();
        let a_id = engine.create_stack(a).unwrap();
        let b_id = engine.create_stack(b).unwrap();

        let ab = identities(&engine.union(&a_id, &b_id).unwrap());
        let ba = identities(&engine.union(&b_id, &a_id).unwrap());
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn intersection_is_subset_of_both(a in overlapping(8), b in overlapping(8)) {
        let engine = engine();
        let a_ids = identities(&a);
        let b_ids = identities(&b);
        let a_id = engine.create_stack(a).unwrap();
        let b_id = engine.create_stack(b).unwrap();

        let both = identities(&engine.intersection(&a_id, &b_id).unwrap());
        prop_assert!(both.is_subset(&a_ids));
        prop_assert!(both.is_subset(&b_ids));
    }

    #[test]
    fn difference_and_intersection_rebuild_left(a in overlapping(8), b in overlapping(8)) {
        let engine = engine();
        let a_ids = identities(&a);
        let a_id = engine.create_stack(a).unwrap();
        let b_id = engine.create_stack(b).unwrap();

        let mut rebuilt = identities(&engine.difference(&a_id, &b_id).unwrap());
        rebuilt.extend(identities(&engine.intersection(&a_id, &b_id).unwrap()));
        prop_assert_eq!(rebuilt, a_ids);
    }
}
