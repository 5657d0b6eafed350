#![cfg(test)]

// Property tests for ChainedHashTable, kept inside the crate next to the
// unit tests so they run without any feature gates.

use crate::chained_hash_table::ChainedHashTable;
use crate::primes::is_prime;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations: indices shrink toward earlier keys and the op
// list shrinks in length, which keeps counterexamples small.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Remove(usize),
    Contains(String),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-zA-Z]{0,6}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => idx.clone().prop_map(Op::Insert),
            3 => idx.clone().prop_map(Op::Remove),
            3 => prop_oneof![contains_pool, "[a-zA-Z]{0,6}"].prop_map(Op::Contains),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_structure<S: BuildHasher>(
    sut: &ChainedHashTable<String, S>,
    model: &HashSet<String>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    prop_assert!(is_prime(sut.bucket_count()));
    prop_assert!(sut.len() <= sut.bucket_count(), "load factor above 1.0");
    prop_assert_eq!(sut.iter().count(), sut.len());
    Ok(())
}

fn run_state_machine<S: BuildHasher>(
    mut sut: ChainedHashTable<String, S>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<String> = HashSet::new();
    let mut buckets = sut.bucket_count();

    for op in ops {
        match op {
            Op::Insert(i) => {
                let k = pool[i].clone();
                let added = sut.insert(k.clone());
                prop_assert_eq!(added, model.insert(k));
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
                prop_assert!(!sut.contains(k.as_str()));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.contains(&s));
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.bucket_count(), buckets, "clear must not resize");
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.iter().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        let now = sut.bucket_count();
        prop_assert!(now >= buckets, "table must never shrink");
        if now != buckets {
            prop_assert!(now >= 2 * buckets, "rehash must at least double");
            buckets = now;
        }
        check_structure(&sut, &model)?;
    }

    // Every surviving key is still reachable after all the rehashes.
    for k in &model {
        prop_assert!(sut.contains(k.as_str()));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - insert/remove report novelty exactly like the model.
// - contains parity for pooled and arbitrary probes.
// - size equals distinct live keys; bucket count is prime, never shrinks,
//   and at least doubles whenever it changes.
// - clear keeps the bucket count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), hint in 0usize..16) {
        run_state_machine(ChainedHashTable::with_capacity(hint), pool, ops)?;
    }
}

#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same invariants with every key hashing to 0, so every
// operation walks a single chain and equality alone resolves membership.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = ChainedHashTable::with_capacity_and_hasher(3, ConstBuildHasher);
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: any permutation of the same inserts gives the same size and
// the same membership answers.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_order_insensitive(
        keys in proptest::collection::vec("[a-z]{1,4}", 0..200),
        seed in any::<u64>()
    ) {
        let mut shuffled = keys.clone();
        // Deterministic Fisher-Yates driven by an LCG so shrinking is stable.
        let mut s = seed;
        for i in (1..shuffled.len()).rev() {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            let j = (s >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }

        let a: ChainedHashTable<String> = keys.iter().cloned().collect();
        let b: ChainedHashTable<String> = shuffled.iter().cloned().collect();
        prop_assert_eq!(a.len(), b.len());
        for k in keys.iter().chain(["zzzzz".to_string()].iter()) {
            prop_assert_eq!(a.contains(k.as_str()), b.contains(k.as_str()));
        }
    }
}
