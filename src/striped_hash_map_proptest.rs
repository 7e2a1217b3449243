#![cfg(test)]

// Property tests for StripedHashMap kept inside the crate so they can
// inspect bucket chains directly.

use crate::striped_hash_map::StripedHashMap;
use core::hash::{BuildHasher, Hasher};
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations: indices shrink to earlier keys, the pool
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, u32),
    Get(usize),
    TryGet(usize),
    Contains(String),
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,5}", 1..=8)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                (idx.clone(), any::<u32>()).prop_map(|(i, v)| OpI::Put(i, v)),
                idx.clone().prop_map(OpI::Get),
                idx.clone().prop_map(OpI::TryGet),
                prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

fn run_against_model<S: BuildHasher>(
    sut: &StripedHashMap<S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Put(i, v) => {
                sut.put(&pool[i], v);
                model.insert(pool[i].clone(), v);
            }
            OpI::Get(i) => {
                // `get` on an absent key is a contract violation; only ask
                // for keys the model knows.
                if let Some(&mv) = model.get(&pool[i]) {
                    prop_assert_eq!(sut.get(&pool[i]), mv);
                }
            }
            OpI::TryGet(i) => {
                prop_assert_eq!(sut.try_get(&pool[i]), model.get(&pool[i]).copied());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
        }

        // Post-conditions after each op: one entry per distinct key, each
        // in the bucket its key routes to.
        prop_assert_eq!(sut.entry_count(), model.len());
        prop_assert_eq!(sut.misrouted_entries(), 0);
        for k in model.keys() {
            prop_assert_eq!(sut.copies_of(k.as_bytes()), 1);
        }
    }
    Ok(())
}

// Property: state-machine equivalence against a plain HashMap across random
// capacities. Small capacities force many keys to share a chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut = StripedHashMap::new(capacity);
        run_against_model(&sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key lands in bucket 0.
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

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((capacity, pool, ops) in arb_scenario()) {
        let sut = StripedHashMap::with_hasher(capacity, ConstBuildHasher);
        run_against_model(&sut, &pool, ops)?;
        for k in &pool {
            prop_assert_eq!(sut.bucket_index(k), 0);
        }
    }
}
