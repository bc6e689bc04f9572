//! Property-based tests using proptest and quickcheck.

use klotho::{contains_all, par_iter_with, ParallelConfig, ParallelIterator};
use klotho_utils::random::{random_char_string, random_char_string_with, ALPHABET};
use proptest::prelude::*;
use quickcheck::{quickcheck, TestResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    /// Property: generated strings have the requested length and only use the alphabet
    #[test]
    fn prop_random_string_shape(len in 0usize..2_048) {
        let s = random_char_string(len);
        prop_assert_eq!(s.len(), len);
        prop_assert!(s.bytes().all(|b| ALPHABET.contains(&b)));
    }

    /// Property: a seed fully determines the generated string
    #[test]
    fn prop_seed_is_deterministic(seed in any::<u64>(), len in 0usize..256) {
        let a = random_char_string_with(&mut StdRng::seed_from_u64(seed), len);
        let b = random_char_string_with(&mut StdRng::seed_from_u64(seed), len);
        prop_assert_eq!(a, b);
    }

    /// Property: parallel filtering returns the sequential result, in order
    #[test]
    fn prop_parallel_filter_is_sequential_filter(
        input in proptest::collection::vec("[a-e]{0,8}", 0..500),
        needles in proptest::collection::vec("[a-e]{1,2}", 0..3),
        workers in 1usize..8,
    ) {
        let config = ParallelConfig::new(workers, 4).unwrap();
        let sequential: Vec<&String> = input.iter().filter(|s| contains_all(s, &needles)).collect();
        let parallel: Vec<&String> = par_iter_with(&input, config)
            .filter(|s| contains_all(s, &needles))
            .collect()
            .unwrap();
        prop_assert_eq!(sequential, parallel);
    }
}

fn kept_strings_contain_every_needle(input: Vec<String>, needles: Vec<String>) -> TestResult {
    if input.len() > 1_000 {
        return TestResult::discard();
    }

    let config = ParallelConfig::new(4, 8).unwrap();
    let kept: Vec<&String> = match par_iter_with(&input, config)
        .filter(|s| contains_all(s, &needles))
        .collect()
    {
        Ok(kept) => kept,
        Err(_) => return TestResult::failed(),
    };

    TestResult::from_bool(
        kept.iter()
            .all(|s| needles.iter().all(|n| s.contains(n.as_str()))),
    )
}

#[test]
fn qc_kept_strings_contain_every_needle() {
    quickcheck(kept_strings_contain_every_needle as fn(Vec<String>, Vec<String>) -> TestResult);
}
