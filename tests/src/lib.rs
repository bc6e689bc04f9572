//! Integration tests for the Klotho benchmarking toolkit.

#[cfg(test)]
mod property_tests;

/// End-to-end tests across the timing, generation and traversal crates.
#[cfg(test)]
mod integration_tests {
    use klotho::prelude::*;
    use klotho::{contains_all, par_generate_with, par_iter_with, ManualClock};
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn test_sequential_and_parallel_filters_keep_same_set() {
        let config = ParallelConfig::new(8, 32).unwrap();
        let input: Vec<String> = par_generate_with(1_000, config, |_| random_char_string(20))
            .collect()
            .unwrap();
        let required = ["a", "b"];

        let sequential: HashSet<&String> = input
            .iter()
            .filter(|s| contains_all(s, &required))
            .collect();
        let parallel: HashSet<&String> = par_iter_with(&input, config)
            .filter(|s| contains_all(s, &required))
            .collect()
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_scenario_end_to_end() {
        let report = FilterScenario::builder()
            .count(1_000)
            .string_length(20)
            .required(["a", "b"])
            .workers(4)
            .chunk_size(64)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.generated.len(), 1_000);
        assert!(report.sequential.len() <= report.generated.len());
        assert!(report.agrees_as_set());
        assert!(report.agrees());
        assert!(report.generation_time > Duration::ZERO);
    }

    #[test]
    fn test_scenario_without_required_keeps_everything() {
        let scenario = FilterScenario::builder()
            .count(200)
            .string_length(5)
            .required(Vec::<String>::new())
            .workers(3)
            .chunk_size(1)
            .build()
            .unwrap();
        let report = scenario.run().unwrap();

        assert_eq!(report.sequential, report.generated);
        assert_eq!(report.parallel, report.generated);
    }

    #[test]
    fn test_scenario_with_empty_input() {
        let report = FilterScenario::builder()
            .count(0)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert!(report.generated.is_empty());
        assert!(report.sequential.is_empty());
        assert!(report.parallel.is_empty());
    }

    #[test]
    fn test_chronometer_times_each_phase() {
        let clock = ManualClock::new();
        let mut chrono = Chronometer::with_clock(&clock);

        chrono.start();
        clock.advance(Duration::from_millis(50));
        assert!(chrono.stop().unwrap() >= Duration::from_millis(50));

        chrono.start();
        clock.advance(Duration::from_millis(5));
        chrono.stop().unwrap();
        assert_eq!(chrono.duration(), Duration::from_millis(5));

        assert_eq!(chrono.stop(), Err(KlothoError::NotStarted));
    }

    #[test]
    fn test_negative_length_rejected() {
        assert_eq!(klotho::checked_length(-5), Err(KlothoError::InvalidLength(-5)));
        assert_eq!(klotho::checked_length(20).map(random_char_string).map(|s| s.len()), Ok(20));
    }

    #[test]
    fn test_generator_safe_across_many_workers() {
        let config = ParallelConfig::new(16, 1).unwrap();
        let letters: Vec<char> = par_generate_with(26 * 1_000, config, |_| random_char())
            .collect()
            .unwrap();

        let distinct: HashSet<char> = letters.iter().copied().collect();
        assert_eq!(distinct.len(), 26);
    }
}
