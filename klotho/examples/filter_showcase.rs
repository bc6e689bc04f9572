//! Filter showcase for Klotho
//!
//! Walks through the building blocks of the filtering benchmark one at a time.

use klotho::prelude::*;
use klotho::{par_generate_with, par_iter_with};
use std::time::Duration;

fn main() -> Result<()> {
    klotho::logging::init("info");

    println!("Klotho - Filter Showcase");
    println!("========================");

    // Example 1: Random letters and strings
    println!("\n1. Random generation:");
    println!("  One letter: {}", random_char());
    println!("  Twenty letters: {}", random_char_string(20));

    // Example 2: Chronometer
    println!("\n2. Chronometer:");
    let mut chrono = Chronometer::new();
    chrono.start();
    std::thread::sleep(Duration::from_millis(20));
    chrono.stop()?;
    println!("  Slept for {:?}", chrono.duration());
    match chrono.stop() {
        Err(err) => println!("  Second stop rejected: {err}"),
        Ok(_) => println!("  Second stop unexpectedly accepted"),
    }

    // Example 3: Parallel generation and filtering
    println!("\n3. Parallel filter:");
    let config = ParallelConfig::default();
    let (input, generated_in) = chrono.time(|| {
        par_generate_with(50_000, config, |_| random_char_string(30)).collect::<Vec<String>>()
    });
    let input = input?;
    println!("  Generated {} strings in {:?}", input.len(), generated_in);

    let (kept, filtered_in) = chrono.time(|| {
        par_iter_with(&input, config)
            .filter(|s| contains_all(s, &["k", "l", "o"]))
            .count()
    });
    println!("  {} strings contain k, l and o ({:?})", kept?, filtered_in);

    // Example 4: Full scenario
    println!("\n4. Scenario:");
    let report = FilterScenario::builder()
        .count(20_000)
        .string_length(100)
        .build()?
        .run()?;
    println!(
        "  kept {} of {}, sequential {:?}, parallel {:?}, agree: {}",
        report.sequential.len(),
        report.generated.len(),
        report.sequential_time,
        report.parallel_time,
        report.agrees()
    );

    Ok(())
}
