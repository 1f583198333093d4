use numbench::harness::{WARMUP_CALLS, best_of, run_bench};
use std::time::Duration;

#[test]
fn test_best_is_true_minimum() {
    let samples: Vec<Duration> = [5u64, 2, 7, 3].into_iter().map(Duration::from_secs).collect();
    assert_eq!(best_of(&samples), Duration::from_secs(2));
}

#[test]
fn test_rounds_recorded_and_best_selected() {
    let result = run_bench(|i| i.to_string(), 2_000, 4);
    assert_eq!(result.samples.len(), 4);
    assert_eq!(result.elapsed, *result.samples.iter().min().unwrap());
    assert!(result.samples.iter().all(|s| *s >= result.elapsed));
    // 10 one-digit, 90 two-digit, 900 three-digit, 1000 four-digit
    assert_eq!(result.total_size, 10 + 180 + 2700 + 4000);
}

#[test]
fn test_warmup_output_is_not_counted() {
    let mut calls = 0u32;
    let result = run_bench(
        |_| {
            calls += 1;
            vec![0u8; 3]
        },
        3,
        1,
    );
    assert_eq!(calls, WARMUP_CALLS + 3);
    assert_eq!(result.total_size, 9);
}
