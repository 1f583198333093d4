use std::time::Duration;

use crate::harness::BenchmarkResult;
use crate::record::Approach;
use crate::sink::{WriteResult, WriteStrategy};

const LABEL_WIDTH: usize = 12;
const WRITE_LABEL_WIDTH: usize = 24;

pub fn seconds(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64()
}

/// `<secs>.<nanos>` with all nine sub-second digits.
pub fn display_elapsed(elapsed: Duration) -> String {
    format!("{}.{:09}", elapsed.as_secs(), elapsed.subsec_nanos())
}

/// How many times slower `other` is than `baseline`; `None` when the baseline measured zero.
pub fn speedup(baseline: Duration, other: Duration) -> Option<f64> {
    if baseline.is_zero() {
        None
    } else {
        Some(seconds(other) / seconds(baseline))
    }
}

pub fn format_result_line(
    label: &str,
    result: &BenchmarkResult,
    baseline: Option<(&str, Duration)>,
) -> String {
    let mut line = format!(
        "{:<width$}(total size: {}) took {}s",
        label,
        result.total_size,
        display_elapsed(result.elapsed),
        width = LABEL_WIDTH
    );
    if let Some((baseline_label, baseline_elapsed)) = baseline
        && let Some(ratio) = speedup(baseline_elapsed, result.elapsed)
    {
        line.push_str(&format!(" ({} is {:.2}x faster)", baseline_label, ratio));
    }
    line
}

/// The `[format benchmark results]` block. The first result is the baseline.
pub fn format_results(
    iterations: u32,
    rounds: u32,
    results: &[(Approach, BenchmarkResult)],
) -> String {
    let mut report = String::new();
    report.push_str("\n[format benchmark results]\n");
    report.push_str(&format!("Iterations: {}, Rounds: {}\n", iterations, rounds));

    let baseline = results.first().map(|(approach, result)| (approach.label(), result.elapsed));
    for (index, (approach, result)) in results.iter().enumerate() {
        let baseline = if index == 0 { None } else { baseline };
        report.push_str(&format_result_line(approach.label(), result, baseline));
        report.push('\n');
    }
    report
}

pub fn format_write_line(
    approach: Approach,
    strategy: WriteStrategy,
    result: &WriteResult,
) -> String {
    let label = format!("{} {}", approach.label(), strategy.label());
    format!(
        "{:<width$}(size: {}) took {}s",
        label,
        result.total_size,
        display_elapsed(result.elapsed),
        width = WRITE_LABEL_WIDTH
    )
}
