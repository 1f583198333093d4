use bytes::BytesMut;
use std::hint::black_box;
use std::time::{Duration, Instant};

pub const DEFAULT_ROUNDS: u32 = 5;

/// Untimed calls made before the first round.
pub const WARMUP_CALLS: u32 = 1000;

/// Size of one produced value, summed into [`BenchmarkResult::total_size`].
pub trait OutputLen {
    fn output_len(&self) -> usize;
}

impl OutputLen for String {
    fn output_len(&self) -> usize {
        self.len()
    }
}

impl OutputLen for Vec<u8> {
    fn output_len(&self) -> usize {
        self.len()
    }
}

impl OutputLen for BytesMut {
    fn output_len(&self) -> usize {
        self.len()
    }
}

impl OutputLen for usize {
    fn output_len(&self) -> usize {
        *self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BenchmarkResult {
    /// Sum of output sizes, counted on the first round only
    pub total_size: usize,
    /// Fastest round
    pub elapsed: Duration,
    /// Every round in execution order
    pub samples: Vec<Duration>,
}

/// Time `rounds` passes of `iterations` calls to `f` and keep the fastest one.
pub fn run_bench<F, O>(mut f: F, iterations: u32, rounds: u32) -> BenchmarkResult
where
    F: FnMut(u32) -> O,
    O: OutputLen,
{
    for w in 0..WARMUP_CALLS {
        black_box(f(w));
    }

    let mut samples = Vec::with_capacity(rounds as usize);
    let mut total_size = 0usize;

    for round in 0..rounds {
        let count_size = round == 0;
        let start = Instant::now();
        for i in 0..iterations {
            let out = black_box(f(i));
            if count_size {
                total_size += out.output_len();
            }
        }
        samples.push(start.elapsed());
    }

    BenchmarkResult {
        total_size,
        elapsed: best_of(&samples),
        samples,
    }
}

/// Minimum of the samples, zero when there are none.
pub fn best_of(samples: &[Duration]) -> Duration {
    samples.iter().copied().min().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_of_picks_minimum() {
        let samples = [5, 2, 7, 3].map(Duration::from_millis);
        assert_eq!(best_of(&samples), Duration::from_millis(2));
        assert_eq!(best_of(&[]), Duration::ZERO);
        assert_eq!(best_of(&[Duration::from_nanos(9)]), Duration::from_nanos(9));
    }

    #[test]
    fn test_size_counted_once() {
        let result = run_bench(|i| "x".repeat(i as usize % 3), 6, 4);
        // lengths 0,1,2,0,1,2
        assert_eq!(result.total_size, 6);
        assert_eq!(result.samples.len(), 4);
        assert_eq!(result.elapsed, best_of(&result.samples));
    }

    #[test]
    fn test_warmup_runs_before_rounds() {
        let mut calls = Vec::new();
        let result = run_bench(
            |i| {
                calls.push(i);
                0usize
            },
            2,
            2,
        );
        assert_eq!(calls.len(), WARMUP_CALLS as usize + 4);
        assert_eq!(calls[..WARMUP_CALLS as usize], (0..WARMUP_CALLS).collect::<Vec<_>>()[..]);
        assert_eq!(calls[WARMUP_CALLS as usize..], [0, 1, 0, 1]);
        assert_eq!(result.total_size, 0);
    }

    #[test]
    fn test_zero_rounds() {
        let result = run_bench(|_| String::from("abc"), 10, 0);
        assert_eq!(result.total_size, 0);
        assert_eq!(result.elapsed, Duration::ZERO);
        assert!(result.samples.is_empty());
    }
}
