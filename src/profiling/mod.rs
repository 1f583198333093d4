use std::hint::black_box;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::report::display_elapsed;

/// Timer for one labelled block; prints the elapsed time when dropped.
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        debug!(label = self.label, elapsed_ns = elapsed.as_nanos() as u64, "timer finished");
        println!("{}: {}s", self.label, display_elapsed(elapsed));
    }
}

/// Keep a checksum observable so the loop that produced it is not optimized away.
#[inline]
pub fn consume(checksum: u64) {
    black_box(checksum);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let timer = ScopedTimer::new("test_timer");
        let first = timer.elapsed();
        let second = timer.elapsed();
        assert!(second >= first);
    }

    #[test]
    fn test_consume_passes_through() {
        let sum: u64 = (1..=10u64).sum();
        consume(sum);
        assert_eq!(sum, 55);
    }
}
