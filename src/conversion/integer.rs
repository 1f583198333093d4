//! Decimal text to `u64` parsing comparison.
//!
//! Every strategy is a step function `(text, pos) -> (value, next_pos)`
//! over a newline-separated buffer; the driver loop is shared.

use memchr::memchr_iter;
use tracing::info;

use crate::profiling::{ScopedTimer, consume};
use crate::{BenchError, Result};

pub const ENTRY_COUNT: usize = 10_000_000;

/// `0\n1\n2\n...(n-1)\n`
pub fn make_numbers_buffer(n: usize) -> String {
    let mut text = String::with_capacity(n * 8);
    let mut buf = itoa::Buffer::new();
    for i in 0..n {
        text.push_str(buf.format(i));
        text.push('\n');
    }
    text
}

pub fn count_lines(text: &str) -> usize {
    memchr_iter(b'\n', text.as_bytes()).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// C `atoi` semantics, then a separate scan past the digits
    AtoiStyle,
    /// `str::parse` on the leading digit span
    StdFromStr,
    /// One pass, one digit at a time
    DigitLoop,
    /// `lexical_core::parse_partial`
    Lexical,
}

impl ParseStrategy {
    pub const ALL: [ParseStrategy; 4] = [
        ParseStrategy::AtoiStyle,
        ParseStrategy::StdFromStr,
        ParseStrategy::DigitLoop,
        ParseStrategy::Lexical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParseStrategy::AtoiStyle => "atoi",
            ParseStrategy::StdFromStr => "std_from_str",
            ParseStrategy::DigitLoop => "digit_loop",
            ParseStrategy::Lexical => "lexical_parse_partial",
        }
    }

    /// Decode the entry starting at `pos`; returns the value and the start of the next entry.
    #[inline]
    pub fn step(self, text: &str, pos: usize) -> (u64, usize) {
        match self {
            ParseStrategy::AtoiStyle => atoi_step(text, pos),
            ParseStrategy::StdFromStr => std_step(text, pos),
            ParseStrategy::DigitLoop => digit_loop_step(text, pos),
            ParseStrategy::Lexical => lexical_step(text, pos),
        }
    }
}

/// C `atoi`: optional leading whitespace and sign, then digits up to the first non-digit.
/// Overflow wraps like a 32-bit `int`.
pub fn atoi(bytes: &[u8]) -> i32 {
    let mut p = 0;
    while p < bytes.len() && matches!(bytes[p], b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r') {
        p += 1;
    }
    let negative = match bytes.get(p) {
        Some(b'-') => {
            p += 1;
            true
        }
        Some(b'+') => {
            p += 1;
            false
        }
        _ => false,
    };
    let mut value: i32 = 0;
    while p < bytes.len() && bytes[p].is_ascii_digit() {
        value = value.wrapping_mul(10).wrapping_add(i32::from(bytes[p] - b'0'));
        p += 1;
    }
    if negative { value.wrapping_neg() } else { value }
}

#[inline]
fn skip_newline(bytes: &[u8], p: usize) -> usize {
    if p < bytes.len() && bytes[p] == b'\n' { p + 1 } else { p }
}

#[inline]
fn atoi_step(text: &str, pos: usize) -> (u64, usize) {
    let bytes = text.as_bytes();
    let value = i64::from(atoi(&bytes[pos..])) as u64;
    let mut p = pos;
    while p < bytes.len() && bytes[p].is_ascii_digit() {
        p += 1;
    }
    (value, skip_newline(bytes, p))
}

/// The cursor stops after the leading digits whether or not they parse.
#[inline]
fn std_step(text: &str, pos: usize) -> (u64, usize) {
    let bytes = text.as_bytes();
    let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
    let end = pos + digits;
    let value = text
        .get(pos..end)
        .and_then(|span| span.parse::<u64>().ok())
        .unwrap_or(0);
    (value, skip_newline(bytes, end))
}

#[inline]
fn digit_loop_step(text: &str, pos: usize) -> (u64, usize) {
    let bytes = text.as_bytes();
    let mut value = 0u64;
    let mut q = pos;
    while q < bytes.len() && bytes[q] != b'\n' {
        let digit = bytes[q].wrapping_sub(b'0');
        if digit > 9 {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(u64::from(digit));
        q += 1;
    }
    // Consumes the stop byte whatever it is.
    (value, if q < bytes.len() { q + 1 } else { q })
}

#[inline]
fn lexical_step(text: &str, pos: usize) -> (u64, usize) {
    let bytes = text.as_bytes();
    let (value, consumed) = lexical_core::parse_partial::<u64>(&bytes[pos..]).unwrap_or((0, 0));
    (value, skip_newline(bytes, pos + consumed))
}

#[inline]
fn sum_with<S>(text: &str, step: S) -> u64
where
    S: Fn(&str, usize) -> (u64, usize),
{
    let len = text.len();
    let mut pos = 0;
    let mut sum = 0u64;
    while pos < len {
        let (value, next) = step(text, pos);
        sum = sum.wrapping_add(value);
        // Malformed input must still make progress.
        pos = if next > pos { next } else { pos + 1 };
    }
    sum
}

/// Sum of every value decoded from `text`.
pub fn run_strategy(strategy: ParseStrategy, text: &str) -> u64 {
    match strategy {
        ParseStrategy::AtoiStyle => sum_with(text, atoi_step),
        ParseStrategy::StdFromStr => sum_with(text, std_step),
        ParseStrategy::DigitLoop => sum_with(text, digit_loop_step),
        ParseStrategy::Lexical => sum_with(text, lexical_step),
    }
}

/// Check that line `k` of `text` decodes to `k` and the cursor lands on the next line.
pub fn verify_strategy(strategy: ParseStrategy, text: &str, expected_lines: usize) -> Result<()> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut line = 0usize;
    while pos < bytes.len() {
        let (value, next) = strategy.step(text, pos);
        if value != line as u64 {
            return Err(BenchError::ParseMismatch {
                strategy: strategy.name(),
                line,
                expected: line as u64,
                actual: value,
            });
        }
        if next <= pos || bytes[next - 1] != b'\n' {
            return Err(BenchError::CursorMisplaced {
                strategy: strategy.name(),
                line,
                offset: next,
            });
        }
        pos = next;
        line += 1;
    }
    if line != expected_lines {
        return Err(BenchError::LineCount {
            strategy: strategy.name(),
            expected: expected_lines,
            actual: line,
        });
    }
    Ok(())
}

/// Time every strategy over `text`, each under its own scoped timer.
pub fn bench_all(text: &str) -> Vec<(ParseStrategy, u64)> {
    let mut sums = Vec::with_capacity(ParseStrategy::ALL.len());
    for strategy in ParseStrategy::ALL {
        let (sum, elapsed) = {
            let timer = ScopedTimer::new(strategy.name());
            let sum = run_strategy(strategy, text);
            consume(sum);
            (sum, timer.elapsed())
        };
        info!(
            strategy = strategy.name(),
            checksum = sum,
            elapsed_ns = elapsed.as_nanos() as u64,
            "strategy finished"
        );
        sums.push((strategy, sum));
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_buffer_layout() {
        assert_eq!(make_numbers_buffer(0), "");
        assert_eq!(make_numbers_buffer(3), "0\n1\n2\n");
        assert_eq!(count_lines(&make_numbers_buffer(1234)), 1234);
    }

    #[test]
    fn test_atoi_semantics() {
        assert_eq!(atoi(b"42\n7"), 42);
        assert_eq!(atoi(b"  -17x"), -17);
        assert_eq!(atoi(b"+8"), 8);
        assert_eq!(atoi(b"abc"), 0);
        assert_eq!(atoi(b""), 0);
        assert_eq!(atoi(b"2147483648"), i32::MIN);
    }

    #[test]
    fn test_steps_stop_at_line_end() {
        let text = "120\n7\n";
        for strategy in ParseStrategy::ALL {
            assert_eq!(strategy.step(text, 0), (120, 4), "{}", strategy.name());
            assert_eq!(strategy.step(text, 4), (7, 6), "{}", strategy.name());
        }
    }

    #[test]
    fn test_prefix_strategies_stop_at_first_non_digit() {
        let text = "12x\n";
        let prefix_parsers = [
            ParseStrategy::AtoiStyle,
            ParseStrategy::StdFromStr,
            ParseStrategy::Lexical,
        ];
        for strategy in prefix_parsers {
            assert_eq!(strategy.step(text, 0), (12, 2), "{}", strategy.name());
        }
        assert_eq!(ParseStrategy::StdFromStr.step(text, 2), (0, 2));
    }

    #[test]
    fn test_last_line_without_newline() {
        let text = "5\n66";
        for strategy in ParseStrategy::ALL {
            assert_eq!(strategy.step(text, 2), (66, 4), "{}", strategy.name());
        }
    }

    #[test]
    fn test_sums_match() {
        let n = 5000;
        let text = make_numbers_buffer(n);
        let expected = (n as u64 - 1) * n as u64 / 2;
        for strategy in ParseStrategy::ALL {
            assert_eq!(run_strategy(strategy, &text), expected, "{}", strategy.name());
        }
    }

    #[test]
    fn test_malformed_input_terminates() {
        let text = "12x\nabc\n";
        for strategy in ParseStrategy::ALL {
            run_strategy(strategy, text);
        }
    }

    #[test]
    fn test_verify_reports_mismatch() {
        let err = verify_strategy(ParseStrategy::DigitLoop, "0\n2\n", 2).unwrap_err();
        assert!(matches!(err, BenchError::ParseMismatch { line: 1, expected: 1, actual: 2, .. }));

        let err = verify_strategy(ParseStrategy::Lexical, "0\n1\n", 3).unwrap_err();
        assert!(matches!(err, BenchError::LineCount { expected: 3, actual: 2, .. }));
    }
}
