//! Scientific-notation float encoding comparison.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::LowerExp;
use std::io::{Cursor, Write};
use tracing::info;

use crate::profiling::{ScopedTimer, consume};

/// Values generated per precision.
pub const SAMPLE_COUNT: usize = 1 << 20;
pub const SEED: u64 = 123_456_789;

/// Stack buffer handed to each encoder; larger than any f64 rendering.
pub const ENCODE_BUF_LEN: usize = 128;

/// lexical number format that always writes an exponent, `1.0e0` included.
const SCIENTIFIC: u128 = lexical_core::NumberFormatBuilder::new()
    .required_exponent_notation(true)
    .build_strict();

const SCIENTIFIC_OPTIONS: lexical_core::WriteFloatOptions = lexical_core::WriteFloatOptions::new();

pub trait BenchFloat:
    Copy
    + LowerExp
    + ryu::Float
    + lexical_core::ToLexicalWithOptions<Options = lexical_core::WriteFloatOptions>
{
    const IS_DOUBLE: bool;

    /// Uniform over `(0, MAX]`, always positive and finite.
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl BenchFloat for f32 {
    const IS_DOUBLE: bool = false;

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        (1.0 - rng.random::<f32>()) * f32::MAX
    }
}

impl BenchFloat for f64 {
    const IS_DOUBLE: bool = true;

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        (1.0 - rng.random::<f64>()) * f64::MAX
    }
}

pub fn make_random_values<F: BenchFloat>(n: usize, seed: u64) -> Vec<F> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| F::sample(&mut rng)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatEncoder {
    /// `ryu::Buffer::format_finite`, copied out; exponent form above 1e16 (1e13 for f32)
    Ryu,
    /// `{:e}` written through an `io::Cursor`
    StdLowerExp,
    /// `lexical_core::write_with_options` with exponent notation required
    Lexical,
}

impl FloatEncoder {
    pub const ALL: [FloatEncoder; 3] = [
        FloatEncoder::Ryu,
        FloatEncoder::StdLowerExp,
        FloatEncoder::Lexical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FloatEncoder::Ryu => "ryu",
            FloatEncoder::StdLowerExp => "std",
            FloatEncoder::Lexical => "lexical",
        }
    }

    pub fn timer_label<F: BenchFloat>(self) -> &'static str {
        match (self, F::IS_DOUBLE) {
            (FloatEncoder::Ryu, false) => "ryu_float",
            (FloatEncoder::Ryu, true) => "ryu_double",
            (FloatEncoder::StdLowerExp, false) => "std_lower_exp_float",
            (FloatEncoder::StdLowerExp, true) => "std_lower_exp_double",
            (FloatEncoder::Lexical, false) => "lexical_float",
            (FloatEncoder::Lexical, true) => "lexical_double",
        }
    }

    /// Encode `x` and return the number of bytes produced.
    #[inline]
    pub fn encode<F: BenchFloat>(self, x: F, buf: &mut [u8; ENCODE_BUF_LEN]) -> usize {
        match self {
            FloatEncoder::Ryu => encode_ryu(x, buf),
            FloatEncoder::StdLowerExp => encode_std(x, buf),
            FloatEncoder::Lexical => encode_lexical(x, buf),
        }
    }

    pub fn encode_to_string<F: BenchFloat>(self, x: F) -> String {
        let mut buf = [0u8; ENCODE_BUF_LEN];
        let len = self.encode(x, &mut buf);
        String::from_utf8_lossy(&buf[..len]).into_owned()
    }
}

#[inline]
fn encode_ryu<F: BenchFloat>(x: F, buf: &mut [u8; ENCODE_BUF_LEN]) -> usize {
    let mut ryu_buf = ryu::Buffer::new();
    let text = ryu_buf.format_finite(x);
    buf[..text.len()].copy_from_slice(text.as_bytes());
    text.len()
}

#[inline]
fn encode_std<F: BenchFloat>(x: F, buf: &mut [u8; ENCODE_BUF_LEN]) -> usize {
    let mut cursor = Cursor::new(&mut buf[..]);
    // Cannot run out of room; ENCODE_BUF_LEN exceeds the longest `{:e}` output.
    let _ = write!(cursor, "{x:e}");
    cursor.position() as usize
}

#[inline]
fn encode_lexical<F: BenchFloat>(x: F, buf: &mut [u8; ENCODE_BUF_LEN]) -> usize {
    lexical_core::write_with_options::<F, SCIENTIFIC>(x, &mut buf[..], &SCIENTIFIC_OPTIONS).len()
}

fn checksum<F, E>(values: &[F], mut encode: E) -> u64
where
    F: BenchFloat,
    E: FnMut(F, &mut [u8; ENCODE_BUF_LEN]) -> usize,
{
    let mut buf = [0u8; ENCODE_BUF_LEN];
    let mut acc = 0u64;
    for &x in values {
        acc += encode(x, &mut buf) as u64;
    }
    acc
}

/// Sum of encoded lengths over `values`.
pub fn run_encoder<F: BenchFloat>(encoder: FloatEncoder, values: &[F]) -> u64 {
    match encoder {
        FloatEncoder::Ryu => checksum(values, encode_ryu),
        FloatEncoder::StdLowerExp => checksum(values, encode_std),
        FloatEncoder::Lexical => checksum(values, encode_lexical),
    }
}

/// `sample ryu=.. std=.. lexical=..` for the first value.
pub fn sample_line<F: BenchFloat>(values: &[F]) -> Option<String> {
    let x = *values.first()?;
    let mut line = String::from("sample");
    for encoder in FloatEncoder::ALL {
        line.push_str(&format!(" {}={}", encoder.name(), encoder.encode_to_string(x)));
    }
    Some(line)
}

/// Print the sample line, then time every encoder over `values`.
pub fn bench_values<F: BenchFloat>(values: &[F]) -> Vec<(FloatEncoder, u64)> {
    if let Some(line) = sample_line(values) {
        println!("{}", line);
    }

    let mut checksums = Vec::with_capacity(FloatEncoder::ALL.len());
    for encoder in FloatEncoder::ALL {
        let (acc, elapsed) = {
            let timer = ScopedTimer::new(encoder.timer_label::<F>());
            let acc = run_encoder(encoder, values);
            consume(acc);
            (acc, timer.elapsed())
        };
        info!(
            encoder = encoder.name(),
            double = F::IS_DOUBLE,
            checksum = acc,
            elapsed_ns = elapsed.as_nanos() as u64,
            "encoder finished"
        );
        checksums.push((encoder, acc));
    }
    checksums
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_positive_finite_and_seeded() {
        let a = make_random_values::<f64>(1000, SEED);
        let b = make_random_values::<f64>(1000, SEED);
        assert_eq!(a, b);
        assert!(a.iter().all(|x| x.is_finite() && *x > 0.0));

        let c = make_random_values::<f32>(1000, SEED + 1);
        assert!(c.iter().all(|x| x.is_finite() && *x > 0.0));
    }

    #[test]
    fn test_encoders_agree_on_value() {
        for x in [1.5e300_f64, 2.0, 1e-7, f64::MAX] {
            for encoder in FloatEncoder::ALL {
                let text = encoder.encode_to_string(x);
                let parsed: f64 = text.parse().unwrap();
                assert_eq!(parsed, x, "{} produced {}", encoder.name(), text);
            }
        }
    }

    #[test]
    fn test_ryu_fills_caller_buffer() {
        let mut buf = [0u8; ENCODE_BUF_LEN];
        let len = FloatEncoder::Ryu.encode(3.25e300_f64, &mut buf);
        assert_eq!(&buf[..len], b"3.25e300");
    }

    #[test]
    fn test_lexical_always_writes_exponent() {
        let mut buf = [0u8; ENCODE_BUF_LEN];
        let len = FloatEncoder::Lexical.encode(2.0_f64, &mut buf);
        assert_eq!(&buf[..len], b"2.0e0");
        let len = FloatEncoder::Lexical.encode(1234.5_f32, &mut buf);
        assert_eq!(&buf[..len], b"1.2345e3");
    }

    #[test]
    fn test_std_is_scientific() {
        let mut buf = [0u8; ENCODE_BUF_LEN];
        let len = FloatEncoder::StdLowerExp.encode(1234.5_f32, &mut buf);
        assert_eq!(&buf[..len], b"1.2345e3");
    }

    #[test]
    fn test_checksum_sums_lengths() {
        let values = [1.0e10_f64, 3.0e20];
        let expected: u64 = values
            .iter()
            .map(|x| FloatEncoder::Lexical.encode_to_string(*x).len() as u64)
            .sum();
        assert_eq!(run_encoder(FloatEncoder::Lexical, &values), expected);
    }

    #[test]
    fn test_sample_line() {
        assert_eq!(sample_line::<f64>(&[]), None);
        let line = sample_line(&[2.5e10_f64]).unwrap();
        assert!(line.starts_with("sample ryu="));
        assert!(line.contains(" std=2.5e10"));
        assert!(line.contains(" lexical="));
    }
}
