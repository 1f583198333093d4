pub mod itoa_hex;
pub mod native;
pub mod std_format;
pub mod write_macro;

use clap::ValueEnum;

use crate::harness::{BenchmarkResult, run_bench};
use crate::{BenchError, Result};

pub const RECORD_NAME: &str = "fastio";

/// Field widths; the hex widths include the `0x` prefix.
pub const ID_WIDTH: usize = 10;
pub const VAL_WIDTH: usize = 18;
pub const SCORE_WIDTH: usize = 12;
pub const RATE_WIDTH: usize = 10;
pub const NAME_WIDTH: usize = 16;
pub const NAME_FILL: u8 = b'.';

/// Every record renders to exactly this many bytes.
pub const RECORD_LEN: usize = "ID=".len()
    + ID_WIDTH
    + " VAL=".len()
    + VAL_WIDTH
    + " SCORE=".len()
    + SCORE_WIDTH
    + " RATE=".len()
    + RATE_WIDTH
    + " NAME=".len()
    + NAME_WIDTH;

const _: () = assert!(RECORD_NAME.len() <= NAME_WIDTH);

/// The pseudo-random fields every approach formats for iteration `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFields {
    pub id: u32,
    pub val: u64,
    pub score: u32,
    pub rate: u32,
    pub name: &'static str,
}

impl RecordFields {
    #[inline]
    pub fn derive(i: u32) -> Self {
        let id = i.wrapping_mul(2_654_435_761).wrapping_add(0x9e37_79b9);
        let val = 0xDEAD_BEEF_CAFE_BABE_u64 ^ u64::from(id).wrapping_mul(1_315_423_911);
        let score = id % 10007 + 3141;
        let rate = score / (id % 97 + 1);
        Self {
            id,
            val,
            score,
            rate,
            name: RECORD_NAME,
        }
    }
}

/// Formatting implementations compared by the record benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Approach {
    /// Hand-written fixed-layout writer, no allocation
    Native,
    /// One `format!` call
    StdFormat,
    /// `itoa` decimals and `hex` digits assembled in a `BytesMut`
    ItoaHex,
    /// Field-by-field `write!` with runtime widths
    WriteMacro,
}

impl Approach {
    pub const ALL: [Approach; 4] = [
        Approach::Native,
        Approach::StdFormat,
        Approach::ItoaHex,
        Approach::WriteMacro,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Approach::Native => "native",
            Approach::StdFormat => "std-format",
            Approach::ItoaHex => "itoa-hex",
            Approach::WriteMacro => "write-macro",
        }
    }

    /// Render record `i` as an owned string, for samples and cross-checks.
    pub fn render(self, i: u32) -> String {
        match self {
            Approach::Native => native::make_record(i).as_str().to_owned(),
            Approach::StdFormat => std_format::make_record(i),
            Approach::ItoaHex => String::from_utf8_lossy(&itoa_hex::make_record(i)).into_owned(),
            Approach::WriteMacro => write_macro::make_record(i),
        }
    }

    /// Run the timing harness over this approach's record function.
    ///
    /// Each arm hands the harness the concrete function so the call is
    /// monomorphized instead of going through the `match` per iteration.
    pub fn bench(self, iterations: u32, rounds: u32) -> BenchmarkResult {
        match self {
            Approach::Native => run_bench(native::make_record, iterations, rounds),
            Approach::StdFormat => run_bench(std_format::make_record, iterations, rounds),
            Approach::ItoaHex => run_bench(itoa_hex::make_record, iterations, rounds),
            Approach::WriteMacro => run_bench(write_macro::make_record, iterations, rounds),
        }
    }
}

/// Check that every approach renders the same bytes as the first one for the given indices.
pub fn cross_check<I>(approaches: &[Approach], indices: I) -> Result<()>
where
    I: IntoIterator<Item = u32>,
{
    let Some((reference, rest)) = approaches.split_first() else {
        return Ok(());
    };
    for index in indices {
        let expected = reference.render(index);
        for approach in rest {
            let actual = approach.render(index);
            if actual != expected {
                return Err(BenchError::RecordMismatch {
                    approach: approach.label(),
                    index,
                    expected,
                    actual,
                });
            }
        }
    }
    Ok(())
}
