//! Fixed-layout record writer.
//!
//! Every field has a known width, so the whole record is written into a
//! stack array with no allocation and no width negotiation at runtime.

use crate::harness::OutputLen;

use super::{
    ID_WIDTH, NAME_FILL, NAME_WIDTH, RATE_WIDTH, RECORD_LEN, RecordFields, SCORE_WIDTH, VAL_WIDTH,
};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

const DIGIT_PAIRS: [u8; 200] = {
    let mut table = [0u8; 200];
    let mut n = 0;
    while n < 100 {
        table[n * 2] = b'0' + (n / 10) as u8;
        table[n * 2 + 1] = b'0' + (n % 10) as u8;
        n += 1;
    }
    table
};

/// A rendered record held inline.
#[derive(Clone, Copy)]
pub struct RecordBuf {
    bytes: [u8; RECORD_LEN],
}

impl RecordBuf {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written.
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

impl std::fmt::Debug for RecordBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RecordBuf").field(&self.as_str()).finish()
    }
}

impl AsRef<[u8]> for RecordBuf {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl OutputLen for RecordBuf {
    fn output_len(&self) -> usize {
        RECORD_LEN
    }
}

struct FieldWriter<'a> {
    buf: &'a mut [u8; RECORD_LEN],
    pos: usize,
}

impl FieldWriter<'_> {
    #[inline]
    fn literal(&mut self, s: &[u8]) {
        self.buf[self.pos..self.pos + s.len()].copy_from_slice(s);
        self.pos += s.len();
    }

    /// `0x` followed by exactly `width - 2` uppercase hex digits of `value`.
    #[inline]
    fn hex0x(&mut self, value: u64, width: usize) {
        let digits = width - 2;
        self.literal(b"0x");
        let field = &mut self.buf[self.pos..self.pos + digits];
        for (k, slot) in field.iter_mut().enumerate() {
            let shift = (digits - 1 - k) * 4;
            *slot = HEX_UPPER[((value >> shift) & 0xF) as usize];
        }
        self.pos += digits;
    }

    /// Decimal `value` right-aligned in `width` columns, space filled.
    /// `width` must be at least 10, the digit count of `u32::MAX`.
    #[inline]
    fn right_aligned(&mut self, mut value: u32, width: usize) {
        let field = &mut self.buf[self.pos..self.pos + width];
        let mut end = width;
        while value >= 100 {
            let pair = (value % 100) as usize * 2;
            value /= 100;
            end -= 2;
            field[end..end + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
        }
        if value >= 10 {
            let pair = value as usize * 2;
            end -= 2;
            field[end..end + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
        } else {
            end -= 1;
            field[end] = b'0' + value as u8;
        }
        field[..end].fill(b' ');
        self.pos += width;
    }

    #[inline]
    fn left_filled(&mut self, s: &[u8], width: usize, fill: u8) {
        let field = &mut self.buf[self.pos..self.pos + width];
        field[..s.len()].copy_from_slice(s);
        field[s.len()..].fill(fill);
        self.pos += width;
    }
}

pub fn make_record(i: u32) -> RecordBuf {
    let fields = RecordFields::derive(i);
    let mut bytes = [0u8; RECORD_LEN];
    let mut w = FieldWriter {
        buf: &mut bytes,
        pos: 0,
    };
    w.literal(b"ID=");
    w.hex0x(u64::from(fields.id), ID_WIDTH);
    w.literal(b" VAL=");
    w.hex0x(fields.val, VAL_WIDTH);
    w.literal(b" SCORE=");
    w.right_aligned(fields.score, SCORE_WIDTH);
    w.literal(b" RATE=");
    w.right_aligned(fields.rate, RATE_WIDTH);
    w.literal(b" NAME=");
    w.left_filled(fields.name.as_bytes(), NAME_WIDTH, NAME_FILL);
    debug_assert_eq!(w.pos, RECORD_LEN);
    RecordBuf { bytes }
}
