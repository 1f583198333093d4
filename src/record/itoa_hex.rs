use bytes::{BufMut, BytesMut};

use super::{NAME_FILL, NAME_WIDTH, RATE_WIDTH, RECORD_LEN, RecordFields, SCORE_WIDTH};

/// Record assembled from `itoa` decimal buffers and `hex` digit encoding.
pub fn make_record(i: u32) -> BytesMut {
    let fields = RecordFields::derive(i);
    let mut out = BytesMut::with_capacity(RECORD_LEN);
    let mut itoa_buf = itoa::Buffer::new();

    out.put_slice(b"ID=0x");
    put_hex_upper(&mut out, fields.id.to_be_bytes());
    out.put_slice(b" VAL=0x");
    put_hex_upper(&mut out, fields.val.to_be_bytes());
    out.put_slice(b" SCORE=");
    put_right_aligned(&mut out, itoa_buf.format(fields.score), SCORE_WIDTH);
    out.put_slice(b" RATE=");
    put_right_aligned(&mut out, itoa_buf.format(fields.rate), RATE_WIDTH);
    out.put_slice(b" NAME=");
    out.put_slice(fields.name.as_bytes());
    out.put_bytes(NAME_FILL, NAME_WIDTH.saturating_sub(fields.name.len()));
    out
}

/// Big-endian bytes as uppercase hex, two digits per byte, so leading zeros are kept.
fn put_hex_upper<const N: usize>(out: &mut BytesMut, bytes: [u8; N]) {
    let mut digits = [0u8; 16];
    let digits = &mut digits[..N * 2];
    // The slice is always exactly twice the input length.
    if hex::encode_to_slice(bytes, digits).is_ok() {
        digits.make_ascii_uppercase();
        out.put_slice(digits);
    }
}

fn put_right_aligned(out: &mut BytesMut, digits: &str, width: usize) {
    out.put_bytes(b' ', width.saturating_sub(digits.len()));
    out.put_slice(digits.as_bytes());
}
