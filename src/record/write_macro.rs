//! Stream-style rendering: each field is written separately with its width
//! and fill supplied at runtime, the way manipulator-based output streams work.

use std::fmt::Write;

use super::{ID_WIDTH, NAME_WIDTH, RATE_WIDTH, RECORD_LEN, RecordFields, SCORE_WIDTH, VAL_WIDTH};

pub fn make_record(i: u32) -> String {
    let fields = RecordFields::derive(i);
    let mut out = String::with_capacity(RECORD_LEN);
    // Writing into a String cannot fail.
    let _ = write_fields(&mut out, &fields);
    out
}

fn write_fields(out: &mut String, f: &RecordFields) -> std::fmt::Result {
    write!(out, "ID={:#0width$X}", f.id, width = ID_WIDTH)?;
    write!(out, " VAL={:#0width$X}", f.val, width = VAL_WIDTH)?;
    write!(out, " SCORE={:>width$}", f.score, width = SCORE_WIDTH)?;
    write!(out, " RATE={:>width$}", f.rate, width = RATE_WIDTH)?;
    write!(out, " NAME={:.<width$}", f.name, width = NAME_WIDTH)
}
