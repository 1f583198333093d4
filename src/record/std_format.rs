use super::RecordFields;

/// One `format!` call with the whole layout in the format string.
pub fn make_record(i: u32) -> String {
    let RecordFields {
        id,
        val,
        score,
        rate,
        name,
    } = RecordFields::derive(i);
    format!("ID={id:#010X} VAL={val:#018X} SCORE={score:>12} RATE={rate:>10} NAME={name:.<16}")
}
