//! Packed `date`, `time` and `datetime` conversions.

/// Unsigned value of `bits` bits starting at `offset` (0 = least significant).
pub fn extract_bits(value: u64, bits: u32, offset: u32) -> u64 {
    let shifted = value.checked_shr(offset).unwrap_or(0);
    if bits >= 64 {
        shifted
    } else {
        shifted & ((1u64 << bits) - 1)
    }
}

/// Bit-packed 24-bit date: year in the top 15 bits, then month (4), day (5).
pub fn format_date(packed: u32) -> String {
    let packed = u64::from(packed);
    let year = extract_bits(packed, 15, 9);
    let month = extract_bits(packed, 4, 5);
    let day = extract_bits(packed, 5, 0);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Decimal-packed `HHMMSS`.
pub fn format_time(packed: u64) -> String {
    let hours = packed / 10_000;
    let minutes = (packed % 10_000) / 100;
    let seconds = packed % 100;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Decimal-packed `YYYYMMDDHHMMSS`.
pub fn format_datetime(packed: u64) -> String {
    let date = packed / 1_000_000;
    let time = packed % 1_000_000;
    let year = date / 10_000;
    let month = (date % 10_000) / 100;
    let day = date % 100;
    format!("{year:04}-{month:02}-{day:02} {}", format_time(time))
}
