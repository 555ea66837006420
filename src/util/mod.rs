pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

pub(crate) fn make_id(prefix: &str, now_ms: i64, rand: u32) -> String {
    format!("{prefix}-{now_ms}-{rand:08x}")
}

fn random_u32() -> u32 {
    let mut buf = [0u8; 4];
    // getrandom only fails when the host has no entropy source; a zero suffix still
    // leaves the timestamp part of the id.
    let _ = getrandom::getrandom(&mut buf);
    u32::from_le_bytes(buf)
}

/// Fresh id for blocks, tasks, lists, notes and chat messages.
pub(crate) fn new_id(prefix: &str) -> String {
    make_id(prefix, now_ms(), random_u32())
}

/// Whole minutes between two timestamps, rounded down. Reversed ranges count as zero.
pub(crate) fn minutes_between(start_ms: i64, end_ms: i64) -> u32 {
    if end_ms <= start_ms {
        return 0;
    }
    ((end_ms - start_ms) / 60_000).min(u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_id_shape() {
        assert_eq!(make_id("block", 1700000000000, 0xab), "block-1700000000000-000000ab");
    }

    #[test]
    fn test_minutes_between_rounds_down() {
        assert_eq!(minutes_between(0, 59_999), 0);
        assert_eq!(minutes_between(0, 60_000), 1);
        assert_eq!(minutes_between(1_000, 1_000 + 14 * 60_000 + 30_000), 14);
    }

    #[test]
    fn test_minutes_between_reversed_is_zero() {
        assert_eq!(minutes_between(10_000, 5_000), 0);
    }
}
