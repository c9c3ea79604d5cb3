//! Timestamp arithmetic for history records.

/// Nanoseconds elapsed between `then` and `now`.
///
/// The clock is 64-bit and may have wrapped once between the two readings.
#[inline]
pub const fn age_ns(then: u64, now: u64) -> u64 {
    if now >= then {
        now - then
    } else {
        // clock has wrapped
        (u64::MAX - then) + now + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_without_wrap() {
        assert_eq!(age_ns(100, 250), 150);
        assert_eq!(age_ns(7, 7), 0);
    }

    #[test]
    fn test_age_across_wrap() {
        let then = u64::MAX - 9;
        assert_eq!(age_ns(then, 5), (u64::MAX - then) + 5 + 1);
        assert_eq!(age_ns(then, 5), 15);
        assert_eq!(age_ns(u64::MAX, 0), 1);
    }

    #[test]
    fn test_age_monotonic_through_wrap() {
        let then = u64::MAX - 100;
        let readings = [u64::MAX - 100, u64::MAX - 1, u64::MAX, 0, 1, 500];

        let ages: [u64; 6] = readings.map(|now| age_ns(then, now));
        assert!(ages.windows(2).all(|w| w[0] <= w[1]));
    }
}
