//! Capacity planning: the fixed prime table and load-factor arithmetic.
//!
//! The bucket array length is always drawn from [`CAPACITY_PRIMES`]. Growth
//! is capped at the largest tabulated entry; demand beyond it is silently
//! clamped rather than extrapolated.

/// Ordered table of permissible bucket-array capacities.
pub(crate) const CAPACITY_PRIMES: [usize; 15] = [
    53, 97, 193, 389, 769, 1_543, 3_079, 6_151, 12_289, 24_593, 49_157, 65_521, 90_001, 120_071,
    131_071,
];

/// Largest tabulated capacity; growth never exceeds it.
pub(crate) const MAX_CAPACITY: usize = 131_071;

/// Load-factor numerator: tables hold at most 3/4 of their buckets.
const LOAD_FACTOR_NUMERATOR: usize = 3;

/// Load-factor denominator of the 3/4 threshold.
const LOAD_FACTOR_DENOMINATOR: usize = 4;

/// Returns the smallest tabulated capacity `>= ideal`, or the table maximum
/// when `ideal` exceeds every entry.
pub(crate) fn prime_capacity_for(ideal: usize) -> usize {
    CAPACITY_PRIMES.iter().copied().find(|&prime| prime >= ideal).unwrap_or(MAX_CAPACITY)
}

/// Bucket count needed to hold `distinct_keys` entries while staying under
/// the load factor: `ceil(distinct_keys / 0.75)` in integer arithmetic.
pub(crate) fn ideal_capacity(distinct_keys: usize) -> usize {
    distinct_keys.saturating_mul(LOAD_FACTOR_DENOMINATOR).div_ceil(LOAD_FACTOR_NUMERATOR)
}

/// Whether a table holding `size` of `capacity` buckets has reached the
/// resize threshold: `size >= capacity * 0.75` in integer arithmetic.
pub(crate) fn reaches_load_limit(size: usize, capacity: usize) -> bool {
    size.saturating_mul(LOAD_FACTOR_DENOMINATOR) >= capacity.saturating_mul(LOAD_FACTOR_NUMERATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_smallest_prime_at_or_above_ideal() {
        assert_eq!(prime_capacity_for(0), 53);
        assert_eq!(prime_capacity_for(1), 53);
        assert_eq!(prime_capacity_for(53), 53);
        assert_eq!(prime_capacity_for(54), 97);
        assert_eq!(prime_capacity_for(100_000), 120_071);
        assert_eq!(prime_capacity_for(131_071), 131_071);
    }

    #[test]
    fn caps_at_largest_tabulated_prime() {
        assert_eq!(prime_capacity_for(131_072), MAX_CAPACITY);
        assert_eq!(prime_capacity_for(usize::MAX), MAX_CAPACITY);
    }

    #[test]
    fn ideal_capacity_rounds_up() {
        assert_eq!(ideal_capacity(0), 0);
        // ceil(1 / 0.75) = 2
        assert_eq!(ideal_capacity(1), 2);
        assert_eq!(ideal_capacity(3), 4);
        assert_eq!(ideal_capacity(40), 54);
        assert_eq!(ideal_capacity(100), 134);
    }

    #[test]
    fn load_limit_matches_three_quarters() {
        // 53 * 0.75 = 39.75, so 40 is the first size that triggers.
        assert!(!reaches_load_limit(39, 53));
        assert!(reaches_load_limit(40, 53));
        // 97 * 0.75 = 72.75.
        assert!(!reaches_load_limit(72, 97));
        assert!(reaches_load_limit(73, 97));
        assert!(reaches_load_limit(0, 0));
    }

    #[test]
    fn prime_table_is_strictly_increasing() {
        for pair in CAPACITY_PRIMES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(CAPACITY_PRIMES.last(), Some(&MAX_CAPACITY));
    }
}
