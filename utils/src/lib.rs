//! Shared utilities for the harvester workspace.

use alloy::primitives::U256;

/// Converts a U256 value to f64, accounting for token decimals.
///
/// Values larger than `u128::MAX` saturate; this is acceptable for f64 precision.
pub fn u256_to_f64(value: U256, decimals: u32) -> f64 {
    let value_u128 = value.saturating_to::<u128>();
    let divisor = 10_u128.pow(decimals);
    let whole_part = value_u128 / divisor;
    let fractional_part = value_u128 % divisor;
    whole_part as f64 + (fractional_part as f64 / divisor as f64)
}

/// Splits `items` into contiguous groups of at most `size` elements.
///
/// Every group but the last holds exactly `size` items; order is preserved.
/// An empty slice yields no groups. Returns `None` when `size` is zero.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Option<Vec<Vec<T>>> {
    if size == 0 {
        return None;
    }
    Some(items.chunks(size).map(|group| group.to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_keeps_order_and_sizes() {
        let items: Vec<u32> = (0..12).collect();
        let groups = chunk(&items, 5).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(groups[1], vec![5, 6, 7, 8, 9]);
        assert_eq!(groups[2], vec![10, 11]);
        assert_eq!(groups.concat(), items);
    }

    #[test]
    fn chunk_exact_multiple_has_full_last_group() {
        let items = vec!['a', 'b', 'c', 'd'];
        let groups = chunk(&items, 2).unwrap();
        assert_eq!(groups, vec![vec!['a', 'b'], vec!['c', 'd']]);
    }

    #[test]
    fn chunk_empty_input_yields_no_groups() {
        let items: Vec<u8> = Vec::new();
        assert!(chunk(&items, 3).unwrap().is_empty());
    }

    #[test]
    fn chunk_rejects_zero_size() {
        assert!(chunk(&[1, 2, 3], 0).is_none());
    }

    #[test]
    fn u256_to_f64_scales_by_decimals() {
        let one_and_half_ether = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(u256_to_f64(one_and_half_ether, 18), 1.5);
        assert_eq!(u256_to_f64(U256::ZERO, 18), 0.0);
    }

    #[test]
    fn u256_to_f64_saturates_above_u128() {
        let expected = u128::MAX as f64 / 1e18;
        let value = u256_to_f64(U256::MAX, 18);
        assert!(((value - expected) / expected).abs() < 1e-12);
    }
}
