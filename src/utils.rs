//! Small width-arithmetic helpers.

use crate::error::{Error, Result};

/// Returns the minimum element width able to hold every value in
/// `[0, bound)`.
///
/// # Examples
///
/// ```
/// assert_eq!(tamp::utils::required_bits(1024), 10);
/// assert_eq!(tamp::utils::required_bits(1025), 11);
/// ```
pub fn required_bits(bound: usize) -> usize {
    if bound <= 1 {
        return 0;
    }
    let floor = usize::BITS as usize - 1 - bound.leading_zeros() as usize;
    floor + usize::from(bound > 1 << floor)
}

/// Returns the minimum element width able to hold every two's-complement
/// value in `[-bound, bound)`.
///
/// # Examples
///
/// ```
/// assert_eq!(tamp::utils::required_bits_signed(1024), 11);
/// assert_eq!(tamp::utils::required_bits_signed(1025), 12);
/// ```
pub fn required_bits_signed(bound: usize) -> usize {
    required_bits(bound) + 1
}

/// Returns the number of storage cells backing `len` elements of `width`
/// bits in a stream of `used_bits` bits per cell.
pub(crate) fn words_for(len: usize, width: usize, used_bits: usize) -> Result<usize> {
    let total_bits = len
        .checked_mul(width)
        .ok_or_else(|| Error::invalid_argument("len * width overflowed"))?;
    Ok(total_bits.div_ceil(used_bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_bits_around_powers_of_two() {
        for i in 1..usize::BITS as usize - 1 {
            let s = 1usize << i;
            assert_eq!(required_bits(s), i);
            assert_eq!(required_bits_signed(s), i + 1);
            assert_eq!(required_bits(s + 1), i + 1);
            assert_eq!(required_bits_signed(s + 1), i + 2);
        }
    }

    #[test]
    fn required_bits_known_values() {
        assert_eq!(required_bits(1024), 10);
        assert_eq!(required_bits_signed(1024), 11);
        assert_eq!(required_bits(1025), 11);
        assert_eq!(required_bits_signed(1025), 12);
    }

    #[test]
    fn words_for_rounds_up() {
        assert_eq!(words_for(0, 3, 64).unwrap(), 0);
        assert_eq!(words_for(21, 3, 64).unwrap(), 1);
        assert_eq!(words_for(22, 3, 64).unwrap(), 2);
        assert_eq!(words_for(21, 3, 63).unwrap(), 1);
        assert!(words_for(usize::MAX, 3, 64).is_err());
    }
}
