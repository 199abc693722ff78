//! Free algorithms over packed ranges.

use std::cmp::Ordering;

use num_traits::PrimInt;

use crate::codec;
use crate::cursor::Cursor;
use crate::store::Store;
use crate::word::{Int, Word};

/// Compares two packed ranges lexicographically under the element order.
///
/// Instead of decoding one element at a time, each step loads the largest
/// whole-element block a cell can hold (`(U / width) · width` bits) from
/// both sides. Only when a block differs is any element decoded: elements
/// sit at increasing bit offsets, so the lowest differing bit of the XOR
/// locates the first differing element, which is then decoded sign-aware
/// and compared as `T`. Equal prefixes compare by length.
///
/// Both cursors must have the same width. The ranges must hold at least
/// `len_a` and `len_b` elements respectively.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::cmp::Ordering;
/// use tamp::{algorithm::lexicographic_cmp, PackedVec};
///
/// let mut a = PackedVec::<u32>::from_slice(&[1, 2, 3])?;
/// let mut b = PackedVec::<u32>::from_slice(&[1, 2, 4])?;
/// let ord = lexicographic_cmp(a.cursor_mut(), 3, b.cursor_mut(), 3);
/// assert_eq!(ord, Ordering::Less);
/// # Ok(())
/// # }
/// ```
pub fn lexicographic_cmp<T, S>(
    mut lhs: Cursor<'_, T, S>,
    len_a: usize,
    mut rhs: Cursor<'_, T, S>,
    len_b: usize,
) -> Ordering
where
    T: Int<S::Word>,
    S: Store,
{
    let width = lhs.width();
    debug_assert_eq!(width, rhs.width());
    let elems_per_cell = S::USED_BITS / width;
    let chunk_bits = elems_per_cell * width;

    let mut left = len_a.min(len_b) * width;
    while left > chunk_bits {
        let a = lhs.get_bits(chunk_bits);
        let b = rhs.get_bits(chunk_bits);
        if a != b {
            return first_differing_element::<T, S::Word>(a, b, width);
        }
        left -= chunk_bits;
        lhs.advance(elems_per_cell as isize);
        rhs.advance(elems_per_cell as isize);
    }
    if left > 0 {
        let a = lhs.get_bits(left);
        let b = rhs.get_bits(left);
        if a != b {
            return first_differing_element::<T, S::Word>(a, b, width);
        }
    }
    len_a.cmp(&len_b)
}

/// Compares the first differing element of two unequal blocks.
fn first_differing_element<T, W>(a: W, b: W, width: usize) -> Ordering
where
    T: Int<W>,
    W: Word,
{
    let diff = a ^ b;
    let shift = diff.trailing_zeros() as usize / width * width;
    let mask = W::low_mask(width);
    let x = T::from_word(codec::sign_extend((a >> shift) & mask, width, T::SIGNED));
    let y = T::from_word(codec::sign_extend((b >> shift) & mask, width, T::SIGNED));
    x.cmp(&y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{CasPackedVec, PackedVec};

    fn cmp_packed(a: &[u32], b: &[u32], width: usize) -> Ordering {
        let mut va = PackedVec::<u32>::new(width).unwrap();
        let mut vb = PackedVec::<u32>::new(width).unwrap();
        va.assign_iter(a.iter().copied()).unwrap();
        vb.assign_iter(b.iter().copied()).unwrap();
        let (la, lb) = (va.len(), vb.len());
        lexicographic_cmp(va.cursor_mut(), la, vb.cursor_mut(), lb)
    }

    #[test]
    fn empty_and_prefix_rules() {
        assert_eq!(cmp_packed(&[], &[], 3), Ordering::Equal);
        assert_eq!(cmp_packed(&[], &[1], 3), Ordering::Less);
        assert_eq!(cmp_packed(&[1, 2], &[1, 2, 0], 3), Ordering::Less);
        assert_eq!(cmp_packed(&[1, 2, 0], &[1, 2], 3), Ordering::Greater);
    }

    #[test]
    fn first_element_dominates() {
        assert_eq!(cmp_packed(&[2, 0, 0], &[1, 7, 7], 3), Ordering::Greater);
        assert_eq!(cmp_packed(&[1, 7, 7], &[2, 0, 0], 3), Ordering::Less);
    }

    #[test]
    fn difference_beyond_first_cell() {
        // Width 3 over 64-bit words: 21 elements per cell.
        let mut a = vec![5u32; 50];
        let mut b = vec![5u32; 50];
        a[40] = 1;
        b[40] = 2;
        assert_eq!(cmp_packed(&a, &b, 3), Ordering::Less);
        assert_eq!(cmp_packed(&b, &a, 3), Ordering::Greater);
    }

    #[test]
    fn difference_in_tail_block() {
        let mut a = vec![3u32; 23];
        let mut b = vec![3u32; 23];
        a[22] = 0;
        b[22] = 7;
        assert_eq!(cmp_packed(&a, &b, 3), Ordering::Less);
    }

    #[test]
    fn agrees_with_slice_order_on_random_data() {
        use rand::prelude::*;
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let la = rng.gen_range(0..30);
            let lb = rng.gen_range(0..30);
            let a: Vec<u32> = (0..la).map(|_| rng.gen_range(0..32)).collect();
            let b: Vec<u32> = (0..lb).map(|_| rng.gen_range(0..32)).collect();
            assert_eq!(cmp_packed(&a, &b, 5), a.cmp(&b));
        }
    }

    #[test]
    fn signed_elements_compare_by_value() {
        let mut va = PackedVec::<i32>::from_slice(&[-1, 5]).unwrap();
        let mut vb = PackedVec::<i32>::from_slice(&[1, 5]).unwrap();
        // Raw-bit comparison would call -1 (all ones) the larger one.
        assert_eq!(
            lexicographic_cmp(va.cursor_mut(), 2, vb.cursor_mut(), 2),
            Ordering::Less
        );
    }

    #[test]
    fn works_with_reduced_used_bits() {
        let a = CasPackedVec::<u32>::from_slice(&[9, 9, 9, 1]).unwrap();
        let b = CasPackedVec::<u32>::from_slice(&[9, 9, 9, 2]).unwrap();
        assert_eq!(
            lexicographic_cmp(a.cursor(), 4, b.cursor(), 4),
            Ordering::Less
        );
    }
}
