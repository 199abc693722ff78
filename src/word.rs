//! Machine-word and element abstractions shared by every container flavor.
//!
//! A container stores a virtual stream of fixed-width elements inside an
//! array of [`Word`]s. The element type is any primitive integer
//! implementing [`Int`]; casts between the two follow two's-complement
//! rules, so writes truncate and reads sign-extend exactly like an `as`
//! cast chain.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{
    AtomicU16, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

use num_traits::PrimInt;

/// Unsigned machine word usable as the storage unit of a bit stream.
pub trait Word: PrimInt + Hash + Debug + Default + Send + Sync + 'static {
    /// Number of bits in the word.
    const BITS: usize;
    /// The all-zeros word.
    const ZERO: Self;
    /// The word with only the lowest bit set.
    const ONE: Self;
    /// The all-ones word.
    const MAX: Self;

    /// Atomic counterpart used by the shared store policies.
    type Atomic: AtomicWord<Self>;

    /// Returns a word with the lowest `n` bits set, for `n <= Self::BITS`.
    #[inline(always)]
    fn low_mask(n: usize) -> Self {
        if n == 0 {
            Self::ZERO
        } else {
            Self::MAX >> (Self::BITS - n)
        }
    }
}

/// Atomic counterpart of a [`Word`], exposing the handful of operations
/// the shared store policies need.
pub trait AtomicWord<W>: Default + Send + Sync + 'static {
    /// Wraps a word.
    fn new(value: W) -> Self;

    /// Loads the word.
    fn load(&self, order: Ordering) -> W;

    /// Stores the word.
    fn store(&self, value: W, order: Ordering);

    /// Hardware compare-and-swap; on failure the observed word is returned
    /// in the `Err` variant.
    fn compare_exchange(
        &self,
        current: W,
        new: W,
        success: Ordering,
        failure: Ordering,
    ) -> std::result::Result<W, W>;
}

macro_rules! impl_word {
    ($($w:ty => $a:ty),* $(,)?) => {$(
        impl Word for $w {
            const BITS: usize = <$w>::BITS as usize;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$w>::MAX;
            type Atomic = $a;
        }

        impl AtomicWord<$w> for $a {
            #[inline(always)]
            fn new(value: $w) -> Self {
                <$a>::new(value)
            }

            #[inline(always)]
            fn load(&self, order: Ordering) -> $w {
                <$a>::load(self, order)
            }

            #[inline(always)]
            fn store(&self, value: $w, order: Ordering) {
                <$a>::store(self, value, order)
            }

            #[inline(always)]
            fn compare_exchange(
                &self,
                current: $w,
                new: $w,
                success: Ordering,
                failure: Ordering,
            ) -> std::result::Result<$w, $w> {
                <$a>::compare_exchange(self, current, new, success, failure)
            }
        }
    )*};
}

impl_word!(
    u8 => AtomicU8,
    u16 => AtomicU16,
    u32 => AtomicU32,
    u64 => AtomicU64,
    usize => AtomicUsize,
);

/// Primitive integer storable as a packed element inside words of type `W`.
///
/// The casts are plain `as` conversions: [`Int::to_word`] sign-extends
/// signed values into the word, and [`Int::from_word`] keeps the low bits.
/// The codec masks everything to the element width, so out-of-range values
/// are truncated in two's complement on write.
pub trait Int<W: Word>: Copy + Eq + Ord + Debug + Send + Sync + 'static {
    /// Number of bits in the element type itself.
    const BITS: usize;
    /// Whether the element type is signed.
    const SIGNED: bool;

    /// Casts into a storage word (sign-extending for signed types).
    fn to_word(self) -> W;

    /// Casts back from a storage word, keeping the low bits.
    fn from_word(word: W) -> Self;

    /// Widens into `i128`, which holds every supported element exactly.
    fn to_i128(self) -> i128;

    /// Narrows from `i128`, or [`None`] when the value does not fit.
    fn from_i128(value: i128) -> Option<Self>;
}

macro_rules! impl_int_for_word {
    ($w:ty; $($t:ty),* $(,)?) => {$(
        impl Int<$w> for $t {
            const BITS: usize = <$t>::BITS as usize;
            const SIGNED: bool = <$t>::MIN != 0;

            #[inline(always)]
            fn to_word(self) -> $w {
                self as $w
            }

            #[inline(always)]
            fn from_word(word: $w) -> Self {
                word as $t
            }

            #[inline(always)]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline(always)]
            fn from_i128(value: i128) -> Option<Self> {
                <$t>::try_from(value).ok()
            }
        }
    )*};
}

impl_int_for_word!(u8; u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
impl_int_for_word!(u16; u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
impl_int_for_word!(u32; u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
impl_int_for_word!(u64; u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
impl_int_for_word!(usize; u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
