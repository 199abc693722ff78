//! Packed vectors whose element width is fixed by the type.
//!
//! The dynamic flavors choose the width at construction; here it is a
//! const parameter, so constructors drop the width argument and the width
//! is available as [`StaticVector::static_width`]. Everything else is the
//! dynamic core, reached through `Deref`.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::alloc::{Global, WordAlloc};
use crate::error::Result;
use crate::store::{Plain, Store};
use crate::vector::Vector;
use crate::word::Int;

/// Single-threaded packed vector with a type-level width.
pub type StaticPackedVec<T, const B: usize, W = u64, A = Global> =
    StaticVector<T, B, Plain<W>, A>;

/// Packed vector of 48-bit elements.
///
/// The width suits sequence offsets and suffix-array style indices: a
/// quarter smaller than a `Vec<u64>` while covering positions up to
/// $`2^{48}`$ (or $`\pm 2^{47}`$ signed).
pub type Packed48<T> = StaticPackedVec<T, 48>;

/// Packed vector whose width is a const parameter, generic over store
/// policy and allocator. Use through [`StaticPackedVec`] or [`Packed48`].
pub struct StaticVector<T, const B: usize, S: Store, A: WordAlloc<S::Cell> = Global> {
    inner: Vector<T, S, A>,
}

impl<T, const B: usize, S, A> StaticVector<T, B, S, A>
where
    T: Int<S::Word>,
    S: Store,
    A: WordAlloc<S::Cell>,
{
    /// Returns the type-level element width in bits.
    pub const fn static_width() -> usize {
        B
    }

    /// Creates an empty vector using the provided allocator.
    ///
    /// # Errors
    ///
    /// An error is returned if `B` is not in `1..=U` or the element type
    /// does not fit in the word type.
    pub fn new_in(alloc: A) -> Result<Self> {
        Ok(Self {
            inner: Vector::new_in(B, alloc)?,
        })
    }

    /// Creates a vector of `len` zero elements using the provided
    /// allocator.
    pub fn with_len_in(len: usize, alloc: A) -> Result<Self> {
        Ok(Self {
            inner: Vector::with_len_in(B, len, alloc)?,
        })
    }
}

impl<T, const B: usize, S, A> StaticVector<T, B, S, A>
where
    T: Int<S::Word>,
    S: Store,
    A: WordAlloc<S::Cell> + Default,
{
    /// Creates an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use tamp::Packed48;
    ///
    /// let mut v = Packed48::<i64>::new()?;
    /// v.push(-(1 << 46))?;
    /// assert_eq!(v.get(0), Some(-(1 << 46)));
    /// assert_eq!(Packed48::<i64>::static_width(), 48);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        Self::new_in(A::default())
    }

    /// Creates a vector of `len` zero elements.
    pub fn with_len(len: usize) -> Result<Self> {
        Self::with_len_in(len, A::default())
    }

    /// Creates a vector of `len` copies of `value`.
    pub fn from_elem(value: T, len: usize) -> Result<Self> {
        Ok(Self {
            inner: Vector::from_elem(value, len, B)?,
        })
    }

    /// Creates a vector from a slice.
    pub fn from_slice(vals: &[T]) -> Result<Self> {
        let mut v = Self::new()?;
        for x in vals {
            v.push(*x)?;
        }
        Ok(v)
    }
}

impl<T, const B: usize, S: Store, A: WordAlloc<S::Cell>> Deref for StaticVector<T, B, S, A> {
    type Target = Vector<T, S, A>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T, const B: usize, S: Store, A: WordAlloc<S::Cell>> DerefMut for StaticVector<T, B, S, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T, const B: usize, S, A> Clone for StaticVector<T, B, S, A>
where
    T: Int<S::Word>,
    S: Store,
    A: WordAlloc<S::Cell> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, const B: usize, S, A> PartialEq for StaticVector<T, B, S, A>
where
    T: Int<S::Word>,
    S: Store,
    A: WordAlloc<S::Cell>,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T, const B: usize, S, A> Eq for StaticVector<T, B, S, A>
where
    T: Int<S::Word>,
    S: Store,
    A: WordAlloc<S::Cell>,
{
}

impl<T, const B: usize, S, A> fmt::Debug for StaticVector<T, B, S, A>
where
    T: Int<S::Word>,
    S: Store,
    A: WordAlloc<S::Cell>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
