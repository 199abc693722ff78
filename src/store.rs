//! Word-store policies: how a masked update lands in a storage cell.
//!
//! Every container flavor is the same storage engine bound to one of three
//! policies:
//!
//! - [`Plain`] performs a non-atomic read-modify-write on a [`Cell`].
//! - [`Atomic`] applies the update through a lock-free compare-exchange
//!   retry loop, so writers touching disjoint bit ranges of the same word
//!   never corrupt each other.
//! - [`AtomicCas`] additionally supports conditional updates
//!   (compare-and-swap at the element level) and reserves the top bit of
//!   every cell for marking updates that straddle a word boundary.
//!
//! The policies are selected statically, so the single-threaded fast path
//! compiles down to the same loads and stores a hand-written implementation
//! would use.

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::atomic::Ordering;

use crate::word::{AtomicWord, Word};

/// Storage policy of a container flavor.
///
/// A policy fixes the cell type words live in, the number of bits per cell
/// participating in the bit stream, and how a masked update is applied.
pub trait Store {
    /// Storage word type.
    type Word: Word;
    /// Storage cell holding one word.
    type Cell: Default;

    /// Bits per cell participating in the bit stream. Bits at and above
    /// this position are never read or written by the codec.
    const USED_BITS: usize;

    /// Wraps a word into a cell.
    fn new_cell(word: Self::Word) -> Self::Cell;

    /// Reads the whole cell.
    fn load(cell: &Self::Cell) -> Self::Word;

    /// Replaces the bits selected by `mask` with those of `bits`, leaving
    /// the rest of the cell untouched.
    fn masked_store(cell: &Self::Cell, mask: Self::Word, bits: Self::Word);
}

/// Marker for policies whose masked stores may run concurrently from
/// several threads on the same cell.
///
/// [`Plain`] is deliberately not one of these: its cells are [`Cell`]s,
/// which are `!Sync`, so a container bound to it cannot even be shared
/// across threads.
pub trait SharedStore: Store {}

/// Policies supporting conditional masked updates.
pub trait CasStore: SharedStore {
    /// Atomically replaces the bits selected by `mask` with those of
    /// `bits` iff they currently equal the corresponding bits of
    /// `expected`. Returns whether the swap happened.
    ///
    /// Bits outside `mask` are preserved; concurrent changes to them are
    /// retried over, while a mismatch inside `mask` aborts immediately.
    fn masked_compare_exchange(
        cell: &Self::Cell,
        mask: Self::Word,
        bits: Self::Word,
        expected: Self::Word,
    ) -> bool;
}

/// Single-threaded policy: a plain read-modify-write on a [`Cell`].
#[derive(Debug)]
pub struct Plain<W>(PhantomData<W>);

impl<W: Word> Store for Plain<W> {
    type Word = W;
    type Cell = Cell<W>;

    const USED_BITS: usize = W::BITS;

    #[inline(always)]
    fn new_cell(word: W) -> Cell<W> {
        Cell::new(word)
    }

    #[inline(always)]
    fn load(cell: &Cell<W>) -> W {
        cell.get()
    }

    #[inline(always)]
    fn masked_store(cell: &Cell<W>, mask: W, bits: W) {
        cell.set((cell.get() & !mask) | (bits & mask));
    }
}

/// Thread-safe policy: masked stores through a compare-exchange retry loop.
#[derive(Debug)]
pub struct Atomic<W>(PhantomData<W>);

impl<W: Word> Store for Atomic<W> {
    type Word = W;
    type Cell = W::Atomic;

    const USED_BITS: usize = W::BITS;

    #[inline(always)]
    fn new_cell(word: W) -> W::Atomic {
        W::Atomic::new(word)
    }

    #[inline(always)]
    fn load(cell: &W::Atomic) -> W {
        cell.load(Ordering::Relaxed)
    }

    #[inline]
    fn masked_store(cell: &W::Atomic, mask: W, bits: W) {
        atomic_masked_store(cell, mask, bits);
    }
}

impl<W: Word> SharedStore for Atomic<W> {}

/// CAS-capable policy: like [`Atomic`], but one bit short.
///
/// The top bit of every cell stays outside the bit stream
/// (`USED_BITS = W::BITS - 1`) so that an element-level compare-and-swap
/// crossing a word boundary can mark the element while its two halves are
/// updated; the bit codec runs the three-step marked protocol over it.
#[derive(Debug)]
pub struct AtomicCas<W>(PhantomData<W>);

impl<W: Word> Store for AtomicCas<W> {
    type Word = W;
    type Cell = W::Atomic;

    const USED_BITS: usize = W::BITS - 1;

    #[inline(always)]
    fn new_cell(word: W) -> W::Atomic {
        W::Atomic::new(word)
    }

    #[inline(always)]
    fn load(cell: &W::Atomic) -> W {
        cell.load(Ordering::Relaxed)
    }

    #[inline]
    fn masked_store(cell: &W::Atomic, mask: W, bits: W) {
        atomic_masked_store(cell, mask, bits);
    }
}

impl<W: Word> SharedStore for AtomicCas<W> {}

impl<W: Word> CasStore for AtomicCas<W> {
    #[inline]
    fn masked_compare_exchange(cell: &W::Atomic, mask: W, bits: W, expected: W) -> bool {
        let mut current = cell.load(Ordering::Relaxed);
        loop {
            if current & mask != expected & mask {
                return false;
            }
            let new = (current & !mask) | (bits & mask);
            match cell.compare_exchange(current, new, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return true,
                // Bits outside the mask moved; re-check and retry.
                Err(observed) => current = observed,
            }
        }
    }
}

#[inline]
fn atomic_masked_store<W: Word>(cell: &W::Atomic, mask: W, bits: W) {
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        let new = (current & !mask) | (bits & mask);
        match cell.compare_exchange(current, new, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => return,
            Err(observed) => current = observed,
        }
    }
}
