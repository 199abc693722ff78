//! Allocation collaborators for the word buffer.
//!
//! A container obtains its cell buffer from a [`WordAlloc`] and releases
//! it there. The collaborator has exactly two operations; growth is
//! allocate-copy-deallocate, never reallocation in place.

use std::thread;

use crate::error::{Error, Result};

/// Bytes per page assumed by the first-touch allocator.
const PAGE_SIZE: usize = 4096;

/// Allocator collaborator: obtains and releases contiguous cell buffers.
pub trait WordAlloc<C> {
    /// Produces a buffer of `len` cells, every cell default-initialized.
    fn allocate(&self, len: usize) -> Result<Box<[C]>>;

    /// Releases a buffer previously produced by [`WordAlloc::allocate`].
    fn deallocate(&self, buf: Box<[C]>) {
        drop(buf);
    }
}

/// Default allocator: zeroed buffers from the global heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl<C: Default> WordAlloc<C> for Global {
    fn allocate(&self, len: usize) -> Result<Box<[C]>> {
        Ok((0..len).map(|_| C::default()).collect())
    }
}

/// Allocator that initializes the buffer from one short-lived thread per
/// page-aligned chunk.
///
/// On systems with a first-touch page policy, the physical page backing a
/// virtual page is bound to the NUMA node of the thread that first writes
/// it. Writing each chunk from its own thread therefore spreads the buffer
/// across the nodes the OS schedules those threads on. The helper threads
/// are joined before [`WordAlloc::allocate`] returns.
#[derive(Debug, Clone, Copy)]
pub struct FirstTouch {
    threads: usize,
}

impl FirstTouch {
    /// Creates an allocator spreading initialization over `threads`
    /// threads.
    ///
    /// # Errors
    ///
    /// An error is returned if `threads` is zero.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::invalid_argument(
                "threads must be nonzero for first-touch allocation.",
            ));
        }
        Ok(Self { threads })
    }

    /// Creates an allocator with one thread per available CPU.
    pub fn with_available_parallelism() -> Self {
        let threads = thread::available_parallelism().map_or(1, |n| n.get());
        Self { threads }
    }
}

struct ChunkPtr<C>(*mut C);

impl<C> Clone for ChunkPtr<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ChunkPtr<C> {}

// ChunkPtr is only used to hand each worker the base of the reserved
// buffer; every worker writes a disjoint index range.
unsafe impl<C: Send> Send for ChunkPtr<C> {}

impl<C: Default + Send> WordAlloc<C> for FirstTouch {
    fn allocate(&self, len: usize) -> Result<Box<[C]>> {
        if len == 0 {
            return Ok(Vec::new().into_boxed_slice());
        }
        let mut buf: Vec<C> = Vec::with_capacity(len);
        let base = ChunkPtr(buf.as_mut_ptr());

        let cells_per_page = (PAGE_SIZE / std::mem::size_of::<C>()).max(1);
        let per_thread = len
            .div_ceil(self.threads)
            .div_ceil(cells_per_page)
            .max(1)
            * cells_per_page;

        thread::scope(|scope| {
            let mut start = 0;
            while start < len {
                let end = (start + per_thread).min(len);
                let base = base;
                scope.spawn(move || {
                    let base = base;
                    for i in start..end {
                        // SAFETY: `i` lies within the reserved capacity and
                        // each worker owns a disjoint index range, so no
                        // slot is written twice or concurrently.
                        unsafe { base.0.add(i).write(C::default()) };
                    }
                });
                start = end;
            }
        });

        // SAFETY: the workers have been joined by the scope and together
        // initialized every index in `0..len` exactly once.
        unsafe { buf.set_len(len) };
        Ok(buf.into_boxed_slice())
    }
}
