//! # Bit-packed integer vectors in Rust
//!
//! Tamp provides dynamic arrays of integers in which every element
//! occupies exactly `width` bits of a machine-word stream instead of a
//! whole word, a drop-in trade of a small constant decode cost for a
//! memory footprint proportional to `width / w`. The intended users are
//! large in-memory structures (indices, hash tables, suffix arrays,
//! bitmaps) where billions of small integers must stay in RAM.
//!
//! ## Design policy
//!
//! - **One engine, three disciplines:**
//!   Packing, cursors, and proxies are written once and bound to a store
//!   policy chosen at the type level. [`PackedVec`] uses plain
//!   read-modify-writes, [`AtomicPackedVec`] makes concurrent writes to
//!   distinct elements safe for any layout, and [`CasPackedVec`] adds
//!   element-level compare-and-swap. The policy dispatch is static, so the
//!   single-threaded fast path stays inlineable.
//!
//! - **Let the borrow checker do the bookkeeping:**
//!   Cursors and proxies borrow the container's buffer. Outliving the
//!   container or crossing a reallocating call is a compile error, not a
//!   documented misuse. Likewise the plain flavor is `!Sync`, so the
//!   "undefined when racing on a shared word" caveat of its C++ cousins
//!   cannot be triggered from safe code.
//!
//! - **Ensure safety:**
//!   The storage engine is written in safe Rust; the one `unsafe` block in
//!   the crate sits in the first-touch allocator's parallel page
//!   initialization.
//!
//! ## Data structures
//!
//! | Type | Width | Concurrency |
//! | --- | --- | --- |
//! | [`PackedVec`] | dynamic | single-threaded |
//! | [`AtomicPackedVec`] | dynamic | racy-but-torn-free writes |
//! | [`CasPackedVec`] | dynamic | atomic writes + element CAS |
//! | [`StaticPackedVec`] | type-level | single-threaded |
//! | [`Packed48`] | 48 bits | single-threaded |
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tamp::PackedVec;
//!
//! let mut v = PackedVec::<u32>::new(PackedVec::<u32>::required_bits(100))?;
//! for x in [71, 0, 34, 99] {
//!     v.push(x)?;
//! }
//!
//! assert_eq!(v.width(), 7);
//! assert_eq!(v.get(3), Some(99));
//! assert_eq!(v.to_vec(), vec![71, 0, 34, 99]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitation
//!
//! This library is designed to run on 64-bit machines.
#![deny(missing_docs)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod algorithm;
pub mod alloc;
mod codec;
pub mod cursor;
pub mod error;
pub mod static_vector;
pub mod store;
pub mod utils;
pub mod vector;
pub mod word;

pub use cursor::{swap, Cursor, ElemRef};
pub use error::{Error, Result};
pub use static_vector::{Packed48, StaticPackedVec, StaticVector};
pub use vector::{AtomicPackedVec, Build, CasPackedVec, Iter, PackedVec, Vector};
