//! A growable, word-packed bit vector written in pure Rust.
//! `no_std` (needs `alloc`), no `unsafe`.
//!
//! [`BitVector`] is the main struct in this library. It stores a set of
//! non-negative integers as bits packed into `u64` words and grows on demand.
//! Its [features](#features) are listed below.
//!
//! # Examples
//! ```
//! use growable_bitvec::BitVector;
//!
//! let mut bv = BitVector::new();
//! bv.set_range(2..5).unwrap();
//! assert_eq!(bv.to_string(), "{2, 3, 4}");
//! assert_eq!(bv.cardinality(), 3);
//!
//! bv.clear(3);
//! assert_eq!(bv.to_string(), "{2, 4}");
//!
//! let other = BitVector::from_ones_iter([4, 100]);
//! assert!(bv.intersects(&other));
//! assert_eq!((&bv | &other).to_string(), "{2, 4, 100}");
//! ```
//!
//! # Features
//!
//! - `#![no_std]` compatible (uses `alloc`)
//! - Single-bit operations: `get`, `set`, `clear`, `flip`, `set_value`
//! - Range operations over `from..to`: `set_range`, `clear_range`,
//!   `flip_range`, `set_range_value`, `get_range`
//! - In-place set algebra: `and`, `or`, `xor`, `and_not`, plus
//!   `intersects` and `contains_all`
//! - Operators on references: `&`, `|`, `^`, `-` and their assigning forms
//! - Scanning: `next_set_bit`, `next_clear_bit`, `previous_set_bit`,
//!   `previous_clear_bit`
//! - Metrics: `cardinality`, `length`, `is_empty`
//! - Iteration over all bits, set bits or clear bits
//! - Value semantics: equality and hashing ignore spare capacity
//!
//! # Cargo features
//!
//! - `serde`: serializes a [`BitVector`] as its in-use words
//! - `portable-popcount`: counts bits with a portable bit-summing reduction
//!   instead of the native popcount instruction

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod bitvector;
mod error;
mod popcount;
#[cfg(feature = "serde")]
mod serde_impl;

pub use bitvector::{BitVector, Iter, IterOnes, IterZeros, WORD_BITS};
pub use error::{BitVectorError, Result};
pub use popcount::{popcount_word, popcount_words};
