use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{FusedIterator, Iterator};
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Range, Sub, SubAssign,
};

use crate::error::{BitVectorError, Result};
use crate::popcount::popcount_words;

/// Number of bits packed into one storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

const HASH_SEED: u64 = 1234;

/// `width` consecutive ones starting at `start_bit`, truncated at the top of
/// the word.
pub(crate) const fn ones_mask(start_bit: usize, width: usize) -> u64 {
    if width >= WORD_BITS {
        // `1 << 64` would overflow
        !0u64 << start_bit
    } else {
        ((1u64 << width) - 1) << start_bit
    }
}

/// A growable set of non-negative integers stored as a packed bit vector.
///
/// Bit `i` lives in word `i / 64` at position `i % 64`, least significant bit
/// first. Only the first `words_in_use` words can hold set bits; the backing
/// storage may be longer, but every word past that point is zero and the top
/// in-use word is never zero. Equality, hashing and cloning look at the
/// in-use words only, so two vectors with the same bits compare equal no
/// matter how much spare capacity either one carries.
pub struct BitVector {
    words: Vec<u64>,
    words_in_use: usize,
}

impl BitVector {
    /// Creates an empty bit vector with room for one word of bits.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::new();
    /// assert!(bv.is_empty());
    /// assert_eq!(bv.capacity(), 64);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(WORD_BITS)
    }

    /// Creates an empty bit vector whose storage can hold at least `bits`
    /// bits without reallocating.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::with_capacity(130);
    /// assert_eq!(bv.capacity(), 192);
    /// assert_eq!(bv.length(), 0);
    /// ```
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(WORD_BITS)],
            words_in_use: 0,
        }
    }

    /// Takes ownership of a word sequence, least significant word first.
    ///
    /// Trailing zero words are accepted and simply not counted as in use.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_words(vec![0b101, 0, 0]);
    /// assert_eq!(bv.to_string(), "{0, 2}");
    /// assert_eq!(bv.words(), &[0b101]);
    /// ```
    pub fn from_words(words: Vec<u64>) -> Self {
        let words_in_use = words.len();
        let mut bv = Self {
            words,
            words_in_use,
        };
        bv.recompute_words_in_use();
        bv.check_invariants();
        bv
    }

    /// Constructs a bit vector by setting only the indices provided in the
    /// iterator. Duplicates collapse.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([0, 5, 5, 63, 64]);
    /// assert_eq!(bv.cardinality(), 4);
    /// ```
    pub fn from_ones_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bv = Self::new();
        bv.extend(iter);
        bv
    }

    /// Returns the in-use words, least significant word first.
    ///
    /// The last returned word is never zero.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words[..self.words_in_use]
    }

    /// Consumes the vector and returns its in-use words.
    pub fn into_words(mut self) -> Vec<u64> {
        self.words.truncate(self.words_in_use);
        self.words
    }

    /// Number of bits the current storage holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Releases storage beyond the in-use words.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::with_capacity(1024);
    /// bv.set(3);
    /// bv.trim_to_size();
    /// assert_eq!(bv.capacity(), 64);
    /// assert!(bv.get(3));
    /// ```
    pub fn trim_to_size(&mut self) {
        if self.words_in_use != self.words.len() {
            self.words.truncate(self.words_in_use);
            self.words.shrink_to_fit();
        }
        self.check_invariants();
    }

    /// Returns `true` if the bit at `idx` is set.
    ///
    /// Indices past the highest set bit read as unset.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set(1);
    /// assert!(bv.get(1));
    /// assert!(!bv.get(0));
    /// assert!(!bv.get(1_000_000));
    /// ```
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        let (word_idx, bit_idx) = Self::idxs(idx);
        word_idx < self.words_in_use && self.words[word_idx] & 1 << bit_idx != 0
    }

    /// Sets the bit at `idx`, growing the storage if needed.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set(200);
    /// assert!(bv.get(200));
    /// assert_eq!(bv.length(), 201);
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) {
        let (word_idx, bit_idx) = Self::idxs(idx);
        self.expand_to(word_idx);
        self.words[word_idx] |= 1 << bit_idx;
        self.check_invariants();
    }

    /// Sets the bit at `idx` to `value`.
    #[inline]
    pub fn set_value(&mut self, idx: usize, value: bool) {
        if value {
            self.set(idx)
        } else {
            self.clear(idx)
        }
    }

    /// Clears the bit at `idx`. Clearing a bit past the highest set bit is a
    /// no-op.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::from_ones_iter([3, 70]);
    /// bv.clear(70);
    /// assert!(!bv.get(70));
    /// assert_eq!(bv.length(), 4);
    /// ```
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        let (word_idx, bit_idx) = Self::idxs(idx);
        if word_idx >= self.words_in_use {
            return;
        }
        self.words[word_idx] &= !(1 << bit_idx);
        self.recompute_words_in_use();
        self.check_invariants();
    }

    /// Clears every bit. The storage is kept.
    pub fn clear_all(&mut self) {
        self.words[..self.words_in_use].fill(0);
        self.words_in_use = 0;
        self.check_invariants();
    }

    /// Flips the bit at `idx`, growing the storage if needed.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.flip(4);
    /// assert!(bv.get(4));
    /// bv.flip(4);
    /// assert!(bv.is_empty());
    /// ```
    #[inline]
    pub fn flip(&mut self, idx: usize) {
        let (word_idx, bit_idx) = Self::idxs(idx);
        self.expand_to(word_idx);
        self.words[word_idx] ^= 1 << bit_idx;
        self.recompute_words_in_use();
        self.check_invariants();
    }

    /// Sets all bits in the given range.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`;
    /// the vector is left untouched.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(2..5).unwrap();
    /// assert_eq!(bv.to_string(), "{2, 3, 4}");
    /// ```
    pub fn set_range(&mut self, range: Range<usize>) -> Result<()> {
        BitVectorError::check_range(&range)?;
        if range.start == range.end {
            return Ok(());
        }

        let (end_word, _) = Self::idxs(range.end - 1);
        self.expand_to(end_word);
        self.apply_masks(range.start, range.end, |word, mask| *word |= mask);
        self.check_invariants();
        Ok(())
    }

    /// Sets all bits in the given range to `value`.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    pub fn set_range_value(&mut self, range: Range<usize>, value: bool) -> Result<()> {
        if value {
            self.set_range(range)
        } else {
            self.clear_range(range)
        }
    }

    /// Clears all bits in the given range.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`;
    /// the vector is left untouched.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(0..100).unwrap();
    /// bv.clear_range(10..1000).unwrap();
    /// assert_eq!(bv.length(), 10);
    /// ```
    pub fn clear_range(&mut self, range: Range<usize>) -> Result<()> {
        BitVectorError::check_range(&range)?;
        let (start_word, _) = Self::idxs(range.start);
        if range.start == range.end || start_word >= self.words_in_use {
            return Ok(());
        }

        // bits at or past `length()` are already clear
        let end = range.end.min(self.length());
        if range.start >= end {
            return Ok(());
        }

        self.apply_masks(range.start, end, |word, mask| *word &= !mask);
        self.recompute_words_in_use();
        self.check_invariants();
        Ok(())
    }

    /// Flips all bits in the given range.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`;
    /// the vector is left untouched.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::from_ones_iter([1, 2]);
    /// bv.flip_range(0..4).unwrap();
    /// assert_eq!(bv.to_string(), "{0, 3}");
    /// ```
    pub fn flip_range(&mut self, range: Range<usize>) -> Result<()> {
        BitVectorError::check_range(&range)?;
        if range.start == range.end {
            return Ok(());
        }

        let (end_word, _) = Self::idxs(range.end - 1);
        self.expand_to(end_word);
        self.apply_masks(range.start, range.end, |word, mask| *word ^= mask);
        self.recompute_words_in_use();
        self.check_invariants();
        Ok(())
    }

    /// Returns a new bit vector holding the bits of `range`, renumbered so
    /// that `range.start` becomes index 0.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([3, 64, 70, 130]);
    /// let sub = bv.get_range(60..71).unwrap();
    /// assert_eq!(sub.to_string(), "{4, 10}");
    /// ```
    pub fn get_range(&self, range: Range<usize>) -> Result<Self> {
        BitVectorError::check_range(&range)?;
        let len = self.length();
        if len <= range.start || range.start == range.end {
            return Ok(Self::with_capacity(0));
        }

        let start = range.start;
        let end = range.end.min(len);
        let target_words = (end - start).div_ceil(WORD_BITS);
        let mut out = vec![0u64; target_words];

        let (mut source, start_bit) = Self::idxs(start);
        let carry_shift = WORD_BITS - start_bit;
        for slot in &mut out[..target_words - 1] {
            *slot = if start_bit == 0 {
                self.words[source]
            } else {
                self.words[source] >> start_bit | self.words[source + 1] << carry_shift
            };
            source += 1;
        }

        let end_bit = (end - 1) % WORD_BITS;
        let last_mask = ones_mask(0, end_bit + 1);
        out[target_words - 1] = if end_bit < start_bit {
            // the tail straddles two source words
            self.words[source] >> start_bit | (self.words[source + 1] & last_mask) << carry_shift
        } else {
            (self.words[source] & last_mask) >> start_bit
        };

        Ok(Self::from_words(out))
    }

    /// Keeps only the bits that are also set in `other`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut a = BitVector::from_ones_iter([1, 3, 5]);
    /// a.and(&BitVector::from_ones_iter([3, 5, 7]));
    /// assert_eq!(a.to_string(), "{3, 5}");
    /// ```
    pub fn and(&mut self, other: &Self) {
        if self.words_in_use > other.words_in_use {
            self.words[other.words_in_use..self.words_in_use].fill(0);
            self.words_in_use = other.words_in_use;
        }
        for (self_word, other_word) in self.words[..self.words_in_use]
            .iter_mut()
            .zip(other.words())
        {
            *self_word &= other_word;
        }
        self.recompute_words_in_use();
        self.check_invariants();
    }

    /// Clears every bit that is set in `other`. Never grows `self`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut a = BitVector::from_ones_iter([1, 3, 5]);
    /// a.and_not(&BitVector::from_ones_iter([3, 5, 7]));
    /// assert_eq!(a.to_string(), "{1}");
    /// ```
    pub fn and_not(&mut self, other: &Self) {
        let common = self.words_in_use.min(other.words_in_use);
        for (self_word, other_word) in self.words[..common].iter_mut().zip(other.words()) {
            *self_word &= !other_word;
        }
        self.recompute_words_in_use();
        self.check_invariants();
    }

    /// Sets every bit that is set in `other`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut a = BitVector::from_ones_iter([1, 3, 5]);
    /// a.or(&BitVector::from_ones_iter([3, 5, 7]));
    /// assert_eq!(a.to_string(), "{1, 3, 5, 7}");
    /// ```
    pub fn or(&mut self, other: &Self) {
        let common = self.grow_for(other);
        for (self_word, other_word) in self.words[..common].iter_mut().zip(other.words()) {
            *self_word |= other_word;
        }
        self.copy_tail(other, common);
        self.check_invariants();
    }

    /// Flips every bit that is set in `other`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut a = BitVector::from_ones_iter([1, 3, 5]);
    /// a.xor(&BitVector::from_ones_iter([3, 5, 7]));
    /// assert_eq!(a.to_string(), "{1, 7}");
    /// ```
    pub fn xor(&mut self, other: &Self) {
        let common = self.grow_for(other);
        for (self_word, other_word) in self.words[..common].iter_mut().zip(other.words()) {
            *self_word ^= other_word;
        }
        self.copy_tail(other, common);
        self.recompute_words_in_use();
        self.check_invariants();
    }

    /// Returns `true` if `self` and `other` share at least one set bit.
    pub fn intersects(&self, other: &Self) -> bool {
        self.words()
            .iter()
            .zip(other.words())
            .any(|(self_word, other_word)| self_word & other_word != 0)
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let a = BitVector::from_ones_iter([1, 3, 5, 300]);
    /// assert!(a.contains_all(&BitVector::from_ones_iter([3, 300])));
    /// assert!(!a.contains_all(&BitVector::from_ones_iter([3, 301])));
    /// assert!(a.contains_all(&BitVector::new()));
    /// ```
    pub fn contains_all(&self, other: &Self) -> bool {
        let own = self.words();
        other.words().iter().enumerate().all(|(idx, &other_word)| {
            own.get(idx).copied().unwrap_or(0) & other_word == other_word
        })
    }

    /// Returns the number of set bits.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([0, 5, 63, 64]);
    /// assert_eq!(bv.cardinality(), 4);
    /// ```
    #[inline]
    pub fn cardinality(&self) -> usize {
        popcount_words(self.words())
    }

    /// Returns the index of the highest set bit plus one, or 0 if no bit is
    /// set.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// assert_eq!(BitVector::new().length(), 0);
    /// assert_eq!(BitVector::from_ones_iter([2, 64]).length(), 65);
    /// ```
    pub fn length(&self) -> usize {
        match self.words().last() {
            None => 0,
            Some(top) => {
                WORD_BITS * (self.words_in_use - 1) + (WORD_BITS - top.leading_zeros() as usize)
            }
        }
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words_in_use == 0
    }

    /// Returns the index of the first set bit at or after `from`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([5, 10, 150]);
    /// assert_eq!(bv.next_set_bit(0), Some(5));
    /// assert_eq!(bv.next_set_bit(11), Some(150));
    /// assert_eq!(bv.next_set_bit(151), None);
    /// ```
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let (mut word_idx, bit_idx) = Self::idxs(from);
        if word_idx >= self.words_in_use {
            return None;
        }

        let mut word = self.words[word_idx] & !0u64 << bit_idx;
        loop {
            if word != 0 {
                return Some(word_idx * WORD_BITS + word.trailing_zeros() as usize);
            }
            word_idx += 1;
            if word_idx == self.words_in_use {
                return None;
            }
            word = self.words[word_idx];
        }
    }

    /// Returns the index of the first clear bit at or after `from`.
    ///
    /// There is always one, since the vector is conceptually followed by an
    /// infinite run of clear bits.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(0..64).unwrap();
    /// assert_eq!(bv.next_clear_bit(3), 64);
    /// assert_eq!(bv.next_clear_bit(1000), 1000);
    /// ```
    pub fn next_clear_bit(&self, from: usize) -> usize {
        let (mut word_idx, bit_idx) = Self::idxs(from);
        if word_idx >= self.words_in_use {
            return from;
        }

        let mut word = !self.words[word_idx] & !0u64 << bit_idx;
        loop {
            if word != 0 {
                return word_idx * WORD_BITS + word.trailing_zeros() as usize;
            }
            word_idx += 1;
            if word_idx == self.words_in_use {
                return self.words_in_use * WORD_BITS;
            }
            word = !self.words[word_idx];
        }
    }

    /// Returns the index of the last set bit at or before `from`.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([5, 10, 150]);
    /// assert_eq!(bv.previous_set_bit(1000), Some(150));
    /// assert_eq!(bv.previous_set_bit(149), Some(10));
    /// assert_eq!(bv.previous_set_bit(4), None);
    /// ```
    pub fn previous_set_bit(&self, from: usize) -> Option<usize> {
        let (mut word_idx, bit_idx) = Self::idxs(from);
        if word_idx >= self.words_in_use {
            return self.length().checked_sub(1);
        }

        let mut word = self.words[word_idx] & ones_mask(0, bit_idx + 1);
        loop {
            if word != 0 {
                return Some((word_idx + 1) * WORD_BITS - 1 - word.leading_zeros() as usize);
            }
            if word_idx == 0 {
                return None;
            }
            word_idx -= 1;
            word = self.words[word_idx];
        }
    }

    /// Returns the index of the last clear bit at or before `from`, or
    /// `None` if every bit in `0..=from` is set.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// assert_eq!(bv.previous_clear_bit(100), Some(100));
    /// bv.set_range(0..10).unwrap();
    /// assert_eq!(bv.previous_clear_bit(9), None);
    /// assert_eq!(bv.previous_clear_bit(10), Some(10));
    /// ```
    pub fn previous_clear_bit(&self, from: usize) -> Option<usize> {
        let (mut word_idx, bit_idx) = Self::idxs(from);
        if word_idx >= self.words_in_use {
            return Some(from);
        }

        let mut word = !self.words[word_idx] & ones_mask(0, bit_idx + 1);
        loop {
            if word != 0 {
                return Some((word_idx + 1) * WORD_BITS - 1 - word.leading_zeros() as usize);
            }
            if word_idx == 0 {
                return None;
            }
            word_idx -= 1;
            word = !self.words[word_idx];
        }
    }

    /// Hash value derived from the in-use words only.
    ///
    /// Equal vectors produce equal values regardless of their capacity.
    pub fn hash_code(&self) -> u64 {
        let mut h = HASH_SEED;
        for (idx, word) in self.words().iter().enumerate() {
            h ^= word.wrapping_mul(idx as u64 + 1);
        }
        (h >> 32) ^ h
    }

    /// Returns an iterator over the bits in `0..length()` as `bool`s.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([0, 2]);
    /// let bits: Vec<bool> = bv.iter().collect();
    /// assert_eq!(bits, [true, false, true]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: self.words(),
            idx: 0,
            len: self.length(),
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// Iterating through the entire iterator runs in O(max(k, w)) where k is
    /// the number of set bits and w the number of in-use words.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([64, 1, 700]);
    /// let ones: Vec<usize> = bv.iter_ones().collect();
    /// assert_eq!(ones, [1, 64, 700]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        let words = self.words();
        IterOnes {
            words,
            word_idx: 0,
            current: words.first().copied().unwrap_or(0),
            base_bit_idx: 0,
        }
    }

    /// Returns an iterator over the indices of the clear bits below
    /// `length()`, in ascending order.
    ///
    /// # Examples
    /// ```
    /// use growable_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_ones_iter([0, 2, 4]);
    /// let zeros: Vec<usize> = bv.iter_zeros().collect();
    /// assert_eq!(zeros, [1, 3]);
    /// ```
    #[inline]
    pub fn iter_zeros(&self) -> IterZeros<'_> {
        let words = self.words();
        IterZeros {
            words,
            word_idx: 0,
            current: words.first().map_or(0, |word| !word),
            base_bit_idx: 0,
            len: self.length(),
        }
    }

    #[inline]
    const fn idxs(idx: usize) -> (usize, usize) {
        (idx / WORD_BITS, idx % WORD_BITS)
    }

    /// Grows the storage to hold at least `words_required` words, at least
    /// doubling it when it grows at all.
    fn ensure_capacity(&mut self, words_required: usize) {
        if self.words.len() < words_required {
            let request = self.words.len().saturating_mul(2).max(words_required);
            self.words.resize(request, 0);
        }
    }

    /// Marks words up to `word_idx` as in use. Leaves the top word zero, so
    /// the caller must write to it or recompute.
    fn expand_to(&mut self, word_idx: usize) {
        let words_required = word_idx + 1;
        if self.words_in_use < words_required {
            self.ensure_capacity(words_required);
            self.words_in_use = words_required;
        }
    }

    fn recompute_words_in_use(&mut self) {
        self.words_in_use = self.words[..self.words_in_use]
            .iter()
            .rposition(|&word| word != 0)
            .map_or(0, |top| top + 1);
    }

    /// Grows `self` to cover `other`'s in-use words and returns how many
    /// words both had in use before.
    fn grow_for(&mut self, other: &Self) -> usize {
        let common = self.words_in_use.min(other.words_in_use);
        if self.words_in_use < other.words_in_use {
            self.ensure_capacity(other.words_in_use);
            self.words_in_use = other.words_in_use;
        }
        common
    }

    fn copy_tail(&mut self, other: &Self, common: usize) {
        if common < other.words_in_use {
            self.words[common..other.words_in_use]
                .copy_from_slice(&other.words[common..other.words_in_use]);
        }
    }

    /// Splits `start..end` into a partial first word, full interior words and
    /// a partial last word, and hands each word with its mask to `op`.
    ///
    /// `start < end` and `end - 1` must lie within the storage.
    fn apply_masks(&mut self, start: usize, end: usize, mut op: impl FnMut(&mut u64, u64)) {
        let (start_word, start_bit) = Self::idxs(start);
        let (end_word, end_bit) = Self::idxs(end - 1);

        // all within one word
        if start_word == end_word {
            let mask = ones_mask(start_bit, end_bit - start_bit + 1);
            op(&mut self.words[start_word], mask);
            return;
        }

        op(
            &mut self.words[start_word],
            ones_mask(start_bit, WORD_BITS - start_bit),
        );
        for word in &mut self.words[start_word + 1..end_word] {
            op(word, !0);
        }
        op(&mut self.words[end_word], ones_mask(0, end_bit + 1));
    }

    #[inline]
    fn check_invariants(&self) {
        debug_assert!(
            self.words_in_use == 0 || self.words[self.words_in_use - 1] != 0,
            "top in-use word {} is zero",
            self.words_in_use.wrapping_sub(1)
        );
        debug_assert!(
            self.words_in_use <= self.words.len(),
            "words_in_use {} exceeds storage of {} words",
            self.words_in_use,
            self.words.len()
        );
        debug_assert!(
            self.words[self.words_in_use.min(self.words.len())..]
                .iter()
                .all(|&word| word == 0),
            "set bits beyond the in-use words"
        );
    }
}

impl Default for BitVector {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies only the in-use words, so the clone carries no spare capacity.
impl Clone for BitVector {
    fn clone(&self) -> Self {
        Self {
            words: self.words().to_vec(),
            words_in_use: self.words_in_use,
        }
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.words() == other.words()
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl From<Vec<u64>> for BitVector {
    fn from(words: Vec<u64>) -> Self {
        Self::from_words(words)
    }
}

impl<'bitvec> IntoIterator for &'bitvec BitVector {
    type Item = bool;
    type IntoIter = Iter<'bitvec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the set bits as `{i0, i1, ...}` in ascending order.
impl Display for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (n, idx) in self.iter_ones().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{idx}")?;
        }
        write!(f, "}}")
    }
}

impl Debug for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let len = self.length();
        if len == 0 {
            return write!(f, "LSB -> <- MSB");
        }
        write!(f, "LSB -> ")?;
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % 8 == 7 && i + 1 < len {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}

/// Sets every index yielded by the iterator.
impl Extend<usize> for BitVector {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for idx in iter {
            self.set(idx);
        }
    }
}

/// Constructs a bit vector from an iterator over `bool`s, where the n-th item
/// becomes bit n.
impl FromIterator<bool> for BitVector {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut bv = Self::new();
        for (idx, bit) in iter.into_iter().enumerate() {
            if bit {
                bv.set(idx);
            }
        }
        bv
    }
}

impl BitAnd<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitand(self, rhs: &BitVector) -> Self::Output {
        let mut out = self.clone();
        out.and(rhs);
        out
    }
}

impl BitAndAssign<&BitVector> for BitVector {
    fn bitand_assign(&mut self, rhs: &BitVector) {
        self.and(rhs)
    }
}

impl BitOr<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitor(self, rhs: &BitVector) -> Self::Output {
        let mut out = self.clone();
        out.or(rhs);
        out
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, rhs: &BitVector) {
        self.or(rhs)
    }
}

impl BitXor<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: &BitVector) -> Self::Output {
        let mut out = self.clone();
        out.xor(rhs);
        out
    }
}

impl BitXorAssign<&BitVector> for BitVector {
    fn bitxor_assign(&mut self, rhs: &BitVector) {
        self.xor(rhs)
    }
}

/// Set difference, same as [`BitVector::and_not`].
impl Sub<&BitVector> for &BitVector {
    type Output = BitVector;

    fn sub(self, rhs: &BitVector) -> Self::Output {
        let mut out = self.clone();
        out.and_not(rhs);
        out
    }
}

impl SubAssign<&BitVector> for BitVector {
    fn sub_assign(&mut self, rhs: &BitVector) {
        self.and_not(rhs)
    }
}

/// Iterator over the bits below [`BitVector::length`] as `bool` values.
///
/// Returned by [`BitVector::iter()`].
#[derive(Clone)]
pub struct Iter<'bitvec> {
    words: &'bitvec [u64],
    idx: usize,
    len: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.len {
            return None;
        }
        let (word_idx, bit_idx) = BitVector::idxs(self.idx);
        self.idx += 1;
        Some(self.words[word_idx] & 1 << bit_idx != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over the indices of set bits, in ascending order.
///
/// Returned by [`BitVector::iter_ones()`].
#[derive(Clone)]
pub struct IterOnes<'bitvec> {
    words: &'bitvec [u64],
    word_idx: usize,
    current: u64,
    base_bit_idx: usize,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.words.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // unset LSB
                return Some(self.base_bit_idx + tz);
            }

            self.word_idx += 1;
            self.base_bit_idx += WORD_BITS;
            self.current = self.words.get(self.word_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}

/// Iterator over the indices of clear bits below [`BitVector::length`], in
/// ascending order.
///
/// Returned by [`BitVector::iter_zeros()`].
#[derive(Clone)]
pub struct IterZeros<'bitvec> {
    words: &'bitvec [u64],
    word_idx: usize,
    current: u64,
    base_bit_idx: usize,
    len: usize,
}

impl Iterator for IterZeros<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.words.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                let idx = self.base_bit_idx + tz;
                if idx >= self.len {
                    self.current = 0; // avoid entering if block once exhausted
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(idx);
            }

            self.word_idx += 1;
            self.base_bit_idx += WORD_BITS;
            self.current = self.words.get(self.word_idx).map_or(0, |word| !word);
        }
        None
    }
}

impl FusedIterator for IterZeros<'_> {}
