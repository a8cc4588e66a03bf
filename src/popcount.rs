//! Population count building blocks.
//!
//! - Default: `u64::count_ones`, which lowers to the native instruction where
//!   one exists
//! - `portable-popcount`: parallel bit-summing reduction, no intrinsics

/// Counts the set bits of a single word.
#[inline(always)]
pub fn popcount_word(word: u64) -> u32 {
    #[cfg(feature = "portable-popcount")]
    {
        popcount_word_portable(word)
    }

    #[cfg(not(feature = "portable-popcount"))]
    {
        word.count_ones()
    }
}

/// Counts the set bits across a slice of words.
///
/// The total is accumulated as `usize`, so slices holding more than
/// `u32::MAX` set bits are counted exactly.
#[inline]
pub fn popcount_words(words: &[u64]) -> usize {
    widening_sum(words.iter().map(|&word| popcount_word(word)))
}

#[inline]
pub(crate) fn widening_sum(counts: impl Iterator<Item = u32>) -> usize {
    counts.map(|count| count as usize).sum()
}

/// Sums bits in pairs, then nibbles, then bytes, and folds the byte sums into
/// the top byte with a single multiply.
#[inline(always)]
#[cfg_attr(not(any(test, feature = "portable-popcount")), allow(dead_code))]
pub(crate) const fn popcount_word_portable(mut x: u64) -> u32 {
    const M1: u64 = 0x5555_5555_5555_5555;
    const M2: u64 = 0x3333_3333_3333_3333;
    const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f;
    const H01: u64 = 0x0101_0101_0101_0101;

    x -= (x >> 1) & M1;
    x = (x & M2) + ((x >> 2) & M2);
    x = (x + (x >> 4)) & M4;
    (x.wrapping_mul(H01) >> 56) as u32
}
