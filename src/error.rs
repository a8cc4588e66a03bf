use core::ops::Range;

use thiserror::Error;

/// Errors returned by the fallible [`BitVector`] operations.
///
/// Every operation that returns one of these checks its arguments before
/// touching any bits, so an `Err` always leaves the vector unchanged.
///
/// [`BitVector`]: crate::BitVector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BitVectorError {
    /// A half-open range whose start lies after its end.
    #[error("range start {start} is greater than range end {end}")]
    InvalidRange {
        /// Inclusive start of the rejected range.
        start: usize,
        /// Exclusive end of the rejected range.
        end: usize,
    },
}

impl BitVectorError {
    pub(crate) fn check_range(range: &Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(Self::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        Ok(())
    }
}

/// Shorthand for results carrying a [`BitVectorError`].
pub type Result<T> = core::result::Result<T, BitVectorError>;
