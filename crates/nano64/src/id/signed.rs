//! Order-preserving conversion between [`Nano64`] and `i64`.
//!
//! Useful for storage engines whose only 8-byte integer column is signed, such
//! as PostgreSQL's `BIGINT` or SQLite's `INTEGER`. Flipping the sign bit
//! (`value ^ 2^63`) maps unsigned order onto signed order exactly, so an index
//! over the signed column still sorts by time and range queries still work.

use crate::{Nano64, RangeError, Result};

/// Always applied in the unsigned domain, so no signed overflow can occur.
const SIGN_BIT: u64 = 1 << 63;

impl Nano64 {
    /// Returns the signed view of this identifier (`raw ^ 2^63` as `i64`).
    ///
    /// For any `a` and `b`, `a.to_signed().cmp(&b.to_signed())` equals
    /// `a.cmp(&b)`.
    ///
    /// # Example
    /// ```
    /// use nano64::Nano64;
    ///
    /// assert_eq!(Nano64::NIL.to_signed(), i64::MIN);
    /// assert_eq!(Nano64::MAX.to_signed(), i64::MAX);
    /// assert_eq!(Nano64::from_signed(-1).to_raw(), 0x7FFF_FFFF_FFFF_FFFF);
    /// ```
    #[must_use]
    pub const fn to_signed(&self) -> i64 {
        (self.to_raw() ^ SIGN_BIT) as i64
    }

    /// Inverse of [`Nano64::to_signed`].
    #[must_use]
    pub const fn from_signed(signed: i64) -> Self {
        Self::from_raw(signed as u64 ^ SIGN_BIT)
    }
}

impl From<Nano64> for i64 {
    fn from(id: Nano64) -> Self {
        id.to_signed()
    }
}

impl From<i64> for Nano64 {
    fn from(signed: i64) -> Self {
        Self::from_signed(signed)
    }
}

/// Extracts the embedded timestamp straight from a signed view, without
/// building a [`Nano64`] first.
#[must_use]
pub const fn signed_timestamp(signed: i64) -> u64 {
    (signed as u64 ^ SIGN_BIT) >> Nano64::TIMESTAMP_SHIFT
}

/// Returns inclusive `(min, max)` signed bounds covering every identifier whose
/// timestamp lies in `start_ms..=end_ms`.
///
/// The lower bound is `start_ms` with a zero random field and the upper bound
/// is `end_ms` with an all-ones random field, so the pair can be used directly
/// in a SQL `BETWEEN` on a signed column.
///
/// # Errors
/// - [`RangeError::NegativeBound`] if either bound is negative
/// - [`RangeError::InvertedBound`] if `start_ms > end_ms`
/// - [`RangeError::Timestamp`] if either bound exceeds 44 bits
///
/// # Example
/// ```
/// use nano64::{signed_time_range, signed_timestamp};
///
/// let (min, max) = signed_time_range(1000, 1000).unwrap();
/// assert_eq!(signed_timestamp(min), 1000);
/// assert_eq!(signed_timestamp(max), 1000);
/// ```
pub fn signed_time_range(start_ms: i64, end_ms: i64) -> Result<(i64, i64)> {
    if start_ms < 0 || end_ms < 0 {
        return Err(RangeError::NegativeBound {
            start: start_ms,
            end: end_ms,
        }
        .into());
    }
    if start_ms > end_ms {
        return Err(RangeError::InvertedBound {
            start: start_ms,
            end: end_ms,
        }
        .into());
    }
    // start <= end, so only the end can overflow
    let end = end_ms as u64;
    if end > Nano64::MAX_TIMESTAMP {
        return Err(RangeError::Timestamp { timestamp: end }.into());
    }

    let lower = Nano64::from_parts(start_ms as u64, 0);
    let upper = Nano64::from_parts(end, Nano64::MAX_RANDOM);
    Ok((lower.to_signed(), upper.to_signed()))
}
