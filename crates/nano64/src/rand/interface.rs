use core::fmt;
use std::sync::Arc;

use crate::{RangeError, Result};

/// A trait for sources of random bytes.
///
/// This abstraction allows you to plug in an OS entropy source, a fast
/// thread-local CSPRNG, or a deterministic mock in tests. Sources are fallible:
/// an error from [`RandSource::fill_bytes`] is propagated unchanged to whoever
/// asked for an ID or a nonce.
///
/// # Example
/// ```
/// use nano64::{RandError, RandSource};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
///         dest.fill(0xAB);
///         Ok(())
///     }
/// }
///
/// assert_eq!(FixedRand.random_bits(8).unwrap(), 0xAB);
/// ```
pub trait RandSource {
    /// Fills `dest` entirely with random bytes.
    ///
    /// # Errors
    /// Returns a [`RandError`] if the source cannot produce entropy.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError>;

    /// Returns an integer holding `bits` random low-order bits.
    ///
    /// Draws four bytes, reads them big-endian, and masks off everything above
    /// `bits`.
    ///
    /// # Errors
    /// - [`RangeError::RandomBits`] if `bits` is outside `1..=32`
    /// - the source's own error, wrapped in [`crate::Error::Random`]
    fn random_bits(&self, bits: u32) -> Result<u32> {
        if bits == 0 || bits > u32::BITS {
            return Err(RangeError::RandomBits { bits }.into());
        }
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf)?;
        let value = u32::from_be_bytes(buf);
        Ok(if bits == u32::BITS {
            value
        } else {
            value & ((1 << bits) - 1)
        })
    }
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        (**self).fill_bytes(dest)
    }
}

impl<R: RandSource + ?Sized> RandSource for Arc<R> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        (**self).fill_bytes(dest)
    }
}

/// An opaque failure reported by a [`RandSource`].
#[derive(Clone)]
pub struct RandError {
    inner: Arc<dyn core::error::Error + Send + Sync>,
}

impl RandError {
    /// Wraps any error (or message) produced by a randomness source.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn core::error::Error + Send + Sync>>,
    {
        Self {
            inner: Arc::from(err.into()),
        }
    }
}

impl fmt::Debug for RandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RandError").field(&self.inner).finish()
    }
}

impl fmt::Display for RandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "random source failed: {}", self.inner)
    }
}

impl core::error::Error for RandError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&*self.inner)
    }
}
