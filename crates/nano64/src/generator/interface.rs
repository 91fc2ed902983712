use std::sync::Arc;

use crate::{Nano64, Result};

/// A minimal interface for producing [`Nano64`] identifiers.
///
/// Implemented by every generator in this crate, so encryption and other
/// composition points can accept any of them.
pub trait Nano64Generator {
    /// Returns the next identifier.
    ///
    /// # Errors
    /// - the randomness source failed
    /// - the clock read beyond the 44-bit timestamp range
    /// - a monotonic generator ran out of timestamps
    fn try_next_id(&self) -> Result<Nano64>;
}

impl<G: Nano64Generator + ?Sized> Nano64Generator for &G {
    fn try_next_id(&self) -> Result<Nano64> {
        (**self).try_next_id()
    }
}

impl<G: Nano64Generator + ?Sized> Nano64Generator for Arc<G> {
    fn try_next_id(&self) -> Result<Nano64> {
        (**self).try_next_id()
    }
}
