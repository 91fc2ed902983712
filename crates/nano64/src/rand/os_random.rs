use rand::{TryRngCore, rngs::OsRng};

use crate::{RandError, RandSource};

/// A `RandSource` that reads directly from the operating system's entropy
/// source.
///
/// Slower than [`ThreadRandom`](crate::ThreadRandom) because every call is a
/// syscall, but it surfaces OS failures (e.g. an uninitialized entropy pool)
/// as [`RandError`] instead of hiding them behind a userspace generator.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        OsRng.try_fill_bytes(dest).map_err(RandError::new)
    }
}
