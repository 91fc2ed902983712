use portable_atomic::{AtomicU128, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use super::mono::next_after;
use crate::{Nano64, Nano64Generator, RandSource, Result, SystemClock, ThreadRandom, TimeSource};

/// Set in the packed state word once an identifier has been issued.
const ISSUED: u128 = 1 << 64;

const fn pack(last: Option<Nano64>) -> u128 {
    match last {
        Some(id) => ISSUED | id.to_raw() as u128,
        None => 0,
    }
}

const fn unpack(word: u128) -> Option<Nano64> {
    if word & ISSUED == 0 {
        None
    } else {
        Some(Nano64::from_raw(word as u64))
    }
}

/// A lock-free *monotonic* Nano64 generator.
///
/// Runs the same algorithm as [`LockMonoNano64Generator`], but keeps the last
/// issued identifier and an "issued" flag packed into one [`AtomicU128`] and
/// advances it with a compare-and-swap loop. A lost race re-reads the clock
/// and recomputes from the winner's state, so no two callers ever get the
/// same ID.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lock-free on targets with native 128-bit CAS
/// - ✅ Time-ordered (monotonically increasing per millisecond)
///
/// ## Caveats
/// Where 128-bit atomics are unavailable, `portable-atomic` falls back to a
/// global lock, and [`LockMonoNano64Generator`] is the better choice.
///
/// [`LockMonoNano64Generator`]: crate::LockMonoNano64Generator
pub struct AtomicMonoNano64Generator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU128>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU128,
    time: T,
    rng: R,
}

impl<T, R> AtomicMonoNano64Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`AtomicMonoNano64Generator`] that has not issued
    /// anything yet.
    ///
    /// # Example
    /// ```
    /// use nano64::{AtomicMonoNano64Generator, SystemClock, ThreadRandom};
    ///
    /// let generator = AtomicMonoNano64Generator::new(SystemClock, ThreadRandom);
    ///
    /// let a = generator.try_next_id().unwrap();
    /// let b = generator.try_next_id().unwrap();
    /// assert!(a < b);
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self::with_state(None, time, rng)
    }

    /// Creates a generator that behaves as if it had last issued
    /// `(last_timestamp, last_random)`.
    ///
    /// # Errors
    /// Returns a [`crate::RangeError`] if either field exceeds its width.
    pub fn from_components(last_timestamp: u64, last_random: u32, time: T, rng: R) -> Result<Self> {
        let last = Nano64::encode(last_timestamp, last_random)?;
        Ok(Self::with_state(Some(last), time, rng))
    }

    const fn with_state(last: Option<Nano64>, time: T, rng: R) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU128::new(pack(last))),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU128::new(pack(last)),
            time,
            rng,
        }
    }

    /// Returns the most recently issued identifier, or `None` before the
    /// first successful call.
    pub fn last_issued(&self) -> Option<Nano64> {
        unpack(self.state.load(Ordering::Acquire))
    }

    /// Generates the next identifier.
    ///
    /// # Errors
    /// - the randomness source failed on a new millisecond
    /// - [`crate::RangeError::Timestamp`] if the clock reads beyond 44 bits
    /// - [`crate::RangeError::TimestampExhausted`] if an overflow bump would
    ///   leave the 44-bit range
    ///
    /// A failed call leaves the generator state untouched.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<Nano64> {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let now = self.time.current_millis();
            let next = next_after(unpack(current), now, &self.rng)?;
            match self.state.compare_exchange_weak(
                current,
                pack(Some(next)),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break Ok(next),
                // Another thread won the race; retry against its state.
                Err(actual) => current = actual,
            }
        }
    }
}

impl<T, R> Nano64Generator for AtomicMonoNano64Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn try_next_id(&self) -> Result<Nano64> {
        self.try_next_id()
    }
}
