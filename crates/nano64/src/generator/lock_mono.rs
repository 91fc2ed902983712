#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{
    mono::next_after,
    mutex::{Mutex, MutexGuard},
};
use crate::{Nano64, Nano64Generator, RandSource, Result, SystemClock, ThreadRandom, TimeSource};

/// A lock-based *monotonic* Nano64 generator suitable for multi-threaded
/// environments.
///
/// The last issued identifier lives behind a single [`Mutex`], and the clock
/// is read while the lock is held, so the IDs returned by one instance are
/// strictly increasing in the order callers acquire the lock.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered (monotonically increasing per millisecond)
/// - ✅ Survives clock regressions and random-field overflow
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - You require monotonically increasing IDs
/// - Your target doesn't support 128-bit atomics
///
/// ## See Also
/// - [`BasicNano64Generator`]
/// - [`AtomicMonoNano64Generator`]
///
/// [`BasicNano64Generator`]: crate::BasicNano64Generator
/// [`AtomicMonoNano64Generator`]: crate::AtomicMonoNano64Generator
pub struct LockMonoNano64Generator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<Option<Nano64>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<Option<Nano64>>,
    time: T,
    rng: R,
}

impl<T, R> LockMonoNano64Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`LockMonoNano64Generator`] that has not issued anything
    /// yet.
    ///
    /// # Example
    /// ```
    /// use nano64::{LockMonoNano64Generator, SystemClock, ThreadRandom};
    ///
    /// let generator = LockMonoNano64Generator::new(SystemClock, ThreadRandom);
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
    /// Useful for resuming from a persisted high-water mark so that IDs keep
    /// increasing across restarts.
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
            state: crossbeam_utils::CachePadded::new(Mutex::new(last)),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(last),
            time,
            rng,
        }
    }

    /// Returns the most recently issued identifier, or `None` before the
    /// first successful call.
    pub fn last_issued(&self) -> Option<Nano64> {
        *self.lock_state()
    }

    /// Acquires the state lock, recovering it if a previous holder panicked.
    ///
    /// State is only written after a successful step, so a panic inside the
    /// clock or randomness source leaves the last issued ID intact.
    fn lock_state(&self) -> MutexGuard<'_, Option<Nano64>> {
        #[cfg(feature = "parking-lot")]
        let guard = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard
    }

    /// Generates the next identifier.
    ///
    /// # Errors
    /// - the randomness source failed on a new millisecond
    /// - [`crate::RangeError::Timestamp`] if the clock reads beyond 44 bits
    /// - [`crate::RangeError::TimestampExhausted`] if an overflow bump would
    ///   leave the 44-bit range
    ///
    /// A failed call leaves the generator state untouched. A panic raised by
    /// the clock or randomness source does not disable the generator; the
    /// next call continues from the last issued ID.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<Nano64> {
        let mut last = self.lock_state();
        let now = self.time.current_millis();
        let id = next_after(*last, now, &self.rng)?;
        *last = Some(id);
        Ok(id)
    }
}

impl<T, R> Nano64Generator for LockMonoNano64Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn try_next_id(&self) -> Result<Nano64> {
        self.try_next_id()
    }
}
