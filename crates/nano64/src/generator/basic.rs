#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Nano64, Nano64Generator, RandSource, Result, SystemClock, ThreadRandom, TimeSource};

/// Packs `timestamp` with 20 freshly drawn random bits.
///
/// # Errors
/// - the randomness source failed
/// - [`crate::RangeError::Timestamp`] if `timestamp` does not fit in 44 bits
///
/// # Example
/// ```
/// use nano64::{ThreadRandom, generate};
///
/// let id = generate(1_700_000_000_000, &ThreadRandom).unwrap();
/// assert_eq!(id.timestamp(), 1_700_000_000_000);
/// ```
pub fn generate<R>(timestamp: u64, rng: &R) -> Result<Nano64>
where
    R: RandSource + ?Sized,
{
    let random = rng.random_bits(Nano64::RANDOM_BITS)?;
    Nano64::encode(timestamp, random)
}

/// [`generate`] at the current wall-clock millisecond.
///
/// # Errors
/// See [`generate`].
pub fn generate_now<R>(rng: &R) -> Result<Nano64>
where
    R: RandSource + ?Sized,
{
    generate(SystemClock.current_millis(), rng)
}

/// A *non-monotonic* Nano64 generator.
///
/// Every call packs the current millisecond with a fresh random draw. It holds
/// no mutable state, so it is freely shareable across threads, but two IDs
/// from the same millisecond are in random order and collide with probability
/// about `1 / 2^20` per pair.
///
/// ## See Also
/// - [`LockMonoNano64Generator`]
/// - [`AtomicMonoNano64Generator`]
///
/// [`LockMonoNano64Generator`]: crate::LockMonoNano64Generator
/// [`AtomicMonoNano64Generator`]: crate::AtomicMonoNano64Generator
#[derive(Clone, Debug, Default)]
pub struct BasicNano64Generator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    time: T,
    rng: R,
}

impl<T, R> BasicNano64Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`BasicNano64Generator`] with the provided time source and
    /// RNG.
    ///
    /// # Example
    /// ```
    /// use nano64::{BasicNano64Generator, SystemClock, ThreadRandom};
    ///
    /// let generator = BasicNano64Generator::new(SystemClock, ThreadRandom);
    /// let id = generator.try_next_id().unwrap();
    /// assert!(!id.is_nil());
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates a new identifier.
    ///
    /// # Errors
    /// See [`generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<Nano64> {
        Nano64::from_sources(&self.time, &self.rng)
    }
}

impl<T, R> Nano64Generator for BasicNano64Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn try_next_id(&self) -> Result<Nano64> {
        self.try_next_id()
    }
}
