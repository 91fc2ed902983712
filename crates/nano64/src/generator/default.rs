use crate::{LockMonoNano64Generator, Nano64, Result, SystemClock, ThreadRandom};

static DEFAULT_GENERATOR: LockMonoNano64Generator = LockMonoNano64Generator::new(SystemClock, ThreadRandom);

/// Generates the next identifier from a process-wide monotonic generator.
///
/// All callers in the process share one [`LockMonoNano64Generator`] backed by
/// [`SystemClock`] and [`ThreadRandom`], so IDs from this function are
/// strictly increasing across threads.
///
/// # Errors
/// See [`LockMonoNano64Generator::try_next_id`].
///
/// # Example
/// ```
/// let a = nano64::monotonic_now().unwrap();
/// let b = nano64::monotonic_now().unwrap();
/// assert!(a < b);
/// ```
pub fn monotonic_now() -> Result<Nano64> {
    DEFAULT_GENERATOR.try_next_id()
}
