use core::cmp::Ordering;

use crate::{Nano64, RandSource, RangeError, Result, generate};

/// Computes the identifier that follows `last` when the clock reads `now`.
///
/// Shared by the lock-based and lock-free monotonic generators. Pure apart
/// from the random draw, so a caller that fails here leaves its state alone.
///
/// - no previous ID, or the clock moved forward: fresh random draw
/// - same millisecond: `random + 1`
/// - clock behind: treated as the same millisecond as `last`
/// - random field full: timestamp `+ 1` and random `0`, without touching `rng`
pub(crate) fn next_after<R>(last: Option<Nano64>, now: u64, rng: &R) -> Result<Nano64>
where
    R: RandSource + ?Sized,
{
    if now > Nano64::MAX_TIMESTAMP {
        return Err(RangeError::Timestamp { timestamp: now }.into());
    }
    let Some(last) = last else {
        return generate(now, rng);
    };

    let last_ts = last.timestamp();
    match now.cmp(&last_ts) {
        Ordering::Greater => generate(now, rng),
        Ordering::Equal => increment(last),
        Ordering::Less => {
            cold_clock_behind(now, last_ts);
            increment(last)
        }
    }
}

#[inline]
fn increment(last: Nano64) -> Result<Nano64> {
    let random = last.random();
    if random < Nano64::MAX_RANDOM {
        Ok(Nano64::from_parts(last.timestamp(), random + 1))
    } else {
        cold_random_overflow(last.timestamp())
    }
}

#[cold]
#[inline(never)]
fn cold_clock_behind(_now: u64, _last_ts: u64) {
    #[cfg(feature = "tracing")]
    tracing::debug!("Clock at {_now} is behind last issued timestamp {_last_ts}, holding");
}

#[cold]
#[inline(never)]
fn cold_random_overflow(timestamp: u64) -> Result<Nano64> {
    if timestamp >= Nano64::MAX_TIMESTAMP {
        return Err(RangeError::TimestampExhausted { timestamp }.into());
    }
    #[cfg(feature = "tracing")]
    tracing::debug!("Random field exhausted at {timestamp}, bumping timestamp");
    Ok(Nano64::from_parts(timestamp + 1, 0))
}
