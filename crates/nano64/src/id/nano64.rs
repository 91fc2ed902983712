use core::{cmp::Ordering, fmt, str::FromStr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Error, RandSource, RangeError, Result, ThreadRandom, TimeSource, id::hex};

/// A compact, time-sortable 64-bit identifier.
///
/// The value packs two fields, most-significant first:
///
/// ```text
///  Bit Index:  63             20 19            0
///              +----------------+--------------+
///  Field:      | timestamp (44) | random (20)  |
///              +----------------+--------------+
///              |<-- MSB -- 64 bits -- LSB ---->|
/// ```
///
/// The timestamp is milliseconds since the Unix epoch (1970 through 2527).
/// The random field gives 1,048,576 distinct values per millisecond.
///
/// Ordering, equality and hashing all act on the raw `u64`, which is also the
/// order of the big-endian bytes and of the hex rendering.
///
/// # Example
/// ```
/// use nano64::Nano64;
///
/// let id = Nano64::encode(1_759_864_645_209, 0x5861C).unwrap();
/// assert_eq!(id.to_hex(), "199C01B6659-5861C");
/// assert_eq!(id.to_bytes(), [25, 156, 1, 182, 101, 149, 134, 28]);
/// assert_eq!(id.timestamp(), 1_759_864_645_209);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Nano64 {
    id: u64,
}

const _: () = {
    assert!(
        Nano64::TIMESTAMP_BITS + Nano64::RANDOM_BITS == u64::BITS,
        "Layout must match underlying type width"
    );
};

impl Nano64 {
    pub const TIMESTAMP_BITS: u32 = 44;
    pub const RANDOM_BITS: u32 = 20;

    pub const RANDOM_SHIFT: u32 = 0;
    pub const TIMESTAMP_SHIFT: u32 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;

    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const RANDOM_MASK: u64 = (1 << Self::RANDOM_BITS) - 1;

    /// The largest encodable timestamp, `2^44 - 1`.
    pub const MAX_TIMESTAMP: u64 = Self::TIMESTAMP_MASK;
    /// The largest encodable random field, `2^20 - 1`.
    pub const MAX_RANDOM: u32 = Self::RANDOM_MASK as u32;

    /// Length of the big-endian byte form.
    pub const BYTES_LEN: usize = 8;

    /// The all-zero identifier, used to mean "absent".
    pub const NIL: Self = Self { id: 0 };
    /// The all-ones identifier.
    pub const MAX: Self = Self { id: u64::MAX };

    /// Packs a timestamp and a random field into an identifier.
    ///
    /// # Errors
    /// - [`RangeError::Timestamp`] if `timestamp` is `2^44` or more
    /// - [`RangeError::Random`] if `random` is `2^20` or more
    pub fn encode(timestamp: u64, random: u32) -> Result<Self> {
        if timestamp > Self::MAX_TIMESTAMP {
            return Err(RangeError::Timestamp { timestamp }.into());
        }
        if random > Self::MAX_RANDOM {
            return Err(RangeError::Random { random }.into());
        }
        Ok(Self::from_parts(timestamp, random))
    }

    /// Packs already-validated fields. Out-of-range bits are masked off.
    pub(crate) const fn from_parts(timestamp: u64, random: u32) -> Self {
        let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let r = (random as u64 & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
        Self { id: t | r }
    }

    /// Wraps a raw 64-bit value. Every `u64` is a valid identifier.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp (milliseconds since the Unix epoch).
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the 20-bit random field.
    #[must_use]
    pub const fn random(&self) -> u32 {
        ((self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK) as u32
    }

    /// Returns `true` if this is the [`Nano64::NIL`] identifier.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.id == Self::NIL.id
    }

    /// Returns the 8-byte big-endian form.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        self.id.to_be_bytes()
    }

    /// Builds an identifier from its 8-byte big-endian form.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; Self::BYTES_LEN]) -> Self {
        Self {
            id: u64::from_be_bytes(bytes),
        }
    }

    /// Builds an identifier from a big-endian byte slice.
    ///
    /// # Errors
    /// Returns [`Error::Length`] unless `bytes` is exactly 8 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::BYTES_LEN] = bytes.try_into().map_err(|_| Error::Length {
            expected: Self::BYTES_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self::from_be_bytes(bytes))
    }

    /// Renders the identifier as `TTTTTTTTTTT-RRRRR`: 11 uppercase hex digits
    /// of timestamp, a dash, then 5 of random.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.id)
    }

    /// Parses a hex rendering produced by [`Nano64::to_hex`].
    ///
    /// Input is case-insensitive. Dashes are ignored wherever they appear and
    /// a leading `0x` is allowed, but exactly 16 hex digits must remain.
    ///
    /// # Errors
    /// Returns [`Error::Format`] on a wrong digit count or a non-hex character.
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self::from_raw(hex::decode(input)?))
    }

    /// Compares two identifiers as unsigned 64-bit numbers.
    ///
    /// The same order holds for their byte forms, their hex strings and their
    /// signed views (see [`Nano64::to_signed`]).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }

    /// Returns `true` if both identifiers hold the same raw value.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Returns the embedded timestamp as a [`SystemTime`].
    ///
    /// # ⚠️ Note
    /// The precision is limited to whole milliseconds.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.timestamp())
    }

    /// Generates a non-monotonic identifier for the current wall-clock time
    /// using the built-in [`ThreadRandom`] generator.
    ///
    /// This does **not** keep any state and so does not order IDs created
    /// within the same millisecond. Use a monotonic generator such as
    /// [`LockMonoNano64Generator`] when that matters.
    ///
    /// # Errors
    /// Only fails if the clock reads past the 44-bit range.
    ///
    /// [`LockMonoNano64Generator`]: crate::LockMonoNano64Generator
    pub fn now() -> Result<Self> {
        crate::generate_now(&ThreadRandom)
    }

    /// Generates an identifier for `timestamp` using [`ThreadRandom`].
    ///
    /// # Errors
    /// Returns [`RangeError::Timestamp`] if `timestamp` exceeds 44 bits.
    pub fn from_timestamp(timestamp: u64) -> Result<Self> {
        Self::from_timestamp_and_rand(timestamp, &ThreadRandom)
    }

    /// Generates an identifier for `timestamp` drawing the random field from
    /// `rng`.
    ///
    /// # Errors
    /// Propagates the source's failure, or returns [`RangeError::Timestamp`]
    /// if `timestamp` exceeds 44 bits.
    pub fn from_timestamp_and_rand<R>(timestamp: u64, rng: &R) -> Result<Self>
    where
        R: RandSource + ?Sized,
    {
        crate::generate(timestamp, rng)
    }

    /// Generates an identifier for the current time from the given sources.
    pub(crate) fn from_sources<T, R>(time: &T, rng: &R) -> Result<Self>
    where
        T: TimeSource + ?Sized,
        R: RandSource + ?Sized,
    {
        crate::generate(time.current_millis(), rng)
    }
}

/// Compares two identifiers as unsigned 64-bit numbers.
///
/// `Ordering` is `#[repr(i8)]`, so `compare(a, b) as i8` yields `-1`, `0` or
/// `1`.
#[must_use]
pub fn compare(a: &Nano64, b: &Nano64) -> Ordering {
    a.compare(b)
}

impl fmt::Display for Nano64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Nano64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nano64")
            .field("id", &format_args!("{:#018x}", self.id))
            .field("timestamp", &self.timestamp())
            .field("random", &format_args!("{:#07x}", self.random()))
            .finish()
    }
}

impl FromStr for Nano64 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&str> for Nano64 {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_hex(s)
    }
}

impl TryFrom<&[u8]> for Nano64 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<u64> for Nano64 {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<[u8; 8]> for Nano64 {
    fn from(bytes: [u8; 8]) -> Self {
        Self::from_be_bytes(bytes)
    }
}

impl From<Nano64> for u64 {
    fn from(id: Nano64) -> Self {
        id.to_raw()
    }
}

impl From<Nano64> for [u8; 8] {
    fn from(id: Nano64) -> Self {
        id.to_bytes()
    }
}
