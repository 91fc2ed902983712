use crate::rand::RandError;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `nano64` can produce.
///
/// Every failure is reported to the immediate caller. Nothing is retried
/// internally and no operation falls back to [`crate::Nano64::NIL`] on error.
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A field exceeded its bit width, or a timestamp bound was invalid.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A byte sequence or payload had the wrong size.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    Length {
        /// The size a well-formed input has.
        expected: usize,
        /// The size that was supplied.
        actual: usize,
    },

    /// A hex string could not be parsed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// An encryption key was not 16, 24, or 32 bytes long.
    #[error("invalid key size: {len} bytes (expected 16, 24, or 32)")]
    KeySize {
        /// The length of the rejected key.
        len: usize,
    },

    /// Decryption failed to verify.
    ///
    /// Carries no detail: a wrong key, a corrupted payload and a truncated
    /// payload are indistinguishable to the caller.
    #[error("authentication failed")]
    Authentication,

    /// The randomness source reported a failure.
    #[error(transparent)]
    Random(#[from] RandError),
}

impl Error {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Range(_) => ErrorKind::Range,
            Self::Length { .. } => ErrorKind::Length,
            Self::Format(_) => ErrorKind::Format,
            Self::KeySize { .. } => ErrorKind::KeySize,
            Self::Authentication => ErrorKind::Authentication,
            Self::Random(_) => ErrorKind::Random,
        }
    }
}

/// Coarse error categories, one per [`Error`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`Error::Range`].
    Range,
    /// See [`Error::Length`].
    Length,
    /// See [`Error::Format`].
    Format,
    /// See [`Error::KeySize`].
    KeySize,
    /// See [`Error::Authentication`].
    Authentication,
    /// See [`Error::Random`].
    Random,
}

/// A value did not fit the Nano64 bit layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum RangeError {
    /// The timestamp does not fit in 44 bits.
    #[error("timestamp {timestamp} exceeds the 44-bit range")]
    Timestamp { timestamp: u64 },

    /// The random value does not fit in 20 bits.
    #[error("random value {random:#x} exceeds the 20-bit range")]
    Random { random: u32 },

    /// A random bit count outside `1..=32` was requested.
    #[error("random bit count must be 1-32, got {bits}")]
    RandomBits { bits: u32 },

    /// A time-range bound was negative.
    #[error("timestamps must be non-negative: start {start}, end {end}")]
    NegativeBound { start: i64, end: i64 },

    /// A time-range start came after its end.
    #[error("range start {start} is after range end {end}")]
    InvertedBound { start: i64, end: i64 },

    /// A monotonic generator ran out of timestamps to bump into.
    #[error("no timestamp after {timestamp} fits in 44 bits")]
    TimestampExhausted { timestamp: u64 },
}

/// A hex string was not a valid Nano64 rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The input did not contain the expected number of hex digits.
    #[error("invalid hex length: expected {expected} digits, got {len}")]
    InvalidLength { expected: usize, len: usize },

    /// The input contained a character that is not a hex digit.
    ///
    /// `index` is the character's position in the input, counting every
    /// character including separators and any `0x` prefix.
    #[error("invalid hex character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },
}
