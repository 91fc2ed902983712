//! Fixed-width hex text form of a [`Nano64`](crate::Nano64).
//!
//! Output is always `TTTTTTTTTTT-RRRRR`: 11 uppercase digits of timestamp, a
//! dash, then 5 digits of random. Input parsing is looser (see [`decode`]).

use crate::FormatError;

/// Number of hex digits in a rendered identifier, excluding the separator.
pub(crate) const HEX_DIGITS: usize = 16;

/// Digits that hold the timestamp; the separator is inserted after them.
const TIMESTAMP_DIGITS: usize = 11;

const SEPARATOR: char = '-';

pub(crate) fn encode(raw: u64) -> String {
    let mut out = ::hex::encode_upper(raw.to_be_bytes());
    out.insert(TIMESTAMP_DIGITS, SEPARATOR);
    out
}

/// Parses 16 hex digits into a raw value.
///
/// Case-insensitive. Every `-` is dropped first, then an optional `0x`/`0X`
/// prefix is stripped from what remains. Errors report characters by their
/// position in `input`.
pub(crate) fn decode(input: &str) -> Result<u64, FormatError> {
    let digits: Vec<(usize, char)> = input
        .chars()
        .enumerate()
        .filter(|&(_, c)| c != SEPARATOR)
        .collect();
    let digits = match digits.as_slice() {
        [(_, '0'), (_, 'x' | 'X'), rest @ ..] => rest,
        all => all,
    };

    if digits.len() != HEX_DIGITS {
        return Err(FormatError::InvalidLength {
            expected: HEX_DIGITS,
            len: digits.len(),
        });
    }

    let mut ascii = [0u8; HEX_DIGITS];
    for (slot, &(index, character)) in ascii.iter_mut().zip(digits) {
        if !character.is_ascii_hexdigit() {
            return Err(FormatError::InvalidCharacter { character, index });
        }
        *slot = character as u8;
    }

    let mut bytes = [0u8; HEX_DIGITS / 2];
    ::hex::decode_to_slice(ascii, &mut bytes)
        .map_err(|err| from_hex_error(err, input, HEX_DIGITS))?;
    Ok(u64::from_be_bytes(bytes))
}

/// Maps a `hex` crate failure on `input` onto [`FormatError`].
///
/// `hex` reports the offending byte and its byte offset; this recovers the
/// full character and its position among the characters of `input`.
/// `expected` is the digit count a well-formed input has.
pub(crate) fn from_hex_error(err: ::hex::FromHexError, input: &str, expected: usize) -> FormatError {
    match err {
        ::hex::FromHexError::InvalidHexCharacter { c, index } => {
            let character = input
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(c);
            let index = input
                .get(..index)
                .map_or(index, |head| head.chars().count());
            FormatError::InvalidCharacter { character, index }
        }
        _ => FormatError::InvalidLength {
            expected,
            len: input.chars().count(),
        },
    }
}
