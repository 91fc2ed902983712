//! Authenticated encryption of identifiers with AES-GCM.
//!
//! An [`EncryptedNano64`] payload is laid out as
//!
//! ```text
//! nonce (12) || ciphertext (8) || tag (16)
//! ```
//!
//! for 36 bytes in total, or 72 hex characters. The nonce is drawn fresh from
//! the configured [`RandSource`](crate::RandSource) on every call, so
//! encrypting the same identifier twice yields different payloads. Anyone
//! without the key sees neither the timestamp nor the random field.

mod cipher;
mod config;
#[cfg(test)]
mod tests;

pub use config::*;

/// Width of the per-payload AES-GCM nonce.
pub const NONCE_LEN: usize = 12;
/// Width of the AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;
/// Size of every payload produced by [`EncryptionConfig::encrypt`].
pub const ENCRYPTED_LEN: usize = NONCE_LEN + crate::Nano64::BYTES_LEN + TAG_LEN;
/// Shortest input [`EncryptionConfig::decrypt`] will attempt to open.
pub const MIN_PAYLOAD_LEN: usize = NONCE_LEN + TAG_LEN;
