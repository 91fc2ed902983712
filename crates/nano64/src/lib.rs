//! # nano64
//!
//! Compact, time-sortable 64-bit identifiers.
//!
//! A [`Nano64`] packs a 44-bit Unix-millisecond timestamp above 20 random
//! bits:
//!
//! ```text
//!  63                                        20 19                0
//! +--------------------------------------------+-------------------+
//! |          timestamp (ms, 44 bits)           |  random (20 bits) |
//! +--------------------------------------------+-------------------+
//! ```
//!
//! so unsigned integer order, big-endian byte order and hex string order all
//! agree with creation time at millisecond granularity. Timestamps run until
//! the year 2527.
//!
//! ## Generating IDs
//!
//! - [`Nano64::now`] / [`generate`]: stateless, random within a millisecond
//! - [`monotonic_now`]: process-wide, strictly increasing
//! - [`LockMonoNano64Generator`] / [`AtomicMonoNano64Generator`]: strictly
//!   increasing per instance, with injectable [`TimeSource`] and
//!   [`RandSource`]
//!
//! ```
//! use nano64::{LockMonoNano64Generator, Nano64, SystemClock, ThreadRandom};
//!
//! let generator = LockMonoNano64Generator::new(SystemClock, ThreadRandom);
//! let id = generator.try_next_id().unwrap();
//!
//! let hex = id.to_hex();
//! assert_eq!(hex.len(), 17);
//! assert_eq!(Nano64::from_hex(&hex).unwrap(), id);
//! assert_eq!(Nano64::from_signed(id.to_signed()), id);
//! ```
//!
//! ## Encryption
//!
//! With the `encrypted` feature (on by default), [`EncryptionConfig`] turns an
//! identifier into an opaque AES-GCM payload that hides the timestamp, and
//! back.
//!
//! ## Features
//!
//! - `encrypted`: AES-GCM payloads (default)
//! - `serde`: `#[serde(with = ...)]` helpers in [`serde`](crate::serde)
//! - `tracing`: `tracing` spans and events on the hot paths
//! - `parking-lot`: `parking_lot::Mutex` for the lock-based generator
//! - `cache-padded`: pad generator state to a cache line
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "encrypted")]
mod encrypted;
mod error;
mod generator;
mod id;
mod rand;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

#[cfg_attr(docsrs, doc(cfg(feature = "encrypted")))]
#[cfg(feature = "encrypted")]
pub use crate::encrypted::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
