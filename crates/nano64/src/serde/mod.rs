//! Helpers for `#[serde(with = "...")]` on [`Nano64`](crate::Nano64) fields.
//!
//! | module             | field type       | wire form                      |
//! |--------------------|------------------|--------------------------------|
//! | `as_hex`           | `Nano64`         | `"TTTTTTTTTTT-RRRRR"`          |
//! | `as_native`        | `Nano64`         | `u64`                          |
//! | `as_signed`        | `Nano64`         | `i64` (order-preserving view)  |
//! | `as_hex_option`    | `Option<Nano64>` | hex string or `null`           |
//! | `as_native_option` | `Option<Nano64>` | `u64` or `null`                |
//!
//! # Example
//! ```
//! use nano64::{Nano64, serde::as_hex};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Row {
//!     #[serde(with = "as_hex")]
//!     id: Nano64,
//! }
//! ```

mod nano64;

pub use nano64::*;
