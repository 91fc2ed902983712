pub(crate) mod hex;
mod nano64;
mod signed;

pub use nano64::*;
pub use signed::*;
