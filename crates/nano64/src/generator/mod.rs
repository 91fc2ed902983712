mod atomic_mono;
mod basic;
mod default;
mod interface;
mod lock_mono;
mod mono;
mod mutex;

pub use atomic_mono::*;
pub use basic::*;
pub use default::*;
pub use interface::*;
pub use lock_mono::*;
