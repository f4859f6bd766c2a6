//! Logging for the shape tree and animation loop.
//!
//! With the `tracing` feature on, `debug!`, `trace!` and `warn!` are the
//! `tracing` macros; without it they expand to nothing. Levels in use:
//! - `debug`: shapes created, attached, detached or removed; selection
//!   toggles; canvas resizes; animation start and stop
//! - `trace`: every tick and every bounce reflection
//! - `warn`: rejected edits (removing the root, removing a detached shape,
//!   unknown kind tags)

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
