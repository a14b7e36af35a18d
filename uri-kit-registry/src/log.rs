//! Crate-private logging macros.
//!
//! Forward to the `log` crate when the `log` feature is enabled and expand to
//! nothing otherwise.
#![allow(unused, reason = "logger")]

macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!($($tt)*);
    };
}

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!($($tt)*);
    };
}

pub(crate) use {debug, trace};
