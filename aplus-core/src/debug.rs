//! logging switch.
//!
//! every event goes through these macros so that building without the
//! `logging` feature removes them entirely.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        tracing::debug!($($arg)*)
    };
}

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        tracing::trace!($($arg)*)
    };
}

pub(crate) use debug;
pub(crate) use trace;
