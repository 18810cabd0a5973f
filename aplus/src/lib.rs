//! typed front end of `aplus-core`.
//!
//! holds the adapter consumed by Promise/A+ compliance suites, a trait for
//! turning Rust types into thenables and helpers for writing handlers as plain
//! closures.

pub mod adapter;

mod runtime;
mod traits;

pub use adapter::{fulfilled, pending, rejected, Deferred};
pub use runtime::*;
pub use traits::*;

pub use aplus_core::{
    Error, Function, JObject, NotifyMode, ObjectBuilder, Promise, PromiseState, Runtime,
    RuntimeOptions, Value,
};
