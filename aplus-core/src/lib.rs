//! Promise/A+ promises over a small dynamic value model.
//!
//! a [`Promise`] settles at most once, chains through [`Promise::then`] and
//! adopts the outcome of any thenable it is fulfilled with. notifications that
//! must not run synchronously are queued on the thread's [`Runtime`].
//!
//! ```
//! use aplus_core::{Function, Promise, Runtime, Value};
//!
//! let p = Promise::new();
//! let doubled = p.on_fulfilled(Function::unary(|v| {
//!     Ok(Value::from(v.as_number().unwrap_or_default() * 2.0))
//! }));
//!
//! p.fulfill(21);
//! Runtime::current().run_until_idle();
//! assert_eq!(doubled.value(), Some(Value::from(42)));
//! ```

pub mod builtins;
pub mod runtime;
pub mod types;

mod conversion;
mod debug;
mod error;

pub use builtins::{
    function::Function, object::JObject, object_builder::ObjectBuilder, promise::Promise,
    promise::PromiseState,
};
pub use error::Error;
pub use runtime::{NotifyMode, Runtime, RuntimeOptions};
pub use types::{Thenable, Value};
