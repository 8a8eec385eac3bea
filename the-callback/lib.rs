//! # the-callback
//!
//! A key-addressed registry of callbacks with independent signatures.
//!
//! Callbacks of any arity (up to twelve) and return type are stored behind one
//! erased representation. Callers invoke them by key with statically typed
//! arguments; the registry checks the argument count and types on every call
//! and applies a small, closed set of conversions when the types differ but
//! are compatible.
//!
//! ## Core Concepts
//!
//! - **Keys**: any `Eq + Hash + Debug` type, usually a fieldless enum
//! - **Entries**: one callback per key; registering again replaces it
//! - **Values**: [`Value`] carries one argument or result with its type
//!   identity
//! - **Conversions**: exact match, string construction from `&'static str` or
//!   `&'static CStr`, and `as` casts from C integral types to numbers and
//!   `bool` (see [`Conversion`])
//! - **Errors**: [`CallbackError`] for unknown keys, wrong argument counts and
//!   type mismatches
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use the_callback::CallbackRegistry;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Stream {
//!   Open,
//!   Close,
//! }
//!
//! struct Streams;
//!
//! impl Streams {
//!   fn open(&self, id: String, buffers: i32) -> String {
//!     format!("{id}:{buffers}")
//!   }
//! }
//!
//! let mut registry = CallbackRegistry::new();
//! registry.register(Stream::Close, |id: String| println!("closing {id}"));
//! registry.register_method(Stream::Open, Arc::new(Streams), Streams::open);
//!
//! registry.invoke(&Stream::Close, ("0xBEBEFF",)).unwrap();
//! let opened = registry
//!   .invoke_as::<String>(&Stream::Open, ("X1234567X", 20))
//!   .unwrap();
//! assert_eq!(opened, "X1234567X:20");
//! ```
//!
//! ## Conversions
//!
//! ```rust
//! use the_callback::CallbackRegistry;
//!
//! let mut registry = CallbackRegistry::new();
//! registry.register("scale", |factor: f64| factor * 1.5);
//!
//! // An `i32` argument is cast to the `f64` parameter.
//! assert_eq!(registry.invoke_as::<f64>(&"scale", (20,)).unwrap(), 30.0);
//!
//! // A `String` is never turned into a number.
//! assert!(registry.invoke(&"scale", (String::from("20"),)).is_err());
//! ```
//!
//! ## Signature Deduction
//!
//! Signatures are deduced from the callable's `Fn` implementation. A closure
//! whose parameter types cannot be inferred is rejected at compile time:
//!
//! ```rust,compile_fail
//! use the_callback::CallbackRegistry;
//!
//! let mut registry = CallbackRegistry::new();
//! registry.register("double", |n| n * 2);
//! ```
//!
//! Annotate the parameters, or use
//! [`CallbackRegistry::register_typed`] with a value whose type spells out the
//! signature.
//!
//! ## Shared Entries (Feature: `shared-entries`)
//!
//! Enable `shared-entries` to store entries behind `Arc` so registries are
//! cheap to clone:
//!
//! ```rust,ignore
//! // In Cargo.toml: the-callback = { features = ["shared-entries"] }
//! let base = registry.clone();
//! ```

mod args;
mod callback;
mod convert;
mod error;
mod registry;
mod value;

pub use args::IntoArgs;
pub use callback::{
  Callback,
  Method,
};
pub use convert::{
  CStrSource,
  Conversion,
  Integral,
  resolve,
};
pub use error::{
  CallbackError,
  Mismatch,
  Result,
  Slot,
};
pub use registry::CallbackRegistry;
pub use value::Value;

use crate::callback::ErasedCallback;

/// Storage type for a registered entry.
///
/// With `shared-entries` enabled, entries are shared via `Arc` so cloning a
/// registry does not clone callbacks.
#[cfg(feature = "shared-entries")]
pub(crate) type EntrySlot = std::sync::Arc<dyn ErasedCallback>;

/// Storage type for a registered entry.
///
/// With `shared-entries` disabled, entries are uniquely owned.
#[cfg(not(feature = "shared-entries"))]
pub(crate) type EntrySlot = Box<dyn ErasedCallback>;

#[cfg(feature = "shared-entries")]
pub(crate) fn entry_slot<E: ErasedCallback + 'static>(entry: E) -> EntrySlot {
  std::sync::Arc::new(entry)
}

#[cfg(not(feature = "shared-entries"))]
pub(crate) fn entry_slot<E: ErasedCallback + 'static>(entry: E) -> EntrySlot {
  Box::new(entry)
}
