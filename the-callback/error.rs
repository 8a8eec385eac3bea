use std::fmt;

use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, CallbackError>;

/// Errors returned by an invocation.
///
/// Keys are rendered through their `Debug` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
  #[error("key {key} not found")]
  KeyNotFound { key: String },
  #[error("wrong number of arguments for key {key}: expected {expected}, got {actual}")]
  ArityMismatch {
    key:      String,
    expected: usize,
    actual:   usize,
  },
  #[error(
    "type mismatch when invoking callback for key {key}: {slot} expected `{expected}`, found \
     `{found}`"
  )]
  TypeMismatch {
    key:      String,
    slot:     Slot,
    expected: &'static str,
    found:    &'static str,
  },
}

impl CallbackError {
  pub(crate) fn key_not_found(key: &impl fmt::Debug) -> Self {
    Self::KeyNotFound {
      key: format!("{key:?}"),
    }
  }
}

/// Where a type mismatch was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  /// Zero-based argument position.
  Argument(usize),
  Return,
}

impl fmt::Display for Slot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Slot::Argument(index) => write!(f, "argument {index}"),
      Slot::Return => f.write_str("return value"),
    }
  }
}

/// A failed call as seen by an entry, which does not know its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
  Arity {
    expected: usize,
    actual:   usize,
  },
  Type {
    slot:     Slot,
    expected: &'static str,
    found:    &'static str,
  },
}

impl Mismatch {
  /// Attach the key the failing entry was registered under.
  pub fn with_key(self, key: &impl fmt::Debug) -> CallbackError {
    let key = format!("{key:?}");
    match self {
      Mismatch::Arity { expected, actual } => {
        CallbackError::ArityMismatch {
          key,
          expected,
          actual,
        }
      },
      Mismatch::Type {
        slot,
        expected,
        found,
      } => {
        CallbackError::TypeMismatch {
          key,
          slot,
          expected,
          found,
        }
      },
    }
  }
}
