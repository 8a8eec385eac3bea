//! The erased value passed into and out of registered callbacks.

use std::{
  any::{
    Any,
    TypeId,
    type_name,
  },
  fmt,
};

/// A value of any `'static + Send` type together with its runtime type
/// identity.
///
/// The unit value `()` stands for "no value" and is what void callbacks
/// return.
pub struct Value {
  inner:     Box<dyn Any + Send>,
  type_name: &'static str,
}

impl Value {
  pub fn new<T: Any + Send>(value: T) -> Self {
    Self {
      inner:     Box::new(value),
      type_name: type_name::<T>(),
    }
  }

  pub fn unit() -> Self {
    Self::new(())
  }

  /// Identity of the contained type.
  pub fn type_id(&self) -> TypeId {
    (*self.inner).type_id()
  }

  /// Name of the contained type, for diagnostics only.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn is<T: Any>(&self) -> bool {
    self.inner.is::<T>()
  }

  pub fn is_unit(&self) -> bool {
    self.is::<()>()
  }

  /// Move the contained value out if it is exactly a `T`, otherwise hand the
  /// value back untouched.
  pub fn downcast<T: Any>(self) -> Result<T, Value> {
    let Self { inner, type_name } = self;
    match inner.downcast::<T>() {
      Ok(value) => Ok(*value),
      Err(inner) => Err(Self { inner, type_name }),
    }
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.inner.downcast_ref::<T>()
  }
}

impl Default for Value {
  fn default() -> Self {
    Self::unit()
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Value")
      .field("type_name", &self.type_name)
      .finish_non_exhaustive()
  }
}
