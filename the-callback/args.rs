use std::any::Any;

use crate::value::Value;

/// Caller-side argument lists.
///
/// Implemented for tuples of up to twelve values (`()` for none) and for an
/// already erased `Vec<Value>`. A single argument is written as a one-element
/// tuple: `("0xBEBEFF",)`.
pub trait IntoArgs {
  fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for Vec<Value> {
  fn into_args(self) -> Vec<Value> {
    self
  }
}

macro_rules! impl_into_args {
  ($($arg:ident),*) => {
    impl<$($arg: Any + Send,)*> IntoArgs for ($($arg,)*) {
      #[allow(non_snake_case)]
      fn into_args(self) -> Vec<Value> {
        let ($($arg,)*) = self;
        vec![$(Value::new($arg)),*]
      }
    }
  };
}

impl_into_args!();
impl_into_args!(A0);
impl_into_args!(A0, A1);
impl_into_args!(A0, A1, A2);
impl_into_args!(A0, A1, A2, A3);
impl_into_args!(A0, A1, A2, A3, A4);
impl_into_args!(A0, A1, A2, A3, A4, A5);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
