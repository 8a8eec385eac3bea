//! Adapters between statically typed callables and erased registry entries.
//!
//! [`Callback`] and [`Method`] are implemented for every `Fn` of up to twelve
//! parameters. The argument tuple is a trait parameter, so the compiler picks
//! the implementation from the callable's own signature; a callable whose
//! parameter types cannot be inferred does not satisfy either trait and is
//! rejected at compile time.

use std::{
  any::{
    Any,
    type_name,
  },
  marker::PhantomData,
  sync::Arc,
};

use crate::{
  convert::resolve,
  error::{
    Mismatch,
    Slot,
  },
  value::Value,
};

/// A free-standing callable with argument tuple `Args`.
pub trait Callback<Args>: Send + Sync + 'static {
  type Output: Any + Send;

  /// Number of parameters.
  const ARITY: usize;

  /// Resolve `args` against the parameter types and run the callable once.
  fn call_erased(&self, args: Vec<Value>) -> Result<Value, Mismatch>;
}

/// A callable taking `&S` before its argument tuple `Args`, such as
/// `S::method`.
pub trait Method<S, Args>: Send + Sync + 'static {
  type Output: Any + Send;

  const ARITY: usize;

  fn call_erased(&self, instance: &S, args: Vec<Value>) -> Result<Value, Mismatch>;
}

/// The object-safe form every registered entry is stored as.
pub(crate) trait ErasedCallback: Send + Sync {
  fn call(&self, args: Vec<Value>) -> Result<Value, Mismatch>;
}

/// Entry for a callable registered with [`Callback`].
pub(crate) struct Typed<F, Args> {
  callback: F,
  _args:    PhantomData<fn(Args)>,
}

impl<F, Args> Typed<F, Args> {
  pub(crate) fn new(callback: F) -> Self {
    Self {
      callback,
      _args: PhantomData,
    }
  }
}

impl<F, Args> ErasedCallback for Typed<F, Args>
where
  F: Callback<Args>,
  Args: 'static,
{
  fn call(&self, args: Vec<Value>) -> Result<Value, Mismatch> {
    self.callback.call_erased(args)
  }
}

/// Entry for a method bound to a shared instance.
pub(crate) struct Bound<S, M, Args> {
  instance: Arc<S>,
  method:   M,
  _args:    PhantomData<fn(Args)>,
}

impl<S, M, Args> Bound<S, M, Args> {
  pub(crate) fn new(instance: Arc<S>, method: M) -> Self {
    Self {
      instance,
      method,
      _args: PhantomData,
    }
  }
}

impl<S, M, Args> ErasedCallback for Bound<S, M, Args>
where
  S: Send + Sync + 'static,
  M: Method<S, Args>,
  Args: 'static,
{
  fn call(&self, args: Vec<Value>) -> Result<Value, Mismatch> {
    self.method.call_erased(&self.instance, args)
  }
}

fn check_arity(expected: usize, actual: usize) -> Result<(), Mismatch> {
  if expected == actual {
    Ok(())
  } else {
    Err(Mismatch::Arity { expected, actual })
  }
}

/// Resolve the argument at `index`, reporting its position on failure.
pub(crate) fn argument<T: Any + Send>(index: usize, value: Value) -> Result<T, Mismatch> {
  resolve::<T>(value).map_err(|value| {
    Mismatch::Type {
      slot:     Slot::Argument(index),
      expected: type_name::<T>(),
      found:    value.type_name(),
    }
  })
}

macro_rules! count {
  () => { 0usize };
  ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

// Every argument is resolved before the callable runs, so a mismatch in a
// later position leaves the callable untouched.
macro_rules! resolve_args {
  ($args:ident; $($arg:ident),*) => {
    #[allow(unused_mut, unused_variables)]
    let mut $args = $args.into_iter().enumerate();
    $(
      let $arg = match $args.next() {
        Some((index, value)) => argument::<$arg>(index, value)?,
        None => unreachable!("arity was checked"),
      };
    )*
  };
}

macro_rules! impl_callback {
  ($($arg:ident),*) => {
    impl<Func, Ret, $($arg,)*> Callback<($($arg,)*)> for Func
    where
      Func: Fn($($arg),*) -> Ret + Send + Sync + 'static,
      Ret: Any + Send,
      $($arg: Any + Send,)*
    {
      type Output = Ret;

      const ARITY: usize = count!($($arg)*);

      #[allow(non_snake_case)]
      fn call_erased(&self, args: Vec<Value>) -> Result<Value, Mismatch> {
        check_arity(Self::ARITY, args.len())?;
        resolve_args!(args; $($arg),*);
        Ok(Value::new((self)($($arg),*)))
      }
    }

    impl<Func, S, Ret, $($arg,)*> Method<S, ($($arg,)*)> for Func
    where
      Func: Fn(&S, $($arg),*) -> Ret + Send + Sync + 'static,
      Ret: Any + Send,
      $($arg: Any + Send,)*
    {
      type Output = Ret;

      const ARITY: usize = count!($($arg)*);

      #[allow(non_snake_case)]
      fn call_erased(&self, instance: &S, args: Vec<Value>) -> Result<Value, Mismatch> {
        check_arity(Self::ARITY, args.len())?;
        resolve_args!(args; $($arg),*);
        Ok(Value::new((self)(instance, $($arg),*)))
      }
    }
  };
}

impl_callback!();
impl_callback!(A0);
impl_callback!(A0, A1);
impl_callback!(A0, A1, A2);
impl_callback!(A0, A1, A2, A3);
impl_callback!(A0, A1, A2, A3, A4);
impl_callback!(A0, A1, A2, A3, A4, A5);
impl_callback!(A0, A1, A2, A3, A4, A5, A6);
impl_callback!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_callback!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_callback!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_callback!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_callback!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
