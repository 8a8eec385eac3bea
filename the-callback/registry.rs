use std::{
  any::{
    Any,
    type_name,
  },
  collections::HashMap,
  fmt,
  hash::Hash,
  sync::Arc,
};

use crate::{
  EntrySlot,
  args::IntoArgs,
  callback::{
    Bound,
    Callback,
    Method,
    Typed,
  },
  entry_slot,
  error::{
    CallbackError,
    Mismatch,
    Result,
    Slot,
  },
  value::Value,
};

/// Keyed table of type-erased callbacks.
///
/// Registration needs `&mut self` and invocation `&self`; there is no locking
/// inside. Share a registry between threads by wrapping it in a lock.
pub struct CallbackRegistry<K> {
  entries: HashMap<K, EntrySlot>,
}

#[cfg(feature = "shared-entries")]
impl<K: Clone> Clone for CallbackRegistry<K> {
  fn clone(&self) -> Self {
    Self {
      entries: self.entries.clone(),
    }
  }
}

impl<K> Default for CallbackRegistry<K> {
  fn default() -> Self {
    Self {
      entries: HashMap::new(),
    }
  }
}

impl<K: fmt::Debug> fmt::Debug for CallbackRegistry<K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CallbackRegistry")
      .field("keys", &self.entries.keys().collect::<Vec<_>>())
      .finish()
  }
}

impl<K> CallbackRegistry<K>
where
  K: Eq + Hash + fmt::Debug,
{
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: HashMap::with_capacity(capacity),
    }
  }

  /// Register `callback` under `key`, deducing its signature.
  ///
  /// Replaces any callback already registered under `key`.
  pub fn register<Args, F>(&mut self, key: K, callback: F)
  where
    Args: 'static,
    F: Callback<Args>,
  {
    tracing::debug!(
      ?key,
      arity = F::ARITY,
      args = type_name::<Args>(),
      output = type_name::<F::Output>(),
      "registering callback"
    );
    self.insert(key, entry_slot(Typed::<F, Args>::new(callback)));
  }

  /// Register `callback` under `key` with a declared signature.
  ///
  /// Use this with a function pointer or a boxed `dyn Fn` whose type spells
  /// out the signature, which is how a closure with unannotated parameters is
  /// registered.
  ///
  /// ```
  /// # use the_callback::CallbackRegistry;
  /// let mut registry = CallbackRegistry::new();
  ///
  /// let double: fn(i64) -> i64 = |n| n * 2;
  /// registry.register_typed::<(i64,), i64, _>("double", double);
  ///
  /// let shout: Box<dyn Fn(String) -> String + Send + Sync> = Box::new(|s| s.to_uppercase());
  /// registry.register_typed::<(String,), String, _>("shout", shout);
  ///
  /// assert_eq!(registry.invoke_as::<i64>(&"double", (21i64,)).unwrap(), 42);
  /// assert_eq!(registry.invoke_as::<String>(&"shout", ("hi",)).unwrap(), "HI");
  /// ```
  pub fn register_typed<Args, Ret, F>(&mut self, key: K, callback: F)
  where
    Args: 'static,
    Ret: Any + Send,
    F: Callback<Args, Output = Ret>,
  {
    self.register::<Args, F>(key, callback);
  }

  /// Register `method` bound to `instance` under `key`.
  ///
  /// The instance stays alive for as long as the entry does.
  pub fn register_method<S, Args, M>(&mut self, key: K, instance: Arc<S>, method: M)
  where
    S: Send + Sync + 'static,
    Args: 'static,
    M: Method<S, Args>,
  {
    tracing::debug!(
      ?key,
      arity = M::ARITY,
      receiver = type_name::<S>(),
      args = type_name::<Args>(),
      output = type_name::<M::Output>(),
      "registering method"
    );
    self.insert(key, entry_slot(Bound::<S, M, Args>::new(instance, method)));
  }

  fn insert(&mut self, key: K, entry: EntrySlot) {
    if self.entries.insert(key, entry).is_some() {
      tracing::debug!("replaced previously registered callback");
    }
  }

  /// Invoke the callback under `key`, discarding whatever it returns.
  pub fn invoke(&self, key: &K, args: impl IntoArgs) -> Result<()> {
    self.invoke_erased(key, args.into_args()).map(drop)
  }

  /// Invoke the callback under `key` and take its result as an `R`.
  ///
  /// The result must be exactly an `R`; the argument conversions do not apply
  /// to it.
  pub fn invoke_as<R: Any>(&self, key: &K, args: impl IntoArgs) -> Result<R> {
    let result = self.invoke_erased(key, args.into_args())?;
    result.downcast::<R>().map_err(|result| {
      let err = Mismatch::Type {
        slot:     Slot::Return,
        expected: type_name::<R>(),
        found:    result.type_name(),
      }
      .with_key(key);
      tracing::debug!(%err, "invocation failed");
      err
    })
  }

  /// Invoke the callback under `key` with already erased arguments.
  pub fn invoke_erased(&self, key: &K, args: Vec<Value>) -> Result<Value> {
    let Some(entry) = self.entries.get(key) else {
      let err = CallbackError::key_not_found(key);
      tracing::debug!(%err, "invocation failed");
      return Err(err);
    };

    tracing::trace!(?key, args = args.len(), "invoking callback");
    entry.call(args).map_err(|mismatch| {
      let err = mismatch.with_key(key);
      tracing::debug!(%err, "invocation failed");
      err
    })
  }

  pub fn contains(&self, key: &K) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Registered keys, in no particular order.
  pub fn keys(&self) -> impl Iterator<Item = &K> {
    self.entries.keys()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  enum Key {
    Add,
    Greet,
    Unused,
  }

  #[test]
  fn registry_starts_empty() {
    let registry = CallbackRegistry::<Key>::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(!registry.contains(&Key::Add));
  }

  #[test]
  fn register_and_invoke() {
    let mut registry = CallbackRegistry::with_capacity(2);
    registry.register(Key::Add, |a: i32, b: i32| a + b);
    registry.register(Key::Greet, |name: String| format!("hello, {name}"));

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.invoke_as::<i32>(&Key::Add, (2, 3)).unwrap(), 5);
    assert_eq!(
      registry
        .invoke_as::<String>(&Key::Greet, ("world",))
        .unwrap(),
      "hello, world"
    );
  }

  #[test]
  fn missing_key_leaves_table_untouched() {
    let mut registry = CallbackRegistry::new();
    registry.register(Key::Add, |a: i32, b: i32| a + b);

    let err = registry.invoke(&Key::Unused, ()).unwrap_err();
    assert_eq!(err, CallbackError::KeyNotFound {
      key: "Unused".into(),
    });
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn return_type_must_match_exactly() {
    let mut registry = CallbackRegistry::new();
    registry.register(Key::Add, |a: i32, b: i32| a + b);

    let err = registry.invoke_as::<i64>(&Key::Add, (1, 2)).unwrap_err();
    assert_eq!(err, CallbackError::TypeMismatch {
      key:      "Add".into(),
      slot:     Slot::Return,
      expected: "i64",
      found:    "i32",
    });
  }

  #[test]
  fn debug_lists_keys() {
    let mut registry = CallbackRegistry::new();
    registry.register(Key::Greet, || ());
    assert_eq!(
      format!("{registry:?}"),
      "CallbackRegistry { keys: [Greet] }"
    );
  }
}
