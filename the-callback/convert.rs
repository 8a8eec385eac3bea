//! Argument resolution.
//!
//! A supplied [`Value`] may stand in for a callback parameter of type `T` when
//! one of the rules in [`Conversion::ORDER`] applies. The table is closed:
//! exact matching works for every type, while the string and numeric rules
//! only build the target types listed in [`CStrSource::build`] and
//! [`Integral::cast`].

use std::{
  any::{
    Any,
    TypeId,
    type_name,
  },
  ffi::{
    CStr,
    CString,
    OsString,
    c_int,
    c_long,
    c_longlong,
    c_uint,
  },
  path::PathBuf,
  sync::Arc,
};

use crate::value::Value;

/// The rules a supplied value is checked against, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
  /// The supplied type is the expected type.
  Exact,
  /// The supplied value is a `&'static str` or `&'static CStr` and the
  /// expected type is built from it.
  CString,
  /// The supplied value is a C integral and the expected type is numeric.
  Numeric,
}

impl Conversion {
  pub const ORDER: [Conversion; 3] = [Conversion::Exact, Conversion::CString, Conversion::Numeric];

  /// Try this single rule. The value is handed back if the rule does not
  /// apply.
  pub fn apply<T: Any + Send>(self, value: Value) -> Result<T, Value> {
    let built = match self {
      Conversion::Exact => return value.downcast::<T>(),
      Conversion::CString => {
        CStrSource::from_value(&value).and_then(|source| source.build(TypeId::of::<T>()))
      },
      Conversion::Numeric => {
        Integral::from_value(&value).and_then(|integral| integral.cast(TypeId::of::<T>()))
      },
    };
    match built.map(Value::downcast::<T>) {
      Some(Ok(converted)) => Ok(converted),
      _ => Err(value),
    }
  }
}

/// Resolve `value` to a `T` using the first rule of [`Conversion::ORDER`] that
/// applies.
///
/// On failure the original value is returned so the caller can report what
/// was supplied.
pub fn resolve<T: Any + Send>(value: Value) -> Result<T, Value> {
  let mut value = value;
  for rule in Conversion::ORDER {
    let found = value.type_name();
    value = match rule.apply::<T>(value) {
      Ok(resolved) => {
        tracing::trace!(?rule, expected = type_name::<T>(), found, "resolved argument");
        return Ok(resolved);
      },
      Err(value) => value,
    };
  }
  Err(value)
}

/// The character sequences accepted by [`Conversion::CString`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CStrSource<'a> {
  /// A string literal.
  Str(&'a str),
  /// A null-terminated C string.
  CStr(&'a CStr),
}

impl<'a> CStrSource<'a> {
  /// Only `&'static str` and `&'static CStr` qualify; owned strings must
  /// match exactly.
  pub fn from_value(value: &'a Value) -> Option<Self> {
    if let Some(s) = value.downcast_ref::<&'static str>() {
      return Some(CStrSource::Str(*s));
    }
    value
      .downcast_ref::<&'static CStr>()
      .map(|s| CStrSource::CStr(*s))
  }

  /// The sequence as UTF-8, replacing invalid bytes of a C string.
  pub fn to_string_lossy(self) -> String {
    match self {
      CStrSource::Str(s) => s.to_owned(),
      CStrSource::CStr(s) => s.to_string_lossy().into_owned(),
    }
  }

  /// Build a value of the type identified by `target`.
  ///
  /// Targets: `String`, `Box<str>`, `Arc<str>`, `PathBuf`, `OsString` and
  /// `CString`. A `&str` with an interior NUL cannot become a `CString`.
  pub fn build(self, target: TypeId) -> Option<Value> {
    if target == TypeId::of::<String>() {
      Some(Value::new(self.to_string_lossy()))
    } else if target == TypeId::of::<Box<str>>() {
      Some(Value::new(self.to_string_lossy().into_boxed_str()))
    } else if target == TypeId::of::<Arc<str>>() {
      Some(Value::new(Arc::<str>::from(self.to_string_lossy())))
    } else if target == TypeId::of::<PathBuf>() {
      Some(Value::new(PathBuf::from(self.to_string_lossy())))
    } else if target == TypeId::of::<OsString>() {
      Some(Value::new(OsString::from(self.to_string_lossy())))
    } else if target == TypeId::of::<CString>() {
      match self {
        CStrSource::Str(s) => CString::new(s).ok().map(Value::new),
        CStrSource::CStr(s) => Some(Value::new(s.to_owned())),
      }
    } else {
      None
    }
  }
}

/// The integral types accepted by [`Conversion::Numeric`].
///
/// `c_long` and `c_longlong` can be the same Rust type; the first match in
/// [`Integral::from_value`] wins, which yields the same cast either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integral {
  Int(c_int),
  Long(c_long),
  UInt(c_uint),
  LongLong(c_longlong),
}

impl Integral {
  pub fn from_value(value: &Value) -> Option<Self> {
    if let Some(&v) = value.downcast_ref::<c_int>() {
      Some(Integral::Int(v))
    } else if let Some(&v) = value.downcast_ref::<c_long>() {
      Some(Integral::Long(v))
    } else if let Some(&v) = value.downcast_ref::<c_uint>() {
      Some(Integral::UInt(v))
    } else {
      value
        .downcast_ref::<c_longlong>()
        .map(|&v| Integral::LongLong(v))
    }
  }

  pub fn is_zero(self) -> bool {
    match self {
      Integral::Int(v) => v == 0,
      Integral::Long(v) => v == 0,
      Integral::UInt(v) => v == 0,
      Integral::LongLong(v) => v == 0,
    }
  }

  /// Cast to the arithmetic type identified by `target` with `as`, or to
  /// `bool` by comparing against zero.
  pub fn cast(self, target: TypeId) -> Option<Value> {
    macro_rules! cast_to {
      ($integral:ident, $target:ident; $($ty:ty),* $(,)?) => {
        $(
          if $target == TypeId::of::<$ty>() {
            return Some(Value::new(match $integral {
              Integral::Int(v) => v as $ty,
              Integral::Long(v) => v as $ty,
              Integral::UInt(v) => v as $ty,
              Integral::LongLong(v) => v as $ty,
            }));
          }
        )*
      };
    }

    let integral = self;
    cast_to!(
      integral, target;
      i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    );
    (target == TypeId::of::<bool>()).then(|| Value::new(!integral.is_zero()))
  }
}
