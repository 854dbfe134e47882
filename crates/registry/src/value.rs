//! Index key values and composite keys.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

/// A single index-field value.
///
/// Unsigned integers that fit in `i64` normalize to [`KeyValue::Int`], so a key built
/// from a `u32` field matches a lookup made with an integer literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyValue {
	/// Absent optional value.
	Null,
	Bool(bool),
	Int(i64),
	/// Only used for values above `i64::MAX`.
	UInt(u64),
	Str(Box<str>),
}

impl fmt::Display for KeyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KeyValue::Null => f.write_str("null"),
			KeyValue::Bool(v) => write!(f, "{v}"),
			KeyValue::Int(v) => write!(f, "{v}"),
			KeyValue::UInt(v) => write!(f, "{v}"),
			KeyValue::Str(v) => write!(f, "{v:?}"),
		}
	}
}

/// Conversion of a field value into a [`KeyValue`].
pub trait ToKeyValue {
	fn to_key_value(&self) -> KeyValue;
}

impl ToKeyValue for KeyValue {
	fn to_key_value(&self) -> KeyValue {
		self.clone()
	}
}

macro_rules! signed_key_value {
	($($ty:ty),*) => {
		$(
			impl ToKeyValue for $ty {
				fn to_key_value(&self) -> KeyValue {
					KeyValue::Int(i64::from(*self))
				}
			}
		)*
	};
}

macro_rules! unsigned_key_value {
	($($ty:ty),*) => {
		$(
			impl ToKeyValue for $ty {
				fn to_key_value(&self) -> KeyValue {
					let wide = u64::from(*self);
					match i64::try_from(wide) {
						Ok(v) => KeyValue::Int(v),
						Err(_) => KeyValue::UInt(wide),
					}
				}
			}
		)*
	};
}

signed_key_value!(i8, i16, i32, i64);
unsigned_key_value!(u8, u16, u32, u64);

impl ToKeyValue for isize {
	fn to_key_value(&self) -> KeyValue {
		KeyValue::Int(*self as i64)
	}
}

impl ToKeyValue for usize {
	fn to_key_value(&self) -> KeyValue {
		(*self as u64).to_key_value()
	}
}

impl ToKeyValue for bool {
	fn to_key_value(&self) -> KeyValue {
		KeyValue::Bool(*self)
	}
}

impl ToKeyValue for str {
	fn to_key_value(&self) -> KeyValue {
		KeyValue::Str(Box::from(self))
	}
}

impl ToKeyValue for String {
	fn to_key_value(&self) -> KeyValue {
		self.as_str().to_key_value()
	}
}

impl ToKeyValue for Box<str> {
	fn to_key_value(&self) -> KeyValue {
		KeyValue::Str(self.clone())
	}
}

impl<T: ToKeyValue + ?Sized> ToKeyValue for &T {
	fn to_key_value(&self) -> KeyValue {
		(**self).to_key_value()
	}
}

impl<T: ToKeyValue> ToKeyValue for Option<T> {
	fn to_key_value(&self) -> KeyValue {
		match self {
			Some(v) => v.to_key_value(),
			None => KeyValue::Null,
		}
	}
}

impl<T: ToKeyValue + ?Sized> From<&T> for KeyValue {
	fn from(v: &T) -> Self {
		v.to_key_value()
	}
}

/// Ordered tuple of index-field values identifying an instance within a namespace.
///
/// Hashes and compares exactly like the `[KeyValue]` slice it wraps, so bucket maps
/// can be probed with a borrowed slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(SmallVec<[KeyValue; 2]>);

impl CompositeKey {
	pub fn from_values(values: impl IntoIterator<Item = KeyValue>) -> Self {
		Self(values.into_iter().collect())
	}

	pub fn values(&self) -> &[KeyValue] {
		&self.0
	}
}

impl Deref for CompositeKey {
	type Target = [KeyValue];

	fn deref(&self) -> &[KeyValue] {
		&self.0
	}
}

impl Borrow<[KeyValue]> for CompositeKey {
	fn borrow(&self) -> &[KeyValue] {
		&self.0
	}
}

impl From<&[KeyValue]> for CompositeKey {
	fn from(values: &[KeyValue]) -> Self {
		Self(values.iter().cloned().collect())
	}
}

impl FromIterator<KeyValue> for CompositeKey {
	fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
		Self::from_values(iter)
	}
}

impl fmt::Display for CompositeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("(")?;
		for (i, value) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{value}")?;
		}
		f.write_str(")")
	}
}

/// Builds a [`CompositeKey`] from values implementing [`ToKeyValue`].
///
/// ```ignore
/// let key = anidl_registry::key![40122, "1080P"];
/// ```
#[macro_export]
macro_rules! key {
	($($value:expr),* $(,)?) => {
		$crate::CompositeKey::from_values([$($crate::ToKeyValue::to_key_value(&$value)),*])
	};
}
