//! Owning handle to a registered entity.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Weak};

/// Strong handle to an entity created through [`crate::EntityRegistry::construct`].
///
/// Only the registry mints these, so a `Registered<T>` always went through
/// registration (its entry may since have been cleared). Dropping the last clone
/// reclaims the entity and leaves its entry stale.
///
/// ```compile_fail
/// use std::sync::Arc;
/// use anidl_registry::Registered;
///
/// let forged: Registered<u32> = Registered(Arc::new(1));
/// ```
pub struct Registered<T>(Arc<T>);

impl<T> Registered<T> {
	pub(crate) fn new(inner: Arc<T>) -> Self {
		Self(inner)
	}

	pub(crate) fn downgrade(this: &Self) -> Weak<T> {
		Arc::downgrade(&this.0)
	}

	/// True when both handles point at the same instance.
	pub fn ptr_eq(this: &Self, other: &Self) -> bool {
		Arc::ptr_eq(&this.0, &other.0)
	}

	/// Number of live handles to this instance.
	pub fn strong_count(this: &Self) -> usize {
		Arc::strong_count(&this.0)
	}
}

impl<T> Clone for Registered<T> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<T> Deref for Registered<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

impl<T> AsRef<T> for Registered<T> {
	fn as_ref(&self) -> &T {
		&self.0
	}
}

impl<T: fmt::Debug> fmt::Debug for Registered<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl<T: fmt::Display> fmt::Display for Registered<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&*self.0, f)
	}
}
