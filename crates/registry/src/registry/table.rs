//! Per-type storage.
//!
//! # Lock order
//!
//! `fields` → `namespaces` → bucket. Registration holds a `fields` read guard for the
//! whole check-then-write so a declaration cannot interleave, and holds the
//! `namespaces` read guard while a bucket is locked so `clear_all` cannot orphan a
//! bucket mid-insert.

use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::error::RegisterError;
use crate::traits::Entity;
use crate::value::CompositeKey;

pub(super) type Bucket<T> = FxHashMap<CompositeKey, Weak<T>>;

pub(super) struct TypeTable<T: Entity> {
	pub(super) fields: RwLock<Vec<&'static str>>,
	/// Set once the first instance is registered.
	pub(super) constructed: AtomicBool,
	pub(super) namespaces: RwLock<FxHashMap<Box<str>, Mutex<Bucket<T>>>>,
}

impl<T: Entity> TypeTable<T> {
	pub(super) fn new(fields: Vec<&'static str>) -> Self {
		Self {
			fields: RwLock::new(fields),
			constructed: AtomicBool::new(false),
			namespaces: RwLock::new(FxHashMap::default()),
		}
	}

	pub(super) fn has_instances(&self) -> bool {
		self.constructed.load(Ordering::Acquire)
	}

	pub(super) fn mark_constructed(&self) {
		self.constructed.store(true, Ordering::Release);
	}

	/// Reads the declared fields of `entity` in declaration order.
	pub(super) fn key_of(fields: &[&'static str], entity: &T) -> Result<CompositeKey, RegisterError> {
		fields
			.iter()
			.map(|&field| {
				entity.field(field).ok_or(RegisterError::UnreadableField {
					type_name: T::TYPE_NAME,
					field,
				})
			})
			.collect()
	}

	/// Runs `f` with the bucket for `namespace` locked, creating the bucket if absent.
	pub(super) fn with_bucket<R>(&self, namespace: &str, f: impl FnOnce(&mut Bucket<T>) -> R) -> R {
		{
			let spaces = self.namespaces.read();
			if let Some(bucket) = spaces.get(namespace) {
				return f(&mut bucket.lock());
			}
		}
		let mut spaces = self.namespaces.write();
		let bucket = spaces.entry(Box::from(namespace)).or_default();
		f(bucket.get_mut())
	}

	/// Runs `f` with the bucket for `namespace` locked, if it exists.
	pub(super) fn with_existing_bucket<R>(
		&self,
		namespace: &str,
		f: impl FnOnce(&mut Bucket<T>) -> R,
	) -> Option<R> {
		let spaces = self.namespaces.read();
		let bucket = spaces.get(namespace)?;
		Some(f(&mut bucket.lock()))
	}
}
