//! The registry service.

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::config::{RedeclarePolicy, RegistryConfig};
use crate::declare;
use crate::error::{DeclareError, LookupError, RegisterError};
use crate::handle::Registered;
use crate::traits::Entity;
use crate::value::{CompositeKey, KeyValue};

mod table;

use table::TypeTable;

/// Weakly-referenced, namespaced multi-key registry of entities.
///
/// One [`TypeTable`] per entity type, created by the first successful
/// [`declare_index`](Self::declare_index). Entities enter the registry only through
/// [`construct`](Self::construct), which hands the caller the sole strong owner.
pub struct EntityRegistry {
	config: RegistryConfig,
	types: RwLock<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Default for EntityRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EntityRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EntityRegistry")
			.field("label", &self.config.label)
			.field("types", &self.types.read().len())
			.finish()
	}
}

impl EntityRegistry {
	pub fn new() -> Self {
		Self::with_config(RegistryConfig::default())
	}

	pub fn with_config(config: RegistryConfig) -> Self {
		Self {
			config,
			types: RwLock::new(FxHashMap::default()),
		}
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	fn table<T: Entity>(&self) -> Option<Arc<TypeTable<T>>> {
		self.types.read().get(&TypeId::of::<T>()).and_then(downcast_table)
	}

	/// Declares (or extends) the index fields of `T`.
	///
	/// Repeated calls append to the existing declaration; a field already declared
	/// fails with [`DeclareError::DuplicateIndexField`]. Once an instance of `T` has
	/// been constructed the outcome depends on [`RegistryConfig::redeclare`].
	pub fn declare_index<T: Entity>(&self, fields: &[&str]) -> Result<(), DeclareError> {
		let label = self.config.label.as_str();
		let mut types = self.types.write();

		let Some(table) = types.get(&TypeId::of::<T>()).and_then(downcast_table::<T>) else {
			let resolved = declare::validate::<T>(&[], fields)?;
			debug!(registry = label, entity = T::TYPE_NAME, fields = ?resolved, "index declared");
			types.insert(TypeId::of::<T>(), Arc::new(TypeTable::<T>::new(resolved)));
			return Ok(());
		};

		let mut declared = table.fields.write();
		let constructed = table.has_instances();
		if constructed && self.config.redeclare == RedeclarePolicy::Reject {
			return Err(DeclareError::DeclarationLocked {
				type_name: T::TYPE_NAME,
			});
		}

		let resolved = declare::validate::<T>(&declared, fields)?;
		if constructed {
			warn!(
				registry = label,
				entity = T::TYPE_NAME,
				fields = ?resolved,
				"extending index after construction; existing entries keep their old keys"
			);
		}
		declared.extend(resolved);
		debug!(registry = label, entity = T::TYPE_NAME, fields = ?*declared, "index extended");
		Ok(())
	}

	/// Returns the declared index fields of `T` in key order.
	pub fn index_fields<T: Entity>(&self) -> Result<Vec<&'static str>, RegisterError> {
		let table = self.table::<T>().ok_or(RegisterError::NoIndexDeclaration {
			type_name: T::TYPE_NAME,
		})?;
		let fields = table.fields.read().clone();
		Ok(fields)
	}

	/// Registers `entity` and returns its owning handle.
	///
	/// This is the only way to obtain a [`Registered`] handle. The registry keeps only
	/// a [`std::sync::Weak`] reference: once every clone of the returned handle is
	/// dropped the entry goes stale and lookups report
	/// [`LookupError::InstanceReclaimed`]. A stale slot is reused by the next
	/// registration of the same key. On failure `entity` is dropped and nothing is
	/// recorded.
	pub fn construct<T: Entity>(&self, entity: T) -> Result<Registered<T>, RegisterError> {
		let table = self.table::<T>().ok_or(RegisterError::NoIndexDeclaration {
			type_name: T::TYPE_NAME,
		})?;

		let fields = table.fields.read();
		let key = TypeTable::key_of(&fields, &entity)?;
		let entity = Registered::new(Arc::new(entity));
		let namespace = entity.namespace();
		let label = self.config.label.as_str();

		table.with_bucket(namespace, |bucket| {
			if let Some(slot) = bucket.get(&key) {
				if slot.upgrade().is_some() {
					return Err(RegisterError::DuplicateInstance {
						type_name: T::TYPE_NAME,
						key: key.clone(),
						namespace: namespace.to_string(),
					});
				}
				debug!(registry = label, entity = T::TYPE_NAME, namespace, %key, "reusing stale slot");
			}
			trace!(registry = label, entity = T::TYPE_NAME, namespace, %key, "registered");
			bucket.insert(key, Registered::downgrade(&entity));
			Ok(())
		})?;
		table.mark_constructed();
		drop(fields);

		Ok(entity)
	}

	/// Returns the live instance of `T` at `key` in `namespace`.
	///
	/// `key` is anything that derefs to a value slice, including [`CompositeKey`].
	pub fn lookup<T: Entity>(&self, key: &[KeyValue], namespace: &str) -> Result<Registered<T>, LookupError> {
		if key.is_empty() {
			return Err(LookupError::EmptyKey);
		}
		let table = self.table::<T>().ok_or(LookupError::NoIndexDeclaration {
			type_name: T::TYPE_NAME,
		})?;

		let expected = table.fields.read().len();
		if key.len() != expected {
			return Err(LookupError::KeyArityMismatch {
				expected,
				provided: key.len(),
			});
		}

		trace!(registry = self.config.label.as_str(), entity = T::TYPE_NAME, namespace, "lookup");
		let slot = table
			.with_existing_bucket(namespace, |bucket| bucket.get(key).map(|slot| slot.upgrade().map(Registered::new)))
			.flatten();

		match slot {
			Some(Some(entity)) => Ok(entity),
			Some(None) => Err(LookupError::InstanceReclaimed {
				type_name: T::TYPE_NAME,
				key: CompositeKey::from(key),
			}),
			None => Err(LookupError::InstanceNotFound {
				type_name: T::TYPE_NAME,
				key: CompositeKey::from(key),
				namespace: namespace.to_string(),
			}),
		}
	}

	/// Snapshot of every entry in `namespace`; reclaimed referents show as `None`.
	///
	/// Sorted by key.
	pub fn instances<T: Entity>(&self, namespace: &str) -> Vec<(CompositeKey, Option<Registered<T>>)> {
		let Some(table) = self.table::<T>() else {
			return Vec::new();
		};
		let mut entries = table
			.with_existing_bucket(namespace, |bucket| {
				bucket
					.iter()
					.map(|(key, slot)| (key.clone(), slot.upgrade().map(Registered::new)))
					.collect::<Vec<_>>()
			})
			.unwrap_or_default();
		entries.sort_by(|a, b| a.0.cmp(&b.0));
		entries
	}

	/// Number of entries in `namespace` whose referent is still alive.
	pub fn live_count<T: Entity>(&self, namespace: &str) -> usize {
		let Some(table) = self.table::<T>() else {
			return 0;
		};
		table
			.with_existing_bucket(namespace, |bucket| {
				bucket.values().filter(|slot| slot.strong_count() > 0).count()
			})
			.unwrap_or(0)
	}

	/// Namespaces of `T` currently holding entries, sorted.
	pub fn namespaces<T: Entity>(&self) -> Vec<String> {
		let Some(table) = self.table::<T>() else {
			return Vec::new();
		};
		let spaces = table.namespaces.read();
		let mut names: Vec<String> = spaces
			.iter()
			.filter(|(_, bucket)| !bucket.lock().is_empty())
			.map(|(name, _)| name.to_string())
			.collect();
		names.sort_unstable();
		names
	}

	/// Drops stale entries from `namespace` and returns how many were removed.
	pub fn prune_stale<T: Entity>(&self, namespace: &str) -> usize {
		let Some(table) = self.table::<T>() else {
			return 0;
		};
		let removed = table
			.with_existing_bucket(namespace, |bucket| {
				let before = bucket.len();
				bucket.retain(|_, slot| slot.strong_count() > 0);
				before - bucket.len()
			})
			.unwrap_or(0);
		debug!(registry = self.config.label.as_str(), entity = T::TYPE_NAME, namespace, removed, "pruned stale entries");
		removed
	}

	/// Forgets every entry of `T` in `namespace`. Instances stay alive; only lookup
	/// capability is lost. Absent namespaces are a no-op.
	pub fn clear_namespace<T: Entity>(&self, namespace: &str) -> usize {
		let Some(table) = self.table::<T>() else {
			return 0;
		};
		let removed = table
			.with_existing_bucket(namespace, |bucket| {
				let n = bucket.len();
				bucket.clear();
				n
			})
			.unwrap_or(0);
		debug!(registry = self.config.label.as_str(), entity = T::TYPE_NAME, namespace, removed, "namespace cleared");
		removed
	}

	/// Forgets every entry of `T` across all namespaces. The declaration is kept.
	pub fn clear_all<T: Entity>(&self) -> usize {
		let Some(table) = self.table::<T>() else {
			return 0;
		};
		let mut spaces = table.namespaces.write();
		let removed: usize = spaces.values_mut().map(|bucket| bucket.get_mut().len()).sum();
		spaces.clear();
		debug!(registry = self.config.label.as_str(), entity = T::TYPE_NAME, removed, "all namespaces cleared");
		removed
	}
}

/// Tables are only ever stored under their own `TypeId`, so this never misses for a
/// present entry.
fn downcast_table<T: Entity>(any: &Arc<dyn Any + Send + Sync>) -> Option<Arc<TypeTable<T>>> {
	Arc::clone(any).downcast::<TypeTable<T>>().ok()
}

static GLOBAL: OnceLock<EntityRegistry> = OnceLock::new();

/// Installs the process-wide registry with `config`.
///
/// Fails with the rejected config if [`global`] was already initialized.
pub fn init_global(config: RegistryConfig) -> Result<&'static EntityRegistry, RegistryConfig> {
	GLOBAL
		.set(EntityRegistry::with_config(config))
		.map_err(|rejected| rejected.config)?;
	Ok(global())
}

/// The process-wide registry; initialized with the default config on first use.
///
/// Teardown is per type through [`EntityRegistry::clear_all`].
pub fn global() -> &'static EntityRegistry {
	GLOBAL.get_or_init(EntityRegistry::new)
}
