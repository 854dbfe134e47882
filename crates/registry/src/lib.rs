//! Weakly-referenced, namespaced multi-key entity registry.
//!
//! # Purpose
//!
//! Gives record types registry-backed identity: a type declares which of its fields
//! form a composite key, every construction registers the instance under that key
//! in its namespace, and later code looks the instance up by the same key.
//!
//! # Mental Model
//!
//! 1. **Declare:** [`EntityRegistry::declare_index`] attaches an ordered, validated
//!    field list to an [`Entity`] type.
//! 2. **Construct:** [`EntityRegistry::construct`] computes the key, rejects a live
//!    duplicate, stores a [`std::sync::Weak`] and returns the owning [`Registered`]
//!    handle. Only the registry creates handles, so an entity that reaches a caller
//!    as `Registered<T>` has always been registered.
//! 3. **Lookup:** [`EntityRegistry::lookup`] upgrades the stored reference, telling
//!    apart keys that never existed from instances that have been dropped.
//!
//! # Invariants
//!
//! - At most one live instance per `(type, namespace, key)`.
//!   - Enforced in: [`EntityRegistry::construct`] (check-then-insert under the bucket lock).
//!   - Tested by: `registry::tests::second_live_instance_is_rejected`, `tests/properties.rs`.
//! - The registry never extends an entity's lifetime.
//!   - Enforced in: bucket entries are `Weak<T>`.
//!   - Tested by: `registry::tests::dropped_instance_reports_reclaimed`.
//! - Every [`Registered`] handle came from a successful registration.
//!   - Enforced in: the private constructor in `handle.rs`; [`EntityRegistry::construct`] is its only caller outside lookups.
//!   - Tested by: the `compile_fail` example on [`Registered`], `registry::tests::handles_from_construct_and_lookup_share_the_instance`.
//! - Liveness is re-checked under the bucket lock, never before it.
//!   - Enforced in: [`EntityRegistry::lookup`].
//!   - Tested by: `tests/concurrency.rs`.
//!
//! # Concurrency
//!
//! One `parking_lot::Mutex` per `(type, namespace)` bucket, held only for the
//! check-then-write or the upgrade. Types never share locks.

mod config;
mod declare;
mod error;
mod handle;
mod registry;
mod traits;
mod value;

pub use config::{ConfigError, RedeclarePolicy, RegistryConfig};
pub use error::{DeclareError, LookupError, RegisterError, RegistryError};
pub use handle::Registered;
pub use registry::{EntityRegistry, global, init_global};
pub use traits::{DEFAULT_NAMESPACE, Entity};
pub use value::{CompositeKey, KeyValue, ToKeyValue};
