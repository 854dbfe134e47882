//! The entity contract consumed by [`crate::EntityRegistry`].

use crate::value::KeyValue;

/// Namespace used when a collaborator does not pick one.
pub const DEFAULT_NAMESPACE: &str = "global";

/// A record type whose instances are identity-tracked by the registry.
///
/// `FIELDS` lists every field that may be named in an index declaration; `field`
/// must return `Some` for each of them. Implement it with [`crate::entity!`] unless
/// the type nests its key fields.
pub trait Entity: Send + Sync + 'static {
	/// Name used in diagnostics.
	const TYPE_NAME: &'static str;

	/// Key-capable field names, `namespace` included.
	const FIELDS: &'static [&'static str];

	/// Partition this instance is registered under.
	fn namespace(&self) -> &str;

	/// Reads the current value of a key-capable field.
	fn field(&self, name: &str) -> Option<KeyValue>;
}

/// Implements [`Entity`] for a struct with a `namespace: String` field.
///
/// ```ignore
/// struct Season {
///     namespace: String,
///     season_id: i64,
///     season_title: String,
/// }
///
/// anidl_registry::entity!(Season { season_id, season_title });
/// ```
#[macro_export]
macro_rules! entity {
	($ty:ident { $($field:ident),+ $(,)? }) => {
		impl $crate::Entity for $ty {
			const TYPE_NAME: &'static str = stringify!($ty);
			const FIELDS: &'static [&'static str] = &["namespace", $(stringify!($field)),+];

			fn namespace(&self) -> &str {
				&self.namespace
			}

			fn field(&self, name: &str) -> Option<$crate::KeyValue> {
				match name {
					"namespace" => Some($crate::ToKeyValue::to_key_value(&self.namespace)),
					$(stringify!($field) => Some($crate::ToKeyValue::to_key_value(&self.$field)),)+
					_ => None,
				}
			}
		}
	};
}
