use crate::value::CompositeKey;

/// Index declaration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclareError {
	#[error("index declaration for {type_name} names no fields")]
	EmptyKeySpecification { type_name: &'static str },

	#[error("index field name {name:?} is not an identifier")]
	InvalidFieldName { name: String },

	#[error("{type_name} has no key-capable field {name:?}")]
	UnknownField { type_name: &'static str, name: String },

	#[error("index field {name:?} is declared more than once on {type_name}")]
	DuplicateIndexField { type_name: &'static str, name: String },

	/// Instances of the type already exist and redeclaration is rejected.
	#[error("index of {type_name} is locked: instances have already been constructed")]
	DeclarationLocked { type_name: &'static str },
}

/// Construction-time registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	#[error("{type_name} has no index declaration")]
	NoIndexDeclaration { type_name: &'static str },

	#[error("key {key} already has a live {type_name} in namespace {namespace:?}")]
	DuplicateInstance {
		type_name: &'static str,
		key: CompositeKey,
		namespace: String,
	},

	/// The entity reported no value for a declared index field.
	#[error("{type_name} returned no value for index field {field:?}")]
	UnreadableField { type_name: &'static str, field: &'static str },
}

/// Lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	#[error("lookup key is empty")]
	EmptyKey,

	#[error("{type_name} has no index declaration")]
	NoIndexDeclaration { type_name: &'static str },

	#[error("key arity mismatch: expected {expected}, provided {provided}")]
	KeyArityMismatch { expected: usize, provided: usize },

	#[error("no {type_name} at key {key} in namespace {namespace:?}")]
	InstanceNotFound {
		type_name: &'static str,
		key: CompositeKey,
		namespace: String,
	},

	/// The key was registered but every owner has since dropped the instance.
	#[error("{type_name} at key {key} has been reclaimed")]
	InstanceReclaimed { type_name: &'static str, key: CompositeKey },
}

/// Any registry failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error(transparent)]
	Declare(#[from] DeclareError),

	#[error(transparent)]
	Register(#[from] RegisterError),

	#[error(transparent)]
	Lookup(#[from] LookupError),
}
