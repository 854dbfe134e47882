//! Registry configuration.
//!
//! ```toml
//! label = "baha"
//! redeclare = "reject"
//! ```

use serde::{Deserialize, Serialize};

/// What [`crate::EntityRegistry::declare_index`] does once instances of the type exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeclarePolicy {
	/// Fail with [`crate::DeclareError::DeclarationLocked`].
	#[default]
	Reject,
	/// Extend the declaration. Existing entries keep their old keys and only new
	/// registrations use the extended key.
	Allow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Emitted as the `registry` field on every log event.
	pub label: String,
	pub redeclare: RedeclarePolicy,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			label: "entities".to_string(),
			redeclare: RedeclarePolicy::default(),
		}
	}
}

impl RegistryConfig {
	/// Parses a TOML document; missing keys take their defaults.
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid registry config: {0}")]
	Parse(#[from] toml::de::Error),
}
