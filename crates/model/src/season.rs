use anidl_registry::{DEFAULT_NAMESPACE, entity};
use serde::{Deserialize, Serialize};

pub(crate) fn default_namespace() -> String {
	DEFAULT_NAMESPACE.to_string()
}

/// A season (one show entry) on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
	#[serde(default = "default_namespace")]
	pub namespace: String,
	pub season_id: i64,
	pub season_title: String,
}

entity!(Season { season_id, season_title });

impl Season {
	pub fn new(season_id: i64, season_title: impl Into<String>) -> Self {
		Self {
			namespace: default_namespace(),
			season_id,
			season_title: season_title.into(),
		}
	}

	pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}
}

/// A single episode of a [`Season`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
	#[serde(default = "default_namespace")]
	pub namespace: String,
	pub episode_id: i64,
	pub episode_title: String,
	pub season_id: i64,
	/// 1-based position within the season.
	pub episode_number: u32,
}

entity!(Episode {
	episode_id,
	episode_title,
	season_id,
	episode_number
});

impl Episode {
	pub fn new(episode_id: i64, season_id: i64, episode_number: u32, episode_title: impl Into<String>) -> Self {
		Self {
			namespace: default_namespace(),
			episode_id,
			episode_title: episode_title.into(),
			season_id,
			episode_number,
		}
	}

	pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}
}
