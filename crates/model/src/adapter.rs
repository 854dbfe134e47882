//! Provider adapters and selection by name or play URL.
//!
//! Adapters turn a provider's play URL into registered [`Season`]/[`Episode`]
//! entities and an episode into its stream renditions. Results travel as
//! [`Registered`] handles, which only [`anidl_registry::EntityRegistry::construct`]
//! hands out, so an adapter cannot return an entity it did not register. No concrete provider lives
//! here; [`AdapterSet`] only picks which adapter handles a request.

use std::fmt;
use std::sync::Arc;

use anidl_registry::{DeclareError, LookupError, RegisterError, Registered, RegistryError};
use async_trait::async_trait;
use tracing::debug;

use crate::media::{AudioMedia, SubtitleMedia, VideoMedia};
use crate::season::{Episode, Season};

/// Static description of an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
	/// Name accepted by [`AdapterSet::by_name`].
	pub name: &'static str,
	/// URL prefixes this adapter understands.
	pub base_play_urls: &'static [&'static str],
	/// Whether the provider needs its own login flow.
	pub custom_login: bool,
}

impl AdapterInfo {
	/// True when any base play URL occurs in `url`.
	pub fn matches(&self, url: &str) -> bool {
		self.base_play_urls.iter().any(|base| url.contains(base))
	}
}

/// Renditions of one episode.
#[derive(Debug, Clone, Default)]
pub struct Streams {
	pub video: Vec<Registered<VideoMedia>>,
	pub audio: Vec<Registered<AudioMedia>>,
	pub subtitles: Vec<Registered<SubtitleMedia>>,
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
	#[error("adapter {0} not found")]
	NotFound(String),

	#[error(transparent)]
	Registry(#[from] RegistryError),

	/// The provider answered with something the adapter could not use.
	#[error("{adapter}: {message}")]
	Upstream { adapter: &'static str, message: String },
}

impl From<DeclareError> for AdapterError {
	fn from(err: DeclareError) -> Self {
		Self::Registry(err.into())
	}
}

impl From<RegisterError> for AdapterError {
	fn from(err: RegisterError) -> Self {
		Self::Registry(err.into())
	}
}

impl From<LookupError> for AdapterError {
	fn from(err: LookupError) -> Self {
		Self::Registry(err.into())
	}
}

#[async_trait]
pub trait Adapter: Send + Sync {
	fn info(&self) -> &AdapterInfo;

	/// Resolves a play URL into its season and episodes.
	async fn parse_playurl(&self, playurl: &str) -> Result<(Registered<Season>, Vec<Registered<Episode>>), AdapterError>;

	/// Resolves an episode into its video, audio and subtitle renditions.
	async fn parse_stream(&self, episode: &Episode) -> Result<Streams, AdapterError>;
}

/// Ordered set of adapters; the first match wins.
#[derive(Clone, Default)]
pub struct AdapterSet {
	adapters: Vec<Arc<dyn Adapter>>,
}

impl fmt::Debug for AdapterSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

impl AdapterSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, adapter: impl Adapter + 'static) -> Self {
		self.push(Arc::new(adapter));
		self
	}

	pub fn push(&mut self, adapter: Arc<dyn Adapter>) {
		self.adapters.push(adapter);
	}

	pub fn names(&self) -> Vec<&'static str> {
		self.adapters.iter().map(|a| a.info().name).collect()
	}

	pub fn by_name(&self, name: &str) -> Result<Arc<dyn Adapter>, AdapterError> {
		self.adapters
			.iter()
			.find(|a| a.info().name == name)
			.cloned()
			.ok_or_else(|| AdapterError::NotFound(name.to_string()))
	}

	pub fn for_url(&self, url: &str) -> Result<Arc<dyn Adapter>, AdapterError> {
		self.adapters
			.iter()
			.find(|a| a.info().matches(url))
			.cloned()
			.ok_or_else(|| AdapterError::NotFound("Unknown".to_string()))
	}

	/// Picks by URL when `feature` looks like one, by name otherwise.
	pub fn resolve(&self, feature: &str) -> Result<Arc<dyn Adapter>, AdapterError> {
		let adapter = if feature.starts_with("http") {
			self.for_url(feature)?
		} else {
			self.by_name(feature)?
		};
		debug!(feature, adapter = adapter.info().name, "adapter selected");
		Ok(adapter)
	}
}
