//! Anime season, episode and media entities.
//!
//! Every entity here is an [`anidl_registry::Entity`]. Call [`declare_models`] once
//! per registry before constructing any of them; construction then goes through
//! [`EntityRegistry::construct`].
//!
//! | Type | Index key |
//! |------|-----------|
//! | [`Season`] | `season_id` |
//! | [`Episode`] | `episode_id` |
//! | [`Media`] | `episode_id` |
//! | [`VideoMedia`] | `episode_id`, `quality`, `codec` |
//! | [`AudioMedia`] | `episode_id`, `language`, `codec` |
//! | [`SubtitleMedia`] | `episode_id`, `language`, `subtitle_type` |

use anidl_registry::{DeclareError, EntityRegistry};
use tracing::debug;

pub mod adapter;
mod media;
mod season;

pub use adapter::{Adapter, AdapterError, AdapterInfo, AdapterSet, Streams};
pub use media::{
	AudioMedia, DrmType, MEDIA_KEY, Media, MediaSource, SubtitleMedia, SubtitleType, UrlType,
	VideoMedia, quality_for_resolution,
};
pub use season::{Episode, Season};

/// Declares the index of every model type on `registry`.
///
/// Track types start from [`MEDIA_KEY`] and extend it with their own fields.
pub fn declare_models(registry: &EntityRegistry) -> Result<(), DeclareError> {
	registry.declare_index::<Season>(&["season_id"])?;
	registry.declare_index::<Episode>(&["episode_id"])?;
	registry.declare_index::<Media>(MEDIA_KEY)?;

	registry.declare_index::<VideoMedia>(MEDIA_KEY)?;
	registry.declare_index::<VideoMedia>(&["quality", "codec"])?;

	registry.declare_index::<AudioMedia>(MEDIA_KEY)?;
	registry.declare_index::<AudioMedia>(&["language", "codec"])?;

	registry.declare_index::<SubtitleMedia>(MEDIA_KEY)?;
	registry.declare_index::<SubtitleMedia>(&["language", "subtitle_type"])?;

	debug!(registry = registry.config().label.as_str(), "model indexes declared");
	Ok(())
}
