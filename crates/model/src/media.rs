//! Media resources attached to an episode.
//!
//! [`Media`] is the generic resource; [`VideoMedia`], [`AudioMedia`] and
//! [`SubtitleMedia`] carry the same [`MediaSource`] plus track-specific fields and
//! are indexed separately, each keyed by `episode_id` followed by its own fields.

use std::collections::BTreeMap;
use std::fmt;

use anidl_registry::{Entity, KeyValue, ToKeyValue};
use serde::{Deserialize, Serialize};

use crate::season::default_namespace;

macro_rules! string_enum {
	(
		$(#[$meta:meta])*
		$name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$($(#[$vmeta])* #[serde(rename = $text)] $variant,)+
		}

		impl $name {
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $text,)+
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl ToKeyValue for $name {
			fn to_key_value(&self) -> KeyValue {
				KeyValue::Str(Box::from(self.as_str()))
			}
		}
	};
}

string_enum! {
	/// Where a media URL points.
	UrlType {
		Http => "http",
		Https => "https",
		Ftp => "ftp",
		Local => "local",
		Smb => "smb",
	}
}

string_enum! {
	/// Content protection applied to a stream.
	DrmType {
		Fairplay => "fairplay",
		Widevine => "widevine",
		Playready => "playready",
		/// Plain symmetric/asymmetric encryption, not a DRM system.
		Aes => "aes",
		Des => "des",
		Rsa => "rsa",
		Chacha20 => "chacha20",
	}
}

string_enum! {
	SubtitleType {
		Srt => "srt",
		Ass => "ass",
	}
}

/// Quality label for a frame size; `"unknown"` outside the standard ladder.
pub fn quality_for_resolution(width: u32, height: u32) -> &'static str {
	match (width, height) {
		(3840, 2160) => "4K",
		(1920, 1080) => "1080P",
		(1280, 720) => "720P",
		(854, 480) => "480P",
		(640, 360) => "360P",
		(426, 240) => "240P",
		_ => "unknown",
	}
}

/// Fields shared by every media resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
	pub episode_id: i64,
	pub url: String,
	pub url_type: UrlType,
	/// Extra request headers needed to fetch `url`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub headers: Option<BTreeMap<String, String>>,
	/// Bytes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<u64>,
	/// Milliseconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub length: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub drm_type: Option<DrmType>,
	/// Key material or license details (key, iv, license_url, license_headers, ...).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub drm_info: Option<serde_json::Value>,
}

impl MediaSource {
	pub fn new(episode_id: i64, url: impl Into<String>, url_type: UrlType) -> Self {
		Self {
			episode_id,
			url: url.into(),
			url_type,
			headers: None,
			size: None,
			length: None,
			drm_type: None,
			drm_info: None,
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers
			.get_or_insert_with(BTreeMap::new)
			.insert(name.into(), value.into());
		self
	}

	pub fn with_drm(mut self, drm_type: DrmType, drm_info: Option<serde_json::Value>) -> Self {
		self.drm_type = Some(drm_type);
		self.drm_info = drm_info;
		self
	}

	fn field(&self, name: &str) -> Option<KeyValue> {
		match name {
			"episode_id" => Some(self.episode_id.to_key_value()),
			"url" => Some(self.url.to_key_value()),
			"url_type" => Some(self.url_type.to_key_value()),
			"size" => Some(self.size.to_key_value()),
			"length" => Some(self.length.to_key_value()),
			"drm_type" => Some(self.drm_type.to_key_value()),
			_ => None,
		}
	}
}

/// Index fields every media type starts with.
pub const MEDIA_KEY: &[&str] = &["episode_id"];

macro_rules! media_entity {
	($ty:ident { $($field:ident => $read:expr),* $(,)? }) => {
		impl Entity for $ty {
			const TYPE_NAME: &'static str = stringify!($ty);
			const FIELDS: &'static [&'static str] = &[
				"namespace",
				"episode_id",
				"url",
				"url_type",
				"size",
				"length",
				"drm_type",
				$(stringify!($field),)*
			];

			fn namespace(&self) -> &str {
				&self.namespace
			}

			#[allow(clippy::redundant_closure_call)]
			fn field(&self, name: &str) -> Option<KeyValue> {
				match name {
					"namespace" => Some(self.namespace.to_key_value()),
					$(stringify!($field) => Some(($read)(self)),)*
					_ => self.source.field(name),
				}
			}
		}
	};
}

/// A media resource without track details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(flatten)]
	pub source: MediaSource,
}

media_entity!(Media {});

impl Media {
	pub fn new(source: MediaSource) -> Self {
		Self {
			namespace: default_namespace(),
			source,
		}
	}

	pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}
}

/// A video rendition. Indexed by `episode_id`, `quality`, `codec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMedia {
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(flatten)]
	pub source: MediaSource,
	pub width: u32,
	pub height: u32,
	#[serde(default)]
	pub codec: Option<String>,
	#[serde(default)]
	pub quality: Option<String>,
}

media_entity!(VideoMedia {
	width => |v: &VideoMedia| v.width.to_key_value(),
	height => |v: &VideoMedia| v.height.to_key_value(),
	codec => |v: &VideoMedia| v.codec.to_key_value(),
	quality => |v: &VideoMedia| v.quality().to_key_value(),
});

impl VideoMedia {
	/// Quality is derived from the frame size until overridden.
	pub fn new(source: MediaSource, width: u32, height: u32) -> Self {
		Self {
			namespace: default_namespace(),
			source,
			width,
			height,
			codec: None,
			quality: Some(quality_for_resolution(width, height).to_string()),
		}
	}

	pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
		self.codec = Some(codec.into());
		self
	}

	pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
		self.quality = Some(quality.into());
		self
	}

	pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}

	/// Explicit quality, or the label derived from the frame size.
	///
	/// This is the value the index key uses, so a deserialized rendition without a
	/// quality keys the same as one built with [`VideoMedia::new`].
	pub fn quality(&self) -> &str {
		match self.quality.as_deref() {
			Some(q) if !q.is_empty() => q,
			_ => quality_for_resolution(self.width, self.height),
		}
	}
}

/// An audio track. Indexed by `episode_id`, `language`, `codec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMedia {
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(flatten)]
	pub source: MediaSource,
	#[serde(default)]
	pub codec: Option<String>,
	#[serde(default)]
	pub language: Option<String>,
}

media_entity!(AudioMedia {
	codec => |a: &AudioMedia| a.codec.to_key_value(),
	language => |a: &AudioMedia| a.language.to_key_value(),
});

impl AudioMedia {
	pub fn new(source: MediaSource) -> Self {
		Self {
			namespace: default_namespace(),
			source,
			codec: None,
			language: None,
		}
	}

	pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
		self.codec = Some(codec.into());
		self
	}

	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = Some(language.into());
		self
	}

	pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}
}

/// A subtitle track. Indexed by `episode_id`, `language`, `subtitle_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleMedia {
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(flatten)]
	pub source: MediaSource,
	pub subtitle_type: SubtitleType,
	pub language: String,
}

media_entity!(SubtitleMedia {
	subtitle_type => |s: &SubtitleMedia| s.subtitle_type.to_key_value(),
	language => |s: &SubtitleMedia| s.language.to_key_value(),
});

impl SubtitleMedia {
	pub fn new(source: MediaSource, subtitle_type: SubtitleType, language: impl Into<String>) -> Self {
		Self {
			namespace: default_namespace(),
			source,
			subtitle_type,
			language: language.into(),
		}
	}

	pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}
}
