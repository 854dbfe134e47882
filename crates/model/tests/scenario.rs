use anidl_model::{
	AudioMedia, Episode, Media, MediaSource, Season, SubtitleMedia, SubtitleType, UrlType, VideoMedia,
	declare_models,
};
use anidl_registry::{DeclareError, EntityRegistry, LookupError, RegisterError, Registered, key};
use pretty_assertions::assert_eq;

fn registry() -> EntityRegistry {
	let registry = EntityRegistry::new();
	declare_models(&registry).unwrap();
	registry
}

fn source(episode_id: i64) -> MediaSource {
	MediaSource::new(episode_id, format!("https://cdn.example/{episode_id}.m3u8"), UrlType::Https)
}

#[test]
fn season_lookup_and_duplicate() {
	let registry = registry();
	let season = registry.construct(Season::new(40122, "X").in_namespace("baha")).unwrap();

	let found = registry.lookup::<Season>(&key![40122], "baha").unwrap();
	assert!(Registered::ptr_eq(&season, &found));
	assert_eq!(found.season_title, "X");

	let err = registry.construct(Season::new(40122, "X again").in_namespace("baha")).unwrap_err();
	assert!(matches!(err, RegisterError::DuplicateInstance { .. }));
	assert_eq!(err.to_string(), r#"key (40122) already has a live Season in namespace "baha""#);
}

#[test]
fn released_season_can_be_rebuilt() {
	let registry = registry();
	drop(registry.construct(Season::new(40122, "X").in_namespace("baha")).unwrap());

	assert!(matches!(
		registry.lookup::<Season>(&key![40122], "baha"),
		Err(LookupError::InstanceReclaimed { .. })
	));
	let again = registry.construct(Season::new(40122, "X").in_namespace("baha")).unwrap();
	assert_eq!(again.season_id, 40122);
}

#[test]
fn episodes_index_by_episode_id() {
	let registry = registry();
	let episodes: Vec<Registered<Episode>> = (1..=3)
		.map(|n| registry.construct(Episode::new(100 + n, 40122, n as u32, format!("Ep {n}"))).unwrap())
		.collect();

	let second = registry.lookup::<Episode>(&key![102], "global").unwrap();
	assert!(Registered::ptr_eq(&second, &episodes[1]));
	assert_eq!(second.episode_number, 2);
}

#[test]
fn track_tables_are_independent() {
	let registry = registry();
	let media = registry.construct(Media::new(source(5))).unwrap();
	let video = registry
		.construct(VideoMedia::new(source(5), 1920, 1080).with_codec("h264"))
		.unwrap();
	let audio = registry
		.construct(AudioMedia::new(source(5)).with_language("ja").with_codec("aac"))
		.unwrap();
	let subtitle = registry
		.construct(SubtitleMedia::new(source(5), SubtitleType::Ass, "zh-TW"))
		.unwrap();

	assert!(Registered::ptr_eq(&registry.lookup::<Media>(&key![5], "global").unwrap(), &media));
	assert!(Registered::ptr_eq(
		&registry.lookup::<VideoMedia>(&key![5, "1080P", "h264"], "global").unwrap(),
		&video
	));
	assert!(Registered::ptr_eq(
		&registry.lookup::<AudioMedia>(&key![5, "ja", "aac"], "global").unwrap(),
		&audio
	));
	assert!(Registered::ptr_eq(
		&registry
			.lookup::<SubtitleMedia>(&key![5, "zh-TW", SubtitleType::Ass], "global")
			.unwrap(),
		&subtitle
	));
}

#[test]
fn renditions_differ_by_quality() {
	let registry = registry();
	let hd = registry.construct(VideoMedia::new(source(8), 1280, 720)).unwrap();
	let fhd = registry.construct(VideoMedia::new(source(8), 1920, 1080)).unwrap();
	assert!(!Registered::ptr_eq(&hd, &fhd));

	let dup = registry.construct(VideoMedia::new(source(8), 1280, 720));
	assert!(matches!(dup, Err(RegisterError::DuplicateInstance { .. })));

	let found = registry
		.lookup::<VideoMedia>(&key![8, "720P", None::<String>], "global")
		.unwrap();
	assert!(Registered::ptr_eq(&found, &hd));
}

#[test]
fn media_key_arity() {
	let registry = registry();
	assert_eq!(
		registry.lookup::<AudioMedia>(&key![1], "global").unwrap_err(),
		LookupError::KeyArityMismatch {
			expected: 3,
			provided: 1
		}
	);
}

#[test]
fn models_declare_once() {
	let registry = registry();
	assert!(matches!(
		declare_models(&registry),
		Err(DeclareError::DuplicateIndexField { .. })
	));
	assert_eq!(
		registry.index_fields::<SubtitleMedia>().unwrap(),
		vec!["episode_id", "language", "subtitle_type"]
	);
}
