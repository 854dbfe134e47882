use rstest::rstest;

use super::*;
use crate::KeyValue;

struct Track {
	namespace: String,
	episode_id: i64,
	language: Option<String>,
	codec: Option<String>,
}

crate::entity!(Track { episode_id, language, codec });

#[rstest]
#[case("season_id", true)]
#[case("_private", true)]
#[case("título", true)]
#[case("x2", true)]
#[case("", false)]
#[case("2x", false)]
#[case("with space", false)]
#[case("dash-ed", false)]
fn identifier_shape(#[case] name: &str, #[case] expected: bool) {
	assert_eq!(is_identifier(name), expected);
}

#[test]
fn empty_declaration_is_rejected() {
	assert_eq!(
		validate::<Track>(&[], &[]),
		Err(DeclareError::EmptyKeySpecification { type_name: "Track" })
	);
}

#[test]
fn invalid_name_reported_before_unknown() {
	assert_eq!(
		validate::<Track>(&[], &["nope", "not valid"]),
		Err(DeclareError::InvalidFieldName {
			name: "not valid".to_string()
		})
	);
}

#[test]
fn unknown_field_is_rejected() {
	assert_eq!(
		validate::<Track>(&[], &["episode_id", "season_id"]),
		Err(DeclareError::UnknownField {
			type_name: "Track",
			name: "season_id".to_string()
		})
	);
}

#[test]
fn duplicate_within_one_call() {
	assert_eq!(
		validate::<Track>(&[], &["language", "language"]),
		Err(DeclareError::DuplicateIndexField {
			type_name: "Track",
			name: "language".to_string()
		})
	);
}

#[test]
fn duplicate_across_declarations() {
	assert_eq!(
		validate::<Track>(&["episode_id"], &["codec", "episode_id"]),
		Err(DeclareError::DuplicateIndexField {
			type_name: "Track",
			name: "episode_id".to_string()
		})
	);
}

#[test]
fn resolves_in_declaration_order() {
	assert_eq!(
		validate::<Track>(&["episode_id"], &["language", "codec"]),
		Ok(vec!["language", "codec"])
	);
}

#[test]
fn namespace_is_key_capable() {
	assert_eq!(validate::<Track>(&[], &["namespace"]), Ok(vec!["namespace"]));
	let track = Track {
		namespace: "baha".to_string(),
		episode_id: 1,
		language: None,
		codec: Some("aac".to_string()),
	};
	assert_eq!(track.field("namespace"), Some(KeyValue::Str("baha".into())));
	assert_eq!(track.field("language"), Some(KeyValue::Null));
	assert_eq!(track.field("episode_id"), Some(KeyValue::Int(1)));
	assert_eq!(track.field("bitrate"), None);
}
