//! Index declaration validation.

use crate::error::DeclareError;
use crate::traits::Entity;

/// Returns true for names shaped like a field identifier.
pub(crate) fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c == '_' || c.is_alphabetic() => {}
		_ => return false,
	}
	chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Validates `names` as an extension of the `declared` index fields of `T`.
///
/// Checks run in order over the whole list: emptiness, identifier shape, field
/// existence, then duplicates (within `names` and against `declared`). Returns the
/// new fields resolved to `T::FIELDS` entries.
pub(crate) fn validate<T: Entity>(
	declared: &[&'static str],
	names: &[&str],
) -> Result<Vec<&'static str>, DeclareError> {
	if names.is_empty() {
		return Err(DeclareError::EmptyKeySpecification {
			type_name: T::TYPE_NAME,
		});
	}

	if let Some(bad) = names.iter().find(|name| !is_identifier(name)) {
		return Err(DeclareError::InvalidFieldName {
			name: (*bad).to_string(),
		});
	}

	let mut resolved = Vec::with_capacity(names.len());
	for name in names {
		let Some(field) = T::FIELDS.iter().copied().find(|f| f == name) else {
			return Err(DeclareError::UnknownField {
				type_name: T::TYPE_NAME,
				name: (*name).to_string(),
			});
		};
		resolved.push(field);
	}

	let mut seen: Vec<&'static str> = declared.to_vec();
	for field in &resolved {
		if seen.contains(field) {
			return Err(DeclareError::DuplicateIndexField {
				type_name: T::TYPE_NAME,
				name: (*field).to_string(),
			});
		}
		seen.push(field);
	}

	Ok(resolved)
}

#[cfg(test)]
mod tests;
