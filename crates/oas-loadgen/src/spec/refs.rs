//! Local `$ref` parsing and resolution.

use serde_json::Value;

use crate::errors::SpecError;

/// Split a local reference (`#/definitions/Pet`) into its path segments.
pub(crate) fn ref_path_segments(reference: &str) -> Result<Vec<&str>, SpecError> {
  let Some(path) = reference.strip_prefix("#/") else {
    return Err(SpecError::NonLocalReference {
      reference: reference.to_string(),
    });
  };
  Ok(path.split('/').collect())
}

/// The definition name a reference points at (its last path segment).
pub(crate) fn ref_name(reference: &str) -> Result<&str, SpecError> {
  let segments = ref_path_segments(reference)?;
  // `strip_prefix` guarantees at least one segment
  Ok(segments.last().copied().unwrap_or(reference))
}

/// Walk a reference path down the document and return the referred fragment.
pub(crate) fn resolve_reference<'a>(spec: &'a Value, reference: &str) -> Result<&'a Value, SpecError> {
  let mut current = spec;
  for segment in ref_path_segments(reference)? {
    current = current.get(segment).ok_or_else(|| SpecError::DanglingReference {
      reference: reference.to_string(),
      segment: segment.to_string(),
    })?;
  }
  Ok(current)
}
