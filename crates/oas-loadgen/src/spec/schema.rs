//! Read-side helpers for raw schema fragments.

use serde_json::Value;

use crate::spec::constants;

/// Unwrap one level of `type: array` so callers see the element schema.
pub(crate) fn unwrap_array(config: &Value) -> &Value {
  if config.get(constants::TYPE).and_then(Value::as_str) == Some(constants::ARRAY) {
    config.get(constants::ITEMS).unwrap_or(config)
  } else {
    config
  }
}

/// The `$ref` of a fragment, looking through one array level.
pub(crate) fn ref_of(config: &Value) -> Option<&str> {
  unwrap_array(config).get(constants::REF).and_then(Value::as_str)
}

/// The `resource` tag of a fragment, looking through one array level.
pub(crate) fn resource_of(config: &Value) -> Option<&str> {
  unwrap_array(config).get(constants::RESOURCE).and_then(Value::as_str)
}

/// Collect the top-level `$ref`s of a schema object.
///
/// A direct (possibly array-wrapped) `$ref` wins outright; otherwise object
/// properties are scanned one level deep. Deeper nesting is intentionally not
/// followed — resource ownership is decided by what a schema exposes at its
/// surface.
pub(crate) fn top_level_refs(schema: &Value) -> Vec<String> {
  if let Some(reference) = ref_of(schema) {
    return vec![reference.to_string()];
  }

  let unwrapped = unwrap_array(schema);
  let mut refs = Vec::new();
  if let Some(properties) = unwrapped.get(constants::PROPERTIES).and_then(Value::as_object) {
    for field_config in properties.values() {
      if let Some(reference) = ref_of(field_config) {
        refs.push(reference.to_string());
      }
    }
  }
  refs
}

/// Top-level `$ref`s of the schema attached to a parameter or response object.
pub(crate) fn attached_schema_refs(config: &Value) -> Vec<String> {
  config.get(constants::SCHEMA).map(top_level_refs).unwrap_or_default()
}
