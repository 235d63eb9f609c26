//! Schema resolution.
//!
//! Flattens a schema fragment into the template the data generators consume:
//! `$ref`s expanded, `allOf` merged, read-only fields dropped, and
//! resource-tagged fields reduced to `{"resource": name}` markers that a
//! pooled-value provider substitutes at run time.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::{
  errors::SpecError,
  spec::{constants, refs},
};

/// Recursive resolver over one spec document.
///
/// Resolution state (the ref path currently being expanded, the one-shot
/// top-level flag) lives on the instance, so use a fresh resolver per
/// entry-point schema. Resolving the same schema twice from fresh instances
/// yields identical templates.
pub(crate) struct SchemaResolver<'a> {
  spec: &'a Value,
  /// Refs on the active resolution path; re-entering one is skipped, which is
  /// what bounds recursion on cyclic schemas.
  visiting: BTreeSet<String>,
  include_read_only: bool,
  top_level: bool,
}

impl<'a> SchemaResolver<'a> {
  pub(crate) fn new(spec: &'a Value) -> Self {
    Self {
      spec,
      visiting: BTreeSet::new(),
      include_read_only: false,
      top_level: true,
    }
  }

  /// Resolve a schema fragment into a generation template.
  pub(crate) fn resolve(&mut self, config: &Value) -> Result<Map<String, Value>, SpecError> {
    self.resolve_fragment(config, false)
  }

  /// Like [`resolve`](Self::resolve), but keeps read-only fields. Used for
  /// mock data that responses are asserted against, never for request bodies.
  pub(crate) fn resolve_with_read_only(&mut self, config: &Value) -> Result<Map<String, Value>, SpecError> {
    self.include_read_only = true;
    let result = self.resolve_fragment(config, false);
    self.include_read_only = false;
    result
  }

  fn resolve_fragment(&mut self, config: &Value, is_field: bool) -> Result<Map<String, Value>, SpecError> {
    let Some(object) = config.as_object() else {
      return Ok(Map::new());
    };
    if object.is_empty() {
      return Ok(Map::new());
    }

    // Claim the one-shot type stamp before any nested resolution can.
    let stamp_type = self.top_level;
    self.top_level = false;

    let mut body = Map::new();

    // `allOf` and `additionalProperties` are only composition constructs at
    // the top of a schema; as field names they are plain data.
    if !is_field {
      if let Some(all_of) = object.get(constants::ALL_OF).and_then(Value::as_array)
        && !all_of.is_empty()
      {
        for element in all_of {
          // shallow merge, later sub-schemas win
          for (key, value) in self.resolve_fragment(element, false)? {
            body.insert(key, value);
          }
        }
        if stamp_type && !body.contains_key(constants::TYPE) {
          body.insert(constants::TYPE.to_string(), json!(constants::OBJECT));
        }
        return Ok(body);
      }

      body = self.additional_properties(object)?;
    }

    let working = match object.get(constants::PROPERTIES) {
      // An empty `properties` object is a valid, empty schema.
      Some(Value::Object(properties)) => properties,
      _ => object,
    };

    if stamp_type {
      let type_value = working.get(constants::TYPE).cloned().unwrap_or_else(|| json!(constants::OBJECT));
      body.insert(constants::TYPE.to_string(), type_value);
    }

    self.parse_properties(working, body)
  }

  /// Free-form dict fields: resolved as a wildcard entry plus the minimum
  /// entry count the generator must honor.
  fn additional_properties(&mut self, config: &Map<String, Value>) -> Result<Map<String, Value>, SpecError> {
    let mut body = Map::new();

    let Some(additional) = config
      .get(constants::ADDITIONAL_PROPERTIES)
      .and_then(Value::as_object)
      .filter(|object| !object.is_empty())
    else {
      return Ok(body);
    };

    let resolved = match additional.get(constants::REF).and_then(Value::as_str) {
      Some(reference) => {
        let target = refs::resolve_reference(self.spec, reference)?;
        self.resolve_fragment(target, false)?
      }
      None => self.resolve_element(additional)?,
    };

    body.insert(constants::ADDITIONAL_PROPERTIES.to_string(), Value::Object(resolved));
    body.insert(
      constants::MIN_PROPERTIES.to_string(),
      config.get(constants::MIN_PROPERTIES).cloned().unwrap_or_else(|| json!(0)),
    );
    Ok(body)
  }

  fn parse_properties(
    &mut self,
    config: &Map<String, Value>,
    mut body: Map<String, Value>,
  ) -> Result<Map<String, Value>, SpecError> {
    for (item_name, item_config) in config {
      // already folded in by additional_properties
      if item_name == constants::ADDITIONAL_PROPERTIES || item_name == constants::MIN_PROPERTIES {
        continue;
      }
      if item_name == constants::REF {
        // A top-level reference replaces the whole template.
        if let Some(reference) = item_config.as_str()
          && self.visiting.insert(reference.to_string())
        {
          let target = refs::resolve_reference(self.spec, reference)?;
          body = self.resolve_fragment(target, false)?;
          self.visiting.remove(reference);
        }
        continue;
      }

      let Some(item_object) = item_config.as_object() else {
        continue;
      };

      if let Some(reference) = item_object.get(constants::REF).and_then(Value::as_str) {
        // A ref already on the resolution path is a cycle: the field is
        // omitted rather than re-expanded.
        if self.visiting.insert(reference.to_string()) {
          let target = refs::resolve_reference(self.spec, reference)?;
          let resolved = self.resolve_fragment(target, false)?;
          body.insert(
            item_name.clone(),
            json!({ constants::TYPE: constants::OBJECT, constants::PROPERTIES: resolved }),
          );
          self.visiting.remove(reference);
        }
        continue;
      }

      let read_only = item_object.get(constants::READ_ONLY).and_then(Value::as_bool).unwrap_or(false);
      if read_only && !self.include_read_only {
        continue;
      }

      if let Some(resource) = item_object.get(constants::RESOURCE).and_then(Value::as_str)
        && !resource.is_empty()
      {
        // Marker only; a pooled value is substituted downstream.
        body.insert(item_name.clone(), json!({ constants::RESOURCE: resource }));
      } else {
        body.insert(item_name.clone(), Value::Object(self.resolve_element(item_object)?));
      }
    }

    Ok(body)
  }

  /// Leaf field configuration: nested objects recurse, descriptive OpenAPI
  /// keys are stripped, scalars pass through unchanged.
  fn resolve_element(&mut self, item_config: &Map<String, Value>) -> Result<Map<String, Value>, SpecError> {
    let mut data = Map::new();
    for (key, value) in item_config {
      if value.is_object() {
        let singleton = Value::Object(Map::from_iter([(key.clone(), value.clone())]));
        for (nested_key, nested_value) in self.resolve_fragment(&singleton, true)? {
          data.insert(nested_key, nested_value);
        }
      } else if constants::NON_GENERATIVE_KEYS.contains(&key.as_str()) {
        continue;
      } else {
        data.insert(key.clone(), value.clone());
      }
    }
    Ok(data)
  }
}
