//! Resource auto-tagging.
//!
//! Ordering needs `resource` tags on parameters and schema fields, but most
//! specs in the wild carry none. This pass derives them in place before the
//! graphs are built:
//!
//! - path/query parameters get a resource from their name (`petId`, `pet_id`)
//!   or, for bare identifier names (`/pet/{id}`), from the preceding static
//!   URL segment;
//! - identifier-named definition fields (`id`, `slug`, `pk`) are tagged with
//!   their definition's snake-case name and marked read-only;
//! - resources consumed only through URL parameters get a virtual definition
//!   so they still become a node in the resource graph.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::{
  config::OrderingConfig,
  errors::SpecError,
  spec::{constants, refs},
};

/// Normalize a name for collision checks: casing and `-`/`_` separators are
/// ignored, so `pet-owner`, `pet_owner` and `PetOwner` collide on purpose.
fn normalize_key(name: &str) -> String {
  name.chars().filter(|c| *c != '_' && *c != '-').collect::<String>().to_lowercase()
}

/// Annotate a spec in place with derived `resource` tags.
pub(crate) fn tag_spec(spec: &mut Value, config: &OrderingConfig) -> Result<(), SpecError> {
  let Some(root) = spec.as_object_mut() else {
    return Ok(());
  };

  // Definitions are detached while tagging so parameters and virtual
  // definitions can be written without aliasing the same subtree.
  let mut definitions = match root.remove(constants::DEFINITIONS) {
    Some(Value::Object(map)) => map,
    _ => Map::new(),
  };

  let mut tagger = ResourceTagger::new(config, &definitions);

  if let Some(paths) = root.get_mut(constants::PATHS).and_then(Value::as_object_mut) {
    for (url, path_config) in paths.iter_mut() {
      let Some(path_config) = path_config.as_object_mut() else {
        continue;
      };
      for (method_key, method_config) in path_config.iter_mut() {
        let is_common = method_key == constants::PARAMETERS;
        let parameters = if is_common {
          Some(method_config)
        } else {
          method_config.get_mut(constants::PARAMETERS)
        };
        if let Some(parameters) = parameters.and_then(Value::as_array_mut) {
          tagger.tag_url_parameters(url, parameters, &mut definitions)?;
        }
      }
    }
  }

  let names: Vec<String> = definitions.keys().cloned().collect();
  for name in names {
    tagger.tag_definition(&mut definitions, &name);
  }

  root.insert(constants::DEFINITIONS.to_string(), Value::Object(definitions));
  Ok(())
}

struct ResourceTagger<'a> {
  config: &'a OrderingConfig,
  /// Normalized names of real definitions; virtual ones are never created for these.
  definition_keys: BTreeSet<String>,
  /// Definitions already walked, normalized.
  processed: BTreeSet<String>,
}

impl<'a> ResourceTagger<'a> {
  fn new(config: &'a OrderingConfig, definitions: &Map<String, Value>) -> Self {
    Self {
      config,
      definition_keys: definitions.keys().map(|key| normalize_key(key)).collect(),
      processed: BTreeSet::new(),
    }
  }

  fn tag_url_parameters(
    &mut self,
    url: &str,
    parameters: &mut [Value],
    definitions: &mut Map<String, Value>,
  ) -> Result<(), SpecError> {
    for parameter in parameters.iter_mut() {
      let Some(object) = parameter.as_object_mut() else {
        continue;
      };
      // Shared parameter components are resolved at interface extraction;
      // tagging them here would mutate an unrelated subtree.
      if object.contains_key(constants::REF) {
        continue;
      }

      let name = object
        .get(constants::PARAMETER_NAME)
        .and_then(Value::as_str)
        .ok_or_else(|| SpecError::UnnamedParameter {
          operation: url.to_string(),
        })?
        .to_string();
      let location = object
        .get(constants::IN)
        .and_then(Value::as_str)
        .ok_or_else(|| SpecError::UnlocatedParameter {
          operation: url.to_string(),
          parameter: name.clone(),
        })?;

      if location != constants::PATH_PARAM && location != constants::QUERY_PARAM {
        continue;
      }

      // An explicit tag is respected; an explicit empty tag opts out.
      let resource = match object.get(constants::RESOURCE).and_then(Value::as_str) {
        Some(tag) => (!tag.is_empty()).then(|| tag.to_string()),
        None => {
          let derived = self.derive_resource(&name, url);
          if let Some(tag) = &derived {
            object.insert(constants::RESOURCE.to_string(), json!(tag));
          }
          derived
        }
      };

      if let Some(resource) = resource {
        self.register_virtual_definition(definitions, &resource, &name, object.clone());
      }
    }
    Ok(())
  }

  /// Derive a resource name from a parameter name, `fooId`/`foo_id` style,
  /// falling back to the preceding static URL segment for bare identifiers.
  fn derive_resource(&self, name: &str, url: &str) -> Option<String> {
    for suffix in &self.config.url_param_suffixes {
      if let Some(stem) = name.strip_suffix(suffix.as_str())
        && !stem.is_empty()
      {
        return Some(cruet::to_snake_case(stem));
      }
    }

    if self.config.resource_identifiers.contains(name) {
      let placeholder = format!("{{{name}}}");
      let mut previous: Option<&str> = None;
      for segment in url.split('/').filter(|segment| !segment.is_empty()) {
        if segment == placeholder {
          return previous.map(|segment| cruet::to_snake_case(&cruet::to_singular(segment)));
        }
        if !segment.starts_with('{') {
          previous = Some(segment);
        }
      }
      return None;
    }

    // A parameter named exactly like a definition refers to it.
    self
      .definition_keys
      .contains(&normalize_key(name))
      .then(|| cruet::to_snake_case(name))
  }

  /// Give URL-only resources a definition of their own so the resource graph
  /// grows a node for them.
  fn register_virtual_definition(
    &mut self,
    definitions: &mut Map<String, Value>,
    resource: &str,
    parameter_name: &str,
    parameter: Map<String, Value>,
  ) {
    let normalized = normalize_key(resource);
    if self.definition_keys.contains(&normalized) || self.processed.contains(&normalized) {
      return;
    }

    definitions.insert(
      resource.to_string(),
      json!({
        constants::TYPE: constants::OBJECT,
        constants::PROPERTIES: { parameter_name: Value::Object(parameter) },
      }),
    );
    self.processed.insert(normalized);
  }

  fn tag_definition(&mut self, definitions: &mut Map<String, Value>, name: &str) {
    if !self.processed.insert(normalize_key(name)) {
      return;
    }

    let mut nested_refs = Vec::new();
    if let Some(config) = definitions.get_mut(name) {
      if let Some(all_of) = config.get_mut(constants::ALL_OF).and_then(Value::as_array_mut) {
        for element in all_of.iter_mut() {
          if let Some(reference) = element.get(constants::REF).and_then(Value::as_str) {
            if let Ok(ref_name) = refs::ref_name(reference) {
              nested_refs.push(ref_name.to_string());
            }
            continue;
          }
          Self::tag_properties(self.config, name, element.get_mut(constants::PROPERTIES), &mut nested_refs);
        }
      }
      Self::tag_properties(self.config, name, config.get_mut(constants::PROPERTIES), &mut nested_refs);
    }

    for reference in nested_refs {
      self.tag_definition(definitions, &reference);
    }
  }

  /// Tag identifier-named fields with their definition's resource and mark
  /// them read-only; collect field-level `$ref`s for the recursive walk.
  fn tag_properties(
    config: &OrderingConfig,
    definition_name: &str,
    properties: Option<&mut Value>,
    nested_refs: &mut Vec<String>,
  ) {
    let Some(properties) = properties.and_then(Value::as_object_mut) else {
      return;
    };

    for (field_name, field) in properties.iter_mut() {
      let Some(field_object) = field.as_object_mut() else {
        continue;
      };
      if config.resource_identifiers.contains(field_name.as_str()) {
        if !field_object.contains_key(constants::RESOURCE) {
          field_object.insert(
            constants::RESOURCE.to_string(),
            json!(cruet::to_snake_case(definition_name)),
          );
        }
        field_object.insert(constants::READ_ONLY.to_string(), json!(true));
      } else if let Some(reference) = field_object.get(constants::REF).and_then(Value::as_str)
        && let Ok(ref_name) = refs::ref_name(reference)
      {
        nested_refs.push(ref_name.to_string());
      }
    }
  }
}
