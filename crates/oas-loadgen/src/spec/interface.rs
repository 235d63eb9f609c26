//! Operation interfaces extracted from the `paths` section.
//!
//! An [`OperationInterface`] is the parse-time view of one HTTP operation:
//! everything the ordering graphs and the script emitters need, immutable once
//! built. Operations are keyed as `"METHOD url"` throughout the pipeline.

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
  config::OrderingConfig,
  errors::SpecError,
  spec::{constants, refs},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub(crate) enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl HttpMethod {
  pub(crate) fn parse(method: &str, url: &str) -> Result<Self, SpecError> {
    method.parse().map_err(|_| SpecError::InvalidMethod {
      method: method.to_string(),
      url: url.to_string(),
    })
  }
}

/// One HTTP operation as seen by the ordering pipeline.
#[derive(Debug, Clone)]
pub(crate) struct OperationInterface {
  pub(crate) method: HttpMethod,
  pub(crate) url: String,
  /// Parameter name → raw parameter object, in spec order.
  pub(crate) parameters: IndexMap<String, Value>,
  /// Response status → raw response object, in spec order.
  pub(crate) responses: IndexMap<String, Value>,
  pub(crate) tags: Vec<String>,
}

impl OperationInterface {
  /// The operation key, e.g. `POST /pet`.
  pub(crate) fn key(&self) -> String {
    format!("{} {}", self.method, self.url)
  }
}

/// Walk `paths` and build one interface per method.
///
/// Path-level common parameters are merged into every method's parameter map.
/// Parameter-level `$ref`s are resolved eagerly so downstream passes only ever
/// see concrete parameter objects. Operations listed in
/// [`OrderingConfig::exclude_operations`] are dropped here, before they can
/// contribute graph edges.
pub(crate) fn parse_interfaces(spec: &Value, config: &OrderingConfig) -> Result<Vec<OperationInterface>, SpecError> {
  let mut interfaces = Vec::new();

  let Some(paths) = spec.get(constants::PATHS).and_then(Value::as_object) else {
    return Ok(interfaces);
  };

  for (url, path_config) in paths {
    let Some(path_config) = path_config.as_object() else {
      continue;
    };

    let common_parameters = path_config
      .get(constants::PARAMETERS)
      .and_then(Value::as_array)
      .cloned()
      .unwrap_or_default();

    for (method_key, method_config) in path_config {
      if method_key == constants::PARAMETERS {
        continue;
      }

      let method = HttpMethod::parse(method_key, url)?;
      let key = format!("{method} {url}");
      if config.exclude_operations.contains(&key) {
        continue;
      }

      let mut parameters = IndexMap::new();
      let method_parameters = method_config
        .get(constants::PARAMETERS)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

      for parameter in common_parameters.iter().chain(method_parameters.iter()) {
        let resolved = match parameter.get(constants::REF).and_then(Value::as_str) {
          Some(reference) => refs::resolve_reference(spec, reference)?,
          None => parameter,
        };
        let name = resolved
          .get(constants::PARAMETER_NAME)
          .and_then(Value::as_str)
          .ok_or_else(|| SpecError::UnnamedParameter { operation: key.clone() })?;
        parameters.insert(name.to_string(), resolved.clone());
      }

      let mut responses = IndexMap::new();
      if let Some(response_map) = method_config.get(constants::RESPONSES).and_then(Value::as_object) {
        for (status, response) in response_map {
          responses.insert(status.clone(), response.clone());
        }
      }

      let tags = method_config
        .get(constants::TAGS)
        .and_then(Value::as_array)
        .map(|values| {
          values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
        })
        .unwrap_or_default();

      interfaces.push(OperationInterface {
        method,
        url: url.clone(),
        parameters,
        responses,
        tags,
      });
    }
  }

  Ok(interfaces)
}
