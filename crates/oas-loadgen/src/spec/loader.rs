//! Spec file loading.

use std::{ffi::OsStr, path::Path};

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

/// Read an OpenAPI document into a raw value tree, format chosen by extension.
///
/// Key order is preserved end to end, which keeps interface extraction and
/// template output deterministic for a given file.
pub fn load_spec(path: &Path) -> anyhow::Result<Value> {
  let format = path
    .extension()
    .and_then(OsStr::to_str)
    .map_or(SpecFormat::default(), SpecFormat::from_extension);

  let content = std::fs::read_to_string(path)?;
  let spec = match format {
    SpecFormat::Json => serde_json::from_str(&content)?,
    SpecFormat::Yaml => yaml_to_json(serde_yaml::from_str(&content)?)?,
  };
  Ok(spec)
}

/// Convert a YAML tree to JSON, stringifying scalar keys.
///
/// Swagger YAML routinely writes response statuses as bare integers (`200:`),
/// which JSON object keys cannot carry directly.
fn yaml_to_json(value: serde_yaml::Value) -> anyhow::Result<Value> {
  let converted = match value {
    serde_yaml::Value::Null => Value::Null,
    serde_yaml::Value::Bool(flag) => Value::Bool(flag),
    serde_yaml::Value::Number(number) => serde_json::from_str(&number.to_string())?,
    serde_yaml::Value::String(text) => Value::String(text),
    serde_yaml::Value::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect::<Result<_, _>>()?),
    serde_yaml::Value::Mapping(mapping) => {
      let mut object = serde_json::Map::new();
      for (key, entry) in mapping {
        let key = match key {
          serde_yaml::Value::String(text) => text,
          serde_yaml::Value::Number(number) => number.to_string(),
          serde_yaml::Value::Bool(flag) => flag.to_string(),
          other => anyhow::bail!("unsupported mapping key: {other:?}"),
        };
        object.insert(key, yaml_to_json(entry)?);
      }
      Value::Object(object)
    }
    serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
  };
  Ok(converted)
}
