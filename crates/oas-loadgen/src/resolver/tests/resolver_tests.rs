use serde_json::{Value, json};

use crate::resolver::SchemaResolver;

fn petish_spec() -> Value {
  json!({
    "definitions": {
      "Pet": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "resource": "pet", "readOnly": true },
          "name": { "type": "string", "title": "Pet Name" },
          "category": { "$ref": "#/definitions/Category" }
        }
      },
      "Category": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "resource": "category", "readOnly": true },
          "label": { "type": "string" }
        }
      }
    }
  })
}

fn resolve(spec: &Value, definition: &str) -> serde_json::Map<String, Value> {
  let config = &spec["definitions"][definition];
  SchemaResolver::new(spec).resolve(config).unwrap()
}

#[test]
fn test_resolve_flattens_refs_and_drops_read_only() {
  let spec = petish_spec();
  let template = resolve(&spec, "Pet");

  assert_eq!(template["type"], "object");
  assert!(template.get("id").is_none(), "read-only fields are dropped");
  assert_eq!(template["name"], json!({ "type": "string" }), "title is stripped");

  let category = &template["category"];
  assert_eq!(category["type"], "object");
  assert_eq!(category["properties"]["label"], json!({ "type": "string" }));
  assert!(category["properties"].get("id").is_none());
}

#[test]
fn test_resolve_with_read_only_keeps_resource_markers() {
  let spec = petish_spec();
  let config = &spec["definitions"]["Pet"];
  let template = SchemaResolver::new(&spec).resolve_with_read_only(config).unwrap();

  // pooled-value marker, not the raw field config
  assert_eq!(template["id"], json!({ "resource": "pet" }));
}

#[test]
fn test_resolve_self_referential_schema_omits_the_field() {
  let spec = json!({
    "definitions": {
      "Node": {
        "type": "object",
        "properties": {
          "label": { "type": "string" },
          "child": { "$ref": "#/definitions/Node" }
        }
      }
    }
  });

  let template = resolve(&spec, "Node");

  let child = &template["child"];
  assert_eq!(child["properties"]["label"], json!({ "type": "string" }));
  assert!(
    child["properties"].get("child").is_none(),
    "the cyclic field is omitted instead of re-expanded"
  );
}

#[test]
fn test_resolve_mutually_referential_schemas_terminate() {
  let spec = json!({
    "definitions": {
      "Left": {
        "type": "object",
        "properties": {
          "name": { "type": "string" },
          "right": { "$ref": "#/definitions/Right" }
        }
      },
      "Right": {
        "type": "object",
        "properties": {
          "left": { "$ref": "#/definitions/Left" }
        }
      }
    }
  });

  let template = resolve(&spec, "Left");

  // Right is reachable, and Left inside it too, but the path back into
  // Right is cut off there.
  let left_again = &template["right"]["properties"]["left"];
  assert_eq!(left_again["properties"]["name"], json!({ "type": "string" }));
  assert!(left_again["properties"].get("right").is_none());
}

#[test]
fn test_resolve_all_of_merges_shallowly() {
  let spec = json!({
    "definitions": {
      "Base": {
        "type": "object",
        "properties": {
          "name": { "type": "string" },
          "shared": { "type": "string" }
        }
      },
      "Derived": {
        "allOf": [
          { "$ref": "#/definitions/Base" },
          {
            "type": "object",
            "properties": {
              "extra": { "type": "integer" },
              "shared": { "type": "integer" }
            }
          }
        ]
      }
    }
  });

  let template = resolve(&spec, "Derived");

  assert_eq!(template["name"], json!({ "type": "string" }));
  assert_eq!(template["extra"], json!({ "type": "integer" }));
  assert_eq!(template["shared"], json!({ "type": "integer" }), "later sub-schemas win");
}

#[test]
fn test_resolve_all_of_schema_keeps_the_type_stamp() {
  let spec = json!({
    "definitions": {
      "Base": {
        "type": "object",
        "properties": { "name": { "type": "string" } }
      },
      "Derived": {
        "allOf": [
          { "$ref": "#/definitions/Base" },
          { "type": "object", "properties": { "extra": { "type": "integer" } } }
        ]
      }
    }
  });

  let template = resolve(&spec, "Derived");

  assert_eq!(template["type"], "object");
  assert_eq!(template["name"], json!({ "type": "string" }));
}

#[test]
fn test_resolve_additional_properties() {
  let spec = json!({
    "definitions": {
      "Labels": {
        "type": "object",
        "additionalProperties": { "type": "string" },
        "minProperties": 2
      }
    }
  });

  let template = resolve(&spec, "Labels");

  assert_eq!(template["additionalProperties"], json!({ "type": "string" }));
  assert_eq!(template["minProperties"], json!(2));
  assert_eq!(template["type"], "object");
}

#[test]
fn test_resolve_additional_properties_defaults_min_to_zero() {
  let spec = json!({
    "definitions": {
      "Labels": {
        "type": "object",
        "additionalProperties": { "$ref": "#/definitions/Entry" }
      },
      "Entry": {
        "type": "object",
        "properties": { "value": { "type": "string" } }
      }
    }
  });

  let template = resolve(&spec, "Labels");

  assert_eq!(template["minProperties"], json!(0));
  assert_eq!(template["additionalProperties"]["value"], json!({ "type": "string" }));
}

#[test]
fn test_resolve_nested_objects_recurse() {
  let spec = json!({
    "definitions": {
      "Pet": {
        "type": "object",
        "properties": {
          "address": {
            "type": "object",
            "properties": {
              "street": { "type": "string", "title": "Street" }
            }
          }
        }
      }
    }
  });

  let template = resolve(&spec, "Pet");

  assert_eq!(
    template["address"]["street"],
    json!({ "type": "string" }),
    "descriptive keys are stripped at every depth"
  );
}

#[test]
fn test_resolution_is_deterministic() {
  let spec = petish_spec();
  let first = resolve(&spec, "Pet");
  let second = resolve(&spec, "Pet");
  assert_eq!(first, second);
}

#[test]
fn test_resolve_empty_fragment() {
  let spec = json!({ "definitions": {} });
  let template = SchemaResolver::new(&spec).resolve(&json!({})).unwrap();
  assert!(template.is_empty());

  let template = SchemaResolver::new(&spec).resolve(&json!("not an object")).unwrap();
  assert!(template.is_empty());
}
