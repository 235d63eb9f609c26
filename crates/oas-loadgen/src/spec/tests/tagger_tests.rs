use serde_json::json;

use crate::{config::OrderingConfig, spec::tagger};

#[test]
fn test_tag_url_parameter_from_suffix() {
  let mut spec = json!({
    "paths": {
      "/pet/{petId}": {
        "parameters": [
          { "name": "petId", "in": "path", "required": true, "type": "integer" }
        ],
        "get": { "responses": {} }
      }
    },
    "definitions": {}
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  let parameter = &spec["paths"]["/pet/{petId}"]["parameters"][0];
  assert_eq!(parameter["resource"], "pet");
}

#[test]
fn test_tag_bare_identifier_uses_preceding_segment() {
  let mut spec = json!({
    "paths": {
      "/stores/{id}": {
        "get": {
          "parameters": [
            { "name": "id", "in": "path", "required": true, "type": "integer" }
          ],
          "responses": {}
        }
      }
    },
    "definitions": {}
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  let parameter = &spec["paths"]["/stores/{id}"]["get"]["parameters"][0];
  assert_eq!(parameter["resource"], "store", "segment is singularized");
}

#[test]
fn test_explicit_empty_tag_opts_out() {
  let mut spec = json!({
    "paths": {
      "/pet/{petId}": {
        "get": {
          "parameters": [
            { "name": "petId", "in": "path", "type": "integer", "resource": "" }
          ],
          "responses": {}
        }
      }
    },
    "definitions": {}
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  assert_eq!(spec["paths"]["/pet/{petId}"]["get"]["parameters"][0]["resource"], "");
  assert!(
    spec["definitions"].as_object().unwrap().is_empty(),
    "no virtual definition for an opted-out parameter"
  );
}

#[test]
fn test_url_only_resource_gets_virtual_definition() {
  let mut spec = json!({
    "paths": {
      "/team/{teamId}": {
        "get": {
          "parameters": [
            { "name": "teamId", "in": "path", "type": "integer" }
          ],
          "responses": {}
        }
      }
    },
    "definitions": {}
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  let team = &spec["definitions"]["team"];
  assert_eq!(team["type"], "object");
  assert_eq!(team["properties"]["teamId"]["resource"], "team");
}

#[test]
fn test_tag_definition_identifier_fields() {
  let mut spec = json!({
    "paths": {},
    "definitions": {
      "PetOwner": {
        "type": "object",
        "properties": {
          "id": { "type": "integer" },
          "name": { "type": "string" }
        }
      }
    }
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  let id = &spec["definitions"]["PetOwner"]["properties"]["id"];
  assert_eq!(id["resource"], "pet_owner");
  assert_eq!(id["readOnly"], true);

  let name = &spec["definitions"]["PetOwner"]["properties"]["name"];
  assert!(name.get("resource").is_none());
}

#[test]
fn test_tag_definition_respects_existing_tag() {
  let mut spec = json!({
    "paths": {},
    "definitions": {
      "Pet": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "resource": "animal" }
        }
      }
    }
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  let id = &spec["definitions"]["Pet"]["properties"]["id"];
  assert_eq!(id["resource"], "animal", "explicit tags are never overwritten");
  assert_eq!(id["readOnly"], true);
}

#[test]
fn test_tag_definition_follows_all_of() {
  let mut spec = json!({
    "paths": {},
    "definitions": {
      "Base": {
        "type": "object",
        "properties": { "id": { "type": "integer" } }
      },
      "Derived": {
        "allOf": [
          { "$ref": "#/definitions/Base" },
          { "properties": { "id": { "type": "integer" } } }
        ]
      }
    }
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  assert_eq!(spec["definitions"]["Base"]["properties"]["id"]["resource"], "base");
  assert_eq!(
    spec["definitions"]["Derived"]["allOf"][1]["properties"]["id"]["resource"],
    "derived"
  );
}

#[test]
fn test_parameter_named_like_definition() {
  let mut spec = json!({
    "paths": {
      "/search": {
        "get": {
          "parameters": [
            { "name": "category", "in": "query", "type": "string" }
          ],
          "responses": {}
        }
      }
    },
    "definitions": {
      "Category": {
        "type": "object",
        "properties": { "id": { "type": "integer" } }
      }
    }
  });

  tagger::tag_spec(&mut spec, &OrderingConfig::default()).unwrap();

  let parameter = &spec["paths"]["/search"]["get"]["parameters"][0];
  assert_eq!(parameter["resource"], "category");
}
