//! End-to-end runs through the orchestrator.

use serde_json::json;

use crate::{
  config::OrderingConfig,
  orchestrator::Orchestrator,
  spec::OperationInterface,
  tests::petstore,
};

fn position(ordered: &[OperationInterface], key: &str) -> usize {
  ordered.iter().position(|operation| operation.key() == key).unwrap()
}

#[test]
fn test_order_petstore() {
  let orchestrator = Orchestrator::new(petstore::tagged_spec(), OrderingConfig::default());
  let (ordered, stats) = orchestrator.order().unwrap();

  assert_eq!(stats.operations_ordered, 5);
  assert_eq!(stats.resources_discovered, 3);
  assert!(stats.warnings.is_empty());

  assert!(position(&ordered, "POST /pet") < position(&ordered, "GET /pet/{petId}"));
  assert!(position(&ordered, "POST /pet") < position(&ordered, "POST /order"));
  assert!(position(&ordered, "POST /order") < position(&ordered, "GET /order/{orderId}"));
  assert_eq!(ordered.last().unwrap().key(), "DELETE /pet/{petId}");
}

#[test]
fn test_order_untagged_spec_after_tagging() {
  let mut orchestrator = Orchestrator::new(petstore::untagged_spec(), OrderingConfig::default());
  orchestrator.tag_resources().unwrap();
  let (ordered, stats) = orchestrator.order().unwrap();

  assert_eq!(stats.operations_ordered, 3);
  assert_eq!(ordered[0].key(), "POST /pet");
  assert_eq!(ordered.last().unwrap().key(), "DELETE /pet/{petId}");
}

#[test]
fn test_order_is_deterministic() {
  let run = || {
    let orchestrator = Orchestrator::new(petstore::tagged_spec(), OrderingConfig::default());
    let (ordered, _) = orchestrator.order().unwrap();
    ordered.iter().map(OperationInterface::key).collect::<Vec<_>>()
  };

  assert_eq!(run(), run());
}

#[test]
fn test_order_with_custom_dependency() {
  let config = OrderingConfig {
    operation_dependencies: vec![("GET /pet/{petId}".to_string(), "POST /order".to_string())],
    ..OrderingConfig::default()
  };
  let orchestrator = Orchestrator::new(petstore::tagged_spec(), config);
  let (ordered, _) = orchestrator.order().unwrap();

  assert!(position(&ordered, "GET /pet/{petId}") < position(&ordered, "POST /order"));
}

#[test]
fn test_order_with_excluded_operation() {
  let config = OrderingConfig {
    exclude_operations: ["DELETE /pet/{petId}".to_string()].into(),
    ..OrderingConfig::default()
  };
  let orchestrator = Orchestrator::new(petstore::tagged_spec(), config);
  let (ordered, stats) = orchestrator.order().unwrap();

  assert_eq!(stats.operations_ordered, 4);
  assert!(ordered.iter().all(|operation| operation.key() != "DELETE /pet/{petId}"));
}

#[test]
fn test_validate_reports_unproduced_resource() {
  let spec = json!({
    "definitions": {
      "Pet": {
        "type": "object",
        "properties": { "id": { "type": "integer", "resource": "pet" } }
      }
    },
    "paths": {
      "/pet/{petId}": {
        "get": {
          "parameters": [
            { "name": "petId", "in": "path", "type": "integer", "resource": "pet" }
          ],
          "responses": {}
        }
      }
    }
  });

  let orchestrator = Orchestrator::new(spec, OrderingConfig::default());
  let warnings = orchestrator.validate().unwrap();
  assert_eq!(warnings.len(), 1);
  assert!(warnings[0].contains("`pet`"));
}

#[test]
fn test_validate_petstore_is_clean() {
  let orchestrator = Orchestrator::new(petstore::tagged_spec(), OrderingConfig::default());
  assert!(orchestrator.validate().unwrap().is_empty());
}

#[test]
fn test_templates_resolve_every_definition() {
  let orchestrator = Orchestrator::new(petstore::tagged_spec(), OrderingConfig::default());
  let templates = orchestrator.templates(false).unwrap();

  assert_eq!(templates.keys().collect::<Vec<_>>(), vec!["Category", "Order", "Pet"]);

  let pet = &templates["Pet"];
  assert_eq!(pet["type"], "object");
  assert!(pet.get("id").is_none(), "read-only identifier dropped");
  assert_eq!(pet["category"]["properties"]["name"], json!({ "type": "string" }));
}

#[test]
fn test_template_with_read_only_keeps_markers() {
  let orchestrator = Orchestrator::new(petstore::tagged_spec(), OrderingConfig::default());

  let pet = orchestrator.template("Pet", true).unwrap().unwrap();
  assert_eq!(pet["id"], json!({ "resource": "pet" }));

  assert!(orchestrator.template("Ghost", false).unwrap().is_none());
}
