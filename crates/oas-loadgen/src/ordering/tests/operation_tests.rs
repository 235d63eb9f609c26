use serde_json::{Value, json};

use crate::{
  config::OrderingConfig,
  errors::OrderingError,
  ordering::{OperationGraph, ResourceGraph},
  spec::{OperationInterface, parse_interfaces},
};

fn petstore_spec() -> Value {
  crate::tests::petstore::tagged_spec()
}

fn build_graph(spec: &Value, config: &OrderingConfig) -> (Vec<OperationInterface>, OperationGraph) {
  let interfaces = parse_interfaces(spec, config).unwrap();
  let mut resource_graph = ResourceGraph::new(spec, config);
  resource_graph.construct_graph().unwrap();
  resource_graph.parse_paths(&interfaces).unwrap();

  let mut operation_graph = OperationGraph::new();
  operation_graph.new_graph(&interfaces);
  operation_graph
    .transform(&resource_graph, &config.operation_dependencies)
    .unwrap();
  (interfaces, operation_graph)
}

fn position(ordered: &[OperationInterface], key: &str) -> usize {
  ordered.iter().position(|operation| operation.key() == key).unwrap()
}

#[test]
fn test_transform_orders_resource_lifecycle() {
  let spec = petstore_spec();
  let config = OrderingConfig::default();
  let (_, graph) = build_graph(&spec, &config);

  // creation before use, use before deletion
  assert!(graph.has_edge("POST /pet", "GET /pet/{petId}"));
  assert!(graph.has_edge("POST /pet", "DELETE /pet/{petId}"));
  assert!(graph.has_edge("GET /pet/{petId}", "DELETE /pet/{petId}"));
}

#[test]
fn test_transform_threads_parent_sets_across_resources() {
  let spec = petstore_spec();
  let config = OrderingConfig::default();
  let (_, graph) = build_graph(&spec, &config);

  // order depends on pet: pet's lifecycle precedes order's
  assert!(graph.has_edge("POST /pet", "POST /order"));
  assert!(graph.has_edge("GET /pet/{petId}", "GET /order/{orderId}"));
}

#[test]
fn test_transform_synthesizes_placeholders_for_idle_resources() {
  let spec = petstore_spec();
  let config = OrderingConfig::default();
  let (_, graph) = build_graph(&spec, &config);

  // category has no operations; its lifecycle exists as placeholders that
  // still order pet's operations behind it
  assert!(graph.contains("$category-PRODUCER"));
  assert!(graph.has_edge("$category-PRODUCER", "$category-CONSUMER"));
  assert!(graph.has_edge("$category-PRODUCER", "POST /pet"));
  assert!(graph.has_edge("$category-CONSUMER", "GET /pet/{petId}"));
}

#[test]
fn test_topological_sort_drops_placeholders_and_defers_deletes() {
  let spec = petstore_spec();
  let config = OrderingConfig::default();
  let (interfaces, graph) = build_graph(&spec, &config);

  let ordered = graph.topological_sort().unwrap();
  assert_eq!(ordered.len(), interfaces.len(), "every real operation, nothing else");
  assert!(ordered.iter().all(|operation| !operation.key().starts_with('$')));

  assert!(position(&ordered, "POST /pet") < position(&ordered, "GET /pet/{petId}"));
  assert!(position(&ordered, "POST /pet") < position(&ordered, "POST /order"));
  assert!(position(&ordered, "POST /order") < position(&ordered, "GET /order/{orderId}"));
  assert_eq!(
    ordered.last().unwrap().key(),
    "DELETE /pet/{petId}",
    "deletes run after everything else"
  );
}

#[test]
fn test_transform_reports_resource_cycles() {
  let spec = json!({
    "definitions": {
      "Alpha": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "resource": "alpha" },
          "beta": { "$ref": "#/definitions/Beta" }
        }
      },
      "Beta": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "resource": "beta" },
          "alpha": { "$ref": "#/definitions/Alpha" }
        }
      }
    },
    "paths": {}
  });
  let config = OrderingConfig::default();
  let interfaces = parse_interfaces(&spec, &config).unwrap();
  let mut resource_graph = ResourceGraph::new(&spec, &config);
  resource_graph.construct_graph().unwrap();
  resource_graph.parse_paths(&interfaces).unwrap();

  let mut operation_graph = OperationGraph::new();
  operation_graph.new_graph(&interfaces);
  let result = operation_graph.transform(&resource_graph, &[]);
  assert!(matches!(result, Err(OrderingError::CycleDetected { .. })));
}

#[test]
fn test_custom_dependencies_pin_unrelated_operations() {
  let spec = json!({
    "definitions": {
      "Alpha": {
        "type": "object",
        "properties": { "id": { "type": "integer", "resource": "alpha" } }
      },
      "Beta": {
        "type": "object",
        "properties": { "id": { "type": "integer", "resource": "beta" } }
      }
    },
    "paths": {
      "/alpha": {
        "post": { "responses": { "200": { "schema": { "$ref": "#/definitions/Alpha" } } } }
      },
      "/beta": {
        "post": { "responses": { "200": { "schema": { "$ref": "#/definitions/Beta" } } } }
      }
    }
  });
  let config = OrderingConfig {
    operation_dependencies: vec![("POST /beta".to_string(), "POST /alpha".to_string())],
    ..OrderingConfig::default()
  };
  let (_, graph) = build_graph(&spec, &config);

  assert!(graph.has_edge("POST /beta", "POST /alpha"));
  let ordered = graph.topological_sort().unwrap();
  assert!(position(&ordered, "POST /beta") < position(&ordered, "POST /alpha"));
}

#[test]
fn test_operations_map_tracks_every_interface() {
  let spec = petstore_spec();
  let config = OrderingConfig::default();
  let (interfaces, graph) = build_graph(&spec, &config);

  assert_eq!(graph.operations().len(), interfaces.len());
  assert!(graph.contains("POST /pet"));
  assert!(!graph.contains("PATCH /pet"));
}
