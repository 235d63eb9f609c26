//! The batch pipeline.
//!
//! One orchestrator owns one loaded spec document and an [`OrderingConfig`],
//! and runs the whole analysis in a single synchronous pass:
//!
//! 1. optional resource auto-tagging (mutates the document in place),
//! 2. interface extraction from `paths`,
//! 3. resource graph construction (`definitions` → nodes and edges),
//! 4. role assignment from the operations,
//! 5. unproduced-resource validation (warnings only),
//! 6. resource graph → operation graph transform,
//! 7. topological sort with delete deferral.
//!
//! Independently, [`templates`](Orchestrator::templates) resolves every
//! definition into the flat template the data generators consume.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
  config::OrderingConfig,
  errors::Error,
  ordering::{OperationGraph, ResourceGraph, ResourceValidator},
  resolver::SchemaResolver,
  spec::{self, OperationInterface, constants, tagger},
};

/// Statistics from one ordering run.
#[derive(Debug)]
pub(crate) struct RunStats {
  pub(crate) operations_ordered: usize,
  pub(crate) resources_discovered: usize,
  /// `(resource, producers, consumers, destructors)` counts per graph node.
  pub(crate) resource_roles: Vec<(String, usize, usize, usize)>,
  /// Non-fatal diagnostics; callers decide how to surface them.
  pub(crate) warnings: Vec<String>,
}

pub(crate) struct Orchestrator {
  spec: Value,
  config: OrderingConfig,
}

impl Orchestrator {
  pub(crate) fn new(spec: Value, config: OrderingConfig) -> Self {
    Self { spec, config }
  }

  /// Derive `resource` tags for an untagged spec before analysis.
  pub(crate) fn tag_resources(&mut self) -> Result<(), Error> {
    tagger::tag_spec(&mut self.spec, &self.config)?;
    Ok(())
  }

  /// Produce the ordered operation sequence and the run statistics.
  pub(crate) fn order(&self) -> Result<(Vec<OperationInterface>, RunStats), Error> {
    let interfaces = spec::parse_interfaces(&self.spec, &self.config)?;

    let mut resource_graph = ResourceGraph::new(&self.spec, &self.config);
    resource_graph.construct_graph()?;
    resource_graph.parse_paths(&interfaces)?;

    let warnings = ResourceValidator::new(&resource_graph, &interfaces).validate();

    let mut operation_graph = OperationGraph::new();
    operation_graph.new_graph(&interfaces);
    operation_graph.transform(&resource_graph, &self.config.operation_dependencies)?;
    let ordered = operation_graph.topological_sort()?;

    let resource_roles = resource_graph
      .resources()
      .iter()
      .map(|(name, resource)| {
        (
          name.clone(),
          resource.producers.len(),
          resource.consumers.len(),
          resource.destructors.len(),
        )
      })
      .collect();
    let stats = RunStats {
      operations_ordered: ordered.len(),
      resources_discovered: resource_graph.resources().len(),
      resource_roles,
      warnings,
    };
    Ok((ordered, stats))
  }

  /// Run only the resource analysis and report unproduced resources.
  pub(crate) fn validate(&self) -> Result<Vec<String>, Error> {
    let interfaces = spec::parse_interfaces(&self.spec, &self.config)?;

    let mut resource_graph = ResourceGraph::new(&self.spec, &self.config);
    resource_graph.construct_graph()?;
    resource_graph.parse_paths(&interfaces)?;

    Ok(ResourceValidator::new(&resource_graph, &interfaces).validate())
  }

  /// Resolve one definition into its data-generation template.
  pub(crate) fn template(&self, definition: &str, include_read_only: bool) -> Result<Option<Map<String, Value>>, Error> {
    let Some(config) = self
      .spec
      .get(constants::DEFINITIONS)
      .and_then(|definitions| definitions.get(definition))
    else {
      return Ok(None);
    };

    let mut resolver = SchemaResolver::new(&self.spec);
    let template = if include_read_only {
      resolver.resolve_with_read_only(config)?
    } else {
      resolver.resolve(config)?
    };
    Ok(Some(template))
  }

  /// Resolve every definition, each through a fresh resolver.
  pub(crate) fn templates(&self, include_read_only: bool) -> Result<BTreeMap<String, Map<String, Value>>, Error> {
    let mut templates = BTreeMap::new();
    if let Some(definitions) = self.spec.get(constants::DEFINITIONS).and_then(Value::as_object) {
      for (name, config) in definitions {
        let mut resolver = SchemaResolver::new(&self.spec);
        let template = if include_read_only {
          resolver.resolve_with_read_only(config)?
        } else {
          resolver.resolve(config)?
        };
        templates.insert(name.clone(), template);
      }
    }
    Ok(templates)
  }
}
