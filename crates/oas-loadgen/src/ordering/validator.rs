//! Non-fatal resource diagnostics.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
  ordering::resource::ResourceGraph,
  spec::{OperationInterface, constants},
};

/// Flags resources that operations consume through URL parameters but which
/// no reachable operation purely produces. Such resources cannot be
/// auto-seeded during a run and must come from an external pool — worth a
/// warning, never a failure.
pub(crate) struct ResourceValidator<'a> {
  resource_graph: &'a ResourceGraph<'a>,
  interfaces: &'a [OperationInterface],
}

impl<'a> ResourceValidator<'a> {
  pub(crate) fn new(resource_graph: &'a ResourceGraph<'a>, interfaces: &'a [OperationInterface]) -> Self {
    Self {
      resource_graph,
      interfaces,
    }
  }

  pub(crate) fn resources_with_no_producers(&self) -> BTreeSet<String> {
    let mut consumed = BTreeSet::new();
    for interface in self.interfaces {
      for parameter in interface.parameters.values() {
        let location = parameter.get(constants::IN).and_then(Value::as_str);
        if !matches!(location, Some(constants::PATH_PARAM | constants::QUERY_PARAM)) {
          continue;
        }
        if let Some(resource) = parameter.get(constants::RESOURCE).and_then(Value::as_str)
          && !resource.is_empty()
        {
          consumed.insert(resource.to_string());
        }
      }
    }

    consumed
      .into_iter()
      .filter(|resource| {
        self.resource_graph.resource(resource).is_some_and(|node| {
          // A pure producer creates the resource without needing one first.
          node.producers.difference(&node.consumers).next().is_none()
        })
      })
      .collect()
  }

  /// Human-readable warnings for the run stats; printing is the caller's job.
  pub(crate) fn validate(&self) -> Vec<String> {
    self
      .resources_with_no_producers()
      .into_iter()
      .map(|resource| {
        format!("resource `{resource}` is consumed by URL parameters but never produced; seed it from an external pool")
      })
      .collect()
  }
}
