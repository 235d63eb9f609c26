//! Operation graph: the resource graph transformed into operation ordering.
//!
//! Every resource contributes cartesian edges between its producer, consumer
//! and destructor operations; DFS over the resource graph threads those sets
//! along structural edges so transitive dependencies carry through. Resources
//! with no producers (or consumers) get a synthetic placeholder node so they
//! still take part in the ordering.

use std::collections::{BTreeMap, BTreeSet};

use itertools::iproduct;

use crate::{
  errors::OrderingError,
  ordering::{
    graph::Dag,
    resource::{Resource, ResourceGraph},
  },
  spec::{HttpMethod, OperationInterface},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  White,
  Grey,
  Black,
}

/// DAG of operations, keyed by `METHOD url`.
#[derive(Debug, Default)]
pub(crate) struct OperationGraph {
  dag: Dag,
  /// Operation key → interface, kept beside the graph; nodes carry identity only.
  operations: BTreeMap<String, OperationInterface>,
}

impl OperationGraph {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Seed one node per operation so even operations touching no known
  /// resource appear in the final order.
  pub(crate) fn new_graph(&mut self, interfaces: &[OperationInterface]) {
    for interface in interfaces {
      let key = interface.key();
      self.dag.add_node(&key);
      self.operations.insert(key, interface.clone());
    }
  }

  pub(crate) fn operations(&self) -> &BTreeMap<String, OperationInterface> {
    &self.operations
  }

  pub(crate) fn contains(&self, key: &str) -> bool {
    self.dag.contains(key)
  }

  pub(crate) fn has_edge(&self, from: &str, to: &str) -> bool {
    self.dag.neighbors(from).any(|neighbor| neighbor == to)
  }

  /// Cross-multiply `parents × children` into edges, after dropping parents
  /// that are also children — an operation never precedes itself.
  fn add_cartesian_edges(&mut self, parents: &BTreeSet<String>, children: &BTreeSet<String>) {
    let parents: Vec<&String> = parents.difference(children).collect();
    for (parent, child) in iproduct!(parents.iter().copied(), children.iter()) {
      self.dag.add_edge(parent, child);
    }
  }

  /// Emit the edges one resource contributes and return the `(consumers,
  /// producers)` sets its dependents should thread as parents.
  fn transform_operation(
    &mut self,
    resource_key: &str,
    resource: &Resource,
    parent_consumers: &BTreeSet<String>,
    parent_producers: &BTreeSet<String>,
  ) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut consumers = resource.consumers.clone();
    let mut producers = resource.producers.clone();

    if consumers.is_empty() {
      let placeholder = format!("${resource_key}-CONSUMER");
      self.dag.add_node(&placeholder);
      consumers.insert(placeholder);
    }
    if producers.is_empty() {
      let placeholder = format!("${resource_key}-PRODUCER");
      self.dag.add_node(&placeholder);
      producers.insert(placeholder);
    }

    // creation precedes use, use precedes deletion
    self.add_cartesian_edges(&producers, &consumers);
    self.add_cartesian_edges(&consumers, &resource.destructors);
    // upstream resources come first, down both lifecycles
    self.add_cartesian_edges(parent_producers, &producers);
    self.add_cartesian_edges(parent_consumers, &consumers);

    (consumers, producers)
  }

  fn transform_dfs(
    &mut self,
    resource_graph: &ResourceGraph<'_>,
    resource_key: &str,
    parent_consumers: &BTreeSet<String>,
    parent_producers: &BTreeSet<String>,
    marks: &mut BTreeMap<String, Mark>,
  ) -> Result<(), OrderingError> {
    // Edges come first even for already-finished nodes: a second parent
    // reaching a shared dependency must still order itself before it.
    let fallback = Resource::default();
    let resource = resource_graph.resource(resource_key).unwrap_or(&fallback);
    let (consumers, producers) = self.transform_operation(resource_key, resource, parent_consumers, parent_producers);

    match marks.get(resource_key) {
      Some(Mark::Black) => return Ok(()),
      Some(Mark::Grey) => {
        return Err(OrderingError::CycleDetected {
          key: resource_key.to_string(),
        });
      }
      _ => {}
    }

    marks.insert(resource_key.to_string(), Mark::Grey);
    let neighbors: Vec<String> = resource_graph.neighbors(resource_key).map(str::to_string).collect();
    for neighbor in neighbors {
      self.transform_dfs(resource_graph, &neighbor, &consumers, &producers, marks)?;
    }
    marks.insert(resource_key.to_string(), Mark::Black);
    Ok(())
  }

  /// Transform the resource graph into operation edges, then apply the
  /// user-pinned `(parent, child)` operation pairs on top.
  ///
  /// Every resource vertex is taken as a DFS root so disconnected components
  /// are all covered; a grey revisit along one path is a dependency cycle and
  /// aborts immediately.
  pub(crate) fn transform(
    &mut self,
    resource_graph: &ResourceGraph<'_>,
    custom_dependencies: &[(String, String)],
  ) -> Result<(), OrderingError> {
    let mut marks: BTreeMap<String, Mark> = resource_graph
      .vertices()
      .map(|key| (key.to_string(), Mark::White))
      .collect();

    let roots: Vec<String> = resource_graph.vertices().map(str::to_string).collect();
    for root in roots {
      if marks.get(root.as_str()) == Some(&Mark::White) {
        self.transform_dfs(resource_graph, &root, &BTreeSet::new(), &BTreeSet::new(), &mut marks)?;
      }
    }

    for (parent, child) in custom_dependencies {
      self.dag.add_edge(parent, child);
    }
    Ok(())
  }

  /// The final operation order: placeholders dropped, and every DELETE pushed
  /// behind all non-DELETE operations with relative order preserved.
  pub(crate) fn topological_sort(&self) -> Result<Vec<OperationInterface>, OrderingError> {
    let order = self.dag.topological_sort()?;

    let mut ordered = Vec::with_capacity(self.operations.len());
    let mut deletes = Vec::new();
    for key in order {
      let Some(interface) = self.operations.get(&key) else {
        continue; // synthetic placeholder
      };
      if interface.method == HttpMethod::Delete {
        deletes.push(interface.clone());
      } else {
        ordered.push(interface.clone());
      }
    }
    ordered.extend(deletes);
    Ok(ordered)
  }
}
