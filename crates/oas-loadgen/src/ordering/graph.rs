//! Directed graphs over string keys.
//!
//! Adjacency lives in `BTreeMap`s, so vertex and neighbor iteration is always
//! lexicographic. Every ordering decision downstream (placeholder creation,
//! cartesian edge insertion, topological tie-breaks) inherits that and the
//! final operation order is reproducible run to run.

use std::collections::BTreeMap;

use crate::errors::OrderingError;

/// Plain directed graph: `node → {neighbor: weight}`. Permits self-edges.
#[derive(Debug, Default, Clone)]
pub(crate) struct DirectedGraph {
  adjacency: BTreeMap<String, BTreeMap<String, u32>>,
}

impl DirectedGraph {
  pub(crate) fn add_node(&mut self, key: &str) {
    self.adjacency.entry(key.to_string()).or_default();
  }

  pub(crate) fn add_edge(&mut self, from: &str, to: &str, weight: u32) {
    self.add_node(to);
    self.adjacency.entry(from.to_string()).or_default().insert(to.to_string(), weight);
  }

  pub(crate) fn contains(&self, key: &str) -> bool {
    self.adjacency.contains_key(key)
  }

  pub(crate) fn vertices(&self) -> impl Iterator<Item = &str> {
    self.adjacency.keys().map(String::as_str)
  }

  pub(crate) fn neighbors(&self, key: &str) -> impl Iterator<Item = &str> {
    self.adjacency.get(key).into_iter().flat_map(|edges| edges.keys().map(String::as_str))
  }

  pub(crate) fn weight(&self, from: &str, to: &str) -> Option<u32> {
    self.adjacency.get(from).and_then(|edges| edges.get(to)).copied()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  White,
  Grey,
  Black,
}

/// Directed acyclic graph.
///
/// Acyclicity is not enforced on insertion — construction may transiently
/// describe anything — but [`topological_sort`](Dag::topological_sort) detects
/// cycles exactly. Self-edges are silently skipped, unlike [`DirectedGraph`].
#[derive(Debug, Default, Clone)]
pub(crate) struct Dag {
  graph: DirectedGraph,
}

impl Dag {
  pub(crate) fn add_node(&mut self, key: &str) {
    self.graph.add_node(key);
  }

  pub(crate) fn add_edge(&mut self, from: &str, to: &str) {
    if from != to {
      self.graph.add_edge(from, to, 0);
    }
  }

  pub(crate) fn contains(&self, key: &str) -> bool {
    self.graph.contains(key)
  }

  pub(crate) fn vertices(&self) -> impl Iterator<Item = &str> {
    self.graph.vertices()
  }

  pub(crate) fn neighbors(&self, key: &str) -> impl Iterator<Item = &str> {
    self.graph.neighbors(key)
  }

  /// Linearize the graph so every edge source precedes its targets.
  ///
  /// Standard white/grey/black DFS: reaching a grey node means the current
  /// path re-entered itself and the sort aborts with the cycle error.
  pub(crate) fn topological_sort(&self) -> Result<Vec<String>, OrderingError> {
    let mut marks: BTreeMap<&str, Mark> = self.vertices().map(|key| (key, Mark::White)).collect();
    let mut order = Vec::with_capacity(marks.len());

    for key in self.vertices() {
      if marks.get(key) == Some(&Mark::White) {
        self.sort_visit(key, &mut marks, &mut order)?;
      }
    }

    // nodes were pushed in finish order; dependencies must come first
    order.reverse();
    Ok(order)
  }

  fn sort_visit<'a>(
    &'a self,
    key: &'a str,
    marks: &mut BTreeMap<&'a str, Mark>,
    order: &mut Vec<String>,
  ) -> Result<(), OrderingError> {
    match marks.get(key) {
      Some(Mark::Black) => return Ok(()),
      Some(Mark::Grey) => {
        return Err(OrderingError::CycleDetected { key: key.to_string() });
      }
      _ => {}
    }

    marks.insert(key, Mark::Grey);
    for neighbor in self.neighbors(key) {
      self.sort_visit(neighbor, marks, order)?;
    }
    marks.insert(key, Mark::Black);
    order.push(key.to_string());
    Ok(())
  }
}
