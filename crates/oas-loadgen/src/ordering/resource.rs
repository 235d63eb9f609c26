//! Resource graph: structural dependencies between domain entities.
//!
//! Each named schema definition becomes a [`Reference`] that works out which
//! resource it is "about" (its primary resource) and which other resources it
//! touches. Definitions sharing a primary resource collapse onto a single
//! [`Resource`] node, and edges point from a dependency to its dependents —
//! the source must exist before the dependent can.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::{
  config::OrderingConfig,
  errors::{Error, ResourceError, SpecError},
  ordering::graph::Dag,
  spec::{HttpMethod, OperationInterface, constants, refs, schema},
};

/// One named schema definition and its resource bookkeeping.
#[derive(Debug)]
pub(crate) struct Reference {
  /// Snake-case fallback name, used when nothing tags a resource.
  name: String,
  config: Value,
  /// `$ref` strings reachable from this definition's fields.
  pub(crate) connected_refs: BTreeSet<String>,
  /// Resource tags found on non-identifying fields.
  pub(crate) associated_resources: BTreeSet<String>,
  /// Set once by [`get_connections`](Self::get_connections), never changed.
  pub(crate) primary_resource: Option<String>,
}

impl Reference {
  pub(crate) fn new(key: &str, config: Value) -> Self {
    Self {
      name: cruet::to_snake_case(key),
      config,
      connected_refs: BTreeSet::new(),
      associated_resources: BTreeSet::new(),
      primary_resource: None,
    }
  }

  /// Scan `properties` and `additionalProperties` for refs and resource tags,
  /// then settle the primary resource.
  ///
  /// A tag sitting on an identifying field (`id`, `slug`, `pk` by default)
  /// names the definition's own resource and forces the choice over any
  /// foreign-key tags found elsewhere in the schema.
  pub(crate) fn get_connections(&mut self, identifiers: &BTreeSet<String>) -> Result<(), ResourceError> {
    let mut primary_candidates = BTreeSet::new();

    if let Some(properties) = self.config.get(constants::PROPERTIES).and_then(Value::as_object) {
      for (field_name, field_config) in properties {
        if let Some(reference) = schema::ref_of(field_config) {
          self.connected_refs.insert(reference.to_string());
        }
        if let Some(resource) = schema::resource_of(field_config)
          && !resource.is_empty()
        {
          self.associated_resources.insert(resource.to_string());
          if identifiers.contains(field_name) {
            primary_candidates.insert(resource.to_string());
          }
        }
      }
    }

    if let Some(additional) = self.config.get(constants::ADDITIONAL_PROPERTIES).and_then(Value::as_object) {
      if let Some(reference) = additional.get(constants::REF).and_then(Value::as_str) {
        self.connected_refs.insert(reference.to_string());
      }
      if let Some(resource) = additional.get(constants::RESOURCE).and_then(Value::as_str)
        && !resource.is_empty()
      {
        self.associated_resources.insert(resource.to_string());
      }
    }

    self.resolve_primary_resource(primary_candidates)
  }

  /// Decide the primary resource from forced candidates, falling back to the
  /// untagged associated resources, then to this definition's own name.
  ///
  /// Exactly one untagged candidate wins; two or more is ambiguous ownership
  /// and no heuristic disambiguates further.
  pub(crate) fn resolve_primary_resource(&mut self, candidates: BTreeSet<String>) -> Result<(), ResourceError> {
    let pool = if candidates.is_empty() {
      self.associated_resources.clone()
    } else {
      candidates
    };

    if pool.len() > 1 {
      return Err(ResourceError::AmbiguousPrimaryResource {
        reference: self.name.clone(),
        candidates: pool,
      });
    }

    match pool.into_iter().next() {
      Some(primary) => {
        self.associated_resources.remove(&primary);
        self.primary_resource = Some(primary);
      }
      None => self.primary_resource = Some(self.name.clone()),
    }
    Ok(())
  }
}

/// Lifecycle roles a resource's operations play.
#[derive(Debug, Default, Clone)]
pub(crate) struct Resource {
  pub(crate) producers: BTreeSet<String>,
  pub(crate) consumers: BTreeSet<String>,
  pub(crate) destructors: BTreeSet<String>,
}

impl Resource {
  pub(crate) fn add_producer(&mut self, operation_key: &str) {
    self.producers.insert(operation_key.to_string());
  }

  pub(crate) fn add_consumer(&mut self, operation_key: &str) {
    self.consumers.insert(operation_key.to_string());
  }

  /// The entity must exist to be deleted, so a destructor also consumes.
  pub(crate) fn add_destructor(&mut self, operation_key: &str) {
    self.consumers.insert(operation_key.to_string());
    self.destructors.insert(operation_key.to_string());
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
  Producer,
  Consumer,
  Destructor,
}

/// DAG of resources ordered by structural schema dependency.
#[derive(Debug)]
pub(crate) struct ResourceGraph<'a> {
  dag: Dag,
  /// Lowercased definition name → its reference wrapper.
  references: BTreeMap<String, Reference>,
  /// Primary resource name → lifecycle roles.
  resources: BTreeMap<String, Resource>,
  spec: &'a Value,
  config: &'a OrderingConfig,
}

impl<'a> ResourceGraph<'a> {
  pub(crate) fn new(spec: &'a Value, config: &'a OrderingConfig) -> Self {
    let references = spec
      .get(constants::DEFINITIONS)
      .and_then(Value::as_object)
      .map(|definitions| {
        definitions
          .iter()
          .map(|(key, config)| (key.to_lowercase(), Reference::new(key, config.clone())))
          .collect()
      })
      .unwrap_or_default();

    Self {
      dag: Dag::default(),
      references,
      resources: BTreeMap::new(),
      spec,
      config,
    }
  }

  /// The primary resource a definition name resolves to, if known.
  pub(crate) fn primary_resource_of(&self, ref_name: &str) -> Option<&str> {
    self
      .references
      .get(&ref_name.to_lowercase())
      .and_then(|reference| reference.primary_resource.as_deref())
  }

  pub(crate) fn resource(&self, key: &str) -> Option<&Resource> {
    self.resources.get(key)
  }

  pub(crate) fn resources(&self) -> &BTreeMap<String, Resource> {
    &self.resources
  }

  pub(crate) fn vertices(&self) -> impl Iterator<Item = &str> {
    self.dag.vertices()
  }

  pub(crate) fn neighbors(&self, key: &str) -> impl Iterator<Item = &str> {
    self.dag.neighbors(key)
  }

  pub(crate) fn contains(&self, key: &str) -> bool {
    self.dag.contains(key)
  }

  /// Build nodes and structural edges from the definitions alone.
  ///
  /// Cycles between definitions are permitted here — edges are merely
  /// recorded — and surface later, during the operation-graph DFS.
  pub(crate) fn construct_graph(&mut self) -> Result<(), Error> {
    for reference in self.references.values_mut() {
      reference.get_connections(&self.config.resource_identifiers)?;
    }

    for reference in self.references.values() {
      if let Some(primary) = &reference.primary_resource {
        self.resources.entry(primary.clone()).or_default();
        self.dag.add_node(primary);
      }
    }

    let mut edges = Vec::new();
    for reference in self.references.values() {
      let Some(target) = &reference.primary_resource else {
        continue;
      };
      for connected in &reference.connected_refs {
        let ref_name = refs::ref_name(connected)?;
        let source = self
          .primary_resource_of(ref_name)
          .ok_or_else(|| SpecError::DanglingReference {
            reference: connected.clone(),
            segment: ref_name.to_string(),
          })?;
        edges.push((source.to_string(), target.clone()));
      }
      for resource in &reference.associated_resources {
        edges.push((resource.clone(), target.clone()));
      }
    }
    for (from, to) in edges {
      self.dag.add_edge(&from, &to);
    }
    Ok(())
  }

  /// Walk every operation and commit producer/consumer/destructor roles onto
  /// the resource nodes.
  pub(crate) fn parse_paths(&mut self, interfaces: &[OperationInterface]) -> Result<(), Error> {
    for operation in interfaces {
      let operation_key = operation.key();
      let mut roles = BTreeMap::new();

      self.parse_responses(operation, &mut roles)?;
      self.parse_request_parameters(operation, &mut roles)?;

      for (key, role) in roles {
        // Keys are definition names (from schemas) or bare resource tags
        // (from parameters); both funnel to a primary resource name.
        let primary = match self.references.get(&key.to_lowercase()) {
          Some(reference) => reference.primary_resource.clone(),
          None => Some(key),
        };
        let Some(node) = primary.and_then(|primary| self.resources.get_mut(&primary)) else {
          continue; // unknown resources never made a node; ignore
        };
        match role {
          Role::Producer => node.add_producer(&operation_key),
          Role::Consumer => node.add_consumer(&operation_key),
          Role::Destructor => node.add_destructor(&operation_key),
        }
      }
    }
    Ok(())
  }

  /// Response schemas tentatively mark their resources as produced. Methods
  /// that cannot create anything are skipped outright.
  fn parse_responses(&self, operation: &OperationInterface, roles: &mut BTreeMap<String, Role>) -> Result<(), Error> {
    if matches!(operation.method, HttpMethod::Delete | HttpMethod::Patch | HttpMethod::Put) {
      return Ok(());
    }

    for response in operation.responses.values() {
      let mut primaries = BTreeSet::new();
      let mut produced = Vec::new();
      for reference in schema::attached_schema_refs(response) {
        let ref_name = refs::ref_name(&reference)?;
        if let Some(primary) = self.primary_resource_of(ref_name) {
          primaries.insert(primary.to_string());
          produced.push(ref_name.to_lowercase());
        }
      }

      // One response body describing two different resources has no single
      // owner to order around.
      if primaries.len() > 1 {
        return Err(
          ResourceError::MultipleResponseResources {
            operation: operation.key(),
            resources: primaries,
          }
          .into(),
        );
      }

      for ref_name in produced {
        roles.insert(ref_name, Role::Producer);
      }
    }
    Ok(())
  }

  fn parse_request_parameters(
    &self,
    operation: &OperationInterface,
    roles: &mut BTreeMap<String, Role>,
  ) -> Result<(), Error> {
    for (parameter_name, parameter) in &operation.parameters {
      let parameter = match parameter.get(constants::REF).and_then(Value::as_str) {
        Some(reference) => refs::resolve_reference(self.spec, reference)?,
        None => parameter,
      };

      if let Some(resource) = parameter.get(constants::RESOURCE).and_then(Value::as_str)
        && !resource.is_empty()
      {
        // A URL-parameter reference is certain consumption and overrides any
        // tentative producer claim from the responses.
        let role = if Self::is_delete_target(operation, parameter_name) {
          Role::Destructor
        } else {
          Role::Consumer
        };
        roles.insert(resource.to_string(), role);
      }

      if parameter.get(constants::IN).and_then(Value::as_str) == Some(constants::BODY_PARAM) {
        for reference in schema::attached_schema_refs(parameter) {
          let ref_name = refs::ref_name(&reference)?;
          // producer claims inside the same operation take precedence
          roles.entry(ref_name.to_lowercase()).or_insert(Role::Consumer);
        }
      }
    }
    Ok(())
  }

  /// DELETE of the entity sitting in the final path segment destroys it;
  /// any other parameter reference merely consumes.
  fn is_delete_target(operation: &OperationInterface, parameter_name: &str) -> bool {
    operation.method == HttpMethod::Delete
      && operation.url.trim_end_matches('/').rsplit('/').next() == Some(format!("{{{parameter_name}}}").as_str())
  }
}
