//! Error taxonomy for the ordering pipeline.
//!
//! Three failure kinds exist: the spec itself is unusable (`SpecError`),
//! resource ownership cannot be decided (`ResourceError`), or the dependency
//! graphs contain a cycle (`OrderingError`). All three abort the run at the
//! point of detection; the input is static, so nothing is retried.

use std::collections::BTreeSet;

use thiserror::Error;

/// The OpenAPI document violates the subset this tool understands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpecError {
  /// Only `#/`-rooted local references are supported.
  #[error("only local references are supported, got `{reference}`")]
  NonLocalReference { reference: String },

  /// A reference path segment did not resolve inside the document.
  #[error("cannot find `{segment}` while resolving reference `{reference}`")]
  DanglingReference { reference: String, segment: String },

  /// A parameter object without a `name` cannot be keyed.
  #[error("parameter of `{operation}` is missing a name")]
  UnnamedParameter { operation: String },

  /// A parameter object without an `in` location cannot be classified.
  #[error("parameter `{parameter}` of `{operation}` is missing a location")]
  UnlocatedParameter { operation: String, parameter: String },

  /// An HTTP method outside get/post/put/patch/delete.
  #[error("invalid HTTP method `{method}` for `{url}`")]
  InvalidMethod { method: String, url: String },
}

/// Resource ownership could not be decided from the schema structure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResourceError {
  /// More than one untagged candidate and no identifying field to break the tie.
  #[error("could not determine primary resource for `{reference}`, candidates: {candidates:?}")]
  AmbiguousPrimaryResource {
    reference: String,
    candidates: BTreeSet<String>,
  },

  /// A single response schema claimed more than one top-level resource.
  #[error("response of `{operation}` produces multiple resources: {resources:?}")]
  MultipleResponseResources {
    operation: String,
    resources: BTreeSet<String>,
  },
}

/// The dependency graphs do not admit a linear order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderingError {
  /// A cycle was found during DFS; `key` is the node re-entered while grey.
  #[error("cycle detected in the dependency graph at `{key}`")]
  CycleDetected { key: String },
}

/// Umbrella error for pipeline-level signatures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error(transparent)]
  Spec(#[from] SpecError),
  #[error(transparent)]
  Resource(#[from] ResourceError),
  #[error(transparent)]
  Ordering(#[from] OrderingError),
}
