//! Pipeline configuration.
//!
//! One explicit value threaded through every stage; nothing here is global or
//! lazily initialized. Defaults match what real-world Swagger naming needs.

use std::collections::BTreeSet;

/// Knobs for resource detection and operation ordering.
#[derive(Debug, Clone)]
pub struct OrderingConfig {
  /// Field names that identify the schema's own resource (`id`, `slug`, `pk`).
  /// A resource tag on one of these fields forces the primary resource.
  pub resource_identifiers: BTreeSet<String>,
  /// Parameter-name suffixes stripped to derive a resource (`pet_id` → `pet`).
  pub url_param_suffixes: BTreeSet<String>,
  /// Extra `(parent, child)` operation-key pairs pinned into the order.
  pub operation_dependencies: Vec<(String, String)>,
  /// Operation keys (`METHOD url`) dropped before graph construction.
  pub exclude_operations: BTreeSet<String>,
}

impl Default for OrderingConfig {
  fn default() -> Self {
    Self {
      resource_identifiers: ["id", "slug", "pk"].map(str::to_string).into(),
      url_param_suffixes: ["_id", "Id", "_slug", "Slug", "pk"].map(str::to_string).into(),
      operation_dependencies: Vec::new(),
      exclude_operations: BTreeSet::new(),
    }
  }
}
