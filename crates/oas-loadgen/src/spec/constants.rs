//! Key names of the OpenAPI subset this tool reads and writes.

pub(crate) const PATHS: &str = "paths";
pub(crate) const DEFINITIONS: &str = "definitions";

pub(crate) const PARAMETERS: &str = "parameters";
pub(crate) const PARAMETER_NAME: &str = "name";
pub(crate) const IN: &str = "in";
pub(crate) const PATH_PARAM: &str = "path";
pub(crate) const QUERY_PARAM: &str = "query";
pub(crate) const BODY_PARAM: &str = "body";
pub(crate) const REQUIRED: &str = "required";

pub(crate) const SCHEMA: &str = "schema";
pub(crate) const REF: &str = "$ref";
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const READ_ONLY: &str = "readOnly";
pub(crate) const TITLE: &str = "title";
pub(crate) const ALL_OF: &str = "allOf";
pub(crate) const ADDITIONAL_PROPERTIES: &str = "additionalProperties";
pub(crate) const MIN_PROPERTIES: &str = "minProperties";

pub(crate) const TYPE: &str = "type";
pub(crate) const OBJECT: &str = "object";
pub(crate) const ARRAY: &str = "array";
pub(crate) const ITEMS: &str = "items";

pub(crate) const RESPONSES: &str = "responses";
pub(crate) const TAGS: &str = "tags";

/// The extension key carrying a resource tag on fields and parameters.
pub(crate) const RESOURCE: &str = "resource";

/// Keys that describe a field to OpenAPI tooling but carry no value to generate.
pub(crate) const NON_GENERATIVE_KEYS: [&str; 5] = [PARAMETER_NAME, IN, READ_ONLY, REQUIRED, TITLE];
