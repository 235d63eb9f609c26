pub(crate) mod constants;
pub(crate) mod interface;
pub mod loader;
pub(crate) mod refs;
pub(crate) mod schema;
pub(crate) mod tagger;

pub(crate) use interface::{HttpMethod, OperationInterface, parse_interfaces};

#[cfg(test)]
mod tests;
