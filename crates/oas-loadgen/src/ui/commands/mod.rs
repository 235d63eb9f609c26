pub mod order;
pub mod resolve;
pub mod validate;

pub use order::{OrderConfig, order_operations};
pub use resolve::resolve_definitions;
pub use validate::validate_spec;
