pub(crate) mod schema_resolver;

pub(crate) use schema_resolver::SchemaResolver;

#[cfg(test)]
mod tests;
