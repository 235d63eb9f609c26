pub(crate) mod graph;
pub(crate) mod operation;
pub(crate) mod resource;
pub(crate) mod validator;

pub(crate) use operation::OperationGraph;
pub(crate) use resource::ResourceGraph;
pub(crate) use validator::ResourceValidator;

#[cfg(test)]
mod tests;
