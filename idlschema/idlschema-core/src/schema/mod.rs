//! JSON-serializable schema output.

mod node;
mod resolved;

pub use node::{RecordSchema, SchemaNode};
pub use resolved::{ActionSchema, ResolvedType, ServiceSchema, TypeSchema};
