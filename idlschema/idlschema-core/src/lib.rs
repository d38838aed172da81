//! Registry-agnostic schema resolution for ROS 2 interface types.
//!
//! This crate turns the field descriptors of a message, service or action into
//! a JSON-serializable schema, recursively expanding nested records.
//!
//! # Pipeline
//!
//! ```text
//! qualified type name
//!   └─ TypeCategory::classify     – /msg/, /srv/ or /action/ marker
//!       └─ RecordLookup           – name → ordered FieldEntry list
//!           └─ TypeResolver::walk – FieldEntry list → RecordSchema
//!               └─ TypeResolver::convert – TypeDescriptor → SchemaNode (recursive)
//! ```
//!
//! [`SchemaComposer`] drives the pipeline; [`SchemaCache`] memoizes it.

mod cache;
mod category;
mod composer;
mod descriptor;
mod error;
mod lookup;
mod name;
mod registry;
mod resolver;
pub mod schema;

pub use cache::SchemaCache;
pub use category::TypeCategory;
pub use composer::SchemaComposer;
pub use descriptor::{EMPTY_STRUCT_PLACEHOLDER, FieldEntry, RecordDef, SequenceKind, TypeDescriptor};
pub use error::{DefinitionError, LookupError, ResolutionError};
pub use lookup::{ActionRecords, RecordLookup, ServiceRecords};
pub use name::QualifiedName;
pub use registry::InterfaceRegistry;
pub use resolver::{TypeResolver, convert, walk};
pub use schema::{ActionSchema, RecordSchema, ResolvedType, SchemaNode, ServiceSchema, TypeSchema};
