//! Top-level resolution of a requested interface type.

use tracing::debug;

use crate::{
    category::TypeCategory,
    error::{LookupError, ResolutionError},
    lookup::RecordLookup,
    resolver::TypeResolver,
    schema::{ActionSchema, RecordSchema, ResolvedType, ServiceSchema, TypeSchema},
};

/// Resolves qualified type names into [`ResolvedType`]s using a [`RecordLookup`].
///
/// Unlike nested fields, the requested type itself must exist: any failure to
/// load it (or one of its service/action sub-records) is a
/// [`ResolutionError::TypeNotFound`].
pub struct SchemaComposer<L> {
    lookup: L,
}

impl<L: RecordLookup> SchemaComposer<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve `qualified_name` into its full schema.
    pub fn resolve(&self, qualified_name: &str) -> Result<ResolvedType, ResolutionError> {
        let category = TypeCategory::classify(qualified_name);
        debug!(name = qualified_name, %category, "resolving interface type");

        let not_found = |source: LookupError| ResolutionError::TypeNotFound {
            name: qualified_name.to_string(),
            source,
        };

        let schema = match category {
            TypeCategory::Record => {
                TypeSchema::Record(self.record_schema(qualified_name).map_err(not_found)?)
            }
            TypeCategory::ServicePair => {
                let records = self
                    .lookup
                    .lookup_service(qualified_name)
                    .map_err(not_found)?;
                TypeSchema::Service(ServiceSchema {
                    request: self.record_schema(&records.request).map_err(not_found)?,
                    response: self.record_schema(&records.response).map_err(not_found)?,
                })
            }
            TypeCategory::ActionTriple => {
                let records = self
                    .lookup
                    .lookup_action(qualified_name)
                    .map_err(not_found)?;
                TypeSchema::Action(ActionSchema {
                    goal: self.record_schema(&records.goal).map_err(not_found)?,
                    result: self.record_schema(&records.result).map_err(not_found)?,
                    feedback: self.record_schema(&records.feedback).map_err(not_found)?,
                })
            }
            TypeCategory::Unrecognized => {
                return Err(ResolutionError::UnrecognizedCategory {
                    name: qualified_name.to_string(),
                });
            }
        };

        Ok(ResolvedType {
            name: qualified_name.to_string(),
            category,
            schema,
        })
    }

    /// Fetch one record and walk its fields.
    fn record_schema(&self, record: &str) -> Result<RecordSchema, LookupError> {
        let fields = self.lookup.lookup_record(record)?;
        Ok(TypeResolver::new(&self.lookup).walk_record(record, &fields))
    }
}
