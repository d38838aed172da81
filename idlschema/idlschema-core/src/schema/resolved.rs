use serde::Serialize;

use super::RecordSchema;
use crate::category::TypeCategory;

/// Schemas of a service's request and response records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSchema {
    pub request: RecordSchema,
    pub response: RecordSchema,
}

/// Schemas of an action's goal, result and feedback records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSchema {
    pub goal: RecordSchema,
    pub result: RecordSchema,
    pub feedback: RecordSchema,
}

/// Category-specific schema body of a [`ResolvedType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeSchema {
    Record(RecordSchema),
    Service(ServiceSchema),
    Action(ActionSchema),
}

impl TypeSchema {
    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            TypeSchema::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceSchema> {
        match self {
            TypeSchema::Service(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionSchema> {
        match self {
            TypeSchema::Action(a) => Some(a),
            _ => None,
        }
    }
}

/// Top-level result of resolving one interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    pub name: String,
    pub category: TypeCategory,
    pub schema: TypeSchema,
}
