//! Contract for the registry that maps qualified names to record definitions.

use std::sync::Arc;

use crate::{descriptor::FieldEntry, error::LookupError};

/// Qualified names of the request and response records of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecords {
    pub request: String,
    pub response: String,
}

impl ServiceRecords {
    /// ROS 2 naming convention: `pkg/srv/X` → `pkg/srv/X_Request`, `pkg/srv/X_Response`.
    pub fn conventional(service: &str) -> Self {
        Self {
            request: format!("{service}_Request"),
            response: format!("{service}_Response"),
        }
    }
}

/// Qualified names of the goal, result and feedback records of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecords {
    pub goal: String,
    pub result: String,
    pub feedback: String,
}

impl ActionRecords {
    /// ROS 2 naming convention: `pkg/action/X` → `X_Goal`, `X_Result`, `X_Feedback`.
    pub fn conventional(action: &str) -> Self {
        Self {
            goal: format!("{action}_Goal"),
            result: format!("{action}_Result"),
            feedback: format!("{action}_Feedback"),
        }
    }
}

/// Read-only registry of interface definitions.
///
/// Implementations must be safe for concurrent reads: one registry is usually
/// shared by every resolver in the process.
pub trait RecordLookup: Send + Sync {
    /// Return the ordered field list of the record `qualified_name`.
    fn lookup_record(&self, qualified_name: &str) -> Result<Vec<FieldEntry>, LookupError>;

    /// Return the sub-record names of the service `qualified_name`.
    ///
    /// The default derives them by naming convention without checking that they
    /// exist; a missing sub-record then surfaces when it is fetched.
    fn lookup_service(&self, qualified_name: &str) -> Result<ServiceRecords, LookupError> {
        Ok(ServiceRecords::conventional(qualified_name))
    }

    /// Return the sub-record names of the action `qualified_name`.
    ///
    /// See [`RecordLookup::lookup_service`] for the default behavior.
    fn lookup_action(&self, qualified_name: &str) -> Result<ActionRecords, LookupError> {
        Ok(ActionRecords::conventional(qualified_name))
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn lookup_record(&self, qualified_name: &str) -> Result<Vec<FieldEntry>, LookupError> {
        (**self).lookup_record(qualified_name)
    }

    fn lookup_service(&self, qualified_name: &str) -> Result<ServiceRecords, LookupError> {
        (**self).lookup_service(qualified_name)
    }

    fn lookup_action(&self, qualified_name: &str) -> Result<ActionRecords, LookupError> {
        (**self).lookup_action(qualified_name)
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for Arc<T> {
    fn lookup_record(&self, qualified_name: &str) -> Result<Vec<FieldEntry>, LookupError> {
        (**self).lookup_record(qualified_name)
    }

    fn lookup_service(&self, qualified_name: &str) -> Result<ServiceRecords, LookupError> {
        (**self).lookup_service(qualified_name)
    }

    fn lookup_action(&self, qualified_name: &str) -> Result<ActionRecords, LookupError> {
        (**self).lookup_action(qualified_name)
    }
}
