//! Interface category detection from a qualified type name.

use std::fmt::{Display, Formatter, Result};

use serde::Serialize;

/// Category of an interface type, derived only from the name's marker segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeCategory {
    /// `pkg/msg/Type`: a plain data record.
    #[serde(rename = "msg")]
    Record,
    /// `pkg/srv/Type`: a request/response pair.
    #[serde(rename = "srv")]
    ServicePair,
    /// `pkg/action/Type`: a goal/result/feedback triple.
    #[serde(rename = "action")]
    ActionTriple,
    #[serde(rename = "unknown")]
    Unrecognized,
}

const MARKERS: [(&str, TypeCategory); 3] = [
    ("/msg/", TypeCategory::Record),
    ("/srv/", TypeCategory::ServicePair),
    ("/action/", TypeCategory::ActionTriple),
];

impl TypeCategory {
    /// Classify a qualified type name.
    ///
    /// Markers are checked in the order `/msg/`, `/srv/`, `/action/`; the first
    /// one contained in the name wins.
    pub fn classify(qualified_name: &str) -> Self {
        MARKERS
            .iter()
            .find(|(marker, _)| qualified_name.contains(marker))
            .map(|(_, category)| *category)
            .unwrap_or(TypeCategory::Unrecognized)
    }

    /// Short name used in output (`"msg"`, `"srv"`, `"action"`, `"unknown"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Record => "msg",
            TypeCategory::ServicePair => "srv",
            TypeCategory::ActionTriple => "action",
            TypeCategory::Unrecognized => "unknown",
        }
    }
}

impl Display for TypeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.as_str())
    }
}
