//! In-memory [`RecordLookup`] implementation.

use std::collections::HashMap;

use crate::{
    descriptor::{FieldEntry, RecordDef},
    error::LookupError,
    lookup::{ActionRecords, RecordLookup, ServiceRecords},
};

/// Records keyed by qualified name.
///
/// Services and actions are not stored separately: they exist when all of
/// their conventionally named sub-records do.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    records: HashMap<String, Vec<FieldEntry>>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `def`, replacing any record with the same name.
    pub fn insert(&mut self, def: RecordDef) {
        self.records.insert(def.name, def.fields);
    }

    pub fn with_record(mut self, def: RecordDef) -> Self {
        self.insert(def);
        self
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.records.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Qualified names of all stored records, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn require(&self, owner: &str, names: &[&str]) -> Result<(), LookupError> {
        match names.iter().find(|n| !self.contains(n)) {
            Some(missing) => Err(LookupError::unavailable(
                owner,
                format!("sub-record '{missing}' is not defined"),
            )),
            None => Ok(()),
        }
    }
}

impl Extend<RecordDef> for InterfaceRegistry {
    fn extend<T: IntoIterator<Item = RecordDef>>(&mut self, iter: T) {
        for def in iter {
            self.insert(def);
        }
    }
}

impl FromIterator<RecordDef> for InterfaceRegistry {
    fn from_iter<T: IntoIterator<Item = RecordDef>>(iter: T) -> Self {
        let mut registry = InterfaceRegistry::new();
        registry.extend(iter);
        registry
    }
}

impl RecordLookup for InterfaceRegistry {
    fn lookup_record(&self, qualified_name: &str) -> Result<Vec<FieldEntry>, LookupError> {
        self.records
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| LookupError::not_found(qualified_name))
    }

    fn lookup_service(&self, qualified_name: &str) -> Result<ServiceRecords, LookupError> {
        let records = ServiceRecords::conventional(qualified_name);
        if !self.contains(&records.request) && !self.contains(&records.response) {
            return Err(LookupError::not_found(qualified_name));
        }
        self.require(
            qualified_name,
            &[records.request.as_str(), records.response.as_str()],
        )?;
        Ok(records)
    }

    fn lookup_action(&self, qualified_name: &str) -> Result<ActionRecords, LookupError> {
        let records = ActionRecords::conventional(qualified_name);
        let parts = [
            records.goal.as_str(),
            records.result.as_str(),
            records.feedback.as_str(),
        ];
        if parts.iter().all(|n| !self.contains(n)) {
            return Err(LookupError::not_found(qualified_name));
        }
        self.require(qualified_name, &parts)?;
        Ok(records)
    }
}
