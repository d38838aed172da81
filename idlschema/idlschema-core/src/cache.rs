//! Memoizing front-end for [`SchemaComposer`].

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    composer::SchemaComposer, error::ResolutionError, lookup::RecordLookup, schema::ResolvedType,
};

/// Caches successful resolutions per type name.
///
/// Failures are never cached, so a type that appears in the registry later is
/// picked up on the next call.  Resolution runs outside the lock; when two
/// threads resolve the same name concurrently, the entry stored first is the
/// one both of them get back.
///
/// Entries are never evicted: the cache grows with every distinct type name
/// resolved and only [`clear`](Self::clear) empties it.
pub struct SchemaCache<L> {
    composer: SchemaComposer<L>,
    entries: Mutex<HashMap<String, Arc<ResolvedType>>>,
}

impl<L: RecordLookup> SchemaCache<L> {
    pub fn new(lookup: L) -> Self {
        Self::from_composer(SchemaComposer::new(lookup))
    }

    pub fn from_composer(composer: SchemaComposer<L>) -> Self {
        Self {
            composer,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn composer(&self) -> &SchemaComposer<L> {
        &self.composer
    }

    /// Return the cached schema of `qualified_name`, resolving it on first use.
    pub fn get(&self, qualified_name: &str) -> Result<Arc<ResolvedType>, ResolutionError> {
        if let Some(hit) = self.entries().get(qualified_name) {
            return Ok(Arc::clone(hit));
        }

        let resolved = Arc::new(self.composer.resolve(qualified_name)?);
        let mut entries = self.entries();
        let stored = entries
            .entry(qualified_name.to_string())
            .or_insert(resolved);
        Ok(Arc::clone(stored))
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.entries().contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries().clear();
    }

    // Entries are only ever inserted whole, so a poisoned map is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<ResolvedType>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
