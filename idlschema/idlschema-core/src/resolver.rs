//! Descriptor → schema conversion.
//!
//! [`TypeResolver::convert`] and [`TypeResolver::walk`] are total: every
//! descriptor yields a node, and a nested record that cannot be looked up
//! degrades to a name-only node instead of failing the surrounding record.
//!
//! # Recursion
//!
//! Nested records are expanded by looking them up and walking their fields.
//! The resolver tracks the chain of records currently being expanded; a
//! reference back into that chain (a self-referential or mutually recursive
//! record) is emitted as a name-only node, which bounds the recursion by the
//! number of distinct records in the registry.

use tracing::debug;

use crate::{
    descriptor::{FieldEntry, TypeDescriptor},
    lookup::RecordLookup,
    schema::{RecordSchema, SchemaNode},
};

/// Recursive schema builder bound to one [`RecordLookup`].
pub struct TypeResolver<'a, L: ?Sized> {
    lookup: &'a L,
    /// Records whose fields are being walked, outermost first.
    expanding: Vec<String>,
}

impl<'a, L: RecordLookup + ?Sized> TypeResolver<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            expanding: Vec::new(),
        }
    }

    /// Convert one descriptor into a schema node.
    pub fn convert(&mut self, descriptor: &TypeDescriptor) -> SchemaNode {
        match descriptor {
            TypeDescriptor::Primitive { name } => SchemaNode::named(name.as_str()),
            TypeDescriptor::String { max_length } => SchemaNode::string(*max_length),
            TypeDescriptor::Sequence { element, kind } => {
                SchemaNode::array(self.convert(element), *kind)
            }
            TypeDescriptor::Record { qualified_name } => self.expand_record(qualified_name),
            TypeDescriptor::Unknown { tag } => SchemaNode::named(tag.as_str()),
        }
    }

    /// Convert every genuine data field of a field list, keyed by field name.
    ///
    /// Bookkeeping entries (see [`FieldEntry::is_bookkeeping`]) are skipped.
    pub fn walk(&mut self, fields: &[FieldEntry]) -> RecordSchema {
        let mut schema = RecordSchema::new();
        for field in fields {
            if field.is_bookkeeping() {
                debug!(field = %field.name, "skipping bookkeeping slot");
                continue;
            }
            let node = self.convert(&field.descriptor);
            schema.insert(field.name.as_str(), node);
        }
        schema
    }

    /// Like [`walk`](Self::walk), with `record` marked as under expansion so
    /// that references back to it are not expanded again.
    pub fn walk_record(&mut self, record: &str, fields: &[FieldEntry]) -> RecordSchema {
        self.expanding.push(record.to_string());
        let schema = self.walk(fields);
        self.expanding.pop();
        schema
    }

    fn expand_record(&mut self, qualified_name: &str) -> SchemaNode {
        if self.expanding.iter().any(|r| r == qualified_name) {
            debug!(record = qualified_name, "recursive record reference, not expanding");
            return SchemaNode::named(qualified_name);
        }

        match self.lookup.lookup_record(qualified_name) {
            Ok(fields) => {
                let nested = self.walk_record(qualified_name, &fields);
                SchemaNode::record(qualified_name, nested)
            }
            Err(err) => {
                debug!(record = qualified_name, error = %err, "nested record unavailable");
                SchemaNode::named(qualified_name)
            }
        }
    }
}

/// Convert a single descriptor against `lookup`.
pub fn convert<L: RecordLookup + ?Sized>(lookup: &L, descriptor: &TypeDescriptor) -> SchemaNode {
    TypeResolver::new(lookup).convert(descriptor)
}

/// Convert a field list against `lookup`.
pub fn walk<L: RecordLookup + ?Sized>(lookup: &L, fields: &[FieldEntry]) -> RecordSchema {
    TypeResolver::new(lookup).walk(fields)
}
