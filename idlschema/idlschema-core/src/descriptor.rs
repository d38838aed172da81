//! Field type descriptors as supplied by a [`RecordLookup`](crate::RecordLookup).
//!
//! Descriptors are pure data.  They describe a field's declared type one level
//! deep: a nested record is only a [`TypeDescriptor::Record`] reference until the
//! resolver asks the lookup for its fields.

/// Size constraint of an array or sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Fixed-length array of exactly `n` elements (`T[n]`).
    Fixed(usize),
    /// Sequence of at most `n` elements (`sequence<T, n>` / `T[<=n]`).
    Bounded(usize),
    /// Sequence without a size limit (`sequence<T>` / `T[]`).
    Unbounded,
}

impl SequenceKind {
    /// Exact element count, set only for fixed arrays.
    pub fn size(&self) -> Option<usize> {
        match self {
            SequenceKind::Fixed(n) => Some(*n),
            _ => None,
        }
    }

    /// Upper element bound, set only for bounded sequences.
    pub fn max_size(&self) -> Option<usize> {
        match self {
            SequenceKind::Bounded(n) => Some(*n),
            _ => None,
        }
    }
}

/// The declared type of one field.
///
/// Anything a backend cannot express with the first four variants is carried
/// as [`TypeDescriptor::Unknown`] so that resolution never has to fail on an
/// unfamiliar shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Numeric, boolean, byte and character kinds, identified by their canonical
    /// IDL name (`"int32"`, `"double"`, `"boolean"`, `"octet"`, ...).
    Primitive { name: String },
    /// UTF-8 string; `max_length` is `Some` iff the string is bounded.
    String { max_length: Option<usize> },
    /// Fixed array, bounded sequence or unbounded sequence of `element`.
    Sequence {
        element: Box<TypeDescriptor>,
        kind: SequenceKind,
    },
    /// Reference to another record by qualified name (`pkg/msg/Type`), not yet resolved.
    Record { qualified_name: String },
    /// Descriptor kind outside the modelled set; `tag` names what it was.
    Unknown { tag: String },
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive { name: name.into() }
    }

    pub fn string() -> Self {
        TypeDescriptor::String { max_length: None }
    }

    pub fn bounded_string(max_length: usize) -> Self {
        TypeDescriptor::String {
            max_length: Some(max_length),
        }
    }

    pub fn sequence(element: TypeDescriptor, kind: SequenceKind) -> Self {
        TypeDescriptor::Sequence {
            element: Box::new(element),
            kind,
        }
    }

    pub fn record(qualified_name: impl Into<String>) -> Self {
        TypeDescriptor::Record {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn unknown(tag: impl Into<String>) -> Self {
        TypeDescriptor::Unknown { tag: tag.into() }
    }
}

/// Name of the placeholder member rosidl adds to otherwise empty structures.
pub const EMPTY_STRUCT_PLACEHOLDER: &str = "structure_needs_at_least_one_member";

/// One `(name, descriptor)` entry of a record's field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

impl FieldEntry {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }

    /// `true` for implementation-only slots that are not genuine data fields.
    ///
    /// Two conventions are recognized: names starting with `_` (never valid for
    /// ROS 2 fields) and rosidl's empty-struct placeholder member.
    pub fn is_bookkeeping(&self) -> bool {
        self.name.starts_with('_') || self.name == EMPTY_STRUCT_PLACEHOLDER
    }
}

/// A record definition: qualified name plus its ordered field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDef {
    /// Qualified name, e.g. `"geometry_msgs/msg/Point"`.
    pub name: String,
    pub fields: Vec<FieldEntry>,
}

impl RecordDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldEntry>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}
