//! Turns parsed declarations into [`RecordDef`]s.
//!
//! Scoped names are resolved against what the same file (or bundle) declares:
//!
//! 1. **Exact match**: the name qualified with the referencing declaration's
//!    module (for single-segment names), then the name as written.
//! 2. **Suffix match**: a unique declaration whose qualified name ends with
//!    the candidate segments.
//!
//! A typedef is replaced by its target; an enum becomes an opaque basic type
//! named after the enum; a struct, or any name not declared locally, becomes a
//! record reference left for the lookup to expand later.

use idlschema_core::{FieldEntry, RecordDef, SequenceKind, TypeDescriptor};
use tracing::debug;

use crate::ast::{MemberDecl, ParsedIdl, TypeExpr};

/// Typedef chains longer than this are treated as malformed.
const MAX_TYPEDEF_DEPTH: usize = 16;

pub fn into_records(parsed: &ParsedIdl) -> Vec<RecordDef> {
    parsed
        .structs
        .iter()
        .map(|s| {
            let module = &s.full_name[..s.full_name.len().saturating_sub(1)];
            let fields = s
                .members
                .iter()
                .map(|m| FieldEntry::new(m.name.as_str(), member_descriptor(parsed, module, m, 0)))
                .collect();
            RecordDef::new(s.full_name.join("/"), fields)
        })
        .collect()
}

fn member_descriptor(
    parsed: &ParsedIdl,
    module: &[String],
    member: &MemberDecl,
    depth: usize,
) -> TypeDescriptor {
    let inner = type_descriptor(parsed, module, &member.ty, depth);
    match member.fixed_len {
        Some(n) => TypeDescriptor::sequence(inner, SequenceKind::Fixed(n)),
        None => inner,
    }
}

fn type_descriptor(
    parsed: &ParsedIdl,
    module: &[String],
    expr: &TypeExpr,
    depth: usize,
) -> TypeDescriptor {
    match expr {
        TypeExpr::Primitive(name) => TypeDescriptor::primitive(*name),
        TypeExpr::String(None) => TypeDescriptor::string(),
        TypeExpr::String(Some(n)) => TypeDescriptor::bounded_string(*n),
        // Wide strings are outside the modelled descriptor set.
        TypeExpr::WString(None) => TypeDescriptor::unknown("UnboundedWString"),
        TypeExpr::WString(Some(_)) => TypeDescriptor::unknown("BoundedWString"),
        TypeExpr::Sequence { elem, max_len } => {
            let kind = match max_len {
                Some(n) => SequenceKind::Bounded(*n),
                None => SequenceKind::Unbounded,
            };
            TypeDescriptor::sequence(type_descriptor(parsed, module, elem, depth), kind)
        }
        TypeExpr::Scoped(name) => scoped_descriptor(parsed, module, name, depth),
    }
}

fn scoped_descriptor(
    parsed: &ParsedIdl,
    module: &[String],
    name: &[String],
    depth: usize,
) -> TypeDescriptor {
    let qualified = if name.len() == 1 {
        let mut scoped = module.to_vec();
        scoped.push(name[0].clone());
        scoped
    } else {
        name.to_vec()
    };

    for candidate in [qualified.as_slice(), name] {
        if let Some(desc) = declared(parsed, candidate, depth) {
            return desc;
        }
    }

    let struct_keys = parsed.structs.iter().map(|s| &s.full_name);
    let found = find_by_suffix(parsed.typedefs.keys(), &qualified)
        .or_else(|| find_by_suffix(struct_keys, &qualified))
        .or_else(|| find_by_suffix(parsed.enums.keys(), &qualified));
    if let Some(key) = found
        && let Some(desc) = declared(parsed, key, depth)
    {
        return desc;
    }

    TypeDescriptor::record(qualified.join("/"))
}

/// Descriptor for a name declared in `parsed`, or `None` if it is not.
fn declared(parsed: &ParsedIdl, key: &[String], depth: usize) -> Option<TypeDescriptor> {
    if let Some(td) = parsed.typedefs.get(key) {
        if depth >= MAX_TYPEDEF_DEPTH {
            debug!(typedef = %key.join("::"), "typedef chain too deep");
            return Some(TypeDescriptor::unknown(key.join("::")));
        }
        let module = &td.full_name[..td.full_name.len() - 1];
        return Some(member_descriptor(parsed, module, &td.target, depth + 1));
    }
    if parsed.has_struct(key) {
        return Some(TypeDescriptor::record(key.join("/")));
    }
    if parsed.enums.contains_key(key) {
        return Some(TypeDescriptor::primitive(key.join("/")));
    }
    None
}

/// The unique key whose trailing segments equal `wanted`; `None` when there
/// is no match or more than one.
fn find_by_suffix<'a>(
    keys: impl Iterator<Item = &'a Vec<String>>,
    wanted: &[String],
) -> Option<&'a Vec<String>> {
    let mut found = None;
    for key in keys {
        if key.len() < wanted.len() || key[key.len() - wanted.len()..] != *wanted {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some(key);
    }
    found
}
