//! Conversion from `re_ros_msg`'s AST to [`RecordDef`]s.

use idlschema_core::{
    ActionRecords, DefinitionError, FieldEntry, QualifiedName, RecordDef, SequenceKind,
    ServiceRecords, TypeDescriptor,
};
use re_ros_msg::{
    MessageSchema,
    message_spec::{ArraySize, BuiltInType, ComplexType, Type},
};
use tracing::debug;

/// Parse a `.msg` file. `name` is `pkg/msg/Type` (or the short `pkg/Type`).
pub fn parse_msg(name: &str, text: &str) -> Result<RecordDef, DefinitionError> {
    let qualified = parse_record_name(name, "msg")?;
    parse_section(&qualified, text)
}

/// Parse a `.srv` file into its `_Request` and `_Response` records.
pub fn parse_srv(name: &str, text: &str) -> Result<Vec<RecordDef>, DefinitionError> {
    let qualified = parse_record_name(name, "srv")?;
    let sections = split_sections(text);
    if sections.len() != 2 {
        return Err(format!(
            "service '{qualified}' must have 2 sections separated by '---', found {}",
            sections.len()
        )
        .into());
    }

    let names = ServiceRecords::conventional(&qualified.to_string());
    [names.request, names.response]
        .iter()
        .zip(sections)
        .map(|(n, body)| parse_section(&sub_record(&qualified, n), body))
        .collect()
}

/// Parse a `.action` file into its `_Goal`, `_Result` and `_Feedback` records.
pub fn parse_action(name: &str, text: &str) -> Result<Vec<RecordDef>, DefinitionError> {
    let qualified = parse_record_name(name, "action")?;
    let sections = split_sections(text);
    if sections.len() != 3 {
        return Err(format!(
            "action '{qualified}' must have 3 sections separated by '---', found {}",
            sections.len()
        )
        .into());
    }

    let names = ActionRecords::conventional(&qualified.to_string());
    [names.goal, names.result, names.feedback]
        .iter()
        .zip(sections)
        .map(|(n, body)| parse_section(&sub_record(&qualified, n), body))
        .collect()
}

/// Dispatch on the kind segment of `name` (`msg`, `srv` or `action`).
pub fn parse_interface(name: &str, text: &str) -> Result<Vec<RecordDef>, DefinitionError> {
    let qualified = QualifiedName::parse(name)
        .ok_or_else(|| DefinitionError(format!("invalid interface name: {name}")))?;
    match qualified.kind() {
        Some("srv") => parse_srv(name, text),
        Some("action") => parse_action(name, text),
        _ => parse_msg(name, text).map(|def| vec![def]),
    }
}

/// Validate `name` and expand the short `pkg/Type` form to `pkg/<kind>/Type`.
fn parse_record_name(name: &str, kind: &str) -> Result<QualifiedName, DefinitionError> {
    let invalid = || DefinitionError(format!("invalid interface name format: {name}"));
    let parsed = QualifiedName::parse(name).ok_or_else(invalid)?;
    match parsed.namespaces.len() {
        2 if parsed.kind() == Some(kind) => Ok(parsed),
        1 if kind == "msg" => {
            let QualifiedName {
                mut namespaces,
                name,
            } = parsed;
            namespaces.push(kind.to_string());
            Ok(QualifiedName::new(namespaces, name))
        }
        _ => Err(invalid()),
    }
}

fn sub_record(owner: &QualifiedName, qualified: &str) -> QualifiedName {
    let name = qualified.rsplit('/').next().unwrap_or(qualified);
    owner.with_name(name)
}

/// Split on lines consisting of `---`.
fn split_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim() == "---" {
            sections.push(&text[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    sections.push(&text[start..]);
    sections
}

/// `true` if the section declares nothing (only blank lines and comments).
fn is_blank_section(text: &str) -> bool {
    text.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    })
}

fn parse_section(name: &QualifiedName, text: &str) -> Result<RecordDef, DefinitionError> {
    let full_name = name.to_string();
    if is_blank_section(text) {
        debug!(record = %full_name, "empty record");
        return Ok(RecordDef::new(full_name, Vec::new()));
    }

    let schema = MessageSchema::parse(&full_name, text)
        .map_err(|e| DefinitionError(format!("failed to parse '{full_name}': {e}")))?;

    let package = name.package().unwrap_or_default();
    let fields = schema
        .spec
        .fields
        .iter()
        .map(|f| FieldEntry::new(f.name.as_str(), convert_type(package, &f.ty)))
        .collect();
    Ok(RecordDef::new(full_name, fields))
}

fn convert_type(package: &str, ty: &Type) -> TypeDescriptor {
    match ty {
        Type::BuiltIn(builtin) => convert_builtin_type(builtin),
        Type::Complex(complex) => TypeDescriptor::record(complex_name(package, complex)),
        Type::Array { ty: elem, size } => {
            let kind = match size {
                ArraySize::Fixed(n) => SequenceKind::Fixed(*n),
                ArraySize::Bounded(n) => SequenceKind::Bounded(*n),
                ArraySize::Unbounded => SequenceKind::Unbounded,
            };
            TypeDescriptor::sequence(convert_type(package, elem), kind)
        }
    }
}

fn convert_builtin_type(ty: &BuiltInType) -> TypeDescriptor {
    let name = match ty {
        BuiltInType::Bool => "boolean",
        BuiltInType::Byte => "octet",
        BuiltInType::Char => "uint8",
        BuiltInType::Int8 => "int8",
        BuiltInType::UInt8 => "uint8",
        BuiltInType::Int16 => "int16",
        BuiltInType::UInt16 => "uint16",
        BuiltInType::Int32 => "int32",
        BuiltInType::UInt32 => "uint32",
        BuiltInType::Int64 => "int64",
        BuiltInType::UInt64 => "uint64",
        BuiltInType::Float32 => "float",
        BuiltInType::Float64 => "double",
        BuiltInType::String(None) => return TypeDescriptor::string(),
        BuiltInType::String(Some(n)) => return TypeDescriptor::bounded_string(*n),
        BuiltInType::WString(None) => return TypeDescriptor::unknown("UnboundedWString"),
        BuiltInType::WString(Some(_)) => return TypeDescriptor::unknown("BoundedWString"),
    };
    TypeDescriptor::primitive(name)
}

/// `pkg/Type` → `pkg/msg/Type`; a bare `Type` belongs to the current package.
fn complex_name(current_package: &str, ty: &ComplexType) -> String {
    match ty {
        ComplexType::Absolute { package, name } => format!("{package}/msg/{name}"),
        ComplexType::Relative { name } => format!("{current_package}/msg/{name}"),
    }
}
