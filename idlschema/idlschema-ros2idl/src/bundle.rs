//! Multi-section IDL bundles.
//!
//! Several IDL files may be concatenated with `====` separator lines, each
//! section starting with an `IDL: <path>` header:
//!
//! ```text
//! ================================================================================
//! IDL: geometry_msgs/msg/Point
//! module geometry_msgs { module msg { struct Point { ... }; }; };
//! ================================================================================
//! IDL: std_msgs/msg/Header
//! module std_msgs { module msg { struct Header { ... }; }; };
//! ```

use idlschema_core::DefinitionError;

use crate::lex::{is_separator_line, split_path};

/// One IDL section extracted from a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdlSection {
    /// Path components from the `IDL: pkg/msg/Type` header line.
    pub idl_path: Vec<String>,
    /// Everything after the header until the next separator.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaBundle {
    pub sections: Vec<IdlSection>,
}

impl SchemaBundle {
    /// Split `text` into sections. Fails if no section is found or a section
    /// lacks its `IDL:` header.
    pub fn parse(text: &str) -> Result<Self, DefinitionError> {
        let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
        for line in text.lines() {
            if is_separator_line(line) {
                chunks.push(Vec::new());
            } else if let Some(chunk) = chunks.last_mut() {
                chunk.push(line);
            }
        }

        let sections = chunks
            .iter()
            .filter(|chunk| chunk.iter().any(|l| !l.trim().is_empty()))
            .map(|chunk| parse_section(chunk))
            .collect::<Result<Vec<_>, _>>()?;
        if sections.is_empty() {
            return Err("no IDL sections found".into());
        }
        Ok(Self { sections })
    }

    /// The section whose header names `type_name`, if any.
    pub fn section(&self, type_name: &str) -> Option<&IdlSection> {
        let key = split_path(type_name);
        self.sections.iter().find(|s| s.idl_path == key)
    }
}

/// First non-blank line is the `IDL: <path>` header, the rest is the body.
fn parse_section(lines: &[&str]) -> Result<IdlSection, DefinitionError> {
    let mut meaningful = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty());
    let header = meaningful.next().unwrap_or_default();
    let Some(path) = header.strip_prefix("IDL:") else {
        return Err(DefinitionError(format!("missing `IDL:` header: {header}")));
    };
    let idl_path = split_path(path);
    if idl_path.is_empty() {
        return Err("empty IDL path in section header".into());
    }

    Ok(IdlSection {
        idl_path,
        body: meaningful.collect::<Vec<_>>().join("\n"),
    })
}
