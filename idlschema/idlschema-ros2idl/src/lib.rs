//! ROS 2 IDL front end for `idlschema`.
//!
//! Turns `.idl` text, as generated by `rosidl_adapter`, into [`RecordDef`]s
//! that can be loaded into an [`InterfaceRegistry`](idlschema_core::InterfaceRegistry).
//!
//! # Pipeline
//!
//! ```text
//! IDL text
//!   └─ parse_idl_text     – nom-based line parser → ParsedIdl
//!       └─ into_records   – scoped-name / typedef resolution → Vec<RecordDef>
//! ```
//!
//! Bundles of several files separated by `====` lines go through
//! [`SchemaBundle::parse`] first; all sections share one declaration scope.

mod ast;
mod bundle;
mod lex;
mod parser;
mod resolve;

use idlschema_core::{DefinitionError, RecordDef};
use tracing::debug;

pub use bundle::{IdlSection, SchemaBundle};

/// Parse one IDL file into the structs it declares, in declaration order.
pub fn parse_idl(text: &str) -> Result<Vec<RecordDef>, DefinitionError> {
    let parsed = parser::parse_idl_text(text)?;
    let records = resolve::into_records(&parsed);
    debug!(records = records.len(), "parsed IDL");
    Ok(records)
}

/// Parse a `====`-separated bundle. Names may refer to structs, enums or
/// typedefs declared in any section.
pub fn parse_idl_bundle(text: &str) -> Result<Vec<RecordDef>, DefinitionError> {
    let bundle = SchemaBundle::parse(text)?;
    let mut parsed = ast::ParsedIdl::default();
    for section in &bundle.sections {
        let part = parser::parse_idl_text(&section.body).map_err(|e| {
            DefinitionError(format!("IDL section '{}': {e}", section.idl_path.join("/")))
        })?;
        parsed.merge(part);
    }
    let records = resolve::into_records(&parsed);
    debug!(
        sections = bundle.sections.len(),
        records = records.len(),
        "parsed IDL bundle"
    );
    Ok(records)
}
