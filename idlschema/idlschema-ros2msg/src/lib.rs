//! ROS 2 `.msg` / `.srv` / `.action` front end for `idlschema`.
//!
//! Parsing of each section is delegated to `re_ros_msg`; the resulting
//! `MessageSpecification` is mapped onto [`RecordDef`](idlschema_core::RecordDef)s
//! with rosidl's canonical type names, so a `.msg` file and the `.idl` file
//! generated from it describe the same record.
//!
//! Services and actions are split on `---` lines and named after the ROS 2
//! convention (`X_Request` / `X_Response`, `X_Goal` / `X_Result` / `X_Feedback`).

mod parser;

pub use parser::{parse_action, parse_interface, parse_msg, parse_srv};
