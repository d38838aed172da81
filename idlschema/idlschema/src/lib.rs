//! Schema resolution for ROS 2 interface types.
//!
//! Re-exports [`idlschema_core`] and adds [`AmentIndex`], a
//! [`RecordLookup`] that reads `.msg`, `.srv`, `.action` and `.idl` files from
//! the `share/` directories of ament install prefixes.
//!
//! ```no_run
//! use idlschema::{AmentIndex, SchemaComposer};
//!
//! let composer = SchemaComposer::new(AmentIndex::from_env());
//! let resolved = composer.resolve("sensor_msgs/msg/Temperature")?;
//! println!("{}", resolved.category);
//! # Ok::<(), idlschema::ResolutionError>(())
//! ```

mod ament;
mod builtin;

pub use ament::{AMENT_PREFIX_PATH, AmentIndex};
pub use builtin::builtin_records;
pub use idlschema_core as core;
pub use idlschema_core::{
    ActionSchema, DefinitionError, FieldEntry, InterfaceRegistry, LookupError, RecordDef,
    RecordLookup, RecordSchema, ResolutionError, ResolvedType, SchemaCache, SchemaComposer,
    SchemaNode, ServiceSchema, TypeCategory, TypeDescriptor, TypeSchema,
};
#[cfg(feature = "ros2idl")]
pub use idlschema_ros2idl as ros2idl;
#[cfg(feature = "ros2msg")]
pub use idlschema_ros2msg as ros2msg;
