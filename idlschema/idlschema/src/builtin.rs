use idlschema_core::{FieldEntry, RecordDef, TypeDescriptor};

/// `builtin_interfaces/msg/Time` and `Duration`, which every install space
/// depends on but which a partial prefix may not ship.
pub fn builtin_records() -> Vec<RecordDef> {
    ["Time", "Duration"]
        .into_iter()
        .map(|name| {
            RecordDef::new(
                format!("builtin_interfaces/msg/{name}"),
                vec![
                    FieldEntry::new("sec", TypeDescriptor::primitive("int32")),
                    FieldEntry::new("nanosec", TypeDescriptor::primitive("uint32")),
                ],
            )
        })
        .collect()
}
