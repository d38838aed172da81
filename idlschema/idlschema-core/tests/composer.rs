use std::sync::atomic::{AtomicUsize, Ordering};

use idlschema_core::{
    ActionRecords, FieldEntry, InterfaceRegistry, LookupError, RecordDef, RecordLookup,
    ResolutionError, SchemaComposer, SequenceKind, ServiceRecords, TypeCategory, TypeDescriptor,
};
use serde_json::json;

/// Registry wrapper that counts every lookup call.
struct CountingLookup {
    inner: InterfaceRegistry,
    calls: AtomicUsize,
}

impl CountingLookup {
    fn new(inner: InterfaceRegistry) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordLookup for CountingLookup {
    fn lookup_record(&self, qualified_name: &str) -> Result<Vec<FieldEntry>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup_record(qualified_name)
    }

    fn lookup_service(&self, qualified_name: &str) -> Result<ServiceRecords, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup_service(qualified_name)
    }

    fn lookup_action(&self, qualified_name: &str) -> Result<ActionRecords, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup_action(qualified_name)
    }
}

fn registry() -> InterfaceRegistry {
    [
        RecordDef::new(
            "test_msgs/msg/R",
            vec![
                FieldEntry::new("a", TypeDescriptor::primitive("int32")),
                FieldEntry::new("b", TypeDescriptor::string()),
            ],
        ),
        RecordDef::new(
            "builtin_interfaces/msg/Time",
            vec![
                FieldEntry::new("sec", TypeDescriptor::primitive("int32")),
                FieldEntry::new("nanosec", TypeDescriptor::primitive("uint32")),
            ],
        ),
        RecordDef::new(
            "std_msgs/msg/Header",
            vec![
                FieldEntry::new("stamp", TypeDescriptor::record("builtin_interfaces/msg/Time")),
                FieldEntry::new("frame_id", TypeDescriptor::string()),
            ],
        ),
        RecordDef::new(
            "sensor_msgs/msg/Temperature",
            vec![
                FieldEntry::new("header", TypeDescriptor::record("std_msgs/msg/Header")),
                FieldEntry::new("temperature", TypeDescriptor::primitive("double")),
                FieldEntry::new("variance", TypeDescriptor::primitive("double")),
            ],
        ),
        RecordDef::new(
            "std_srvs/srv/Trigger_Request",
            vec![FieldEntry::new(
                "structure_needs_at_least_one_member",
                TypeDescriptor::primitive("uint8"),
            )],
        ),
        RecordDef::new(
            "std_srvs/srv/Trigger_Response",
            vec![
                FieldEntry::new("success", TypeDescriptor::primitive("boolean")),
                FieldEntry::new("message", TypeDescriptor::string()),
            ],
        ),
        RecordDef::new(
            "example_interfaces/action/Fibonacci_Goal",
            vec![FieldEntry::new("order", TypeDescriptor::primitive("int32"))],
        ),
        RecordDef::new(
            "example_interfaces/action/Fibonacci_Result",
            vec![FieldEntry::new(
                "sequence",
                TypeDescriptor::sequence(TypeDescriptor::primitive("int32"), SequenceKind::Unbounded),
            )],
        ),
        RecordDef::new(
            "example_interfaces/action/Fibonacci_Feedback",
            vec![FieldEntry::new(
                "partial_sequence",
                TypeDescriptor::sequence(TypeDescriptor::primitive("int32"), SequenceKind::Unbounded),
            )],
        ),
        RecordDef::new(
            "broken_interfaces/action/Partial_Goal",
            vec![FieldEntry::new("order", TypeDescriptor::primitive("int32"))],
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn resolves_plain_record() {
    let composer = SchemaComposer::new(registry());
    let resolved = composer.resolve("test_msgs/msg/R").unwrap();

    assert_eq!(resolved.name, "test_msgs/msg/R");
    assert_eq!(resolved.category, TypeCategory::Record);
    assert_eq!(
        serde_json::to_value(&resolved.schema).unwrap(),
        json!({ "a": { "type": "int32" }, "b": { "type": "string" } })
    );
}

#[test]
fn resolves_nested_records_recursively() {
    let composer = SchemaComposer::new(registry());
    let resolved = composer.resolve("sensor_msgs/msg/Temperature").unwrap();

    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({
            "name": "sensor_msgs/msg/Temperature",
            "category": "msg",
            "schema": {
                "header": {
                    "type": "std_msgs/msg/Header",
                    "fields": {
                        "stamp": {
                            "type": "builtin_interfaces/msg/Time",
                            "fields": {
                                "sec": { "type": "int32" },
                                "nanosec": { "type": "uint32" }
                            }
                        },
                        "frame_id": { "type": "string" }
                    }
                },
                "temperature": { "type": "double" },
                "variance": { "type": "double" }
            }
        })
    );
}

#[test]
fn resolves_service_into_request_and_response() {
    let composer = SchemaComposer::new(registry());
    let resolved = composer.resolve("std_srvs/srv/Trigger").unwrap();

    assert_eq!(resolved.category, TypeCategory::ServicePair);
    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({
            "name": "std_srvs/srv/Trigger",
            "category": "srv",
            "schema": {
                "request": {},
                "response": {
                    "success": { "type": "boolean" },
                    "message": { "type": "string" }
                }
            }
        })
    );
}

#[test]
fn resolves_action_into_goal_result_feedback() {
    let composer = SchemaComposer::new(registry());
    let resolved = composer.resolve("example_interfaces/action/Fibonacci").unwrap();

    assert_eq!(resolved.category, TypeCategory::ActionTriple);
    let action = resolved.schema.as_action().expect("action schema");
    assert_eq!(action.feedback.keys().collect::<Vec<_>>(), ["partial_sequence"]);
    assert!(resolved.schema.as_record().is_none());
    let value = serde_json::to_value(&resolved.schema).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 3);
    for key in ["goal", "result", "feedback"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(value["goal"], json!({ "order": { "type": "int32" } }));
    assert_eq!(
        value["result"],
        json!({ "sequence": { "type": "array", "items": { "type": "int32" } } })
    );
}

#[test]
fn missing_top_level_record_is_type_not_found() {
    let composer = SchemaComposer::new(registry());
    let err = composer.resolve("test_msgs/msg/Missing").unwrap_err();

    assert!(matches!(
        &err,
        ResolutionError::TypeNotFound { name, source: LookupError::NotFound { .. } }
            if name == "test_msgs/msg/Missing"
    ));
    let ResolutionError::TypeNotFound { source, .. } = &err else {
        unreachable!()
    };
    assert_eq!(source.name(), "test_msgs/msg/Missing");
    assert_eq!(err.type_name(), "test_msgs/msg/Missing");
    assert!(err.to_string().starts_with("Failed to get schema for 'test_msgs/msg/Missing'"));
}

#[test]
fn missing_service_is_type_not_found() {
    let composer = SchemaComposer::new(registry());
    let err = composer.resolve("std_srvs/srv/SetBool").unwrap_err();
    assert!(matches!(err, ResolutionError::TypeNotFound { .. }));
}

#[test]
fn action_with_missing_sub_record_is_type_not_found() {
    let composer = SchemaComposer::new(registry());
    let err = composer.resolve("broken_interfaces/action/Partial").unwrap_err();
    let ResolutionError::TypeNotFound { source, .. } = &err else {
        panic!("expected TypeNotFound, got {err:?}");
    };
    assert!(matches!(source, LookupError::Unavailable { .. }));
    assert_eq!(source.name(), "broken_interfaces/action/Partial");
}

#[test]
fn unrecognized_category_performs_no_lookup() {
    let composer = SchemaComposer::new(CountingLookup::new(registry()));
    let err = composer.resolve("foo/bar/Baz").unwrap_err();

    assert!(matches!(
        &err,
        ResolutionError::UnrecognizedCategory { name } if name == "foo/bar/Baz"
    ));
    assert_eq!(
        err.to_string(),
        "Unknown type category for 'foo/bar/Baz'. Expected /msg/, /srv/, or /action/ in type name."
    );
    assert_eq!(composer.lookup().calls(), 0);
}

#[test]
fn resolution_is_deterministic() {
    let composer = SchemaComposer::new(registry());
    let first = serde_json::to_string(&composer.resolve("sensor_msgs/msg/Temperature").unwrap())
        .unwrap();
    let second = serde_json::to_string(&composer.resolve("sensor_msgs/msg/Temperature").unwrap())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn default_service_lookup_derives_sub_record_names() {
    struct Plain(InterfaceRegistry);
    impl RecordLookup for Plain {
        fn lookup_record(&self, name: &str) -> Result<Vec<FieldEntry>, LookupError> {
            self.0.lookup_record(name)
        }
    }

    let composer = SchemaComposer::new(Plain(registry()));
    let resolved = composer.resolve("std_srvs/srv/Trigger").unwrap();
    assert!(resolved.schema.as_service().is_some());

    let err = composer.resolve("std_srvs/srv/Missing").unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::TypeNotFound { source: LookupError::NotFound { name }, .. }
            if name == "std_srvs/srv/Missing_Request"
    ));
}
