use std::{path::PathBuf, sync::Arc};

use idlschema::{
    AmentIndex, LookupError, RecordLookup, ResolutionError, SchemaCache, SchemaComposer,
    TypeCategory,
};
use serde_json::json;

fn fixtures(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn composer() -> SchemaComposer<AmentIndex> {
    SchemaComposer::new(AmentIndex::new([fixtures("ament")]))
}

fn schema_json(name: &str) -> serde_json::Value {
    let resolved = composer()
        .resolve(name)
        .unwrap_or_else(|e| panic!("{name} should resolve: {e}"));
    serde_json::to_value(&resolved.schema).unwrap()
}

fn time_node() -> serde_json::Value {
    json!({
        "type": "builtin_interfaces/msg/Time",
        "fields": { "sec": { "type": "int32" }, "nanosec": { "type": "uint32" } }
    })
}

// ── messages ───────────────────────────────────────────────────────────────────

#[test]
fn message_from_msg_files_with_builtin_time() {
    assert_eq!(
        schema_json("sensor_msgs/msg/Temperature"),
        json!({
            "header": {
                "type": "std_msgs/msg/Header",
                "fields": {
                    "stamp": time_node(),
                    "frame_id": { "type": "string" }
                }
            },
            "temperature": { "type": "double" },
            "variance": { "type": "double" }
        })
    );
}

#[test]
fn message_from_idl_mixes_idl_and_msg_dependencies() {
    let schema = schema_json("sensor_msgs/msg/Imu");
    assert_eq!(
        schema["orientation"],
        json!({
            "type": "geometry_msgs/msg/Quaternion",
            "fields": {
                "x": { "type": "double" },
                "y": { "type": "double" },
                "z": { "type": "double" },
                "w": { "type": "double" }
            }
        })
    );
    assert_eq!(
        schema["orientation_covariance"],
        json!({ "type": "array", "items": { "type": "double" }, "size": 9 })
    );
    assert_eq!(
        schema["angular_velocity"]["fields"]["z"],
        json!({ "type": "double" })
    );
    assert_eq!(schema["header"]["fields"]["stamp"], time_node());
}

#[test]
fn field_order_follows_the_definition_file() {
    let resolved = composer().resolve("sensor_msgs/msg/Imu").unwrap();
    let keys: Vec<&str> = resolved.schema.as_record().unwrap().keys().collect();
    assert_eq!(
        keys,
        [
            "header",
            "orientation",
            "orientation_covariance",
            "angular_velocity",
            "angular_velocity_covariance"
        ]
    );
}

#[test]
fn repeated_builtin_references_expand_each_time() {
    assert_eq!(
        schema_json("test_msgs/msg/Stamps"),
        json!({
            "start": time_node(),
            "end": time_node(),
            "elapsed": {
                "type": "builtin_interfaces/msg/Duration",
                "fields": { "sec": { "type": "int32" }, "nanosec": { "type": "uint32" } }
            }
        })
    );
}

// ── services and actions ───────────────────────────────────────────────────────

#[test]
fn service_from_srv_file_with_empty_request() {
    let resolved = composer().resolve("std_srvs/srv/Trigger").unwrap();
    assert_eq!(resolved.category, TypeCategory::ServicePair);
    assert_eq!(
        serde_json::to_value(&resolved.schema).unwrap(),
        json!({
            "request": {},
            "response": {
                "success": { "type": "boolean" },
                "message": { "type": "string" }
            }
        })
    );
}

#[test]
fn service_from_idl_file() {
    assert_eq!(
        schema_json("example_interfaces/srv/AddTwoInts"),
        json!({
            "request": { "a": { "type": "int64" }, "b": { "type": "int64" } },
            "response": { "sum": { "type": "int64" } }
        })
    );
}

#[test]
fn action_from_action_file() {
    let resolved = composer()
        .resolve("example_interfaces/action/Fibonacci")
        .unwrap();
    assert_eq!(resolved.category, TypeCategory::ActionTriple);
    assert_eq!(
        serde_json::to_value(&resolved.schema).unwrap(),
        json!({
            "goal": { "order": { "type": "int32" } },
            "result": { "sequence": { "type": "array", "items": { "type": "int32" } } },
            "feedback": {
                "partial_sequence": { "type": "array", "items": { "type": "int32" } }
            }
        })
    );
}

// ── degradation and failures ───────────────────────────────────────────────────

#[test]
fn missing_nested_record_degrades_to_name() {
    assert_eq!(
        schema_json("test_msgs/msg/Dangling"),
        json!({
            "gone": { "type": "test_msgs/msg/Missing" },
            "ok": { "type": "double" }
        })
    );
}

#[test]
fn malformed_nested_record_degrades_to_name() {
    assert_eq!(
        schema_json("test_msgs/msg/Wrapper"),
        json!({ "inner": { "type": "test_msgs/msg/Malformed" } })
    );
}

#[test]
fn recursive_record_is_cut_at_the_cycle() {
    assert_eq!(
        schema_json("test_msgs/msg/Tree"),
        json!({
            "value": { "type": "int32" },
            "children": { "type": "array", "items": { "type": "test_msgs/msg/Tree" } }
        })
    );
}

#[test]
fn missing_top_level_types_are_errors() {
    for name in [
        "std_msgs/msg/Nope",
        "no_such_pkg/msg/Thing",
        "std_srvs/srv/Nope",
        "example_interfaces/action/Nope",
    ] {
        match composer().resolve(name) {
            Err(ResolutionError::TypeNotFound {
                source: LookupError::NotFound { .. },
                ..
            }) => {}
            other => panic!("{name}: expected TypeNotFound, got {other:?}"),
        }
    }
}

#[test]
fn malformed_top_level_type_is_unavailable() {
    let err = composer().resolve("test_msgs/msg/Malformed").unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::TypeNotFound {
            source: LookupError::Unavailable { .. },
            ..
        }
    ));
    assert!(err.to_string().starts_with("Failed to get schema for 'test_msgs/msg/Malformed': "));
}

#[test]
fn unrecognized_category_does_not_touch_the_filesystem() {
    let err = composer().resolve("std_msgs/Header").unwrap_err();
    assert!(matches!(err, ResolutionError::UnrecognizedCategory { .. }));
}

// ── index behavior ─────────────────────────────────────────────────────────────

#[test]
fn earlier_prefixes_win() {
    let index = AmentIndex::new([fixtures("overlay"), fixtures("ament")]);
    let composer = SchemaComposer::new(index);
    let resolved = composer.resolve("sensor_msgs/msg/Temperature").unwrap();
    assert_eq!(
        serde_json::to_value(&resolved.schema).unwrap(),
        json!({ "celsius": { "type": "float" } })
    );
    // Packages the overlay does not have still come from the underlay.
    assert!(composer.resolve("std_msgs/msg/Header").is_ok());
}

#[test]
fn interface_file_locates_definitions() {
    let index = AmentIndex::new([fixtures("ament")]);
    let root = fixtures("ament").join("share");
    assert_eq!(
        index.interface_file("std_srvs/srv/Trigger_Response"),
        Some(root.join("std_srvs/srv/Trigger.srv"))
    );
    assert_eq!(
        index.interface_file("example_interfaces/action/Fibonacci_Feedback"),
        Some(root.join("example_interfaces/action/Fibonacci.action"))
    );
    assert_eq!(
        index.interface_file("sensor_msgs/msg/Imu"),
        Some(root.join("sensor_msgs/msg/Imu.idl"))
    );
    assert_eq!(index.interface_file("sensor_msgs/msg/Nope"), None);
    assert_eq!(index.interface_file("sensor_msgs/Imu"), None);
}

#[test]
fn whole_service_is_not_a_record() {
    let index = AmentIndex::new([fixtures("ament")]);
    assert!(matches!(
        index.lookup_record("std_srvs/srv/Trigger"),
        Err(LookupError::NotFound { .. })
    ));
    assert!(index.lookup_record("std_srvs/srv/Trigger_Request").is_ok());
}

#[test]
fn builtins_are_served_without_prefixes() {
    let index = AmentIndex::new(Vec::<PathBuf>::new());
    assert!(index.prefixes().is_empty());
    assert_eq!(index.lookup_record("builtin_interfaces/msg/Time").unwrap().len(), 2);
    assert!(index.lookup_record("std_msgs/msg/Header").is_err());
}

#[test]
fn cache_over_ament_index() {
    let cache = SchemaCache::new(AmentIndex::new([fixtures("ament")]));
    let first = cache.get("sensor_msgs/msg/Temperature").unwrap();
    let second = cache.get("sensor_msgs/msg/Temperature").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.get("std_msgs/msg/Nope").is_err());
    assert_eq!(cache.len(), 1);
}
