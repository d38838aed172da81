use idlschema_core::{QualifiedName, TypeCategory};

#[test]
fn classifies_by_marker() {
    assert_eq!(TypeCategory::classify("std_srvs/srv/Trigger"), TypeCategory::ServicePair);
    assert_eq!(
        TypeCategory::classify("example_interfaces/action/Fibonacci"),
        TypeCategory::ActionTriple
    );
    assert_eq!(TypeCategory::classify("sensor_msgs/msg/Temperature"), TypeCategory::Record);
    assert_eq!(TypeCategory::classify("foo/bar/Baz"), TypeCategory::Unrecognized);
}

#[test]
fn marker_must_be_a_full_segment() {
    assert_eq!(TypeCategory::classify("msg/Temperature"), TypeCategory::Unrecognized);
    assert_eq!(TypeCategory::classify("sensor_msgs/msgs/X"), TypeCategory::Unrecognized);
    assert_eq!(TypeCategory::classify(""), TypeCategory::Unrecognized);
}

#[test]
fn msg_marker_wins_over_later_markers() {
    assert_eq!(TypeCategory::classify("a/srv/b/msg/C"), TypeCategory::Record);
    assert_eq!(TypeCategory::classify("a/action/b/srv/C"), TypeCategory::ServicePair);
}

#[test]
fn category_short_names() {
    assert_eq!(TypeCategory::Record.to_string(), "msg");
    assert_eq!(TypeCategory::ServicePair.as_str(), "srv");
    assert_eq!(TypeCategory::ActionTriple.as_str(), "action");
    assert_eq!(
        serde_json::to_value(TypeCategory::Unrecognized).unwrap(),
        serde_json::json!("unknown")
    );
}

#[test]
fn qualified_name_round_trips_through_display() {
    let name = QualifiedName::parse("sensor_msgs/msg/Temperature").unwrap();
    assert_eq!(name.namespaces, vec!["sensor_msgs", "msg"]);
    assert_eq!(name.name, "Temperature");
    assert_eq!(name.package(), Some("sensor_msgs"));
    assert_eq!(name.kind(), Some("msg"));
    assert_eq!(name.to_string(), "sensor_msgs/msg/Temperature");
    assert_eq!(name.with_name("Imu").to_string(), "sensor_msgs/msg/Imu");
}

#[test]
fn qualified_name_ignores_empty_segments() {
    let name = QualifiedName::parse("/pkg//msg/T/").unwrap();
    assert_eq!(name.to_string(), "pkg/msg/T");
    assert!(QualifiedName::parse("//").is_none());
}
