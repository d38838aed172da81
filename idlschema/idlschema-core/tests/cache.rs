use std::{sync::Arc, thread};

use idlschema_core::{
    FieldEntry, InterfaceRegistry, RecordDef, ResolutionError, SchemaCache, TypeDescriptor,
};

fn registry() -> InterfaceRegistry {
    InterfaceRegistry::new().with_record(RecordDef::new(
        "test_msgs/msg/R",
        vec![FieldEntry::new("a", TypeDescriptor::primitive("int32"))],
    ))
}

#[test]
fn second_get_returns_cached_entry() {
    let cache = SchemaCache::new(registry());
    let first = cache.get("test_msgs/msg/R").unwrap();
    let second = cache.get("test_msgs/msg/R").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("test_msgs/msg/R"));
}

#[test]
fn failures_are_not_cached() {
    let cache = SchemaCache::new(registry());
    assert!(matches!(
        cache.get("test_msgs/msg/Missing"),
        Err(ResolutionError::TypeNotFound { .. })
    ));
    assert!(matches!(
        cache.get("no_marker/Type"),
        Err(ResolutionError::UnrecognizedCategory { .. })
    ));
    assert!(cache.is_empty());
}

#[test]
fn clear_drops_entries() {
    let cache = SchemaCache::new(registry().with_record(RecordDef::new(
        "test_msgs/msg/S",
        vec![FieldEntry::new("b", TypeDescriptor::string())],
    )));
    cache.get("test_msgs/msg/R").unwrap();
    cache.get("test_msgs/msg/S").unwrap();
    assert_eq!(cache.len(), 2);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn concurrent_callers_share_one_entry() {
    let cache = Arc::new(SchemaCache::new(registry()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get("test_msgs/msg/R").unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let stored = cache.get("test_msgs/msg/R").unwrap();
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &stored)));
    assert_eq!(cache.len(), 1);
}
