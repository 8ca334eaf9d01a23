//! Tests for linking classifications to later refinement requests.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use namecast::{
    ClassificationResult, Distribution, ErrorKind, EntryPoint, NamecastError, SessionConfig,
    SessionId, SessionStore,
};

fn classification(name: &str, male: f64) -> ClassificationResult {
    ClassificationResult::new(
        name,
        Distribution::new([("female", 1.0 - male), ("male", male)]).unwrap(),
    )
}

#[test]
fn missing_session_redirects_to_classification() {
    let store = SessionStore::default();
    let err = store.get(&SessionId::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(err.recovery(), Some(EntryPoint::Classification));
}

#[test]
fn sessions_are_isolated() {
    let store = SessionStore::default();
    let a = store.open(classification("anna", 0.1));
    let b = store.open(classification("boris", 0.9));
    assert_ne!(a, b);
    assert_eq!(store.get(&a).unwrap().label, "female");
    assert_eq!(store.get(&b).unwrap().label, "male");
    assert_eq!(store.len(), 2);
}

#[test]
fn reading_does_not_consume() {
    let store = SessionStore::default();
    let id = store.open(classification("sam", 0.6));
    for _ in 0..3 {
        assert_eq!(store.get(&id).unwrap().name, "sam");
    }
}

#[test]
fn stored_result_is_unchanged() {
    let store = SessionStore::default();
    let original = classification("robin", 0.7);
    let id = store.open(original.clone());
    assert_eq!(store.get(&id).unwrap(), original);
}

#[test]
fn expired_session_is_missing() {
    let store = SessionStore::new(&SessionConfig::new().ttl(Duration::from_millis(50)));
    let id = store.open(classification("sam", 0.6));
    assert!(store.get(&id).is_ok());

    thread::sleep(Duration::from_millis(150));
    assert!(matches!(
        store.get(&id),
        Err(NamecastError::NoClassification)
    ));
}

#[test]
fn concurrent_open_and_get() {
    let store = Arc::new(SessionStore::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let name = format!("name{i}");
                let id = store.open(classification(&name, 0.5));
                assert_eq!(store.get(&id).unwrap().name, name);
                id
            })
        })
        .collect();

    let ids: Vec<SessionId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(store.get(id).unwrap().name, format!("name{i}"));
    }
}

#[test]
fn session_id_serializes_as_plain_string() {
    let id = SessionId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: SessionId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
