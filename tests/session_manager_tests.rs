use std::sync::Arc;
use std::thread;

use webhook_relay_chat::services::session_manager::{
    MemoryStorage, SESSION_STORAGE_KEY, SessionManager, SessionStorage,
};

#[test]
fn id_is_stable_within_a_session() {
    let mgr = SessionManager::new(Arc::new(MemoryStorage::new()));
    let first = mgr.get_or_create_session_id();
    let second = mgr.get_or_create_session_id();
    assert_eq!(first, second);
    assert!(first.starts_with("session-"));
}

#[test]
fn stored_id_is_reused() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(SESSION_STORAGE_KEY, "session-123".to_string());
    let mgr = SessionManager::new(storage);
    assert_eq!(mgr.get_or_create_session_id(), "session-123");
}

#[test]
fn independent_sessions_get_different_ids() {
    let a = SessionManager::new(Arc::new(MemoryStorage::new()));
    let b = SessionManager::new(Arc::new(MemoryStorage::new()));
    assert_ne!(a.get_or_create_session_id(), b.get_or_create_session_id());
}

#[test]
fn concurrent_first_calls_agree() {
    let mgr = SessionManager::new(Arc::new(MemoryStorage::new()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mgr = mgr.clone();
            thread::spawn(move || mgr.get_or_create_session_id())
        })
        .collect();

    let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}
