// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use rand::Rng;

/// Storage key holding the session id.
pub const SESSION_STORAGE_KEY: &str = "chat-session-id";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Key/value storage that lives as long as one chat session.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
}

/// In-process storage, gone when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let guard = self.items.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        let mut guard = self.items.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(key.to_string(), value);
    }
}

#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    create_lock: Arc<Mutex<()>>,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("key", &SESSION_STORAGE_KEY)
            .finish()
    }
}

impl SessionManager {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the stored session id, creating and storing one on first use.
    pub fn get_or_create_session_id(&self) -> String {
        // Held across get and set so overlapping first sends agree on one id.
        let _guard = self.create_lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(id) = self.storage.get_item(SESSION_STORAGE_KEY) {
            return id;
        }
        let id = generate_session_id();
        self.storage.set_item(SESSION_STORAGE_KEY, id.clone());
        id
    }
}

/// `session-<unix millis>-<9 base-36 chars>`. Not cryptographically strong.
pub fn generate_session_id() -> String {
    let millis = Utc::now().timestamp_millis();

    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("session-{millis}-{suffix}")
}
