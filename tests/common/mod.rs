#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::Value;

use webhook_relay_chat::{
    config::{BootTimings, ClientConfig},
    error::ClientError,
    message::{ChatMessage, RelayRequest},
    services::{
        chat_client::{ChatClient, ChatView},
        commands::CommandTable,
        session_manager::{MemoryStorage, SESSION_STORAGE_KEY, SessionManager, SessionStorage},
        transport::RelayTransport,
    },
};

/// Headless view that records what the client did to it.
#[derive(Default)]
pub struct RecordingView {
    pub input: Mutex<String>,
    pub rendered: Mutex<Vec<ChatMessage>>,
    pub loading: Mutex<Vec<bool>>,
    pub banner: Mutex<Vec<bool>>,
    pub clears: AtomicUsize,
    pub scrolls: AtomicUsize,
    pub focuses: AtomicUsize,
}

impl RecordingView {
    pub fn type_input(&self, text: &str) {
        *self.input.lock().unwrap() = text.to_string();
    }

    pub fn current_input(&self) -> String {
        self.input.lock().unwrap().clone()
    }

    pub fn loading_visible(&self) -> bool {
        self.loading.lock().unwrap().last().copied().unwrap_or(false)
    }

    pub fn rendered(&self) -> Vec<ChatMessage> {
        self.rendered.lock().unwrap().clone()
    }
}

impl ChatView for RecordingView {
    fn input_value(&self) -> String {
        self.input.lock().unwrap().clone()
    }

    fn clear_input(&self) {
        self.input.lock().unwrap().clear();
    }

    fn focus_input(&self) {
        self.focuses.fetch_add(1, Ordering::SeqCst);
    }

    fn render_message(&self, message: &ChatMessage) {
        self.rendered.lock().unwrap().push(message.clone());
    }

    fn clear_transcript(&self) {
        self.rendered.lock().unwrap().clear();
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn scroll_to_bottom(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }

    fn set_loading(&self, visible: bool) {
        self.loading.lock().unwrap().push(visible);
    }

    fn set_boot_banner(&self, visible: bool) {
        self.banner.lock().unwrap().push(visible);
    }
}

pub enum StubReply {
    Json(Value),
    HttpStatus(u16),
    BadJson,
    Delayed(Duration, Value),
}

/// Transport that answers from a canned reply and keeps every request.
pub struct StubTransport {
    reply: StubReply,
    pub requests: Mutex<Vec<RelayRequest>>,
}

impl StubTransport {
    pub fn new(reply: StubReply) -> Self {
        Self { reply, requests: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RelayTransport for StubTransport {
    async fn send(&self, request: &RelayRequest) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            StubReply::Json(value) => Ok(value.clone()),
            StubReply::HttpStatus(status) => Err(ClientError::Http(*status)),
            StubReply::BadJson => Err(serde_json::from_str::<Value>("{not json").unwrap_err().into()),
            StubReply::Delayed(delay, value) => {
                tokio::time::sleep(*delay).await;
                Ok(value.clone())
            }
        }
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        boot: BootTimings::immediate(),
        ..ClientConfig::default()
    }
}

pub fn storage_with_session(id: &str) -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(SESSION_STORAGE_KEY, id.to_string());
    storage
}

pub fn build_client(
    view: Arc<RecordingView>,
    transport: Arc<dyn RelayTransport>,
    config: ClientConfig,
) -> Arc<ChatClient> {
    Arc::new(ChatClient::new(
        view,
        transport,
        SessionManager::new(storage_with_session("session-123")),
        CommandTable::default(),
        config,
    ))
}
