// src/services/chat_client.rs
use std::sync::{Arc, Mutex};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::{JoinHandle, JoinSet},
    time::{Instant, sleep_until},
};
use tracing::{debug, error, warn};

use crate::{
    config::ClientConfig,
    message::{ChatMessage, MessageKind, RelayRequest, extract_display_text},
    services::{
        commands::{Command, CommandAction, CommandTable},
        session_manager::SessionManager,
        transport::RelayTransport,
    },
};

pub const CONFIG_HINT: &str = "Please check your webhook URL configuration";
pub const CLEARED_NOTICE: &str = "Terminal cleared.";
pub const GREETINGS: [&str; 2] = [
    "System initialized. Ready for input.",
    "Connection to neural network established...",
];

/// The surface the chat client draws on: input field, transcript container,
/// loading indicator and boot banner.
pub trait ChatView: Send + Sync {
    fn input_value(&self) -> String;
    fn clear_input(&self);
    fn focus_input(&self);
    fn render_message(&self, message: &ChatMessage);
    fn clear_transcript(&self);
    fn scroll_to_bottom(&self);
    fn set_loading(&self, visible: bool);
    fn set_boot_banner(&self, visible: bool);
}

pub struct ChatClient {
    view: Arc<dyn ChatView>,
    transport: Arc<dyn RelayTransport>,
    sessions: SessionManager,
    commands: CommandTable,
    config: ClientConfig,
    transcript: Mutex<Vec<ChatMessage>>,
    in_flight: Mutex<usize>,
}

impl ChatClient {
    pub fn new(
        view: Arc<dyn ChatView>,
        transport: Arc<dyn RelayTransport>,
        sessions: SessionManager,
        commands: CommandTable,
        config: ClientConfig,
    ) -> Self {
        Self {
            view,
            transport,
            sessions,
            commands,
            config,
            transcript: Mutex::new(Vec::new()),
            in_flight: Mutex::new(0),
        }
    }

    pub fn session_id(&self) -> String {
        self.sessions.get_or_create_session_id()
    }

    /// Takes the current input and sends it. Blank input is ignored.
    ///
    /// The user line is shown right away; the returned handle resolves once
    /// the reply (or error) has been appended.
    pub fn handle_user_input(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let message = self.view.input_value().trim().to_string();
        if message.is_empty() {
            return None;
        }

        if self.config.local_commands && self.process_command(&message) {
            self.view.clear_input();
            return None;
        }

        self.add_message(message.clone(), MessageKind::User);
        self.view.clear_input();

        let client = Arc::clone(self);
        Some(tokio::spawn(async move { client.send_message(message).await }))
    }

    /// Feeds each line of `reader` to the input field and submits it.
    ///
    /// Sends overlap freely; this returns only after every reply (or error)
    /// has been appended.
    pub async fn run_input_loop<R>(
        self: &Arc<Self>,
        reader: R,
        mut set_input: impl FnMut(String),
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut sends = JoinSet::new();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            set_input(line);
            if let Some(handle) = self.handle_user_input() {
                sends.spawn(async move {
                    if let Err(err) = handle.await {
                        warn!(error = %err, "send task ended abnormally");
                    }
                });
            }
            self.view.focus_input();
        }

        while sends.join_next().await.is_some() {}
        Ok(())
    }

    /// Sends one message through the relay and appends the outcome.
    pub async fn send_message(&self, message: String) {
        self.begin_loading();

        let request = RelayRequest::new(message, self.session_id());
        let result = self.transport.send(&request).await;

        self.end_loading();

        match result {
            Ok(data) => {
                debug!(session_id = %request.session_id, "reply received");
                self.add_message(extract_display_text(&data), MessageKind::Bot);
            }
            Err(err) => {
                error!(error = %err, "error sending message");
                self.add_message(
                    format!("ERROR: Failed to communicate with chatbot - {err}"),
                    MessageKind::Error,
                );
                self.add_message(CONFIG_HINT, MessageKind::System);
            }
        }
    }

    /// Runs `input` against the command table. Returns whether it matched.
    pub fn process_command(&self, input: &str) -> bool {
        match self.commands.lookup(input) {
            Some(Command::Display(text)) => {
                self.add_message(text.clone(), MessageKind::System);
                true
            }
            Some(Command::Action(CommandAction::ClearTerminal)) => {
                self.clear_transcript();
                self.add_message(CLEARED_NOTICE, MessageKind::System);
                true
            }
            None => false,
        }
    }

    pub fn add_message(&self, text: impl Into<String>, kind: MessageKind) {
        let message = ChatMessage::now(text, kind);
        {
            let mut transcript = self.transcript.lock().unwrap_or_else(|e| e.into_inner());
            transcript.push(message.clone());
        }
        self.view.render_message(&message);
        self.view.scroll_to_bottom();
    }

    pub fn clear_transcript(&self) {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner()).clear();
        self.view.clear_transcript();
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn focus_input(&self) {
        self.view.focus_input();
    }

    /// Shows the boot banner, hides it, then greets. Delays count from the
    /// moment this is called.
    pub async fn run_boot_sequence(&self) {
        let start = Instant::now();
        let timings = self.config.boot;

        self.view.set_boot_banner(true);
        sleep_until(start + timings.banner).await;
        self.view.set_boot_banner(false);

        sleep_until(start + timings.greeting).await;
        for greeting in GREETINGS {
            self.add_message(greeting, MessageKind::System);
        }
    }

    fn begin_loading(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *in_flight += 1;
        self.view.set_loading(true);
    }

    fn end_loading(&self) {
        // Counter and indicator change together; the last send to settle hides it.
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.view.set_loading(false);
        }
    }
}
