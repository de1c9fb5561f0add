//! Terminal front end for the relay chat.

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use tokio::io::BufReader;
use tracing::info;

use webhook_relay_chat::{
    config::ClientConfig,
    message::{ChatMessage, MessageKind},
    services::{
        chat_client::{ChatClient, ChatView},
        commands::CommandTable,
        matrix_rain::{FRAME_INTERVAL, GlyphGrid, RainField},
        session_manager::{MemoryStorage, SessionManager},
        transport::HttpRelayTransport,
    },
    telemetry,
};

const BANNER: [&str; 3] = [
    "> INITIALIZING NEURAL INTERFACE...",
    "> ESTABLISHING SECURE CHANNEL...",
    "> LOADING CHAT PROTOCOL...",
];
const RAIN_COLUMNS: u32 = 80;
const RAIN_ROWS: u32 = 20;

/// Prints the transcript to stdout. The "input field" is the line being
/// submitted.
#[derive(Default)]
struct TerminalView {
    input: Mutex<String>,
}

impl TerminalView {
    fn set_input(&self, line: String) {
        *self.input.lock().unwrap_or_else(|e| e.into_inner()) = line;
    }
}

impl ChatView for TerminalView {
    fn input_value(&self) -> String {
        self.input.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn clear_input(&self) {
        self.input.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn focus_input(&self) {
        print!("> ");
        let _ = std::io::stdout().flush();
    }

    fn render_message(&self, message: &ChatMessage) {
        let body = match message.kind {
            MessageKind::User => format!("USER: {}", message.text),
            _ => message.text.clone(),
        };
        println!("[{}] {}", message.timestamp, body);
    }

    fn clear_transcript(&self) {
        // ANSI: clear screen, cursor home.
        print!("\x1b[2J\x1b[H");
    }

    fn scroll_to_bottom(&self) {
        let _ = std::io::stdout().flush();
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            println!("PROCESSING...");
        }
    }

    fn set_boot_banner(&self, visible: bool) {
        if visible {
            for line in BANNER {
                println!("{line}");
            }
        }
    }
}

async fn play_rain(frames: usize) {
    let mut field = RainField::new(RAIN_COLUMNS, 1);
    let mut grid = GlyphGrid::new(RAIN_COLUMNS, RAIN_ROWS);
    let mut interval = tokio::time::interval(FRAME_INTERVAL);

    for _ in 0..frames {
        interval.tick().await;
        field.frame(&mut rand::thread_rng(), &mut grid);
        print!("\x1b[H{}", grid.render());
        let _ = std::io::stdout().flush();
    }
    print!("\x1b[2J\x1b[H");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = ClientConfig::from_env()?;
    let transport = HttpRelayTransport::new(config.relay_url.clone());
    info!(endpoint = transport.endpoint(), "chat terminal starting");

    if config.rain_frames > 0 {
        print!("\x1b[2J");
        play_rain(config.rain_frames).await;
    }

    let view = Arc::new(TerminalView::default());
    let client = Arc::new(ChatClient::new(
        view.clone(),
        Arc::new(transport),
        SessionManager::new(Arc::new(MemoryStorage::new())),
        CommandTable::default(),
        config,
    ));

    client.run_boot_sequence().await;
    client.focus_input();

    // Replies print whenever they arrive; EOF waits for the outstanding ones.
    client
        .run_input_loop(BufReader::new(tokio::io::stdin()), |line| view.set_input(line))
        .await?;

    Ok(())
}
