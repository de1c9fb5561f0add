pub mod chat_client;
pub mod commands;
pub mod matrix_rain;
pub mod relay;
pub mod session_manager;
pub mod transport;
