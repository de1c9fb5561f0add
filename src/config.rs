// src/config.rs
use std::{fmt, net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::ConfigError;

/// Environment variable holding the external webhook URL.
pub const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_RELAY_URL: &str = "http://localhost:3000/api/webhook";

/// Where the relay endpoint finds the external webhook URL.
///
/// The value is looked up on every call, so an environment change is picked
/// up without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookUrlSource {
    Env(String),
    Fixed(Option<String>),
}

impl Default for WebhookUrlSource {
    fn default() -> Self {
        WebhookUrlSource::Env(WEBHOOK_URL_ENV.to_string())
    }
}

impl WebhookUrlSource {
    /// Blank values count as absent.
    pub fn resolve(&self) -> Option<String> {
        let value = match self {
            WebhookUrlSource::Env(var) => std::env::var(var).ok(),
            WebhookUrlSource::Fixed(url) => url.clone(),
        };
        value.filter(|url| !url.trim().is_empty())
    }
}

impl fmt::Display for WebhookUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookUrlSource::Env(var) => write!(f, "environment variable {var}"),
            WebhookUrlSource::Fixed(_) => write!(f, "fixed webhook URL"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: Option<PathBuf>,
    pub webhook_url: WebhookUrlSource,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: bind.clone(),
                reason: e.to_string(),
            }
        })?;

        let static_dir = lookup("STATIC_DIR")
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
            .trim()
            .to_string();
        let static_dir = (!static_dir.is_empty()).then(|| PathBuf::from(static_dir));

        Ok(Self {
            bind_addr,
            static_dir,
            webhook_url: WebhookUrlSource::default(),
        })
    }
}

/// Delays of the boot banner and the greeting, both counted from start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootTimings {
    pub banner: Duration,
    pub greeting: Duration,
}

impl Default for BootTimings {
    fn default() -> Self {
        Self {
            banner: Duration::from_millis(5000),
            greeting: Duration::from_millis(5500),
        }
    }
}

impl BootTimings {
    pub fn immediate() -> Self {
        Self {
            banner: Duration::ZERO,
            greeting: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub relay_url: String,
    /// Route `help`, `clear` and `status` to the local command table
    /// instead of the relay.
    pub local_commands: bool,
    pub rain_frames: usize,
    pub boot: BootTimings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            local_commands: false,
            rain_frames: 0,
            boot: BootTimings::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let relay_url = lookup("RELAY_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.relay_url);

        let local_commands = match lookup("RELAY_CHAT_LOCAL_COMMANDS") {
            Some(value) => parse_flag("RELAY_CHAT_LOCAL_COMMANDS", &value)?,
            None => defaults.local_commands,
        };

        let rain_frames = match lookup("RELAY_CHAT_RAIN_FRAMES") {
            Some(value) => parse_number("RELAY_CHAT_RAIN_FRAMES", &value)? as usize,
            None => defaults.rain_frames,
        };

        let banner = match lookup("RELAY_CHAT_BOOT_MS") {
            Some(value) => Duration::from_millis(parse_number("RELAY_CHAT_BOOT_MS", &value)?),
            None => defaults.boot.banner,
        };
        let greeting = match lookup("RELAY_CHAT_GREETING_MS") {
            Some(value) => Duration::from_millis(parse_number("RELAY_CHAT_GREETING_MS", &value)?),
            None => defaults.boot.greeting,
        };

        Ok(Self {
            relay_url,
            local_commands,
            rain_frames,
            boot: BootTimings { banner, greeting },
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
