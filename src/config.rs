//! Process configuration from environment variables

use crate::conversation::DEFAULT_WELCOME_MESSAGE;
use crate::render::EmbedOptions;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for the chat server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the assistant service
    pub api_url: String,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Upper bound on one assistant call
    pub request_timeout: Duration,
    /// Seed message for a fresh session
    pub welcome_message: String,
    /// Player size for embedded videos
    pub embed: EmbedOptions,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            embed: EmbedOptions::default(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset and empty values use defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("CHAT_PORT") {
            Some(v) => parse(&v, "CHAT_PORT", "a port number")?,
            None => defaults.port,
        };
        let bind_addr = match get("CHAT_BIND_ADDR") {
            Some(v) => parse(&v, "CHAT_BIND_ADDR", "an IP address")?,
            None => defaults.bind_addr,
        };
        let request_timeout = match get("CHAT_REQUEST_TIMEOUT_SECS") {
            Some(v) => {
                const VAR: &str = "CHAT_REQUEST_TIMEOUT_SECS";
                const EXPECTED: &str = "a positive number of seconds";
                let secs: u64 = parse(&v, VAR, EXPECTED)?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: VAR,
                        expected: EXPECTED,
                        value: v,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        let embed = EmbedOptions {
            width: match get("CHAT_VIDEO_WIDTH") {
                Some(v) => parse(&v, "CHAT_VIDEO_WIDTH", "a width in pixels")?,
                None => defaults.embed.width,
            },
            height: match get("CHAT_VIDEO_HEIGHT") {
                Some(v) => parse(&v, "CHAT_VIDEO_HEIGHT", "a height in pixels")?,
                None => defaults.embed.height,
            },
        };

        Ok(Self {
            api_url: get("ASSISTANT_API_URL").unwrap_or(defaults.api_url),
            bind_addr,
            port,
            request_timeout,
            welcome_message: get("CHAT_WELCOME_MESSAGE").unwrap_or(defaults.welcome_message),
            embed,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    value: &str,
    var: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: value.to_string(),
    })
}
