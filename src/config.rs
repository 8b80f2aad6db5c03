use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::widget::{DEFAULT_CONNECTION_ERROR, DEFAULT_SERVER_ERROR_PREFIX, DEFAULT_VIEWPORT_LINES};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Prefix for environment overrides, e.g. `CHAT_WIDGET__SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "CHAT_WIDGET";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "BIND_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the chatbot backend
    #[arg(long, env = "CHATBOT_BACKEND_URL")]
    pub backend_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub title: String,
    pub server_error_label: String,
    pub connection_error_message: String,
    pub viewport_lines: usize,
}

impl ServerConfig {
    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load configuration.
    ///
    /// Priority: CLI flag > CLI env var > `CHAT_WIDGET__*` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let viewport_lines = i64::try_from(DEFAULT_VIEWPORT_LINES)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.static_dir", "static")?
            .set_default("backend.url", "http://127.0.0.1:5000")?
            .set_default("widget.title", "Chatbot")?
            .set_default("widget.server_error_label", DEFAULT_SERVER_ERROR_PREFIX)?
            .set_default("widget.connection_error_message", DEFAULT_CONNECTION_ERROR)?
            .set_default("widget.viewport_lines", viewport_lines)?;

        // An explicit file must exist; the cwd fallback is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
            None => builder,
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        // clap already folded its own env vars into these.
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.url", url)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: "static".to_string(),
        };
        assert_eq!(server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(AppConfig::load_from_args(["chat-widget", "--no-such-flag"]).is_err());
    }
}
