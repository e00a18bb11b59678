//! Command line and layered configuration.
//!
//! Priority: CLI flag > CLI env var > `FOLIO_` env vars > config file > defaults.

use std::time::Duration;

use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::client::DEFAULT_ENDPOINT;
use crate::nav::Section;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Chat endpoint URL (e.g. http://localhost:5000/api/chat)
    #[arg(long, env = "CHAT_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    pub log_json: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the personal page with the chat widget (default)
    Serve,
    /// Chat with the endpoint from the terminal
    Chat,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Full URL of the remote chat endpoint.
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Idle time after which a visitor session is dropped.
    pub timeout_secs: u64,
}

impl SessionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub owner: String,
    pub tagline: String,
    #[serde(default = "default_sections")]
    pub sections: Vec<Section>,
}

fn default_sections() -> Vec<Section> {
    [
        ("home", "Home", "Welcome to my corner of the web."),
        ("about", "About", "A little about who I am and what I do."),
        ("skills", "Skills", "Languages, tools, and things I enjoy building with."),
        ("projects", "Projects", "A selection of things I have built."),
        ("contact", "Contact", "Say hello, or ask the assistant in the corner."),
    ]
    .into_iter()
    .map(|(id, title, body)| Section {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    })
    .collect()
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("chat.endpoint", DEFAULT_ENDPOINT)?
            .set_default("session.timeout_secs", 30 * 60)?
            .set_default("logging.format", "pretty")?
            .set_default("site.title", "Portfolio")?
            .set_default("site.owner", "John Doe")?
            .set_default("site.tagline", "Developer. Builder. Occasional writer.")?;

        // An explicit file must exist; ./config.{yaml,toml,json} is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. FOLIO_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(endpoint) = &cli.endpoint {
            builder = builder.set_override("chat.endpoint", endpoint.as_str())?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("logging.format", if json { "json" } else { "pretty" })?;
        }

        builder.build()?.try_deserialize()
    }
}
