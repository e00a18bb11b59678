use folio_chat::config::{AppConfig, Cli, Command, LogFormat};
use clap::Parser;
use serial_test::serial;
use std::env;
use std::io::Write;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("FOLIO_SERVER__PORT");
        env::remove_var("FOLIO_CHAT__ENDPOINT");
        env::remove_var("FOLIO_SITE__OWNER");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("CHAT_ENDPOINT");
        env::remove_var("LOG_JSON");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["folio-chat"]).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.chat.endpoint, "http://localhost:5000/api/chat");
    assert_eq!(config.session.timeout_secs, 1800);
    assert_eq!(config.logging.format, LogFormat::Pretty);

    let ids: Vec<_> = config.site.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["home", "about", "skills", "projects", "contact"]);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("FOLIO_SERVER__PORT", "9090");
        env::set_var("FOLIO_CHAT__ENDPOINT", "http://chat.internal:8000/api/chat");
    }

    let config = AppConfig::load_from_args(["folio-chat"]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.chat.endpoint, "http://chat.internal:8000/api/chat");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("FOLIO_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([
        "folio-chat",
        "--port",
        "4000",
        "--endpoint",
        "http://127.0.0.1:5001/api/chat",
        "--log-json",
        "true",
    ])
    .expect("Failed to load config");
    assert_eq!(config.server.port, 4000);
    assert_eq!(config.chat.endpoint, "http://127.0.0.1:5001/api/chat");
    assert_eq!(config.logging.format, LogFormat::Json);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    write!(
        file,
        r#"
server:
  port: 7070
site:
  owner: "Grace Hopper"
  sections:
    - id: work
      title: Work
      body: Compilers, mostly.
"#
    )
    .expect("Failed to write temp config");

    // Tell AppConfig to use this file via Env Var (mocking CLI arg indirectly)
    unsafe {
        env::set_var("CONFIG_FILE", file.path());
    }

    let config = AppConfig::load_from_args(["folio-chat"]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.site.owner, "Grace Hopper");
    assert_eq!(config.site.title, "Portfolio");
    assert_eq!(config.site.sections.len(), 1);
    assert_eq!(config.site.sections[0].id, "work");

    // Env still wins over the file.
    unsafe {
        env::set_var("FOLIO_SITE__OWNER", "Ada Lovelace");
    }
    let config = AppConfig::load_from_args(["folio-chat"]).expect("Failed to load config");
    assert_eq!(config.site.owner, "Ada Lovelace");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["folio-chat", "--config", "does-not-exist.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_subcommands() {
    clear_env_vars();

    let cli = Cli::try_parse_from(["folio-chat"]).unwrap();
    assert_eq!(cli.command(), Command::Serve);

    let cli = Cli::try_parse_from(["folio-chat", "chat", "--endpoint", "http://x/api/chat"]).unwrap();
    assert_eq!(cli.command(), Command::Chat);
    assert_eq!(cli.endpoint.as_deref(), Some("http://x/api/chat"));

    assert!(Cli::try_parse_from(["folio-chat", "bogus"]).is_err());
}
