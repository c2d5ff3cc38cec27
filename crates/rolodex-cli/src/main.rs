//! `rolodex`: terminal UI for the Rolodex contact server.
//!
//! # Usage
//!
//! ```
//! rolodex --url http://localhost:5000
//! rolodex --config ~/.config/rolodex/config.toml --log-file rolodex.log
//! ```

mod app;
mod client;
mod controller;
mod form;
mod ui;

use std::{
  fs::File,
  io,
  path::PathBuf,
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use controller::ContactsBackend;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rolodex", about = "Terminal UI for the Rolodex contact server")]
struct Args {
  /// Path to a TOML config file (url, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the rolodex server (default: http://localhost:5000).
  #[arg(long, env = "ROLODEX_URL")]
  url: Option<String>,

  /// Per-request timeout in seconds (default: 30).
  #[arg(long)]
  timeout_secs: Option<u64>,

  /// Where `x` writes the CSV export.
  #[arg(long, value_name = "FILE", default_value = "contacts.csv")]
  export_path: PathBuf,

  /// Write logs to this file. The terminal is owned by the UI, so nothing is
  /// logged without it.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          Option<String>,
  #[serde(default)]
  timeout_secs: Option<u64>,
}

impl ConfigFile {
  fn load(path: &std::path::Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// CLI flags override the config file, which overrides defaults.
fn resolve(args: &Args, file_cfg: ConfigFile) -> ApiConfig {
  ApiConfig {
    base_url: args
      .url
      .clone()
      .or(file_cfg.url.filter(|u| !u.is_empty()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
    timeout:  Duration::from_secs(
      args
        .timeout_secs
        .or(file_cfg.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS),
    ),
  }
}

fn init_logging(path: &std::path::Path) -> Result<()> {
  let file = File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    init_logging(path)?;
  }

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  let api_config = resolve(&args, file_cfg);
  tracing::info!(url = %api_config.base_url, "starting");

  let client = ApiClient::new(api_config)?;
  let mut app = App::new(client, args.export_path.clone());

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data. A failed read shows in the list pane, not as an exit.
  app.controller.activate().await;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<B: ContactsBackend>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<B>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      if !app.handle_key(key).await? {
        break;
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["rolodex"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
  }

  #[test]
  fn flags_override_config_file() {
    let file_cfg = ConfigFile {
      url:          Some("http://file:1".into()),
      timeout_secs: Some(5),
    };
    let cfg = resolve(&args(&["--url", "http://flag:2"]), file_cfg);
    assert_eq!(cfg.base_url, "http://flag:2");
    assert_eq!(cfg.timeout, Duration::from_secs(5));
  }

  #[test]
  fn defaults_apply_without_config() {
    // Only meaningful when ROLODEX_URL is not set in the test environment.
    if std::env::var_os("ROLODEX_URL").is_some() {
      return;
    }
    let cfg = resolve(&args(&[]), ConfigFile::default());
    assert_eq!(cfg.base_url, DEFAULT_URL);
    assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
  }

  #[test]
  fn config_file_parses() {
    let cfg: ConfigFile = toml::from_str("url = \"http://x:9\"\ntimeout_secs = 3\n").unwrap();
    assert_eq!(cfg.url.as_deref(), Some("http://x:9"));
    assert_eq!(cfg.timeout_secs, Some(3));
  }
}
