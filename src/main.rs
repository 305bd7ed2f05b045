//! Scribe - rewrite selected text through a text-processing endpoint.
//!
//! # Usage
//!
//! ```bash
//! scribe
//! scribe --endpoint http://localhost:8080/proc --timeout 30
//! scribe --skip-login --save
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scribe::app::App;
use scribe::config::{
    ConfigFlags, clear_config_flags, default_log_path, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use scribe::dispatch::DEFAULT_ENDPOINT;

/// A terminal editor that rewrites selected text with an AI endpoint
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about, long_about = None)]
struct Cli {
    /// URL the actions are posted to
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Seconds to wait for a response (0 waits forever)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Open the dashboard without the sign-in page
    #[arg(long)]
    skip_login: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) {
    let filter = EnvFilter::try_from_env("SCRIBE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn,scribe=info"));

    let file = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| File::options().create(true).append(true).open(path));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);
    match file {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(err) => {
            eprintln!("[warn] Failed to open log file {}: {}", path.display(), err);
            builder.with_writer(std::io::sink).init();
        }
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_path = effective.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path);

    let endpoint = effective
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    reqwest::Url::parse(&endpoint).with_context(|| format!("Invalid endpoint URL: {endpoint}"))?;
    tracing::debug!(?effective, log = %log_path.display(), "effective flags");

    // Run the application
    let mut app = App::new(endpoint)
        .with_timeout(effective.timeout())
        .with_skip_login(effective.skip_login || cli.skip_login)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
