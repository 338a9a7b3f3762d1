// src/main.rs
mod app;
mod audit;
mod brand;
mod clients;
mod config;
mod console;
mod errors;
mod events;
mod logging;
mod models;
mod tui;
mod ui;
mod utils;
mod widgets;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::Mutex;
use tokio::time::Duration;

use crate::app::App;
use crate::clients::brand_client::BrandClient;
use crate::config::{load_profiles, resolve_profile, save_profiles, ApiRevision, Overrides};
use crate::events::handler::handle_events;
use crate::events::spawner::EventSpawner;
use crate::ui::terminal;

/// Terminal console for the BrandGenius generation service
#[derive(Parser, Debug)]
#[command(name = "brandgenius", version, about)]
struct Args {
    /// Profile to use (defaults to the first one in profiles.toml)
    #[arg(short, long)]
    profile: Option<String>,

    /// Service base URL, overriding the profile
    #[arg(long, env = "BRANDGENIUS_API_URL")]
    base_url: Option<String>,

    /// Endpoint layout of the service, overriding the profile
    #[arg(long, value_enum)]
    api_revision: Option<ApiRevision>,

    /// Directory for generated images
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log file (defaults to the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = match &args.log_file {
        Some(path) => path.clone(),
        None => config::default_log_path()?,
    };
    logging::init(&log_path).with_context(|| format!("cannot open log file {}", log_path.display()))?;

    // Load or initialize profiles
    let mut profiles = load_profiles().context("cannot load profiles")?;
    if profiles.is_empty() {
        let Some(new_profile) = tui::setup_panel::setup_tui(args.base_url.clone())? else {
            bail!("setup cancelled, no profile saved");
        };
        save_profiles(&[new_profile.clone()]).context("cannot save profile")?;
        tracing::info!(name = %new_profile.name, "created first profile");
        profiles = vec![new_profile];
    }

    let overrides = Overrides {
        base_url: args.base_url.clone(),
        api_revision: args.api_revision,
        output_dir: args.output_dir.clone(),
    };
    let profile = resolve_profile(&profiles, args.profile.as_deref(), &overrides)
        .with_context(|| format!("no profile named {:?}", args.profile.as_deref().unwrap_or_default()))?;
    tracing::info!(
        profile = %profile.name,
        base_url = %profile.base_url,
        revision = profile.api_revision.label(),
        "starting console"
    );

    let client = Arc::new(BrandClient::new(profile.base_url.clone(), profile.api_revision)?);
    let app_arc = Arc::new(Mutex::new(App::new(profile)));

    // Terminal setup
    let mut terminal = terminal::setup_terminal()?;
    let events = EventSpawner::new(Duration::from_millis(200));
    let outcome = handle_events(events, app_arc, client, &mut terminal).await;

    // Restore terminal
    terminal::restore_terminal()?;
    terminal.show_cursor()?;
    outcome?;
    Ok(())
}
