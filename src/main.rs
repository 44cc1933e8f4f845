use anyhow::Result;
use daybrief::config::{ApiKeys, Config};
use daybrief::pipeline;
use daybrief::tui::{self, state::AppState, TuiCommand};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns the terminal, so tracing goes to a file
    let log_file = std::fs::File::create("daybrief.log")?;
    tracing_subscriber::fmt()
        .with_env_filter("daybrief=info")
        .with_writer(std::sync::Arc::new(log_file))
        .init();

    let config = Config::load(Path::new("config.toml"))?;

    // Load saved keys from .env (real env vars take precedence)
    Config::load_env_file();

    println!();
    println!("  daybrief v0.1.0");
    println!("  ===============");
    println!();
    println!("  Loading API credentials (.env / env vars / interactive prompt):");
    println!();

    let keys = ApiKeys::load()?;

    println!();
    println!("  All keys loaded. Starting.");
    println!();

    let client = Client::new();
    let (state_tx, state_rx) = watch::channel(AppState::new());
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<TuiCommand>(16);

    // --- Phase 1: location chain (position -> city -> weather), one shot ---
    {
        let client = client.clone();
        let config = config.clone();
        let keys = keys.clone();
        let state_tx = state_tx.clone();
        tokio::spawn(async move {
            pipeline::run_location_chain(&client, &config, &keys, &state_tx).await;
        });
    }

    // --- Phase 2: feed cycle now, then again on refresh command or timer ---
    {
        let client = client.clone();
        let state_tx = state_tx.clone();
        let sources = pipeline::build_sources(&config, &keys);
        let refresh_interval_s = config.ui.refresh_interval_s;
        tokio::spawn(async move {
            pipeline::run_feed_cycle(&client, &sources, &state_tx).await;
            loop {
                let cmd = if refresh_interval_s > 0 {
                    tokio::select! {
                        cmd = cmd_rx.recv() => cmd,
                        _ = tokio::time::sleep(Duration::from_secs(refresh_interval_s)) => {
                            Some(TuiCommand::Refresh)
                        }
                    }
                } else {
                    cmd_rx.recv().await
                };
                match cmd {
                    Some(TuiCommand::Refresh) => {
                        pipeline::run_feed_cycle(&client, &sources, &state_tx).await;
                    }
                    Some(TuiCommand::Quit) | None => return,
                }
            }
        });
    }

    // --- Phase 3: run TUI (blocks until quit) ---
    tui::run_tui(state_tx, state_rx, cmd_tx).await?;

    tracing::debug!("shutting down");
    Ok(())
}
