mod api;
mod app;
mod cli;
mod config;
mod features;
mod forms;
mod session;
mod state;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::Session;

/// Initialize logging; `RUST_LOG` overrides the default filter
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        Some(command) => {
            init_logging(if cli.output.verbose {
                "todolist=debug"
            } else {
                "todolist=warn"
            });
            if let Err(e) = cli::run(command, &cli.output).await {
                cli::print_error(&format!("{:#}", e));
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            init_logging("todolist=debug,info");
            run_gui()
        }
    }
}

fn run_gui() -> Result<()> {
    tracing::info!("Starting Todolist");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    let api = ApiClient::new(&config.api)?;
    match Session::load() {
        Ok(session) => api.set_token(session.token),
        Err(e) => tracing::warn!("Failed to load saved session: {}", e),
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 720.0])
        .with_min_inner_size([480.0, 400.0])
        .with_title("Todolist");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    eframe::run_native(
        "Todolist",
        native_options,
        Box::new(|cc| Ok(Box::new(app::TodolistApp::new(cc, config, api)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
