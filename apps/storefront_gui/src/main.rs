mod backend_bridge;
mod controller;
mod media;
mod ui;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use client_core::{
    config::parse_base_url, load_settings, Connectivity, MenuClient, MenuSource,
    ReachabilityProbe,
};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::StorefrontApp;

const APP_TITLE: &str = "Coffee Port Burgers";

#[derive(Debug, Parser)]
#[command(name = "storefront_gui", about = "Browse and order from the burger menu")]
struct Args {
    /// Menu API base URL, overriding config and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Settings file (defaults to ./storefront.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(raw) = args.base_url.as_deref() {
        settings.base_url = parse_base_url(raw).context("invalid --base-url")?;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(base_url = %settings.base_url, "starting storefront gui");

    let (reachability, probe) =
        ReachabilityProbe::for_base_url(&settings.base_url, settings.probe_interval)
            .context("cannot probe the menu service")?;
    let connectivity: Arc<dyn Connectivity> = Arc::new(reachability);
    let client: Arc<dyn MenuSource> = Arc::new(MenuClient::new(settings.base_url.clone()));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, client, probe);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([480.0, 760.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    let base_url = settings.base_url;
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(StorefrontApp::bootstrap(
                cmd_tx,
                ui_rx,
                base_url,
                connectivity,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("gui event loop failed: {err}"))
}
