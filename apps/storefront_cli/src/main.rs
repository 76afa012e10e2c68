use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::parse_base_url, decode_menu, load_settings, sync_menu, MenuClient, MenuModel,
};
use shared::domain::{ItemId, MenuItem};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storefront_cli", about = "List and order burgers from the terminal")]
struct Args {
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read the menu from a saved `GET /burgers` response instead of the network.
    #[arg(long)]
    from_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the menu, promoted items first.
    List {
        /// Print the validated items as JSON instead of rows.
        #[arg(long)]
        json: bool,
    },
    /// Buy one item at its listed price.
    Purchase {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(raw) = args.base_url.as_deref() {
        settings.base_url = parse_base_url(raw).context("invalid --base-url")?;
    }
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = MenuClient::new(settings.base_url.clone());
    let mut model = MenuModel::new();
    let count = match args.from_file.as_deref() {
        Some(path) => {
            let body = std::fs::read(path)
                .with_context(|| format!("failed to read menu file '{}'", path.display()))?;
            let items = decode_menu(&body)
                .with_context(|| format!("failed to decode menu file '{}'", path.display()))?;
            model.apply(items);
            model.count()
        }
        None => sync_menu(&client, &mut model)
            .await
            .with_context(|| format!("failed to load menu from {}", settings.base_url))?,
    };
    tracing::debug!(count, "menu loaded");

    match args.command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(model.items())?);
            } else if model.is_empty() {
                println!("No items available");
            } else {
                for item in model.items() {
                    println!("{}", format_row(item));
                }
            }
        }
        Command::Purchase { id } => {
            let Some(item) = model.find(ItemId(id)) else {
                bail!("no menu item with id {id}");
            };
            client
                .submit_purchase(item.id, item.price_units)
                .await
                .with_context(|| format!("purchase of {} failed", item.name))?;
            println!("Ordered {} for {}", item.name, item.price_label());
        }
    }

    Ok(())
}

fn format_row(item: &MenuItem) -> String {
    let marker = if item.is_promoted { "★" } else { " " };
    let vegetarian = if item.is_vegetarian { " (V)" } else { "" };
    format!(
        "{marker} {:>4}  {}{vegetarian}  {}",
        item.id.0,
        item.name,
        item.price_label()
    )
}
