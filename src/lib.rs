pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::funds::FundFilter;
use crate::core::{FeedSource, NavRegistry, NavSnapshot, config::AppConfig};
use crate::providers::AmfiFeedProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Categories,
    FundHouses,
    Funds { filter: FundFilter, json: bool },
    Fund { code: String, json: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("amfinav starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = AmfiFeedProvider::new(&config.providers.amfi)?;
    let registry = NavRegistry::new();
    let snapshot = load_feed(&registry, &provider).await?;

    match command {
        AppCommand::Categories => cli::funds::show_categories(&snapshot),
        AppCommand::FundHouses => cli::funds::show_fund_houses(&snapshot),
        AppCommand::Funds { filter, json } => cli::funds::show_funds(&snapshot, &filter, json)?,
        AppCommand::Fund { code, json } => cli::funds::show_fund(&snapshot, &code, json)?,
    }
    Ok(())
}

async fn load_feed(registry: &NavRegistry, source: &dyn FeedSource) -> Result<Arc<NavSnapshot>> {
    let pb = cli::ui::new_spinner("Downloading NAV feed...");
    let result = registry.load(source).await;
    pb.finish_and_clear();
    result
}
