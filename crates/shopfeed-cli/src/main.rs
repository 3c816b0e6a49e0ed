use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use shopfeed_context::ProductItemMapper;
use shopfeed_core::{AppConfig, ChannelsFile, Locale};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopfeed")]
#[command(about = "Google Shopping feed item mapping")]
struct Cli {
    /// Channel catalog to use instead of `SHOPFEED_CATALOG_PATH`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Map one product export (JSON) to feed items, one JSON line per variant.
    Map {
        #[arg(long)]
        product: PathBuf,
        #[arg(long)]
        channel: String,
        #[arg(long)]
        locale: String,
    },
    /// List the channels in the catalog.
    Channels,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = shopfeed_core::load_base_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli
        .catalog
        .as_deref()
        .unwrap_or(base.catalog_path.as_path());
    let catalog = shopfeed_core::load_channels(catalog_path)?;
    tracing::debug!(
        env = %base.env,
        catalog = %catalog_path.display(),
        channels = catalog.channels.len(),
        "loaded channel catalog"
    );

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Map {
            product,
            channel,
            locale,
        } => {
            // Only mapping builds links, so only it needs the storefront URLs.
            let config = shopfeed_core::load_app_config_from_env()?;
            run_map(&config, &catalog, &product, &channel, &locale, &mut stdout)
        }
        Commands::Channels => write_channels(&catalog, &mut stdout),
    }
}

/// One tab-separated line per channel: code, currency, locales.
fn write_channels(catalog: &ChannelsFile, out: &mut impl Write) -> anyhow::Result<()> {
    for channel in &catalog.channels {
        writeln!(
            out,
            "{}\t{}\t{}",
            channel.code,
            channel.base_currency.as_deref().unwrap_or("-"),
            channel.locales.join(",")
        )?;
    }
    Ok(())
}

fn run_map(
    config: &AppConfig,
    catalog: &ChannelsFile,
    product_path: &Path,
    channel_code: &str,
    locale_code: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let channel = catalog
        .channel(channel_code)
        .ok_or_else(|| anyhow::anyhow!("channel '{channel_code}' not found in catalog"))?;
    if !channel.supports_locale(locale_code) {
        tracing::warn!(
            channel = %channel.code,
            locale = locale_code,
            "locale is not enabled for channel; mapping anyway"
        );
    }

    let raw = std::fs::read_to_string(product_path)
        .with_context(|| format!("failed to read {}", product_path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", product_path.display()))?;

    let mapper = ProductItemMapper::from_config(config);
    let items = mapper.map_raw(&payload, channel, &Locale::new(locale_code))?;
    tracing::info!(
        product = %product_path.display(),
        channel = %channel.code,
        locale = locale_code,
        items = items.len(),
        "mapped product"
    );

    for item in &items {
        serde_json::to_writer(&mut *out, item)?;
        writeln!(out)?;
    }
    Ok(())
}
