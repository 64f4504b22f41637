use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use qris_dynamic::application::engine::PayloadEngine;
use qris_dynamic::application::mutator::make_dynamic;
use qris_dynamic::application::validator::verify_payload;
use qris_dynamic::config::MerchantConfig;
use qris_dynamic::domain::tlv;
use qris_dynamic::error;
use qris_dynamic::infrastructure::in_memory::InMemoryPayloadCache;
use qris_dynamic::interfaces::csv::order_reader::OrderReader;
use qris_dynamic::interfaces::csv::payload_writer::{PayloadRow, PayloadWriter};
use qris_dynamic::interfaces::render::render_url;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Dynamic merchant-presented QR payloads
#[derive(Parser)]
#[command(name = "qris", author, version, about, long_about = None)]
struct Cli {
    /// Merchant configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Static template, overrides the config file and QRIS_TEMPLATE
    #[arg(long)]
    template: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the dynamic payload for an amount
    Dynamic {
        /// Transaction amount, a positive whole number
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,

        /// Print the QR image URL instead of the raw payload
        #[arg(long)]
        url: bool,
    },
    /// Check the trailing checksum of a payload
    Verify { payload: String },
    /// Print the field tree of a payload as JSON
    Decode { payload: String },
    /// Render a payload for every row of an `order,total` CSV file
    Batch { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();

    let config = load_config(cli.config.as_deref(), cli.template).into_diagnostic()?;

    match cli.command {
        Command::Dynamic { amount, url } => {
            let template = config.static_template().into_diagnostic()?;
            let payload = make_dynamic(template, amount).into_diagnostic()?;
            if url {
                println!(
                    "{}",
                    render_url(&config.render.endpoint, &payload, &config.render.size)
                );
            } else {
                println!("{payload}");
            }
        }
        Command::Verify { payload } => {
            verify_payload(payload.trim()).into_diagnostic()?;
            println!("valid");
        }
        Command::Decode { payload } => {
            let decoded = tlv::decode(payload.trim()).into_diagnostic()?;
            let json = serde_json::to_string_pretty(&decoded).into_diagnostic()?;
            println!("{json}");
        }
        Command::Batch { input } => run_batch(&config, &input).await.into_diagnostic()?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>, template: Option<String>) -> error::Result<MerchantConfig> {
    let mut config = match path {
        Some(path) => MerchantConfig::from_file(path)?,
        None => MerchantConfig::default(),
    };
    config.apply_env();
    if let Some(template) = template {
        config.template = Some(template);
    }
    Ok(config)
}

async fn run_batch(config: &MerchantConfig, input: &Path) -> error::Result<()> {
    let template = config.static_template()?;
    let engine = PayloadEngine::new(Box::new(InMemoryPayloadCache::new()));

    let file = File::open(input)?;
    let reader = OrderReader::new(file);
    let stdout = io::stdout();
    let mut writer = PayloadWriter::new(stdout.lock());

    let (mut rendered, mut failed) = (0usize, 0usize);
    for order_result in reader.orders() {
        let order = match order_result {
            Ok(order) => order,
            Err(e) => {
                warn!("skipping unreadable order: {e}");
                failed += 1;
                continue;
            }
        };

        let row = match engine.render(template, order.total).await {
            Ok(payload) => {
                rendered += 1;
                let url = render_url(&config.render.endpoint, &payload, &config.render.size);
                PayloadRow::rendered(order.order, order.total, payload, url)
            }
            Err(e) => {
                warn!(order = %order.order, "order rejected: {e}");
                failed += 1;
                PayloadRow::failed(order.order, order.total, e)
            }
        };
        writer.write_row(&row)?;
    }
    writer.flush()?;

    let distinct = engine.cached().await?;
    info!(rendered, failed, distinct, "batch complete");
    Ok(())
}
