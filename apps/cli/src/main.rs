//! Currency rates CLI
//!
//! Queries one exchange rate provider from the terminal.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use currency_rates::{build_exchanger, CurrencyRef, Exchanger, ProviderKind};

#[derive(Parser)]
#[command(name = "currency-rates")]
#[command(author, version, long_about = None)]
#[command(about = "Exchange rates from central banks and commercial feeds")]
struct Cli {
    /// Provider to query: cnb, boe, ecb, cf, oxr
    #[arg(long, short, default_value = "ecb")]
    provider: ProviderKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate for a currency per one unit of FROM (the provider's default currency if omitted)
    Rate {
        currency: String,
        #[arg(long)]
        from: Option<String>,
    },
    /// Print the provider's rate table as JSON
    Table,
    /// List every currency the provider knows
    Currencies,
    /// Print the provider's default currency
    Default,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let layer = fmt::layer().with_writer(std::io::stderr);

    match format {
        LogFormat::Json => registry.with(layer.json().with_current_span(false)).init(),
        LogFormat::Text => registry.with(layer.with_target(true)).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let exchanger = build_exchanger(cli.provider, &config.settings_for(cli.provider))
        .with_context(|| format!("Failed to configure provider {}", cli.provider))?;
    tracing::debug!("Using provider {}", exchanger.id());

    run(exchanger.as_ref(), cli.command).await
}

async fn run(exchanger: &dyn Exchanger, command: Commands) -> Result<()> {
    match command {
        Commands::Rate { currency, from } => {
            let target = CurrencyRef::from(currency.as_str());
            let source = from.as_deref().map(CurrencyRef::from);
            let rate = exchanger
                .rate_for(target, source)
                .await
                .with_context(|| format!("{} has no rate for {}", exchanger.id(), currency))?;
            println!("{}", rate);
        }
        Commands::Table => {
            let table = exchanger.exchange_rates().await?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Commands::Currencies => {
            for code in exchanger.available_currencies().await? {
                println!("{}", code);
            }
        }
        Commands::Default => {
            println!(
                "{} ({} quotation)",
                exchanger.default_currency_code(),
                exchanger.quotation_convention()
            );
        }
    }
    Ok(())
}
