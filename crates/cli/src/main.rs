use clap::{Parser, Subcommand};
use econ_dash_core::domain::stock::{merge_descriptions, parse_ticker_list};
use econ_dash_core::extract::{extract_country_metrics, ExtractionProfile, ProfileKind};
use econ_dash_core::fetch::FetchClient;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "econ_dash")]
struct Args {
    /// Metric extraction profile for the `countries` command (labels or keywords).
    #[arg(long, default_value = "labels")]
    profile: ProfileKind,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch indicators for one or more countries and print per-country metrics.
    Countries {
        #[arg(required = true)]
        names: Vec<String>,

        /// Print the raw indicator records instead of extracted metrics.
        #[arg(long)]
        raw: bool,
    },
    /// List the searchable indicator categories.
    Categories,
    /// Fetch company descriptions for a comma-separated ticker list.
    Describe { symbols: String },
    /// Fetch price snapshots for a comma-separated ticker list.
    Snapshot { symbols: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = econ_dash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let client = match FetchClient::from_settings(&settings) {
        Ok(client) => client,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "startup failed");
            return Err(err);
        }
    };

    match run(&client, args).await {
        Ok(out) => {
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "command failed");
            Err(err)
        }
    }
}

async fn run(client: &FetchClient, args: Args) -> anyhow::Result<Value> {
    let out = match args.command {
        Command::Countries { names, raw } => {
            let records = client.get_country_data(names).await?;
            if raw {
                serde_json::to_value(&records)?
            } else {
                let profile = ExtractionProfile::for_kind(args.profile);
                let metrics = extract_country_metrics(&records, &profile);
                tracing::info!(
                    records = records.len(),
                    countries = metrics.len(),
                    profile = ?args.profile,
                    "extracted country metrics"
                );
                serde_json::to_value(&metrics)?
            }
        }
        Command::Categories => serde_json::to_value(client.list_search_terms().await?)?,
        Command::Describe { symbols } => {
            let tickers = parse_ticker_list(&symbols);
            anyhow::ensure!(!tickers.is_empty(), "no valid tickers in {symbols:?}");
            let fetched = client.get_stock_descriptions(&tickers.join(",")).await?;
            let unique = merge_descriptions(&[], fetched);
            serde_json::to_value(&unique)?
        }
        Command::Snapshot { symbols } => {
            let tickers = parse_ticker_list(&symbols);
            anyhow::ensure!(!tickers.is_empty(), "no valid tickers in {symbols:?}");
            let batch = client.get_stock_snapshot(&tickers.join(",")).await?;
            if batch.is_synthetic() {
                tracing::warn!(source = ?batch.source, "snapshot data is synthetic");
            }
            serde_json::to_value(&batch)?
        }
    };
    Ok(out)
}

fn init_sentry(settings: &econ_dash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
