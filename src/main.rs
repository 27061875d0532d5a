mod analysis;
mod config;
mod data;
mod export;
mod indicators;
mod news;
mod regime;
mod types;
mod web;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use analysis::AnalysisReport;
use config::AnalysisConfig;
use data::{MarketData, YahooClient};
use types::{AssetProfile, Horizon};
use web::{start_dashboard_server, AppState};

#[derive(Parser)]
#[command(name = "marketpulse")]
#[command(version = "0.1.0")]
#[command(about = "Strategic market-state analysis for equities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML, optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze current market state for a symbol
    Analyze {
        /// Ticker symbol (e.g. NVDA, AAPL)
        #[arg(short, long)]
        symbol: String,

        /// Analysis horizon (3mo, 6mo, 1y, 5y)
        #[arg(short, long, default_value = "6mo")]
        period: String,

        /// Also show filtered news headlines
        #[arg(long)]
        news: bool,
    },
    /// Export price history with indicators to CSV
    Export {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: String,

        /// Analysis horizon (3mo, 6mo, 1y, 5y)
        #[arg(short, long, default_value = "6mo")]
        period: String,

        /// Output CSV file path
        #[arg(short, long, default_value = "marketpulse_data.csv")]
        output: PathBuf,
    },
    /// Show filtered market headlines for a symbol
    News {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: String,
    },
    /// Serve the web dashboard
    Dashboard {
        /// Dashboard port
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("MarketPulse v0.1.0");

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            symbol,
            period,
            news,
        } => {
            analyze_symbol(&symbol, &period, news, &config).await?;
        }
        Commands::Export {
            symbol,
            period,
            output,
        } => {
            export_csv(&symbol, &period, &output, &config).await?;
        }
        Commands::News { symbol } => {
            show_news(&symbol).await;
        }
        Commands::Dashboard { port } => {
            let provider = Arc::new(YahooClient::new());
            let state = AppState::new(provider, config);
            start_dashboard_server(state, port).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::from_file(path)?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn parse_horizon(period: &str) -> Result<Horizon> {
    Horizon::from_str(period).ok_or_else(|| {
        let options: Vec<&str> = Horizon::all().iter().map(|h| h.as_str()).collect();
        anyhow!("Invalid period '{}'. Use one of: {}", period, options.join(", "))
    })
}

async fn fetch_report(
    symbol: &str,
    period: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    let horizon = parse_horizon(period)?;
    let symbol = symbol.trim().to_uppercase();
    let client = YahooClient::new();

    info!("Fetching {} of daily history for {}", horizon, symbol);
    let series = client.get_history(&symbol, horizon).await?;

    let profile = match client.get_profile(&symbol).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Profile fetch failed for {}: {}", symbol, e);
            AssetProfile::unknown(&symbol)
        }
    };

    analysis::analyze(&series, profile, config)
        .ok_or_else(|| anyhow!("No price history returned for {}. Check ticker symbol.", symbol))
}

async fn analyze_symbol(
    symbol: &str,
    period: &str,
    with_news: bool,
    config: &AnalysisConfig,
) -> Result<()> {
    let report = fetch_report(symbol, period, config).await?;
    print_report(&report, config);

    if with_news {
        println!();
        show_news(&report.profile.symbol).await;
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, config: &AnalysisConfig) {
    let profile = &report.profile;
    let snapshot = &report.snapshot;

    println!("\n=== {} Strategic Overview ===", profile.symbol);
    println!("{} | Sector: {}", profile.long_name, profile.sector);
    println!();

    match snapshot.change_pct {
        Some(pct) => {
            let sign = if pct >= Decimal::ZERO { "+" } else { "" };
            println!(
                "Asset Price: ${:.2} ({}{:.2}%)",
                snapshot.current_price, sign, pct
            );
        }
        None => println!("Asset Price: ${:.2}", snapshot.current_price),
    }
    println!("Market Cap: {}", profile.market_cap_display());
    println!("Beta (Risk): {:.2}", profile.beta);
    match snapshot.volatility {
        Some(vol) => println!("Volatility ({}d): {:.2}%", config.windows.volatility, vol),
        None => println!("Volatility ({}d): N/A", config.windows.volatility),
    }

    println!("\n--- Strategic Context Analysis ---");
    match &report.assessment {
        Some(assessment) => {
            println!("\nStructural Trend: {}", assessment.trend.label());
            println!("  {}", assessment.trend_description);
            println!("\nMarket Sentiment: {}", assessment.sentiment.label());
            println!("  {}", assessment.sentiment.description());
            println!("\nVolatility Profile: {}", assessment.risk.label());
            println!("  Short-term variance is {:.2}%.", assessment.volatility);
        }
        None => println!("Insufficient data for full trend analysis."),
    }
}

async fn export_csv(
    symbol: &str,
    period: &str,
    output: &Path,
    config: &AnalysisConfig,
) -> Result<()> {
    let horizon = parse_horizon(period)?;
    let symbol = symbol.trim().to_uppercase();
    let client = YahooClient::new();

    let series = client.get_history(&symbol, horizon).await?;
    if series.is_empty() {
        return Err(anyhow!("No price history returned for {}", symbol));
    }
    let indicators = indicators::IndicatorSeries::compute(&series, &config.windows);

    let mut file = std::fs::File::create(output)?;
    export::write_csv(&series, &indicators, &mut file)?;

    info!("Exported {} rows to {}", series.len(), output.display());
    Ok(())
}

async fn show_news(symbol: &str) {
    let symbol = symbol.trim().to_uppercase();
    println!("=== Contextual Drivers: {} ===", symbol);

    let headlines = news::fetch_headlines(&symbol).await;
    if headlines.is_empty() {
        println!("No specific news drivers found.");
        return;
    }
    for item in headlines {
        println!("\n{}", item.title);
        println!("  {} • {}", item.source, item.published);
        println!("  {}", item.link);
    }
}
