use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use fuelcheck_client::client::{FuelCheckClient, NearbySearch};
use fuelcheck_client::utils::logging::{init_logging, LogFormat, LogLevel};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File holding "<client_id>, <client_secret>" on one line.
    #[arg(short, long, env = "FUELCHECK_SECRETS", default_value = "secrets")]
    secrets: String,
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value = "info")]
    log_level: LogLevel,
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    log_format: LogFormat,
    /// Station to query for individual prices.
    #[arg(long, default_value_t = 18798)]
    station: u32,
}

fn load_secrets(path: &str) -> Result<(String, String)> {
    let line = std::fs::read_to_string(path)
        .with_context(|| format!("secrets file not found: {path} (expected \"<id>, <secret>\")"))?;
    let parts: Vec<&str> = line.lines().next().unwrap_or("").split(',').map(str::trim).collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        bail!("secrets file format invalid, expected \"<id>, <secret>\" on one line");
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level, args.log_format);

    let (client_id, client_secret) = load_secrets(&args.secrets)?;
    let client = FuelCheckClient::new(client_id, client_secret);

    // Prices for one station
    info!(station = args.station, "fetching station prices");
    let prices = client.get_fuel_prices_for_station(args.station).await?;
    println!("Prices for station {}:", args.station);
    for price in &prices {
        println!(
            "  {}: {} c/L (last updated: {})",
            price.fuel_type,
            price.price,
            price
                .last_updated
                .map(|dt| dt.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        );
    }

    // E10 around Canberra
    let search = NearbySearch::new("E10", -35.27, 149.14, 15);
    let nearby = client.get_fuel_prices_within_radius(&search).await?;
    println!("\n{} E10 stations within {} km:", nearby.len(), search.radius_km);
    for entry in &nearby {
        println!(
            "  {} {} (${}) station code: {}",
            entry.station.brand, entry.station.name, entry.price.price, entry.station.code,
        );
    }

    // Reference data changed in the last day
    info!("fetching reference data modified since yesterday");
    let modified_since = Utc::now() - Duration::days(1);
    let reference = client.get_reference_data(Some(modified_since), Some(&["TAS"])).await?;
    println!("\nReference data station count: {}", reference.stations.items.len());

    Ok(())
}
