use clap::{Parser, Subcommand};
use geocoding_client::{Geocoder, ReqwestTransport, RequestBuilder};
use geocoding_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "geocoding-cli")]
#[command(about = "Look up coordinates through the geocoding API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Geocode a free-form address
    Address {
        /// Space-delimited address, e.g. "25 Old Gardens Close Tunbridge Wells TN2 5ND"
        address: String,
        /// ISO 3166-1 alpha-2 code to bias results towards
        #[arg(long)]
        country: Option<String>,
    },
    /// Geocode a postcode within a country
    Postcode {
        postcode: String,
        /// ISO 3166-1 alpha-2 code
        country: String,
    },
    /// Reverse-geocode a latitude/longitude pair
    Latlong {
        #[arg(allow_negative_numbers = true)]
        lat: String,
        #[arg(allow_negative_numbers = true)]
        long: String,
        #[arg(long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = geocoding_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let geocoder = build_geocoder(&config)?;

    let coordinates = match cli.command {
        Commands::Address { address, country } => {
            geocoder.by_address(&address, country.as_deref()).await?
        }
        Commands::Postcode { postcode, country } => {
            geocoder.by_postcode(&postcode, &country).await?
        }
        Commands::Latlong { lat, long, country } => {
            geocoder.by_lat_long(&lat, &long, country.as_deref()).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&coordinates)?);
    Ok(())
}

fn build_geocoder(config: &AppConfig) -> anyhow::Result<Geocoder> {
    let transport = ReqwestTransport::new(config.request_timeout_secs, &config.user_agent)?;
    let requests = RequestBuilder::new(&config.base_url, &config.api_key)
        .with_default_language(&config.language);
    Ok(Geocoder::with_transport(transport, requests)
        .with_country_name_language(&config.country_name_language))
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
