use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use foodie::config::ServerConfig;
use foodie::consts::{DEFAULT_BIND, PLACES_SEARCH_URL, default_db_path};

#[derive(Parser)]
#[command(
    name = "foodie",
    version,
    about = "Nearby restaurants and catalog menus over a small REST API."
)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, env = "FOODIE_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Places provider API key
    #[arg(long, env = "FOURSQUARE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Places search endpoint
    #[arg(long, env = "FOODIE_PLACES_URL", default_value = PLACES_SEARCH_URL)]
    places_url: String,

    /// SQLite catalog path (defaults to ~/.foodie/catalog.db)
    #[arg(short, long, env = "FOODIE_DB")]
    db: Option<PathBuf>,

    /// Allowed CORS origin for every route ("*" for any)
    #[arg(long, env = "FOODIE_CORS_ORIGIN")]
    cors_origin: Option<String>,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            bind: cli.bind,
            api_key: cli.api_key,
            places_url: cli.places_url,
            db_path: cli.db.unwrap_or_else(default_db_path),
            cors_origin: cli.cors_origin,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from(Cli::parse());
    tracing::info!(
        "catalog at {}, places provider at {}",
        config.db_path.display(),
        config.places_url
    );

    foodie::server::serve(&config).await
}
