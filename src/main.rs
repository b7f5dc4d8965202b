use sheet_cache::utils::display::DisplayFormatter;
use sheet_cache::{routes, CacheService, Config, SheetFetcher};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();
    let fetcher = SheetFetcher::from_config(&config)?;

    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => serve(config, fetcher).await,
        Some("print") => print_records(&config, &fetcher).await,
        Some(other) => Err(format!("Unknown command '{}': expected serve or print", other).into()),
    }
}

async fn serve(config: Config, fetcher: SheetFetcher) -> Result<(), Box<dyn Error>> {
    let cache = Arc::new(CacheService::new(fetcher, config.cache_ttl));
    info!(
        port = config.port,
        range = %config.sheet_range,
        cache_ttl_ms = cache.ttl().as_millis() as u64,
        "Starting sheet cache server"
    );

    let app = routes::router(cache);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    info!("Shutting down");
    Ok(())
}

async fn print_records(config: &Config, fetcher: &SheetFetcher) -> Result<(), Box<dyn Error>> {
    debug!("Fetching records once for display");
    let records = fetcher.fetch_records().await?;

    let display = DisplayFormatter::new();
    println!("{}", display.format_header("Sheet Records"));
    println!(
        "{}",
        display.format_summary(&config.sheet_id, &config.sheet_range, records.len())
    );
    println!("{}", display.format_records_table(&records));

    Ok(())
}
