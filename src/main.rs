//! Administrative-division reference data API entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dvhc_api::api::{create_router, AppState};
use dvhc_api::config::Config;
use dvhc_api::dataset::ReferenceData;
use dvhc_api::metrics;
use dvhc_api::utils::shutdown_signal;

/// Administrative-division reference data API.
#[derive(Parser, Debug)]
#[command(name = "dvhc-api")]
#[command(about = "Serve province and commune reference data over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Dataset file (overrides DATA_PATH).
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Load the dataset file and print a summary.
    CheckData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("dvhc_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    if config.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    apply_overrides(&mut config, &args);

    // Handle subcommands
    match args.command {
        Some(Command::CheckData) => cmd_check_data(&config),
        Some(Command::Serve) | None => Ok(cmd_serve(config).await?),
    }
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
}

/// Load the dataset and report what it contains.
fn cmd_check_data(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DATASET CHECK");
    println!("======================================================================");

    print!("Loading {}... ", config.data_path.display());
    let data = match ReferenceData::load(&config.data_path) {
        Ok(d) => {
            println!("OK");
            d
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Dataset load failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("  Provinces: {}", data.len());
    println!("  Communes:  {}", data.commune_count());
    for province in data.provinces() {
        println!(
            "  {:>6}  {}",
            province.mahc(),
            province.name().unwrap_or("-")
        );
    }
    println!("======================================================================");
    println!("DATASET CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Load the dataset, then serve it until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> dvhc_api::Result<()> {
    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e);
    }
    let addr = config.bind_addr()?;

    // A missing or malformed file must stop startup before binding.
    info!("Loading dataset from {}", config.data_path.display());
    let data = ReferenceData::load(&config.data_path).map_err(|e| {
        error!("Failed to load dataset: {}", e);
        e
    })?;
    info!(
        "Dataset ready: {} provinces, {} communes",
        data.len(),
        data.commune_count()
    );

    let mut app_state = AppState::new(data);
    if config.metrics_enabled {
        let handle = metrics::init_metrics()?;
        metrics::set_dataset_records(app_state.data.len());
        app_state = app_state.with_metrics(handle);
    }

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(argv: &[&str]) -> Config {
        let args = Args::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        apply_overrides(&mut config, &args);
        config
    }

    #[test]
    fn port_and_data_apply_before_or_after_subcommand() {
        for argv in [
            &["dvhc-api", "-p", "9000", "-d", "a.json", "serve"][..],
            &["dvhc-api", "serve", "-p", "9000", "-d", "a.json"][..],
            &["dvhc-api", "--port", "9000", "--data", "a.json"][..],
        ] {
            let config = overrides(argv);
            assert_eq!(config.port, 9000, "{argv:?}");
            assert_eq!(config.data_path, PathBuf::from("a.json"), "{argv:?}");
        }
    }

    #[test]
    fn check_data_accepts_data_override() {
        let args = Args::try_parse_from(["dvhc-api", "check-data", "--data", "b.json"]).unwrap();

        assert_eq!(args.command, Some(Command::CheckData));
        assert_eq!(args.data, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn no_overrides_keep_config() {
        let config = overrides(&["dvhc-api"]);

        assert_eq!(config.port, 8000);
        assert_eq!(config.data_path, PathBuf::from("ket_qua.json"));
    }
}
