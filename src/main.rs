//! Superhero registry entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use superhero_registry::api::{create_router, AppState, StaticPages};
use superhero_registry::config::Config;
use superhero_registry::metrics;
use superhero_registry::store::HeroStore;
use superhero_registry::AppError;
use superhero_registry::utils::shutdown_signal;

/// Superhero registry.
#[derive(Parser, Debug)]
#[command(name = "superhero-registry")]
#[command(about = "CRUD service for hero records kept in a JSON document")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Hero document path (overrides DATA_PATH).
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the stored heroes as JSON.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("superhero_registry=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if args.log_json {
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

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::List) => cmd_list().await,
        Some(Command::Serve { port, data }) => cmd_serve(port.or(args.port), data).await,
        None => cmd_serve(args.port, None).await,
    }
}

/// Load and validate configuration, logging failures.
fn load_config(port: Option<u16>, data: Option<PathBuf>) -> superhero_registry::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data) = data {
        config.data_path = data;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e));
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SUPERHERO REGISTRY - CONFIGURATION CHECK");
    println!("======================================================================");

    let config = load_config(None, None)?;

    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Data Path: {}", config.data_path.display());
    println!(
        "  Data Present: {}",
        if config.data_path.exists() { "yes" } else { "no (created on first write)" }
    );
    println!("  Landing Page: {}", config.landing_page().display());
    println!("  Form Page: {}", config.form_page().display());
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print every stored hero.
async fn cmd_list() -> anyhow::Result<()> {
    let config = load_config(None, None)?;
    let store = HeroStore::new(&config.data_path);

    println!("{}", store.export_json().await?);

    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(port: Option<u16>, data: Option<PathBuf>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(port, data)?;

    info!("Configuration loaded successfully");
    info!("Hero document: {}", config.data_path.display());

    let pages = StaticPages::from_config(&config);
    for page in [&pages.landing_page, &pages.form_page] {
        if !page.exists() {
            warn!("Static page {} not found, it will answer 404", page.display());
        }
    }

    let mut app_state = AppState::new(HeroStore::new(&config.data_path));
    match metrics::init_metrics() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server is running on http://localhost:{}", config.port);

    let router = create_router(app_state, &pages);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
