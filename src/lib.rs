use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;

use config::Config;
use model::ModelStore;

#[derive(Parser)]
#[command(name = "menuscore")]
#[command(about = "Menu Profitability Predictor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction server (default)
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to a TOML or JSON config file
        #[arg(short, long)]
        config: Option<String>,
        /// Directory holding the model artifacts (overrides config)
        #[arg(long)]
        model_dir: Option<String>,
    },
    /// Initialize a new configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "menuscore.toml")]
        output: String,
    },
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            port,
            config,
            model_dir,
        }) => {
            let mut cfg = match config {
                Some(path) => Config::load(&path).await?,
                None => Config::default(),
            };
            if let Some(port) = port {
                cfg.server.port = port;
            }
            if let Some(dir) = model_dir {
                cfg.model.artifact_dir = dir;
            }
            init_tracing(&cfg.logging.level);
            start_server(cfg).await?;
        }
        Some(Commands::Init { output }) => {
            init_tracing("info");
            run_init(&output).await?;
        }
        None => {
            let cfg = Config::default();
            init_tracing(&cfg.logging.level);
            start_server(cfg).await?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    // Ignored when a subscriber is already installed (parallel tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn run_init(output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::default();
    tokio::fs::write(output, cfg.to_toml()?).await?;
    info!("Wrote default configuration to {}", output);
    Ok(())
}

async fn start_server(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Menu Profitability Predictor...");

    cfg.validate()
        .map_err(|errors| format!("Invalid configuration: {}", errors.join("; ")))?;

    if let Err(e) = observability::metrics::MetricsCollector::register_default_metrics() {
        info!("Metrics already registered: {}", e);
    }

    // Artifacts load here, once; missing or corrupt files abort startup.
    let store = Arc::new(ModelStore::open(&cfg.model.artifact_dir));
    let artifacts = store.artifacts()?;
    info!(
        "Model artifacts ready: classes = {:?}",
        artifacts.encoder.classes()
    );

    let app = api::router(store);

    let addr: std::net::SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("Menu Profitability Predictor listening on {}", addr);
    info!("Endpoints:");
    info!("  - UI: http://{}/", addr);
    info!("  - Predict: http://{}/api/predict", addr);
    info!("  - Schema: http://{}/api/schema", addr);
    info!("  - Health: http://{}/health", addr);
    info!("  - Metrics: http://{}/metrics", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
