use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use product_recs::{
    config::Config,
    data::{CsvDataSource, RecommendationData},
    routes::{create_router, AppState},
    services::{build_query, recommend, RecommendationLimits},
};

/// Product recommendations from precomputed rating data
#[derive(Parser)]
#[command(name = "product-recs", version)]
struct Cli {
    /// Aggregate rating CSV (overrides PRODUCT_RATINGS_PATH)
    #[arg(long, global = true)]
    product_ratings: Option<PathBuf>,

    /// Predicted rating matrix CSV (overrides PREDICTED_RATINGS_PATH)
    #[arg(long, global = true)]
    predicted_ratings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web form and JSON API (default)
    Serve,
    /// Print recommendations to stdout, one product id per line
    Recommend {
        /// rank_based or user_based_cf
        #[arg(short, long, default_value = "rank_based")]
        algorithm: String,

        /// Required for user_based_cf
        #[arg(short, long)]
        user_id: Option<String>,

        /// Number of recommendations
        #[arg(short = 'n', long = "num")]
        num_recommendations: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_recs=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    if let Some(path) = cli.product_ratings {
        config.product_ratings_path = path.display().to_string();
    }
    if let Some(path) = cli.predicted_ratings {
        config.predicted_ratings_path = path.display().to_string();
    }

    // Nothing is served unless both files load cleanly
    let source = CsvDataSource::new(&config.product_ratings_path, &config.predicted_ratings_path);
    let data = RecommendationData::load(&source).context("Failed to load recommendation data")?;
    let limits = RecommendationLimits::from(&config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, data, limits).await,
        Command::Recommend {
            algorithm,
            user_id,
            num_recommendations,
        } => {
            let result = build_query(&algorithm, user_id.as_deref(), num_recommendations, limits)
                .and_then(|query| recommend(&data, &query));

            match result {
                Ok(recommendations) => {
                    for product_id in recommendations {
                        println!("{}", product_id);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
    }
}

async fn serve(
    config: &Config,
    data: RecommendationData,
    limits: RecommendationLimits,
) -> anyhow::Result<()> {
    let app = create_router(AppState::new(data, limits));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
