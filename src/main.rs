use clap::{Parser, ValueEnum};
use shelfwise_api::{ApiState, RestApi};
use shelfwise_core::{CatalogProvider, JsonCatalog, Language};
use shelfwise_similarity::{
    ByAverageRating, ByIdentifier, BySales, PopularityScorer, RecommendationService,
    RecommenderConfig, SimilarityEngine,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Popularity {
    /// Largest identifiers first
    Identifier,
    /// Highest mean review rating first
    Rating,
    /// Most ordered copies first
    Sales,
}

/// Content-based book recommendations over HTTP
#[derive(Parser, Debug)]
#[command(name = "shelfwise")]
#[command(about = "Similar and popular book recommendations", long_about = None)]
struct Args {
    /// Path to the JSON catalog export
    #[arg(short, long, default_value = "./data/catalog.json")]
    catalog: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Catalog language, selects the stop-word list (ru, en)
    #[arg(long, default_value = "ru")]
    language: String,

    /// Vocabulary size bound
    #[arg(long, default_value_t = 1000)]
    max_features: usize,

    /// Ranking used for popular items
    #[arg(long, value_enum, default_value_t = Popularity::Identifier)]
    popularity: Popularity,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting shelfwise v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);

    let config = RecommenderConfig {
        max_features: args.max_features,
        language: args.language.parse::<Language>()?,
        ..Default::default()
    };
    config.validate()?;

    let catalog = Arc::new(JsonCatalog::open(&args.catalog)?);
    info!("Loaded {} items", catalog.len());

    let scorer: Arc<dyn PopularityScorer> = match args.popularity {
        Popularity::Identifier => Arc::new(ByIdentifier),
        Popularity::Rating => Arc::new(ByAverageRating::from_reviews(&catalog.reviews())),
        Popularity::Sales => Arc::new(BySales::from_order_lines(&catalog.order_lines())),
    };
    info!("Popularity ranking: {:?}", args.popularity);

    let provider: Arc<dyn CatalogProvider> = catalog;
    let engine = SimilarityEngine::new(provider.clone(), &config)?.with_scorer(scorer);
    let service = Arc::new(RecommendationService::with_engine(provider, engine));
    let state = Arc::new(ApiState::new(service, &config));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
