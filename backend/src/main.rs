use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitscore::{
    AppState, Config, GitHubClient, ImageProxyService, RatingMatcher, RatingTable, StatsService,
    configure_routes,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitscore=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    info!("Starting gitscore server on {}:{}", config.host, config.port);

    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN not set; GitHub rate limits will be low and GraphQL calls will fail");
    }

    let table = Arc::new(RatingTable::load_or_empty(&config.ratings_path));
    let matcher = match config.ratings_seed {
        Some(seed) => {
            info!("Rating picks seeded with {}", seed);
            RatingMatcher::with_seed(table, seed)
        }
        None => RatingMatcher::new(table),
    };

    let github = GitHubClient::new(config.github()).map_err(std::io::Error::other)?;
    let image_proxy =
        ImageProxyService::new(config.upstream_timeout()).map_err(std::io::Error::other)?;

    let app_state = web::Data::new(AppState {
        config: config.clone(),
        stats: StatsService::new(Arc::new(github), matcher),
        image_proxy,
    });

    let server_addr = format!("{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .configure(configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
