//! gitscore - GitHub profile scoring backend
//!
//! Scores GitHub accounts from their public activity, pairs each score with a
//! reference entity from a rating table, and proxies avatar images.

use actix_web::{HttpResponse, web};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;

pub use models::{
    ImageProxyQuery, MetricsInput, ReferenceEntity, ScoreBreakdown, ScoreComponents,
    StatsResponse, UserSuggestion,
};

pub use services::{
    GitHubApi, GitHubClient, GitHubConfig, GitHubError, ImageProxyService, RatingMatcher,
    RatingTable, ScoreError, StatsError, StatsService, compute_score,
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub stats: StatsService,
    pub image_proxy: ImageProxyService,
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "gitscore"
    }))
}

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .configure(handlers::configure_stats_routes)
        .configure(handlers::configure_search_routes)
        .configure(handlers::configure_image_proxy_routes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_rt::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "gitscore");
    }
}
