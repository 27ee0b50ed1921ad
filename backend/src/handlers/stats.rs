//! Stats handlers
//!
//! HTTP handler for scored GitHub profiles.

use actix_web::{HttpResponse, web};
use tracing::error;

use crate::AppState;
use crate::error::AppError;
use crate::services::StatsError;

/// GET /api/stats/{username}
///
/// Score a GitHub account. The username is trimmed and lowercased; known
/// celebrity names are answered from the override table.
pub async fn get_stats(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();

    let response = state
        .stats
        .get_stats(&username)
        .await
        .map_err(map_stats_error)?;

    Ok(HttpResponse::Ok().json(response))
}

/// Map stats errors to application errors
pub(crate) fn map_stats_error(e: StatsError) -> AppError {
    match e {
        StatsError::NotFound(_) => AppError::NotFound("User not found".to_string()),
        StatsError::InvalidUsername => AppError::Validation(e.to_string()),
        StatsError::GitHub(e) => {
            error!("GitHub request failed: {}", e);
            AppError::Upstream("Failed to fetch data from GitHub".to_string())
        }
        StatsError::Score(e) => {
            error!("Scoring failed on upstream data: {}", e);
            AppError::Upstream(e.to_string())
        }
    }
}

/// Configure stats routes
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/stats/{username}").route(web::get().to(get_stats)));
}
