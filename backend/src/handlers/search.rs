//! Search handlers
//!
//! Login autocompletion backed by GitHub user search.

use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::error::AppError;
use crate::handlers::stats::map_stats_error;

/// GET /api/search/{query}
///
/// Up to five logins containing `query`, as `[{login, avatar_url}]`.
pub async fn search_users(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let query = path.into_inner();

    let suggestions = state
        .stats
        .search(&query)
        .await
        .map_err(map_stats_error)?;

    Ok(HttpResponse::Ok().json(suggestions))
}

/// Configure search routes
pub fn configure_search_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/search/{query}").route(web::get().to(search_users)));
}
