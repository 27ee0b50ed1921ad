//! Image proxy handlers

use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;
use tracing::{error, warn};

use crate::AppState;
use crate::error::AppError;
use crate::models::ImageProxyQuery;
use crate::services::ImageProxyError;

/// GET /api/image-proxy?url={url}
///
/// Stream a remote image back with the upstream content type.
pub async fn proxy_image(
    state: web::Data<AppState>,
    query: web::Query<ImageProxyQuery>,
) -> Result<HttpResponse, AppError> {
    let image = state
        .image_proxy
        .fetch(query.url.as_deref())
        .await
        .map_err(map_image_proxy_error)?;

    let body = image
        .response
        .bytes_stream()
        .inspect_err(|e| warn!("Image stream interrupted: {}", e));

    Ok(HttpResponse::Ok()
        .content_type(image.content_type)
        .streaming(body))
}

/// Map image proxy errors to application errors
fn map_image_proxy_error(e: ImageProxyError) -> AppError {
    match e {
        ImageProxyError::MissingUrl | ImageProxyError::InvalidUrl(_) => {
            AppError::Validation(e.to_string())
        }
        ImageProxyError::UpstreamStatus(_) | ImageProxyError::Http(_) => {
            error!("Image proxy failed: {}", e);
            AppError::Upstream("Failed to fetch image".to_string())
        }
    }
}

/// Configure image proxy routes
pub fn configure_image_proxy_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/image-proxy").route(web::get().to(proxy_image)));
}
